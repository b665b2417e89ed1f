use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Fixed-rate frame clock multiplexed with terminal input.
///
/// Frames are emitted every `frame_interval`. A frame that is late by more than one interval
/// restarts the cadence from now, so a stalled terminal never causes a burst of catch-up
/// frames. A render is requested after every frame and every terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    frame_interval: Option<Duration>,
    next_frame: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with no frame clock.
    pub fn new() -> Self {
        Self {
            frame_interval: None,
            next_frame: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the frame interval.
    ///
    /// Pass `None` to stop emitting frames.
    pub(super) fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.frame_interval = interval;
        self.next_frame = Instant::now() + interval.unwrap_or_default();
    }

    /// Returns the next event.
    ///
    /// Blocks until a frame is due or a crossterm event occurs.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.frame_interval
                && now >= self.next_frame
            {
                self.next_frame = next_deadline(self.next_frame, interval, now);
                self.dirty = true;
                return Ok(TuiEvent::Frame);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if self.frame_interval.is_some() {
                let timeout = self.next_frame.saturating_duration_since(now);
                if !event::poll(timeout)? {
                    continue;
                }
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}

fn next_deadline(deadline: Instant, interval: Duration, now: Instant) -> Instant {
    let next = deadline + interval;
    if next <= now { now + interval } else { next }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_deadline_keeps_cadence() {
        let start = Instant::now();
        let interval = Duration::from_millis(16);
        let now = start + Duration::from_millis(3);
        assert_eq!(next_deadline(start, interval, now), start + interval);
    }

    #[test]
    fn test_next_deadline_skips_missed_frames() {
        let start = Instant::now();
        let interval = Duration::from_millis(16);
        let now = start + Duration::from_millis(100);
        assert_eq!(next_deadline(start, interval, now), now + interval);
    }
}
