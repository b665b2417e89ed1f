use std::{io, time::Duration};

use anyhow::Context as _;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};

use crate::tui::{
    App,
    event::TuiEvent,
    event_loop::EventLoop,
};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
    reports_key_release: bool,
}

impl Tui {
    /// Creates a new Tui.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame rate (Hz, frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.events
            .set_frame_interval(Some(Duration::from_secs_f64(1.0 / rate)));
    }

    /// Whether the terminal reports key release events.
    ///
    /// Only known once `run()` has set up the terminal.
    pub fn reports_key_release(&self) -> bool {
        self.reports_key_release
    }

    /// Runs the application.
    ///
    /// 1. Enables mouse capture and, where supported, key release reporting
    /// 2. Calls `app.init()` for initialization
    /// 3. Runs the event loop until `app.should_exit()` returns true
    ///    - `Event::Frame`: calls `app.update()`
    ///    - `Event::Render`: calls `app.draw()`
    ///    - `Event::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            let capture = InputCapture::enable().context("Failed to configure terminal input")?;
            self.reports_key_release = capture.keyboard_enhanced;
            tracing::debug!(
                key_release = self.reports_key_release,
                "terminal input configured"
            );

            app.init(&mut self);

            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Frame => {
                        app.update(&mut self);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}

/// Mouse capture and keyboard enhancement, undone on drop.
struct InputCapture {
    keyboard_enhanced: bool,
}

impl InputCapture {
    fn enable() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture)?;
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for InputCapture {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        _ = execute!(stdout, DisableMouseCapture);
    }
}
