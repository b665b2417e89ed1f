use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{GameSession, LockState};

use crate::view::widgets::style;

/// Internal state of the active piece and the frame clock.
#[derive(Debug)]
pub struct DebugDisplay<'a> {
    session: &'a GameSession,
    fps: u32,
    block: Option<BlockWidget<'a>>,
}

impl<'a> DebugDisplay<'a> {
    pub fn new(session: &'a GameSession, fps: u32) -> Self {
        Self {
            session,
            fps,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn entries(&self) -> [(&'static str, String); 7] {
        let piece = self.session.active_block();
        let location = piece.location();
        let lock = match self.session.board().lock_state() {
            LockState::Falling => "-".to_owned(),
            LockState::GracePeriod { since } => {
                format!("{}f", self.session.frame().saturating_sub(since))
            }
        };
        [
            ("FRAME", self.session.frame().to_string()),
            ("POS", format!("{},{}", location.x(), location.y())),
            ("ROT", piece.rotation().value().to_string()),
            ("SPEED", format!("{:.2}", piece.speed())),
            ("GRAVITY", format!("{}f", piece.gravity_interval())),
            ("LOCK", lock),
            ("FPS", self.fps.to_string()),
        ]
    }
}

impl Widget for DebugDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let entries = self.entries();
        let rows = Layout::vertical(entries.iter().map(|_| Constraint::Length(1))).split(area);
        for ((label, value), row) in entries.iter().zip(rows.iter()) {
            super::render_label_value(label, value, style::DEFAULT, *row, buf);
        }
    }
}
