use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize as _},
    text::{Line, Text},
    widgets::{Block as BlockWidget, BorderType, Clear, Widget},
};
use stackfall_engine::SessionState;

use crate::view::widgets::style;

/// Banner across the middle of the field while the game is paused or over.
#[derive(Debug, Clone, Copy)]
pub struct StatePopup {
    state: SessionState,
}

impl StatePopup {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }

    fn content(self) -> Option<(&'static str, &'static str, Style)> {
        match self.state {
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", "P to resume", style::PAUSED)),
            SessionState::GameOver => Some(("GAME OVER", "R to restart", style::GAME_OVER)),
        }
    }
}

impl Widget for StatePopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((title, hint, style)) = self.content() else {
            return;
        };
        let [_, banner, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(area);

        Clear.render(banner, buf);
        let frame = BlockWidget::bordered()
            .border_type(BorderType::Double)
            .style(style);
        let inner = frame.inner(banner);
        frame.render(banner, buf);
        Text::from(vec![Line::from(title).bold(), Line::from(hint)])
            .style(style)
            .centered()
            .render(inner, buf);
    }
}
