use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Position, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};
use stackfall_engine::Command;

use crate::view::widgets::style;

const BUTTON_WIDTH: u16 = 8;

/// Clickable on-screen buttons for movement and rotation.
#[derive(Debug, Default)]
pub struct ButtonBar;

impl ButtonBar {
    pub const BUTTONS: [(&'static str, Command); 6] = [
        ("◀", Command::MoveLeft),
        ("▶", Command::MoveRight),
        ("▼", Command::SoftDrop),
        ("DROP", Command::HardDrop),
        ("↺", Command::RotateLeft),
        ("↻", Command::RotateRight),
    ];

    fn areas(area: Rect) -> [Rect; 6] {
        area.layout(
            &Layout::horizontal(Self::BUTTONS.map(|_| Constraint::Length(BUTTON_WIDTH)))
                .flex(Flex::Center)
                .spacing(1),
        )
    }

    /// Returns the command of the button under `position`, if any.
    pub fn hit(area: Rect, position: Position) -> Option<Command> {
        Self::areas(area)
            .into_iter()
            .zip(Self::BUTTONS)
            .find_map(|(button, (_, command))| button.contains(position).then_some(command))
    }
}

impl Widget for ButtonBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (button, (label, _)) in Self::areas(area).into_iter().zip(Self::BUTTONS) {
            let block = BlockWidget::bordered().style(style::BUTTON);
            let inner = block.inner(button);
            block.render(button, buf);
            Line::styled(label, style::BUTTON)
                .centered()
                .render(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_are_centered_and_hit() {
        // 6 * 8 + 5 = 53 columns, centered in 63.
        let area = Rect::new(0, 10, 63, 3);
        let areas = ButtonBar::areas(area);
        assert_eq!(areas[0], Rect::new(5, 10, 8, 3));
        assert_eq!(areas[5].right(), 58);

        assert_eq!(
            ButtonBar::hit(area, Position::new(5, 11)),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            ButtonBar::hit(area, Position::new(41, 12)),
            Some(Command::RotateLeft)
        );
        assert_eq!(ButtonBar::hit(area, Position::new(13, 11)), None);
        assert_eq!(ButtonBar::hit(area, Position::new(2, 11)), None);
        assert_eq!(ButtonBar::hit(area, Position::new(20, 9)), None);
    }

    #[test]
    fn test_render_labels() {
        let area = Rect::new(0, 0, 63, 3);
        let mut buf = Buffer::empty(area);
        ButtonBar.render(area, &mut buf);
        let middle = (0..area.width)
            .map(|x| buf[(x, 1)].symbol())
            .collect::<String>();
        assert!(middle.contains("DROP"));
        assert!(middle.contains('◀'));
    }
}
