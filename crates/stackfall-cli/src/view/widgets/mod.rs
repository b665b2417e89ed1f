use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Widget,
};

pub use self::{
    block_display::*, board_display::*, button_bar::*, debug_display::*, help_line::*,
    info_display::*, piece_display::*, state_popup::*,
};

mod block_display;
mod board_display;
mod button_bar;
mod debug_display;
mod help_line;
mod info_display;
mod piece_display;
mod state_popup;

pub mod color {
    use ratatui::style::Color;
    use stackfall_engine::PieceKind;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(63, 63, 63);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const fn piece(kind: PieceKind) -> Color {
        match kind {
            PieceKind::I => CYAN,
            PieceKind::O => YELLOW,
            PieceKind::S => GREEN,
            PieceKind::Z => RED,
            PieceKind::J => BLUE,
            PieceKind::L => ORANGE,
            PieceKind::T => MAGENTA,
        }
    }
}

pub mod style {
    use ratatui::style::{Color, Style};
    use stackfall_engine::PieceKind;

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const BUTTON: Style = fg_bg(color::WHITE, color::DARK_GRAY);
    pub const PAUSED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    pub const fn piece(kind: PieceKind) -> Style {
        bg_only(color::piece(kind))
    }

    /// Landing preview: outlined in the piece color.
    pub const fn ghost(kind: PieceKind) -> Style {
        fg_bg(color::piece(kind), color::BLACK)
    }
}

/// Renders `label` flush left and `value` flush right on one line.
fn render_label_value(label: &str, value: &str, style: Style, area: Rect, buf: &mut Buffer) {
    let [label_area, value_area] =
        area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
    Line::styled(label, style)
        .left_aligned()
        .render(label_area, buf);
    Line::styled(value, style)
        .right_aligned()
        .render(value_area, buf);
}
