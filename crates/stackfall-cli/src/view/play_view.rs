use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    text::Line,
    widgets::{Block, Padding, Widget},
};
use stackfall_engine::{GameSession, SessionState};

use crate::view::{
    PlayLayout,
    widgets::{
        BoardDisplay, ButtonBar, DebugDisplay, HelpLine, InfoDisplay, PieceDisplay, StatePopup,
        color, style,
    },
};

const HELP: &[(&str, &str)] = &[
    ("←/→", "Move"),
    ("↓", "Soft drop"),
    ("↑", "Drop"),
    ("Z/X", "Rotate"),
    ("C/Space", "Stock"),
    ("R", "Reset"),
    ("P", "Pause"),
    ("F3", "Debug"),
    ("Q", "Quit"),
];

/// The whole play screen for one session.
#[derive(Debug)]
pub struct PlayView<'a> {
    session: &'a GameSession,
    fps: u32,
    show_ghost: bool,
    debug: bool,
}

impl<'a> PlayView<'a> {
    pub fn new(session: &'a GameSession, fps: u32) -> Self {
        Self {
            session,
            fps,
            show_ghost: true,
            debug: false,
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    pub fn debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }

    pub fn layout(&self, area: Rect) -> PlayLayout {
        let board = self.session.board();
        PlayLayout::compute(area, board.width(), board.height(), self.debug)
    }

    fn border_color(&self) -> Color {
        match self.session.state() {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn panel(&self, title: &'static str) -> Block<'static> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(1))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }
}

impl Widget for PlayView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PlayView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout(area);
        let board = self.session.board();

        Block::new().style(style::DEFAULT).render(area, buf);

        let mut field = BoardDisplay::new(board)
            .scale(layout.scale)
            .active(*self.session.active_block())
            .block(
                Block::bordered()
                    .border_style(self.border_color())
                    .style(style::DEFAULT),
            );
        if self.show_ghost {
            field = field.ghost(self.session.ghost_block());
        }
        field.render(layout.board, buf);

        PieceDisplay::new(Some(board.next_block()))
            .scale(layout.scale)
            .block(self.panel("NEXT"))
            .render(layout.next, buf);
        PieceDisplay::new(board.stocked_block())
            .scale(layout.scale)
            .block(self.panel("STOCK"))
            .render(layout.stock, buf);
        InfoDisplay::new(self.session, self.fps)
            .block(self.panel("INFO"))
            .render(layout.info, buf);
        if let Some(debug_area) = layout.debug {
            DebugDisplay::new(self.session, self.fps)
                .block(self.panel("DEBUG"))
                .render(debug_area, buf);
        }
        ButtonBar.render(layout.buttons, buf);
        HelpLine::new(HELP).render(layout.help, buf);

        StatePopup::new(self.session.state()).render(layout.board, buf);
    }
}
