use std::cell::Cell;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Frame, layout::Position};
use stackfall_engine::{Command, GameSession, SessionConfig};
use tracing::debug;

use crate::{
    command::play::controller::Controller,
    tui::{App, Tui},
    view::{PlayLayout, PlayView, widgets::ButtonBar},
};

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    controller: Controller,
    fps: u32,
    show_ghost: bool,
    debug: bool,
    tick: u64,
    is_exiting: bool,
    /// Layout of the last drawn screen, used to hit-test mouse clicks.
    layout: Cell<Option<PlayLayout>>,
}

impl PlayApp {
    pub(crate) fn new(config: SessionConfig, fps: u32) -> Self {
        Self {
            session: GameSession::new(config),
            controller: Controller::default(),
            fps,
            show_ghost: true,
            debug: false,
            tick: 0,
            is_exiting: false,
            layout: Cell::new(None),
        }
    }

    pub(crate) fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    pub(crate) fn debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind == KeyEventKind::Press {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.is_exiting = true;
                    return;
                }
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                    self.is_exiting = true;
                    return;
                }
                KeyCode::Char('p' | 'P') => {
                    _ = self.session.apply(Command::TogglePause);
                    return;
                }
                KeyCode::F(3) => {
                    self.debug = !self.debug;
                    return;
                }
                _ => {}
            }
        }
        self.controller.handle_key(key);
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(layout) = self.layout.get() else {
            return;
        };
        let position = Position::new(mouse.column, mouse.row);
        if let Some(command) = ButtonBar::hit(layout.buttons, position) {
            debug!(?command, "button clicked");
            _ = self.session.apply(command);
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(f64::from(self.fps));
        self.controller = Controller::new(tui.reports_key_release());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(&key),
            Event::Mouse(mouse) => self.handle_mouse(&mouse),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let view = PlayView::new(&self.session, self.fps)
            .show_ghost(self.show_ghost)
            .debug(self.debug);
        self.layout.set(Some(view.layout(frame.area())));
        frame.render_widget(view, frame.area());
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.tick += 1;
        for command in self.controller.poll(self.tick) {
            _ = self.session.apply(command);
        }
        self.session.advance_frame();
    }
}
