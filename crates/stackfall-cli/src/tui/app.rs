use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for frame-driven TUI applications.
///
/// Applications executed by `Tui::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Tui::run()`, after the terminal has been set up. Use this to
    /// configure the frame rate.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen (called after every frame or terminal event).
    fn draw(&self, frame: &mut Frame);

    /// Advances the simulation by one frame.
    fn update(&mut self, tui: &mut Tui);
}
