use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use stackfall_engine::Command;

/// Returns the command bound to `code`.
pub(crate) fn key_command(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Up => Command::HardDrop,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'x' => Command::RotateRight,
            'z' => Command::RotateLeft,
            'r' => Command::Reset,
            'c' | ' ' => Command::Stock,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

/// Key-down state sampled on a frame grid.
///
/// A bound command fires on frames that are a multiple of its poll interval while its key
/// is down. A press between two polls fires once on the next poll even if the key was
/// already released, and on terminals without release events that one-shot latch is the
/// only source of input (auto-repeat keeps re-arming it).
#[derive(Debug, Default)]
pub(crate) struct Controller {
    held: HashSet<Command>,
    latched: HashSet<Command>,
    reports_release: bool,
}

impl Controller {
    pub(crate) fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            ..Self::default()
        }
    }

    /// Records a key event. Returns whether the key is bound.
    pub(crate) fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Some(command) = key_command(key.code) else {
            return false;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.latched.insert(command);
                if self.reports_release {
                    self.held.insert(command);
                }
            }
            KeyEventKind::Release => {
                self.held.remove(&command);
            }
        }
        true
    }

    /// Returns the commands due on `frame`, in [`Command::ALL`] order.
    pub(crate) fn poll(&mut self, frame: u64) -> Vec<Command> {
        let mut due = vec![];
        for command in Command::ALL {
            if frame % command.poll_interval() != 0 {
                continue;
            }
            let latched = self.latched.remove(&command);
            if latched || self.held.contains(&command) {
                due.push(command);
            }
        }
        due
    }
}
