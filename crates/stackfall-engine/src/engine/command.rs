/// Frames between two polls of the movement keys.
pub const MOVE_POLL_INTERVAL: u64 = 3;

/// Frames between two polls of the operation keys.
pub const OPERATION_POLL_INTERVAL: u64 = 5;

/// Player actions accepted by [`GameSession::apply`](super::GameSession::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Move one row down.
    SoftDrop,
    /// Drop to the landing point. The lock delay still applies.
    HardDrop,
    RotateRight,
    RotateLeft,
    /// Swap the active piece with the stock slot.
    Stock,
    /// Start a new game.
    Reset,
    TogglePause,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateRight,
        Command::RotateLeft,
        Command::Stock,
        Command::Reset,
        Command::TogglePause,
    ];

    /// Whether this command belongs to the movement group.
    #[must_use]
    pub const fn is_movement(self) -> bool {
        matches!(
            self,
            Command::MoveLeft | Command::MoveRight | Command::SoftDrop | Command::HardDrop
        )
    }

    /// Number of frames between two polls of a key bound to this command.
    #[must_use]
    pub const fn poll_interval(self) -> u64 {
        if self.is_movement() {
            MOVE_POLL_INTERVAL
        } else {
            OPERATION_POLL_INTERVAL
        }
    }
}
