use std::time::Duration;

use tracing::{debug, info};

use crate::{
    PieceCollisionError,
    core::{Board, DEFAULT_HEIGHT, DEFAULT_WIDTH, Piece},
};

use super::{Command, PieceGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Board dimensions and piece seed of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    /// Seed of the piece sequence; `None` draws a random one.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    #[must_use]
    pub fn with_size(self, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}

/// One game: the board, its piece source and the frame clock.
///
/// The session is the only owner of game state. Input handlers and renderers borrow it;
/// nothing is kept in globals.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    generator: PieceGenerator,
    state: SessionState,
    frame: u64,
    locked_pieces: usize,
}

impl GameSession {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let mut generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        let board = Self::fresh_board(&config, &mut generator);
        let state = Self::initial_state(&board);
        Self {
            config,
            board,
            generator,
            state,
            frame: 0,
            locked_pieces: 0,
        }
    }

    fn fresh_board(config: &SessionConfig, generator: &mut PieceGenerator) -> Board {
        let active = generator.next_piece();
        let next = generator.next_piece();
        let mut board = Board::new(config.width, config.height, active, next);
        board.update_speed();
        board
    }

    /// A board too narrow or crowded for the first piece starts out finished.
    fn initial_state(board: &Board) -> SessionState {
        if board.check_block(&board.active_block().placement()) {
            SessionState::Playing
        } else {
            info!(
                width = board.width(),
                height = board.height(),
                "first piece does not fit, game over"
            );
            SessionState::GameOver
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of frames simulated since the game started.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.board.cleared_line_count()
    }

    #[must_use]
    pub fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    #[must_use]
    pub fn active_block(&self) -> &Piece {
        self.board.active_block()
    }

    #[must_use]
    pub fn ghost_block(&self) -> Piece {
        self.board.ghost_block()
    }

    /// Play time at `fps` simulated frames per second.
    #[must_use]
    pub fn duration(&self, fps: u64) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let fps = fps.max(1);
        let secs = self.frame / fps;
        let nanos = (self.frame % fps) * NANOS_PER_SEC / fps;
        Duration::new(secs, u32::try_from(nanos).unwrap_or(0))
    }

    /// Discards the board and starts a new game with fresh pieces.
    pub fn reset(&mut self) {
        self.board = Self::fresh_board(&self.config, &mut self.generator);
        self.state = Self::initial_state(&self.board);
        self.frame = 0;
        self.locked_pieces = 0;
        debug!(
            width = self.config.width,
            height = self.config.height,
            "session reset"
        );
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Applies one player command.
    ///
    /// Piece commands are ignored unless the game is running. A rejected move, rotation or
    /// stock leaves the board untouched and reports [`PieceCollisionError`].
    pub fn apply(&mut self, command: Command) -> Result<(), PieceCollisionError> {
        match command {
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::TogglePause => {
                self.toggle_pause();
                Ok(())
            }
            _ if !self.state.is_playing() => Ok(()),
            Command::MoveLeft => self.board.move_active(-1, 0),
            Command::MoveRight => self.board.move_active(1, 0),
            Command::SoftDrop => self.board.move_active(0, 1),
            Command::RotateRight => self.board.rotate_active_right(),
            Command::RotateLeft => self.board.rotate_active_left(),
            Command::Stock => self.board.stock(&mut self.generator),
            Command::HardDrop => {
                if self.board.fall_block(self.frame) {
                    self.on_piece_locked();
                }
                Ok(())
            }
        }
    }

    /// Simulates one frame. Returns whether the active piece was fixed.
    pub fn advance_frame(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        self.frame += 1;
        let locked = self.board.advance_frame(self.frame);
        if locked {
            self.on_piece_locked();
        }
        self.board.update_speed();
        locked
    }

    fn on_piece_locked(&mut self) {
        self.locked_pieces += 1;
        if self.board.spawn_next(&mut self.generator).is_err() {
            self.state = SessionState::GameOver;
            info!(
                frame = self.frame,
                lines = self.board.cleared_line_count(),
                pieces = self.locked_pieces,
                "game over"
            );
        }
    }
}
