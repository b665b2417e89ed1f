//! Game flow on top of the core board.
//!
//! - [`GameSession`] - one game: board, piece generator, frame counter, session state
//! - [`Command`] - player actions the session understands
//! - [`PieceGenerator`] - seeded random piece source
//!
//! # Frame Loop
//!
//! The host calls [`GameSession::advance_frame`] once per frame (nominally 60 times a
//! second) and forwards player input through [`GameSession::apply`] in between:
//!
//! 1. Commands move, rotate or stock the active piece; illegal ones are rejected
//! 2. Gravity moves the piece down every `round(60 / speed)` frames
//! 3. A resting piece is fixed after the lock delay and completed rows are cleared
//! 4. The next piece spawns; if it collides the game is over
//!
//! # Example
//!
//! ```
//! use stackfall_engine::{Command, GameSession, SessionConfig};
//!
//! let mut session = GameSession::new(SessionConfig::default().with_seed(42));
//! session.apply(Command::MoveLeft).ok();
//! session.apply(Command::HardDrop).ok();
//! for _ in 0..10 {
//!     session.advance_frame();
//! }
//! assert_eq!(session.locked_pieces(), 1);
//! ```

pub use self::{command::*, game_session::*, piece_generator::*};

mod command;
mod game_session;
mod piece_generator;
