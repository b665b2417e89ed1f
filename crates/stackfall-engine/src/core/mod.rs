pub use self::{block::*, board::*, piece::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod piece;
