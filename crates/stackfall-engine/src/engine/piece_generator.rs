use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{Piece, PieceKind};

/// Uniform random piece source.
///
/// The same seed always yields the same sequence of pieces, which keeps tests and debug
/// sessions reproducible.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }

    /// Draws a fresh piece at the spawn location.
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }
}
