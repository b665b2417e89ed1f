use super::piece::PieceKind;

/// Raw offset added to a colour index to mark a translucent ghost cell.
pub const GHOST_OFFSET: u8 = 8;

/// A single cell of the field or of a piece shape.
///
/// The integer encoding used by [`Block::to_raw`] is `0` for an empty cell, `1..=7` for a
/// locked or falling cell of a given [`PieceKind`], and `9..=15` for the translucent ghost
/// variant of the same colour (`base + 8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Solid cell of a specific piece kind.
    Piece(PieceKind),
    /// Ghost (landing preview) cell of a specific piece kind.
    Ghost(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    #[must_use]
    pub const fn is_ghost(self) -> bool {
        matches!(self, Block::Ghost(_))
    }

    /// Returns the integer colour index of this cell.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.color_index(),
            Block::Ghost(kind) => kind.color_index() + GHOST_OFFSET,
        }
    }

    /// Parses an integer colour index. Returns `None` for `8` and anything above `15`.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if raw == 0 {
            return Some(Block::Empty);
        }
        let ghost = raw > GHOST_OFFSET;
        let base = raw % GHOST_OFFSET;
        if base == 0 || raw >= 2 * GHOST_OFFSET {
            return None;
        }
        match PieceKind::from_color_index(base) {
            Some(kind) if ghost => Some(Block::Ghost(kind)),
            Some(kind) => Some(Block::Piece(kind)),
            None => None,
        }
    }

    /// Shifts a solid cell to its ghost variant. Other cells are returned unchanged.
    #[must_use]
    pub const fn to_ghost(self) -> Self {
        match self {
            Block::Piece(kind) => Block::Ghost(kind),
            other => other,
        }
    }

    /// Reduces the cell modulo the ghost offset, i.e. back to its base colour.
    #[must_use]
    pub const fn to_solid(self) -> Self {
        match self {
            Block::Ghost(kind) => Block::Piece(kind),
            other => other,
        }
    }
}
