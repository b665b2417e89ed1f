use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::block::Block;

/// Number of cells in a piece shape.
pub const SHAPE_CELLS: usize = 8;

/// Number of columns in one row of a piece shape.
const SHAPE_COLUMNS: usize = 4;

/// Gravity interval in frames for a piece with speed `1.0`.
pub const GRAVITY_BASELINE_FRAMES: u32 = 60;

/// Speed of a freshly spawned piece.
pub const BASE_SPEED: f64 = 0.5;

/// Piece shape stored as 2 rows of 4 cells.
///
/// Cell `i` lives at column `i % 4` of row `i / 4` before rotation.
pub type PieceShape = [Block; SHAPE_CELLS];

/// Integer grid coordinate.
///
/// `x` grows to the right, `y` grows downward. `y` may be negative while a piece sits above
/// the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: one step clockwise
/// - `2`: two steps
/// - `3`: one step counter-clockwise
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value % 4)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self((self.0 + 3) % 4)
    }
}

/// Immutable description of where a shape would sit on the board.
///
/// Collision checks take a placement instead of a live [`Piece`], so that speculative moves
/// can be validated before anything is mutated:
///
/// ```
/// use stackfall_engine::{Board, Piece, PieceKind};
///
/// let board = Board::new(10, 20, Piece::new(PieceKind::T), Piece::new(PieceKind::I));
/// let candidate = board.active_block().placement().moved_by(-1, 0);
/// assert!(board.check_block(&candidate));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePlacement {
    shape: PieceShape,
    rotation: Rotation,
    location: Location,
}

impl PiecePlacement {
    #[must_use]
    pub const fn new(shape: PieceShape, rotation: Rotation, location: Location) -> Self {
        Self {
            shape,
            rotation,
            location,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub const fn moved_by(self, dx: i32, dy: i32) -> Self {
        Self {
            location: self.location.offset(dx, dy),
            ..self
        }
    }

    #[must_use]
    pub const fn at_y(self, y: i32) -> Self {
        Self {
            location: Location::new(self.location.x, y),
            ..self
        }
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..self
        }
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self {
            rotation: self.rotation.rotated_left(),
            ..self
        }
    }

    /// Returns the absolute location of shape cell `index` under the current rotation.
    ///
    /// The four transforms are fixed offsets tuned to the 2×4 shape layout; they are not a
    /// rotation matrix around a common centre.
    #[must_use]
    pub const fn rotated_location(&self, index: usize) -> Location {
        let offset = local_offset(index, self.rotation);
        self.location.offset(offset.x, offset.y)
    }

    /// Returns every shape cell together with its absolute location.
    pub fn cells(&self) -> impl Iterator<Item = (Location, Block)> + '_ {
        self.shape
            .iter()
            .enumerate()
            .map(|(i, &block)| (self.rotated_location(i), block))
    }

    /// Returns the non-empty cells together with their absolute locations.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(Location, Block), SHAPE_CELLS> {
        self.cells().filter(|(_, block)| !block.is_empty()).collect()
    }
}

/// Offset of shape cell `index` relative to the piece anchor under `rotation`.
///
/// # Panics
///
/// Panics if `index` is not below [`SHAPE_CELLS`].
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn local_offset(index: usize, rotation: Rotation) -> Location {
    assert!(index < SHAPE_CELLS);
    let by = (index / SHAPE_COLUMNS) as i32;
    let bx = (index % SHAPE_COLUMNS) as i32;
    match rotation.0 {
        0 => Location::new(bx, by),
        1 => Location::new(by + 1, -bx + 2),
        2 => Location::new(-bx + 3, -by + 1),
        _ => Location::new(-by + 2, bx - 1),
    }
}

/// A tetromino with its shape, anchor location, rotation and fall speed.
///
/// Unlike [`PiecePlacement`], a `Piece` is mutated in place by movement, rotation and
/// gravity. The board only applies a change after the corresponding placement passed
/// [`Board::check_block`](super::board::Board::check_block).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    shape: PieceShape,
    rotation: Rotation,
    location: Location,
    speed: f64,
}

impl Piece {
    /// Anchor location of a freshly spawned piece.
    pub const SPAWN_LOCATION: Location = Location::new(3, -1);

    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::from_shape(kind.shape())
    }

    /// Creates a piece at the spawn location from an arbitrary shape.
    #[must_use]
    pub const fn from_shape(shape: PieceShape) -> Self {
        Self {
            shape,
            rotation: Rotation(0),
            location: Self::SPAWN_LOCATION,
            speed: BASE_SPEED,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    pub const fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub const fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Returns the piece kind of the first non-empty shape cell.
    #[must_use]
    pub fn kind(&self) -> Option<PieceKind> {
        self.shape.iter().find_map(|block| match block.to_solid() {
            Block::Piece(kind) => Some(kind),
            _ => None,
        })
    }

    #[must_use]
    pub const fn placement(&self) -> PiecePlacement {
        PiecePlacement::new(self.shape, self.rotation, self.location)
    }

    /// Moves the piece to a placement that has already been validated.
    pub(crate) const fn apply(&mut self, placement: PiecePlacement) {
        self.shape = placement.shape;
        self.rotation = placement.rotation;
        self.location = placement.location;
    }

    #[must_use]
    pub const fn rotated_location(&self, index: usize) -> Location {
        self.placement().rotated_location(index)
    }

    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(Location, Block), SHAPE_CELLS> {
        self.placement().occupied_cells()
    }

    /// Returns a copy carrying another shape at the same location and rotation.
    #[must_use]
    pub const fn with_shape(self, shape: PieceShape) -> Self {
        Self { shape, ..self }
    }

    /// Returns the translucent drop preview of this piece at row `y`.
    #[must_use]
    pub fn ghost(&self, y: i32) -> Self {
        Self {
            shape: self.shape.map(Block::to_ghost),
            location: Location::new(self.location.x, y),
            ..*self
        }
    }

    /// Number of frames between two gravity steps, `round(60 / speed)`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn gravity_interval(&self) -> u64 {
        let frames = (f64::from(GRAVITY_BASELINE_FRAMES) / self.speed).round();
        if frames.is_nan() || frames < 1.0 {
            return 1;
        }
        frames as u64
    }

    #[must_use]
    pub fn is_gravity_frame(&self, frame: u64) -> bool {
        frame % self.gravity_interval() == 0
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::S,
            3 => PieceKind::Z,
            4 => PieceKind::J,
            5 => PieceKind::L,
            _ => PieceKind::T,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Colour index stored in the field (`1..=7`).
    #[must_use]
    pub const fn color_index(self) -> u8 {
        self as u8 + 1
    }

    #[must_use]
    pub const fn from_color_index(index: u8) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = {
    use Block::Empty as E;
    const I: Block = Block::Piece(PieceKind::I);
    const O: Block = Block::Piece(PieceKind::O);
    const S: Block = Block::Piece(PieceKind::S);
    const Z: Block = Block::Piece(PieceKind::Z);
    const J: Block = Block::Piece(PieceKind::J);
    const L: Block = Block::Piece(PieceKind::L);
    const T: Block = Block::Piece(PieceKind::T);
    [
        [E, E, E, E, I, I, I, I],
        [E, O, O, E, E, O, O, E],
        [E, S, S, E, S, S, E, E],
        [Z, Z, E, E, E, Z, Z, E],
        [J, E, E, E, J, J, J, E],
        [E, E, L, E, L, L, L, E],
        [E, T, E, E, T, T, T, E],
    ]
};
