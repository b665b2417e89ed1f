use std::mem;

use tracing::{debug, trace};

use crate::{PieceCollisionError, engine::PieceGenerator};

use super::{
    block::Block,
    piece::{Location, Piece, PiecePlacement},
};

/// Default field width in cells.
pub const DEFAULT_WIDTH: usize = 10;

/// Default field height in cells.
pub const DEFAULT_HEIGHT: usize = 20;

/// Largest accepted field width or height.
pub const MAX_DIMENSION: usize = 256;

/// Number of frames a resting piece may still be adjusted before it is fixed.
pub const FIX_BLOCK_FRAME_DELAY: u64 = 10;

/// Lock-delay state of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LockState {
    /// The piece has not touched the stack yet.
    Falling,
    /// The piece came to rest at frame `since` and is waiting out the lock delay.
    GracePeriod { since: u64 },
}

/// The playing field with its active, next and stocked pieces.
///
/// # Layout
///
/// Cells are stored row-major in a flat buffer where cell `(x, y)` lives at index
/// `y * width + x`. The buffer holds `width * height + 1` cells; the trailing cell is never
/// addressed by a piece inside the field.
///
/// # Locking
///
/// A piece that cannot move down enters a grace period. Once [`FIX_BLOCK_FRAME_DELAY`]
/// frames have passed since the grace period started, the next [`Board::try_commit`]
/// writes it into the field and clears completed rows. Moving the piece off the stack does
/// not restart the grace period.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::new(10, 20, Piece::new(PieceKind::O), Piece::new(PieceKind::I));
/// assert!(!board.fall_block(0));
/// assert!(board.lock_state().is_grace_period());
/// assert!(board.try_commit(10));
/// assert_eq!(board.cleared_line_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    field: Vec<Block>,
    active: Piece,
    next: Piece,
    stocked: Option<Piece>,
    lock_state: LockState,
    cleared_line_count: usize,
}

impl Board {
    /// Creates an empty board with the given dimensions and pieces.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero or larger than [`MAX_DIMENSION`].
    #[must_use]
    pub fn new(width: usize, height: usize, active: Piece, next: Piece) -> Self {
        assert!((1..=MAX_DIMENSION).contains(&width), "invalid width {width}");
        assert!(
            (1..=MAX_DIMENSION).contains(&height),
            "invalid height {height}"
        );
        let mut board = Self {
            width,
            height,
            field: Vec::new(),
            active,
            next,
            stocked: None,
            lock_state: LockState::Falling,
            cleared_line_count: 0,
        };
        board.reset_field();
        board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw field buffer, including the trailing spare cell.
    #[must_use]
    pub fn field(&self) -> &[Block] {
        &self.field
    }

    /// Returns an iterator over the visible rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.field[..self.width * self.height].chunks_exact(self.width)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Block {
        if x >= self.width || y >= self.height {
            return Block::Empty;
        }
        self.field[y * self.width + x]
    }

    /// Writes a single cell. Out-of-range coordinates are ignored.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        if x < self.width && y < self.height {
            self.field[y * self.width + x] = block;
        }
    }

    #[must_use]
    pub fn active_block(&self) -> &Piece {
        &self.active
    }

    #[must_use]
    pub fn next_block(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn stocked_block(&self) -> Option<&Piece> {
        self.stocked.as_ref()
    }

    pub fn set_active_block(&mut self, piece: Piece) {
        self.active = piece;
    }

    pub fn set_next_block(&mut self, piece: Piece) {
        self.next = piece;
    }

    pub fn set_stocked_block(&mut self, piece: Option<Piece>) {
        self.stocked = piece;
    }

    #[must_use]
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    #[must_use]
    pub fn cleared_line_count(&self) -> usize {
        self.cleared_line_count
    }

    /// Empties every cell, including the trailing spare cell.
    pub fn reset_field(&mut self) {
        self.field.clear();
        self.field.resize(self.width * self.height + 1, Block::Empty);
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn width_i32(&self) -> i32 {
        self.width as i32
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn height_i32(&self) -> i32 {
        self.height as i32
    }

    /// Flat index of a location inside the horizontal bounds.
    ///
    /// Returns `None` when the index is negative, i.e. the cell is above the field.
    #[expect(clippy::cast_sign_loss)]
    fn index(&self, location: Location) -> Option<usize> {
        let index = location.y() * self.width_i32() + location.x();
        (index >= 0).then_some(index as usize)
    }

    /// Returns whether `placement` is a legal configuration on this board.
    ///
    /// A non-empty cell is illegal when it lies left of, right of or below the field, or
    /// when it overlaps a locked cell. Cells above the field are always legal.
    #[must_use]
    pub fn check_block(&self, placement: &PiecePlacement) -> bool {
        placement.occupied_cells().iter().all(|&(location, _)| {
            if location.x() < 0 || location.x() >= self.width_i32() {
                return false;
            }
            if location.y() >= self.height_i32() {
                return false;
            }
            match self.index(location) {
                None => true,
                Some(index) => self.field[index].is_empty(),
            }
        })
    }

    /// Applies gravity to the active piece and runs [`Board::try_commit`].
    ///
    /// On frames that are a multiple of the piece's gravity interval the piece moves down
    /// one row if it legally can. Returns whether the piece was fixed this frame.
    pub fn advance_frame(&mut self, frame: u64) -> bool {
        if self.active.is_gravity_frame(frame) {
            let below = self.active.placement().moved_by(0, 1);
            if self.check_block(&below) {
                self.active.apply(below);
            }
        }
        self.try_commit(frame)
    }

    /// Runs the lock-delay state machine for the active piece.
    ///
    /// Returns `true` only on the call that fixes the piece into the field.
    pub fn try_commit(&mut self, frame: u64) -> bool {
        let below = self.active.placement().moved_by(0, 1);
        if self.check_block(&below) {
            return false;
        }

        match self.lock_state {
            LockState::Falling => {
                trace!(frame, "piece resting, grace period started");
                self.lock_state = LockState::GracePeriod { since: frame };
                false
            }
            LockState::GracePeriod { since }
                if frame.saturating_sub(since) < FIX_BLOCK_FRAME_DELAY =>
            {
                false
            }
            LockState::GracePeriod { .. } => {
                self.lock_state = LockState::Falling;
                self.fix_block();
                let cleared = self.check_line();
                debug!(
                    frame,
                    x = self.active.location().x(),
                    y = self.active.location().y(),
                    cleared,
                    "piece fixed"
                );
                true
            }
        }
    }

    /// Writes the active piece into the field.
    ///
    /// Ghost cells are reduced to their base colour. Cells above the field or outside its
    /// columns are dropped.
    pub fn fix_block(&mut self) {
        for (location, block) in self.active.occupied_cells() {
            if !(0..self.width_i32()).contains(&location.x()) {
                continue;
            }
            if let Some(index) = self.index(location)
                && let Some(cell) = self.field.get_mut(index)
            {
                *cell = block.to_solid();
            }
        }
    }

    fn is_row_complete(&self, y: usize) -> bool {
        let start = y * self.width;
        self.field
            .get(start..start + self.width)
            .is_some_and(|row| row.iter().all(|block| !block.is_empty()))
    }

    /// Removes row `y`, shifting every row above it down and opening an empty top row.
    fn remove_row(&mut self, y: usize) {
        let start = y * self.width;
        self.field.copy_within(0..start, self.width);
        self.field[..self.width].fill(Block::Empty);
        self.cleared_line_count += 1;
    }

    /// Clears completed rows and returns how many were removed.
    ///
    /// Rows are scanned from `y = height` up to `y = 1`. After a row is removed the same
    /// index is examined again, since the row above has moved into it.
    pub fn check_line(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y >= 1 {
            if self.is_row_complete(y) {
                self.remove_row(y);
                cleared += 1;
                debug!(row = y, total = self.cleared_line_count, "line cleared");
                continue;
            }
            y -= 1;
        }
        cleared
    }

    /// Returns the lowest row the active piece can occupy in its current column.
    ///
    /// Rows are tried from `y = 0` downward up to `y = height`; the result is the last
    /// legal row before the first collision, or `-1` if row `0` already collides.
    #[must_use]
    pub fn calc_landing_point(&self) -> i32 {
        let placement = self.active.placement();
        let height = self.height_i32();
        let mut y = 0;
        while y <= height && self.check_block(&placement.at_y(y)) {
            y += 1;
        }
        y - 1
    }

    /// Returns the ghost preview of the active piece at its landing point.
    #[must_use]
    pub fn ghost_block(&self) -> Piece {
        self.active.ghost(self.calc_landing_point())
    }

    /// Moves the active piece to its landing point and runs [`Board::try_commit`].
    ///
    /// The lock delay still applies, so the first drop onto the stack only starts the grace
    /// period.
    pub fn fall_block(&mut self, frame: u64) -> bool {
        let location = self.active.location();
        self.active
            .set_location(Location::new(location.x(), self.calc_landing_point()));
        self.try_commit(frame)
    }

    /// Sets the active piece speed from the cleared-line count.
    #[expect(clippy::cast_precision_loss)]
    pub fn update_speed(&mut self) {
        let speed = self.cleared_line_count as f64 / 20.0 + 0.5;
        self.active.set_speed(speed);
    }

    fn try_apply(&mut self, placement: PiecePlacement) -> Result<(), PieceCollisionError> {
        if !self.check_block(&placement) {
            return Err(PieceCollisionError);
        }
        self.active.apply(placement);
        Ok(())
    }

    pub fn move_active(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        self.try_apply(self.active.placement().moved_by(dx, dy))
    }

    pub fn rotate_active_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_apply(self.active.placement().rotated_right())
    }

    pub fn rotate_active_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_apply(self.active.placement().rotated_left())
    }

    /// Swaps the active shape with the stock slot.
    ///
    /// - With an empty stock, the active shape moves to the stock, the next shape becomes
    ///   active at the current location and rotation, and a fresh next piece is drawn.
    /// - Otherwise the active and stocked shapes are exchanged; the next piece is untouched.
    ///
    /// The swap is rejected if the incoming shape would collide.
    pub fn stock(&mut self, generator: &mut PieceGenerator) -> Result<(), PieceCollisionError> {
        let outgoing = *self.active.shape();
        match self.stocked {
            None => {
                let promoted = self.active.with_shape(*self.next.shape());
                if !self.check_block(&promoted.placement()) {
                    return Err(PieceCollisionError);
                }
                self.active = promoted;
                self.stocked = Some(Piece::from_shape(outgoing));
                self.next = generator.next_piece();
                debug!("active piece stocked");
            }
            Some(stocked) => {
                let swapped = self.active.with_shape(*stocked.shape());
                if !self.check_block(&swapped.placement()) {
                    return Err(PieceCollisionError);
                }
                self.active = swapped;
                self.stocked = Some(stocked.with_shape(outgoing));
                debug!("active piece swapped with stock");
            }
        }
        Ok(())
    }

    /// Promotes the next piece to active and draws a new next piece.
    ///
    /// Fails when the promoted piece collides at its spawn location.
    pub fn spawn_next(&mut self, generator: &mut PieceGenerator) -> Result<(), PieceCollisionError> {
        let next = mem::replace(&mut self.next, generator.next_piece());
        self.active = Piece::from_shape(*next.shape());
        self.lock_state = LockState::Falling;
        if !self.check_block(&self.active.placement()) {
            return Err(PieceCollisionError);
        }
        trace!(kind = ?self.active.kind(), "piece spawned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{PieceKind, Rotation};

    use super::*;

    fn board_with(active: PieceKind) -> Board {
        Board::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            Piece::new(active),
            Piece::new(PieceKind::O),
        )
    }

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..board.width() {
            board.fill_block_at(x, y, Block::Piece(PieceKind::J));
        }
    }

    fn placement_at(kind: PieceKind, rotation: u8, x: i32, y: i32) -> PiecePlacement {
        PiecePlacement::new(kind.shape(), Rotation::new(rotation), Location::new(x, y))
    }

    #[test]
    fn test_reset_field_keeps_spare_cell() {
        let mut board = board_with(PieceKind::T);
        assert_eq!(board.field().len(), DEFAULT_WIDTH * DEFAULT_HEIGHT + 1);
        assert!(board.field().iter().all(|block| block.is_empty()));

        fill_row(&mut board, 3);
        board.reset_field();
        assert_eq!(board.field().len(), DEFAULT_WIDTH * DEFAULT_HEIGHT + 1);
        assert!(board.field().iter().all(|block| block.is_empty()));
        assert_eq!(board.rows().count(), DEFAULT_HEIGHT);
    }

    #[test]
    fn test_check_block_flat_piece_against_floor() {
        let board = board_with(PieceKind::I);
        assert!(board.check_block(&placement_at(PieceKind::I, 0, 3, -1)));
        assert!(board.check_block(&placement_at(PieceKind::I, 0, 3, 18)));
        assert!(!board.check_block(&placement_at(PieceKind::I, 0, 3, 19)));
    }

    #[test]
    fn test_check_block_rejects_walls() {
        let board = board_with(PieceKind::I);
        assert!(board.check_block(&placement_at(PieceKind::I, 0, 0, 5)));
        assert!(!board.check_block(&placement_at(PieceKind::I, 0, -1, 5)));
        assert!(board.check_block(&placement_at(PieceKind::I, 0, 6, 5)));
        assert!(!board.check_block(&placement_at(PieceKind::I, 0, 7, 5)));
    }

    #[test]
    fn test_check_block_allows_cells_above_field() {
        let board = board_with(PieceKind::I);
        // Vertical I: cells at y = ay+2 .. ay-1
        assert!(board.check_block(&placement_at(PieceKind::I, 1, 3, -2)));
        assert!(board.check_block(&placement_at(PieceKind::I, 1, 3, -6)));
        // Horizontal bounds still apply above the field.
        assert!(!board.check_block(&placement_at(PieceKind::I, 0, 8, -5)));
    }

    #[test]
    fn test_check_block_rejects_overlap() {
        let mut board = board_with(PieceKind::O);
        board.fill_block_at(4, 10, Block::Piece(PieceKind::L));
        // O occupies (ax+1..=ax+2, ay..=ay+1)
        assert!(!board.check_block(&placement_at(PieceKind::O, 0, 3, 9)));
        assert!(!board.check_block(&placement_at(PieceKind::O, 0, 3, 10)));
        assert!(board.check_block(&placement_at(PieceKind::O, 0, 3, 11)));
        assert!(board.check_block(&placement_at(PieceKind::O, 0, 4, 10)));
    }

    #[test]
    fn test_spare_cell_is_outside_every_row() {
        let mut board = board_with(PieceKind::I);
        let spare = DEFAULT_WIDTH * DEFAULT_HEIGHT;
        board.field[spare] = Block::Piece(PieceKind::T);
        assert_eq!(board.check_line(), 0);
        assert!(board.check_block(&placement_at(PieceKind::I, 0, 0, 18)));
        assert_eq!(board.rows().flatten().filter(|b| !b.is_empty()).count(), 0);
    }

    #[test]
    fn test_try_commit_waits_for_lock_delay() {
        let mut board = board_with(PieceKind::O);
        board.active.set_location(Location::new(3, 18));

        assert!(!board.try_commit(100));
        assert_eq!(board.lock_state(), LockState::GracePeriod { since: 100 });
        for frame in 101..110 {
            assert!(!board.try_commit(frame), "frame {frame}");
        }
        assert!(board.try_commit(110));
        assert!(board.lock_state().is_falling());
        assert_eq!(board.cell(4, 18), Block::Piece(PieceKind::O));
        assert_eq!(board.cell(5, 19), Block::Piece(PieceKind::O));
    }

    #[test]
    fn test_try_commit_does_nothing_while_piece_can_fall() {
        let mut board = board_with(PieceKind::O);
        assert!(!board.try_commit(0));
        assert!(board.lock_state().is_falling());
    }

    #[test]
    fn test_grace_period_survives_moving_off_the_stack() {
        let mut board = board_with(PieceKind::O);
        board.fill_block_at(4, 12, Block::Piece(PieceKind::I));
        board.active.set_location(Location::new(3, 10));
        assert!(!board.try_commit(5));
        assert!(board.lock_state().is_grace_period());

        // Slide right so the piece could fall again.
        board.move_active(2, 0).unwrap();
        assert!(!board.try_commit(6));
        assert_eq!(board.lock_state(), LockState::GracePeriod { since: 5 });

        // Land on the floor much later: the old grace period applies immediately.
        board.active.set_location(Location::new(5, 18));
        assert!(board.try_commit(40));
    }

    #[test]
    fn test_fall_block_still_waits_for_lock_delay() {
        let mut board = board_with(PieceKind::T);
        assert!(!board.fall_block(0));
        assert_eq!(board.active_block().location(), Location::new(3, 18));
        assert!(!board.fall_block(9));
        assert!(board.fall_block(10));
        assert_eq!(board.cell(4, 18), Block::Piece(PieceKind::T));
        assert_eq!(board.cell(3, 19), Block::Piece(PieceKind::T));
        assert_eq!(board.cell(5, 19), Block::Piece(PieceKind::T));
    }

    #[test]
    fn test_fix_block_reduces_ghost_cells() {
        let mut board = board_with(PieceKind::Z);
        let ghost = board.active_block().ghost(18);
        board.set_active_block(ghost);
        board.fix_block();
        assert_eq!(board.cell(3, 18), Block::Piece(PieceKind::Z));
        assert!(board.field().iter().all(|block| !block.is_ghost()));
    }

    #[test]
    fn test_fix_block_drops_cells_above_field() {
        let mut board = board_with(PieceKind::I);
        let placement = placement_at(PieceKind::I, 1, 3, -1);
        board.active.apply(placement);
        board.fix_block();
        // Vertical I at x = 5 spans y = 1, 0, -1, -2
        assert_eq!(board.cell(5, 1), Block::Piece(PieceKind::I));
        assert_eq!(board.cell(5, 0), Block::Piece(PieceKind::I));
        let filled = board.field().iter().filter(|b| !b.is_empty()).count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_fix_block_drops_cells_outside_columns() {
        let mut board = Board::new(4, 4, Piece::new(PieceKind::O), Piece::new(PieceKind::O));
        // O at anchor (2, 0) covers x = 3 and x = 4 on rows 0 and 1.
        board.active.apply(placement_at(PieceKind::O, 0, 2, 0));
        board.fix_block();
        assert_eq!(board.cell(3, 0), Block::Piece(PieceKind::O));
        assert_eq!(board.cell(3, 1), Block::Piece(PieceKind::O));
        assert_eq!(board.cell(0, 1), Block::Empty);
        assert_eq!(board.cell(0, 2), Block::Empty);
        let filled = board.field().iter().filter(|b| !b.is_empty()).count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_check_line_single_row() {
        let mut board = board_with(PieceKind::T);
        fill_row(&mut board, 19);
        board.fill_block_at(2, 18, Block::Piece(PieceKind::S));
        board.fill_block_at(7, 17, Block::Piece(PieceKind::Z));

        assert_eq!(board.check_line(), 1);
        assert_eq!(board.cleared_line_count(), 1);
        assert_eq!(board.cell(2, 19), Block::Piece(PieceKind::S));
        assert_eq!(board.cell(7, 18), Block::Piece(PieceKind::Z));
        let filled = board.field().iter().filter(|b| !b.is_empty()).count();
        assert_eq!(filled, 2);
        assert_eq!(board.field().len(), DEFAULT_WIDTH * DEFAULT_HEIGHT + 1);
    }

    #[test]
    fn test_check_line_rechecks_same_row() {
        let mut board = board_with(PieceKind::T);
        fill_row(&mut board, 19);
        fill_row(&mut board, 18);
        board.fill_block_at(0, 17, Block::Piece(PieceKind::S));
        fill_row(&mut board, 16);

        assert_eq!(board.check_line(), 3);
        assert_eq!(board.cleared_line_count(), 3);
        assert_eq!(board.cell(0, 19), Block::Piece(PieceKind::S));
        let filled = board.field().iter().filter(|b| !b.is_empty()).count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn test_check_line_ignores_partial_rows() {
        let mut board = board_with(PieceKind::T);
        fill_row(&mut board, 19);
        board.fill_block_at(9, 19, Block::Empty);
        assert_eq!(board.check_line(), 0);
        assert_eq!(board.cleared_line_count(), 0);
    }

    #[test]
    fn test_check_line_skips_top_row() {
        let mut board = board_with(PieceKind::T);
        fill_row(&mut board, 0);
        assert_eq!(board.check_line(), 0);

        // Once the top row is shifted into row 1 it is cleared as well.
        fill_row(&mut board, 1);
        assert_eq!(board.check_line(), 2);
        assert!(board.field().iter().all(|block| block.is_empty()));
    }

    #[test]
    fn test_commit_clears_completed_rows() {
        let mut board = board_with(PieceKind::I);
        for x in (0..3).chain(7..DEFAULT_WIDTH) {
            board.fill_block_at(x, 19, Block::Piece(PieceKind::L));
        }
        board.fill_block_at(0, 18, Block::Piece(PieceKind::S));
        assert!(!board.fall_block(0));
        assert_eq!(board.active_block().location(), Location::new(3, 18));
        assert!(board.fall_block(10));
        assert_eq!(board.cleared_line_count(), 1);
        assert_eq!(board.cell(0, 19), Block::Piece(PieceKind::S));
        assert!(board.cell(3, 19).is_empty());
        let filled = board.field().iter().filter(|b| !b.is_empty()).count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn test_calc_landing_point() {
        let mut board = board_with(PieceKind::I);
        assert_eq!(board.calc_landing_point(), 18);

        board.fill_block_at(5, 10, Block::Piece(PieceKind::T));
        assert_eq!(board.calc_landing_point(), 8);

        let ghost = board.ghost_block();
        assert_eq!(ghost.location(), Location::new(3, 8));
        assert!(ghost.occupied_cells().iter().all(|(_, b)| b.is_ghost()));
    }

    #[test]
    fn test_calc_landing_point_returns_height_when_never_colliding() {
        let mut board = board_with(PieceKind::I);
        let empty = [Block::Empty; crate::SHAPE_CELLS];
        board.set_active_block(Piece::from_shape(empty));
        assert_eq!(board.calc_landing_point(), 20);
    }

    #[test]
    fn test_calc_landing_point_blocked_at_top() {
        let mut board = board_with(PieceKind::I);
        board.fill_block_at(4, 1, Block::Piece(PieceKind::T));
        assert_eq!(board.calc_landing_point(), -1);
    }

    #[test]
    fn test_advance_frame_applies_gravity() {
        let mut board = board_with(PieceKind::T);
        board.update_speed();
        let start = board.active_block().location();
        assert!(!board.advance_frame(1));
        assert_eq!(board.active_block().location(), start);
        assert!(!board.advance_frame(120));
        assert_eq!(board.active_block().location(), start.offset(0, 1));
    }

    #[test]
    fn test_update_speed_follows_cleared_lines() {
        let mut board = board_with(PieceKind::T);
        board.update_speed();
        assert!((board.active_block().speed() - 0.5).abs() < f64::EPSILON);
        for _ in 0..10 {
            fill_row(&mut board, 19);
            board.check_line();
        }
        board.update_speed();
        assert!((board.active_block().speed() - 1.0).abs() < f64::EPSILON);
        assert_eq!(board.active_block().gravity_interval(), 60);
    }

    #[test]
    fn test_rejected_rotation_leaves_piece_unchanged() {
        let mut board = board_with(PieceKind::I);
        board.move_active(0, 20).unwrap_err();
        board.move_active(0, 19).unwrap();
        let before = *board.active_block();
        // Vertical I would reach y = 20.
        assert_eq!(board.rotate_active_right(), Err(PieceCollisionError));
        assert_eq!(board.active_block().rotation(), before.rotation());
        assert_eq!(board.active_block().location(), before.location());
        assert_eq!(board.rotate_active_left(), Err(PieceCollisionError));
        assert_eq!(*board.active_block(), before);
    }

    #[test]
    fn test_rotation_cycles() {
        let mut board = board_with(PieceKind::T);
        board.move_active(0, 5).unwrap();
        for expected in [1, 2, 3, 0] {
            board.rotate_active_right().unwrap();
            assert_eq!(board.active_block().rotation().value(), expected);
        }
        board.rotate_active_left().unwrap();
        assert_eq!(board.active_block().rotation().value(), 3);
    }

    #[test]
    fn test_move_rejected_at_wall() {
        let mut board = board_with(PieceKind::O);
        while board.move_active(-1, 0).is_ok() {}
        assert_eq!(board.active_block().location().x(), -1);
        assert_eq!(board.move_active(-1, 0), Err(PieceCollisionError));
        assert_eq!(board.active_block().location().x(), -1);
    }

    #[test]
    fn test_stock_empty_slot_then_swap() {
        let mut generator = PieceGenerator::with_seed(7);
        let mut board = Board::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            Piece::new(PieceKind::T),
            Piece::new(PieceKind::L),
        );
        board.move_active(1, 4).unwrap();
        let location = board.active_block().location();

        board.stock(&mut generator).unwrap();
        assert_eq!(board.stocked_block().and_then(Piece::kind), Some(PieceKind::T));
        assert_eq!(board.active_block().kind(), Some(PieceKind::L));
        assert_eq!(board.active_block().location(), location);
        let next_after_first = *board.next_block();
        assert_eq!(next_after_first.location(), Piece::SPAWN_LOCATION);

        board.stock(&mut generator).unwrap();
        assert_eq!(board.active_block().kind(), Some(PieceKind::T));
        assert_eq!(board.stocked_block().and_then(Piece::kind), Some(PieceKind::L));
        assert_eq!(board.active_block().location(), location);
        assert_eq!(*board.next_block(), next_after_first);
    }

    #[test]
    fn test_stock_rejected_when_swap_collides() {
        let mut generator = PieceGenerator::with_seed(7);
        let mut board = Board::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            Piece::new(PieceKind::O),
            Piece::new(PieceKind::I),
        );
        board.move_active(0, 5).unwrap();
        // I would need (3, 5) which O leaves free.
        board.fill_block_at(3, 5, Block::Piece(PieceKind::T));
        assert_eq!(board.stock(&mut generator), Err(PieceCollisionError));
        assert_eq!(board.active_block().kind(), Some(PieceKind::O));
        assert!(board.stocked_block().is_none());
        assert_eq!(board.next_block().kind(), Some(PieceKind::I));
    }

    #[test]
    fn test_spawn_next_promotes_next_piece() {
        let mut generator = PieceGenerator::with_seed(3);
        let mut board = board_with(PieceKind::T);
        board.spawn_next(&mut generator).unwrap();
        assert_eq!(board.active_block().kind(), Some(PieceKind::O));
        assert_eq!(board.active_block().location(), Piece::SPAWN_LOCATION);
        assert!(board.lock_state().is_falling());
    }

    #[test]
    fn test_spawn_next_reports_top_out() {
        let mut generator = PieceGenerator::with_seed(3);
        let mut board = board_with(PieceKind::T);
        board.fill_block_at(4, 0, Block::Piece(PieceKind::Z));
        assert_eq!(board.spawn_next(&mut generator), Err(PieceCollisionError));
    }
}
