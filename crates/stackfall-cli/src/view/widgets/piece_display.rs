use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{Block, Location, Piece, PiecePlacement, Rotation};

use crate::view::widgets::BlockDisplay;

/// Preview grid size in blocks.
const PREVIEW_COLUMNS: u16 = 4;
const PREVIEW_ROWS: u16 = 2;

/// Preview of the next or stocked piece in its spawn orientation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    scale: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(piece: Option<&Piece>) -> Self {
        Self {
            piece: piece.copied(),
            scale: 1,
            block: None,
        }
    }

    pub fn scale(self, scale: u16) -> Self {
        Self {
            scale: scale.max(1),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let grid = area.centered(
            Constraint::Length(PREVIEW_COLUMNS * 2 * self.scale),
            Constraint::Length(PREVIEW_ROWS * self.scale),
        );
        let empty = BlockDisplay::from_block(Block::Empty, false);
        empty.render(grid, buf);

        let Some(piece) = self.piece else {
            return;
        };
        let placement = PiecePlacement::new(*piece.shape(), Rotation::default(), Location::new(0, 0));
        for (location, block) in placement.occupied_cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(location.x()), usize::try_from(location.y()))
            else {
                continue;
            };
            let cell_area = BlockDisplay::cell_area(grid, self.scale, x, y);
            BlockDisplay::from_block(block, false).render(cell_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::PieceKind;

    use super::*;
    use crate::view::widgets::color;

    #[test]
    fn test_preview_draws_shape_cells() {
        let piece = Piece::new(PieceKind::T);
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        PieceDisplay::new(Some(&piece)).render(area, &mut buf);
        // T: top row has cell 1, bottom row has cells 0..3.
        assert_eq!(buf[(2, 0)].bg, color::MAGENTA);
        assert_eq!(buf[(0, 0)].bg, color::BLACK);
        for x in 0..6 {
            assert_eq!(buf[(x, 1)].bg, color::MAGENTA);
        }
        assert_eq!(buf[(6, 1)].bg, color::BLACK);
    }

    #[test]
    fn test_empty_preview() {
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        PieceDisplay::new(None).render(area, &mut buf);
        assert!(buf.content().iter().all(|cell| cell.bg == color::BLACK));
    }

    #[test]
    fn test_preview_scales() {
        let piece = Piece::new(PieceKind::I);
        let area = Rect::new(0, 0, 16, 4);
        let mut buf = Buffer::empty(area);
        PieceDisplay::new(Some(&piece)).scale(2).render(area, &mut buf);
        // I sits in the lower shape row.
        assert_eq!(buf[(0, 1)].bg, color::BLACK);
        assert_eq!(buf[(0, 2)].bg, color::CYAN);
        assert_eq!(buf[(15, 3)].bg, color::CYAN);
    }
}
