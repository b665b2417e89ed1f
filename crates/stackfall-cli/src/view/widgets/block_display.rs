use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use stackfall_engine::Block;

use crate::view::widgets::style;

/// One field cell, drawn `2 * scale` columns wide and `scale` rows high.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::new(style::EMPTY, ""),
            Block::Piece(kind) => Self::new(style::piece(kind), ""),
            Block::Ghost(kind) => Self::new(style::ghost(kind), "[]"),
        }
    }

    /// Area of cell `(x, y)` of a block grid whose top-left corner is at `grid`.
    ///
    /// Cells outside `grid` yield an empty area.
    pub fn cell_area(grid: Rect, scale: u16, x: usize, y: usize) -> Rect {
        let to_u16 = |v: usize| u16::try_from(v).unwrap_or(u16::MAX);
        let width = 2 * scale;
        let cell = Rect::new(
            grid.x.saturating_add(to_u16(x).saturating_mul(width)),
            grid.y.saturating_add(to_u16(y).saturating_mul(scale)),
            width,
            scale,
        );
        cell.intersection(grid)
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::PieceKind;

    use super::*;
    use crate::view::widgets::color;

    #[test]
    fn test_cell_area_scales() {
        let grid = Rect::new(1, 1, 20, 10);
        assert_eq!(BlockDisplay::cell_area(grid, 1, 0, 0), Rect::new(1, 1, 2, 1));
        assert_eq!(BlockDisplay::cell_area(grid, 2, 3, 1), Rect::new(13, 3, 4, 2));
        assert!(BlockDisplay::cell_area(grid, 2, 9, 0).is_empty());
    }

    #[test]
    fn test_piece_block_fills_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        BlockDisplay::from_block(Block::Piece(PieceKind::T), false).render(area, &mut buf);
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(buf[(x, y)].bg, color::MAGENTA);
            }
        }
    }

    #[test]
    fn test_ghost_block_symbol() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        BlockDisplay::from_block(Block::Ghost(PieceKind::I), false).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "[");
        assert_eq!(buf[(1, 0)].symbol(), "]");
        assert_eq!(buf[(0, 0)].fg, color::CYAN);
        assert_eq!(buf[(0, 0)].bg, color::BLACK);
    }
}
