use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{Block, Board, Piece};

use crate::view::widgets::BlockDisplay;

/// The playing field: grid dots, fixed blocks, the landing preview and the active piece,
/// drawn in that order.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    scale: u16,
    ghost: Option<Piece>,
    active: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            scale: 1,
            ghost: None,
            active: None,
            block: None,
        }
    }

    pub fn scale(self, scale: u16) -> Self {
        Self {
            scale: scale.max(1),
            ..self
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn active(self, piece: Piece) -> Self {
        Self {
            active: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Field cells with the pieces painted over them.
    fn composed_cells(&self) -> Vec<Block> {
        let width = self.board.width();
        let height = self.board.height();
        let mut cells = self.board.rows().flatten().copied().collect::<Vec<_>>();

        for piece in [self.ghost, self.active].into_iter().flatten() {
            for (location, block) in piece.occupied_cells() {
                let (Ok(x), Ok(y)) = (usize::try_from(location.x()), usize::try_from(location.y()))
                else {
                    continue;
                };
                if x >= width || y >= height {
                    continue;
                }
                let cell = &mut cells[y * width + x];
                if !block.is_ghost() || cell.is_empty() {
                    *cell = block;
                }
            }
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let width = self.board.width();
        for (i, block) in self.composed_cells().into_iter().enumerate() {
            let cell_area = BlockDisplay::cell_area(area, self.scale, i % width, i / width);
            BlockDisplay::from_block(block, true).render(cell_area, buf);
        }
    }
}
