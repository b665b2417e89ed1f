use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Largest block size (in terminal rows per block) the play screen scales up to.
const MAX_SCALE: u16 = 4;
/// Width of the next/stock previews, in blocks.
const PREVIEW_COLUMNS: u16 = 4;
/// Height of the next/stock previews, in blocks.
const PREVIEW_ROWS: u16 = 2;
/// Border plus one column of padding on each side.
const PANEL_MARGIN: u16 = 4;
const BORDER_MARGIN: u16 = 2;
const INFO_WIDTH: u16 = 14;
const INFO_ROWS: u16 = 5;
const DEBUG_ROWS: u16 = 7;
const BUTTON_ROWS: u16 = 3;
const HELP_ROWS: u16 = 1;
const SPACING: u16 = 1;

/// Screen areas of the play view.
///
/// The block size is the largest scale at which the field and both side columns fit the
/// terminal horizontally and vertically, but never less than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayLayout {
    pub scale: u16,
    pub board: Rect,
    pub stock: Rect,
    pub info: Rect,
    pub debug: Option<Rect>,
    pub next: Rect,
    pub buttons: Rect,
    pub help: Rect,
}

impl PlayLayout {
    pub fn compute(area: Rect, board_width: usize, board_height: usize, debug: bool) -> Self {
        let board_width = u16::try_from(board_width).unwrap_or(u16::MAX);
        let board_height = u16::try_from(board_height).unwrap_or(u16::MAX);
        let scale = block_scale(area, board_width, board_height, debug);

        let [main, buttons, help] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(BUTTON_ROWS),
            Constraint::Length(HELP_ROWS),
        ])
        .areas(area);

        let side = side_width(scale);
        let [left, center, right] = Layout::horizontal([
            Constraint::Length(side),
            Constraint::Length(field_width(board_width, scale)),
            Constraint::Length(side),
        ])
        .flex(Flex::Center)
        .spacing(SPACING)
        .areas(main);

        let [board] = Layout::vertical([Constraint::Length(field_height(board_height, scale))])
            .flex(Flex::Start)
            .areas(center);

        let preview = preview_height(scale);
        let [stock, info, debug_area] = Layout::vertical([
            Constraint::Length(preview),
            Constraint::Length(INFO_ROWS + BORDER_MARGIN),
            Constraint::Length(if debug { DEBUG_ROWS + BORDER_MARGIN } else { 0 }),
        ])
        .flex(Flex::Start)
        .areas(left);
        let [next] = Layout::vertical([Constraint::Length(preview)])
            .flex(Flex::Start)
            .areas(right);

        Self {
            scale,
            board,
            stock,
            info,
            debug: debug.then_some(debug_area),
            next,
            buttons,
            help,
        }
    }
}

fn block_scale(area: Rect, board_width: u16, board_height: u16, debug: bool) -> u16 {
    let width_fit = largest_fit(area.width, |scale| required_width(board_width, scale));
    let height_fit = largest_fit(area.height, |scale| {
        required_height(board_height, scale, debug)
    });
    u16::min(width_fit, height_fit)
}

fn largest_fit(available: u16, required: impl Fn(u16) -> u32) -> u16 {
    (1..=MAX_SCALE)
        .rev()
        .find(|&scale| required(scale) <= u32::from(available))
        .unwrap_or(1)
}

fn field_width(board_width: u16, scale: u16) -> u16 {
    board_width
        .saturating_mul(2 * scale)
        .saturating_add(BORDER_MARGIN)
}

fn field_height(board_height: u16, scale: u16) -> u16 {
    board_height.saturating_mul(scale).saturating_add(BORDER_MARGIN)
}

fn preview_height(scale: u16) -> u16 {
    PREVIEW_ROWS * scale + BORDER_MARGIN
}

fn side_width(scale: u16) -> u16 {
    u16::max(PREVIEW_COLUMNS * 2 * scale, INFO_WIDTH) + PANEL_MARGIN
}

fn required_width(board_width: u16, scale: u16) -> u32 {
    u32::from(field_width(board_width, scale))
        + 2 * u32::from(side_width(scale))
        + 2 * u32::from(SPACING)
}

fn required_height(board_height: u16, scale: u16, debug: bool) -> u32 {
    let mut left = preview_height(scale) + INFO_ROWS + BORDER_MARGIN;
    if debug {
        left += DEBUG_ROWS + BORDER_MARGIN;
    }
    let main = u16::max(field_height(board_height, scale), left);
    u32::from(main) + u32::from(BUTTON_ROWS + HELP_ROWS)
}
