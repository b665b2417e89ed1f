use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::GameSession;

use crate::view::widgets::style;

/// Line counter and play time.
#[derive(Debug)]
pub struct InfoDisplay<'a> {
    session: &'a GameSession,
    fps: u32,
    block: Option<BlockWidget<'a>>,
}

impl<'a> InfoDisplay<'a> {
    pub fn new(session: &'a GameSession, fps: u32) -> Self {
        Self {
            session,
            fps,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&InfoDisplay) -> String),
    LabelValue(&'static str, &'static dyn Fn(&InfoDisplay) -> String),
}

const ROWS: &[Row] = &[
    Row::LabelValue("LINES:", &|info| info.session.cleared_lines().to_string()),
    Row::LabelValue("PIECES:", &|info| info.session.locked_pieces().to_string()),
    Row::Empty,
    Row::FullLabel("TIME:"),
    Row::FullValue(&|info| {
        let dur = info.session.duration(u64::from(info.fps));
        format!(
            "{:0}:{:0>2}.{:0>2}",
            dur.as_secs() / 60,
            dur.as_secs() % 60,
            dur.subsec_millis() / 10
        )
    }),
];

impl Widget for InfoDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    super::render_label_value(label, &value(&self), style, area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::SessionConfig;

    use super::*;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_info_rows() {
        let mut session = GameSession::new(SessionConfig::default().with_seed(1));
        for _ in 0..75 {
            session.advance_frame();
        }
        let area = Rect::new(0, 0, 14, 5);
        let mut buf = Buffer::empty(area);
        InfoDisplay::new(&session, 60).render(area, &mut buf);
        assert_eq!(line(&buf, 0), "LINES:       0");
        assert_eq!(line(&buf, 1).trim_end(), "PIECES:      0");
        assert_eq!(line(&buf, 3).trim_end(), "TIME:");
        assert_eq!(line(&buf, 4).trim_start(), "0:01.25");
    }

    #[test]
    fn test_debug_format() {
        let session = GameSession::new(SessionConfig::default().with_seed(1));
        let text = format!("{:?}", InfoDisplay::new(&session, 30));
        assert!(text.starts_with("InfoDisplay"));
        assert!(text.contains("fps: 30"));
    }
}
