use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Key legend shown below the play field, as `(keys, description)` pairs.
#[derive(Debug)]
pub struct HelpLine<'a> {
    entries: &'a [(&'a str, &'a str)],
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const TEXT_STYLE: Style = Style::new().fg(Color::White);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl<'a> HelpLine<'a> {
    pub fn new(entries: &'a [(&'a str, &'a str)]) -> Self {
        Self { entries }
    }
}

impl Widget for HelpLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans = self
            .entries
            .iter()
            .enumerate()
            .flat_map(|(i, (keys, text))| {
                let separator = (i > 0).then(|| Span::styled(" | ", SEPARATOR_STYLE));
                separator.into_iter().chain([
                    Span::styled(*keys, KEY_STYLE),
                    Span::raw(" "),
                    Span::styled(*text, TEXT_STYLE),
                ])
            })
            .collect::<Vec<_>>();
        Line::from(spans).centered().render(area, buf);
    }
}
