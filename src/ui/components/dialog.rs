use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Error,
}

impl DialogKind {
    fn style(&self) -> Style {
        match self {
            DialogKind::Warning => Theme::warning(),
            DialogKind::Error => Theme::error(),
        }
    }
}

/// Modal message box drawn centred over the screen.
pub struct DialogWidget<'a> {
    kind: DialogKind,
    title: &'a str,
    message: &'a str,
}

impl<'a> DialogWidget<'a> {
    pub fn new(kind: DialogKind, title: &'a str, message: &'a str) -> Self {
        Self {
            kind,
            title,
            message,
        }
    }
}

impl Widget for DialogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_width = self
            .message
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let text_height = self.message.lines().count().max(1) as u16;

        // Message, blank line and hint plus borders
        let popup = centered(area, text_width.max(24) + 4, text_height + 4);

        Clear.render(popup, buf);

        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.title), self.kind.style()))
            .borders(Borders::ALL)
            .border_style(self.kind.style());

        let mut lines: Vec<Line> = self
            .message
            .lines()
            .map(|l| Line::from(Span::styled(l, Theme::normal())))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled(" OK", Theme::nav_label()),
        ]));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
