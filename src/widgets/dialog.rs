/// Modal acknowledgment dialog with a single OK button

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const MAX_DIALOG_WIDTH: u16 = 60;

/// Centered over whatever area it is rendered into
pub struct OkDialog<'a> {
    title: &'a str,
    message: &'a str,
    accent: Color,
}

impl<'a> OkDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            title: "",
            message,
            accent: Color::Cyan,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Area the dialog occupies inside `area`
    pub fn popup_area(&self, area: Rect) -> Rect {
        let width = area.width.min(MAX_DIALOG_WIDTH);
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let text_lines = wrapped_line_count(self.message, inner_width) as u16;
        // borders + blank line + button
        let height = (text_lines + 4).min(area.height);

        Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }
}

/// Lines needed to word-wrap `text` at `width` columns
fn wrapped_line_count(text: &str, width: usize) -> usize {
    let mut lines = 1;
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
        } else if used == 0 {
            // Word longer than a line gets broken across lines
            lines += (len - 1) / width;
            used = (len - 1) % width + 1;
        } else {
            lines += 1 + (len.saturating_sub(1)) / width;
            used = (len - 1) % width + 1;
        }
    }
    lines
}

impl Widget for OkDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.popup_area(area);
        Clear.render(popup, buf);

        let lines = vec![
            Line::from(self.message),
            Line::from(""),
            Line::from(Span::styled(
                "[ OK ]",
                Style::default()
                    .fg(Color::Black)
                    .bg(self.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent));
        if !self.title.is_empty() {
            block = block.title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}
