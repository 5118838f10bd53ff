#[cfg(test)]
#[path = "console_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

/// Wrapped, styled lines for the operator console.
#[derive(Default)]
pub struct ConsoleLog {
    lines: Vec<Line<'static>>,
}

impl ConsoleLog {
    fn author_style(message: &Message) -> Style {
        if message.message_type() == MessageType::Error {
            return Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        }

        match message.author {
            Author::Operator => return Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Author::Waterline => return Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        }
    }

    pub fn set_messages(&mut self, messages: &[Message], width: u16) {
        // Borders take one column on each side.
        let line_width = width.saturating_sub(2).max(1) as usize;

        self.lines = messages
            .iter()
            .flat_map(|message| {
                let mut text_style = Style::default();
                if message.message_type() == MessageType::Error {
                    text_style = text_style.fg(Color::Red);
                }

                let mut lines = vec![Line::from(Span::styled(
                    format!("{}:", message.author),
                    ConsoleLog::author_style(message),
                ))];
                lines.extend(
                    message
                        .as_string_lines(line_width)
                        .into_iter()
                        .map(|e| return Line::from(Span::styled(e, text_style))),
                );

                return lines;
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, position: u16) {
        let paragraph = Paragraph::new(self.lines.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Console"),
            )
            .scroll((position, 0));

        frame.render_widget(paragraph, rect);
    }
}
