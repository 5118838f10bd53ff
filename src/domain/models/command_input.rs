use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct CommandInput {}

impl<'a> CommandInput {
    /// `rejected` paints the border red after the last submission failed so
    /// the operator notices before retyping.
    pub fn block(rejected: bool) -> Block<'a> {
        let mut border_style = Style::default();
        if rejected {
            border_style = border_style.fg(Color::Red);
        }

        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Command ('s', 'a' + payload, or /help)")
            .padding(Padding::new(1, 1, 0, 0));
    }

    pub fn new(rejected: bool) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(CommandInput::block(rejected));

        return textarea;
    }
}
