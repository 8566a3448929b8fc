//! Header widget for the TUI.
//!
//! Displays the application name, version, database connection info, and a
//! running indicator while a report executes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Header bar widget.
pub struct Header<'a> {
    connection_info: &'a str,
    is_running_query: bool,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(connection_info: &'a str, is_running_query: bool) -> Self {
        Self {
            connection_info,
            is_running_query,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        // Left side: app name and version
        let left_text = format!(" Ladle v{}", env!("CARGO_PKG_VERSION"));
        let left_span = Span::styled(left_text, style);
        buf.set_span(area.x, area.y, &left_span, area.width);

        // Center: running indicator
        if self.is_running_query {
            let running_text = "⏳ running report...";
            let running_style = Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            let running_width = running_text.chars().count() as u16;
            let running_x = area.x + (area.width.saturating_sub(running_width)) / 2;
            buf.set_string(running_x, area.y, running_text, running_style);
        }

        // Right side: connection info
        let right_text = format!(" [db: {}] ", self.connection_info);
        let right_width = right_text.chars().count() as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, &right_text, style);
        }
    }
}
