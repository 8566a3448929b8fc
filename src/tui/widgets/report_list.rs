//! Report selector widget.
//!
//! Renders the catalog of reports as a fixed, ordered list with the current
//! selection highlighted. The list is driven by `Report::ALL`, so adding a
//! report variant automatically extends the selector.

use crate::reports::Report;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Report list widget.
pub struct ReportList {
    selected: usize,
    focused: bool,
}

impl ReportList {
    /// Creates a new report list widget.
    pub fn new(selected: usize, focused: bool) -> Self {
        Self { selected, focused }
    }
}

impl Widget for ReportList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let items: Vec<ListItem> = Report::ALL
            .iter()
            .map(|report| ListItem::new(report.label()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Reports "),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_all_labels() {
        let widget = ReportList::new(0, true);
        let area = Rect::new(0, 0, 50, 20);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        // First and a middle label should be visible inside the border.
        let content: String = (0..20)
            .map(|y| {
                (0..50)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");

        assert!(content.contains("1. Providers vs Receivers per City"));
        assert!(content.contains("9. Number of claims per status"));
    }
}
