//! Result table widget for the TUI.
//!
//! Renders report results as formatted tables with column headers,
//! auto-sized columns, styled NULL values, and vertical scrolling. Also used
//! by headless mode to print a plain-text table to stdout.

use crate::db::{QueryResult, Value};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Widget for rendering a query result as a table.
pub struct ResultTable<'a> {
    result: &'a QueryResult,
    /// Number of data rows scrolled past at the top.
    scroll: usize,
}

impl<'a> ResultTable<'a> {
    /// Creates a new result table widget.
    pub fn new(result: &'a QueryResult) -> Self {
        Self { result, scroll: 0 }
    }

    /// Sets the vertical scroll offset (in data rows).
    pub fn with_scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Calculates the optimal width for each column.
    fn calculate_column_widths(&self) -> Vec<usize> {
        if self.result.columns.is_empty() {
            return vec![];
        }

        let mut widths: Vec<usize> = self
            .result
            .columns
            .iter()
            .map(|col| col.name.len().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.result.rows {
            for (i, value) in row.iter().enumerate() {
                if i < widths.len() {
                    let value_len = value.to_display_string().len();
                    widths[i] = widths[i].max(value_len);
                }
            }
        }

        widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
    }

    /// Truncates a string to fit within the given width, adding ellipsis if
    /// needed.
    fn truncate(s: &str, max_width: usize) -> String {
        if s.chars().count() <= max_width {
            s.to_string()
        } else if max_width <= 3 {
            s.chars().take(max_width).collect()
        } else {
            let kept: String = s.chars().take(max_width - 3).collect();
            format!("{kept}...")
        }
    }

    /// Renders the table to a vector of Lines.
    ///
    /// The header stays fixed; the scroll offset applies to data rows only.
    pub fn render_to_lines(&self, available_width: usize) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        if self.result.columns.is_empty() {
            lines.push(Line::from(Span::styled(
                "(empty result)",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        let widths = self.calculate_column_widths();

        // Scale down if the table would overflow the available width.
        let total_width: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
        let scale_factor = if total_width > available_width && available_width > 0 {
            available_width as f64 / total_width as f64
        } else {
            1.0
        };

        let adjusted_widths: Vec<usize> = widths
            .iter()
            .map(|&w| ((w as f64 * scale_factor) as usize).max(MIN_COLUMN_WIDTH))
            .collect();

        lines.push(self.render_border(&adjusted_widths, '┌', '┬', '┐'));
        lines.push(self.render_header_row(&adjusted_widths));
        lines.push(self.render_border(&adjusted_widths, '├', '┼', '┤'));

        let scroll = self.scroll.min(self.result.rows.len().saturating_sub(1));
        for row in self.result.rows.iter().skip(scroll) {
            lines.push(self.render_data_row(row, &adjusted_widths));
        }

        lines.push(self.render_border(&adjusted_widths, '└', '┴', '┘'));

        let mut footer = format!(
            "{} row{} returned ({}ms)",
            self.result.row_count,
            if self.result.row_count == 1 { "" } else { "s" },
            self.result.execution_time.as_millis()
        );
        if scroll > 0 {
            footer.push_str(&format!(" — scrolled past {scroll}"));
        }
        lines.push(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        )));

        if let Some(warning) = self.result.truncation_warning() {
            lines.push(Line::from(Span::styled(
                warning,
                Style::default().fg(Color::Yellow),
            )));
        }

        lines
    }

    /// Renders the table as plain text (headless mode output).
    pub fn render_plain(&self, available_width: usize) -> String {
        self.render_to_lines(available_width)
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders a horizontal border line.
    fn render_border(&self, widths: &[usize], left: char, mid: char, right: char) -> Line<'a> {
        let mut border = String::new();
        border.push(left);

        for (i, &width) in widths.iter().enumerate() {
            border.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                border.push(mid);
            }
        }

        border.push(right);

        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    /// Renders the header row with column names.
    fn render_header_row(&self, widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, col) in self.result.columns.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let name = Self::truncate(&col.name, width);
            let padded = format!(" {:width$} ", name, width = width);

            spans.push(Span::styled(
                padded,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    /// Renders a data row.
    fn render_data_row(&self, row: &[Value], widths: &[usize]) -> Line<'a> {
        let mut spans = Vec::new();
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));

        for (i, value) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let display = value.to_display_string();
            let truncated = Self::truncate(&display, width);
            let padded = format!(" {:width$} ", truncated, width = width);

            let style = if value.is_null() {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };

            spans.push(Span::styled(padded, style));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}

impl Widget for ResultTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.render_to_lines(area.width as usize);

        for (i, line) in lines.iter().enumerate() {
            if i >= area.height as usize {
                break;
            }
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ColumnInfo;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn sample_result() -> QueryResult {
        QueryResult::with_data(
            vec![
                ColumnInfo::new("Food_Name", "VARCHAR"),
                ColumnInfo::new("total_quantity", "DECIMAL"),
            ],
            vec![
                vec![Value::String("Rice".to_string()), Value::Float(120.0)],
                vec![Value::String("Bread".to_string()), Value::Null],
            ],
        )
        .with_execution_time(Duration::from_millis(23))
    }

    #[test]
    fn test_calculate_column_widths() {
        let result = sample_result();
        let table = ResultTable::new(&result);
        let widths = table.calculate_column_widths();

        // Food_Name: max of "Food_Name" (9) and "Bread" (5) -> 9
        // total_quantity: header width 14 dominates the values
        assert_eq!(widths, vec![9, 14]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(ResultTable::truncate("hello", 10), "hello");
        assert_eq!(ResultTable::truncate("hello world", 8), "hello...");
        assert_eq!(ResultTable::truncate("hi", 2), "hi");
        assert_eq!(ResultTable::truncate("hello", 3), "hel");
    }

    #[test]
    fn test_render_to_lines() {
        let result = sample_result();
        let table = ResultTable::new(&result);
        let lines = table.render_to_lines(80);

        // top border, header, separator, 2 data rows, bottom border, footer
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_render_plain_contains_headers_and_values() {
        let result = sample_result();
        let text = ResultTable::new(&result).render_plain(80);

        assert!(text.contains("Food_Name"));
        assert!(text.contains("total_quantity"));
        assert!(text.contains("Rice"));
        assert!(text.contains("NULL"));
        assert!(text.contains("2 rows returned (23ms)"));
    }

    #[test]
    fn test_scroll_skips_data_rows_only() {
        let result = sample_result();
        let text = ResultTable::new(&result).with_scroll(1).render_plain(80);

        assert!(text.contains("Food_Name"), "header stays fixed");
        assert!(!text.contains("Rice"), "first data row scrolled away");
        assert!(text.contains("Bread"));
    }

    #[test]
    fn test_empty_result() {
        let result = QueryResult::default();
        let table = ResultTable::new(&result);
        let lines = table.render_to_lines(80);

        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_truncation_warning_rendered() {
        let mut result = sample_result();
        result.was_truncated = true;
        result.total_rows = Some(5000);

        let text = ResultTable::new(&result).render_plain(80);
        assert!(text.contains("Result truncated"));
    }
}
