//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components: header, report
//! selector, result table, chart area, and status line.

use super::app::{App, Focus};
use super::widgets::{chart::ChartPanel, header::Header, report_list::ReportList, table::ResultTable};
use crate::chart::select_chart;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Content (reports + output)
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let header_area = main_layout[0];
    let content_area = main_layout[1];
    let status_area = main_layout[2];

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(44), // Report selector
            Constraint::Min(20),    // Output
        ])
        .split(content_area);

    let reports_area = content_layout[0];
    let output_area = content_layout[1];

    render_header(frame, header_area, app);
    render_reports(frame, reports_area, app);
    render_output(frame, output_area, app);
    render_status(frame, status_area, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = Header::new(&app.connection_info, app.is_running_query);
    frame.render_widget(widget, area);
}

fn render_reports(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Reports;
    let widget = ReportList::new(app.selected, focused);
    frame.render_widget(widget, area);
}

/// Renders the output side: the result table, with the chart area below it
/// once a report has produced output.
fn render_output(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = &app.result else {
        render_placeholder(frame, area, app);
        return;
    };

    let output_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let table_area = output_layout[0];
    let chart_area = output_layout[1];

    let focused = app.focus == Focus::Results;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = app
        .last_report
        .map(|r| format!(" {} ", r.label()))
        .unwrap_or_else(|| " Results ".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(table_area);
    frame.render_widget(block, table_area);

    let table = ResultTable::new(result).with_scroll(app.result_scroll);
    frame.render_widget(table, inner);

    let spec = select_chart(result);
    frame.render_widget(ChartPanel::new(Some(result), spec.as_ref()), chart_area);
}

/// Shown before the first report has run.
fn render_placeholder(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Results;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Select a report and press Enter to run it.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let placeholder = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Results "),
        );
    frame.render_widget(placeholder, area);
}

/// Renders the status line: the current error, or a key hint.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(error) = &app.error {
        Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            " ↑/↓ select · Enter run · Tab focus · q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}
