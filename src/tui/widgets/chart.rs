//! Chart widget for the TUI.
//!
//! Renders the chart picked by [`crate::chart::select_chart`] for the current
//! result: a bar chart keyed by a category column, or a line chart keyed by a
//! date column. When no chart applies, a notice is shown instead.

use crate::chart::{ChartKind, ChartSpec};
use crate::db::QueryResult;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
        Widget,
    },
};

/// Maximum number of characters in a bar label before truncation.
const MAX_BAR_LABEL: usize = 14;

/// Chart panel widget.
pub struct ChartPanel<'a> {
    result: Option<&'a QueryResult>,
    spec: Option<&'a ChartSpec>,
    focused: bool,
}

impl<'a> ChartPanel<'a> {
    /// Creates a new chart panel for the given result and selection.
    pub fn new(result: Option<&'a QueryResult>, spec: Option<&'a ChartSpec>) -> Self {
        Self {
            result,
            spec,
            focused: false,
        }
    }

    /// Marks the panel as focused (border highlight only).
    #[allow(dead_code)]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn block(&self) -> Block<'a> {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Chart ")
    }

    fn render_notice(&self, area: Rect, buf: &mut Buffer) {
        let notice = Paragraph::new(Line::from(Span::styled(
            "📊 No chart available for this query",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(self.block());
        notice.render(area, buf);
    }

    fn render_bar(&self, result: &QueryResult, spec: &ChartSpec, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let single_series = spec.value_columns.len() == 1;

        let mut chart = BarChart::default().bar_gap(1).group_gap(2);

        if single_series {
            let bars: Vec<Bar> = result
                .rows
                .iter()
                .map(|row| {
                    let label = key_label(row.get(spec.key_column));
                    let value = numeric(row.get(spec.value_columns[0]));
                    Bar::default()
                        .value(value)
                        .label(Line::from(label))
                        .style(Style::default().fg(Color::Cyan))
                })
                .collect();

            let bar_width = bar_width_for(inner.width, bars.len().max(1));
            chart = chart
                .bar_width(bar_width)
                .data(BarGroup::default().bars(&bars));
            chart.render(inner, buf);
        } else {
            // One group per row, one bar per charted column.
            let groups: Vec<BarGroup> = result
                .rows
                .iter()
                .map(|row| {
                    let bars: Vec<Bar> = spec
                        .value_columns
                        .iter()
                        .enumerate()
                        .map(|(series, &col)| {
                            Bar::default()
                                .value(numeric(row.get(col)))
                                .style(Style::default().fg(series_color(series)))
                        })
                        .collect();
                    BarGroup::default()
                        .label(Line::from(key_label(row.get(spec.key_column))))
                        .bars(&bars)
                })
                .collect();

            let bars_total = result.rows.len() * spec.value_columns.len();
            chart = chart.bar_width(bar_width_for(inner.width, bars_total.max(1)));
            for group in groups {
                chart = chart.data(group);
            }
            chart.render(inner, buf);
        }
    }

    fn render_line(&self, result: &QueryResult, spec: &ChartSpec, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Plot in ascending key order; ISO date strings sort correctly.
        let mut order: Vec<usize> = (0..result.rows.len()).collect();
        if spec.sort_by_key {
            order.sort_by_key(|&i| key_label(result.rows[i].get(spec.key_column)));
        }

        let series: Vec<(String, Vec<(f64, f64)>)> = spec
            .value_columns
            .iter()
            .map(|&col| {
                let name = result
                    .columns
                    .get(col)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                let points: Vec<(f64, f64)> = order
                    .iter()
                    .enumerate()
                    .map(|(x, &row)| (x as f64, numeric(result.rows[row].get(col)) as f64))
                    .collect();
                (name, points)
            })
            .collect();

        let y_max = series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|(_, y)| *y))
            .fold(1.0_f64, f64::max);

        let datasets: Vec<Dataset> = series
            .iter()
            .enumerate()
            .map(|(i, (name, points))| {
                Dataset::default()
                    .name(name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(series_color(i)))
                    .data(points)
            })
            .collect();

        let first = order
            .first()
            .map(|&i| key_label(result.rows[i].get(spec.key_column)))
            .unwrap_or_default();
        let last = order
            .last()
            .map(|&i| key_label(result.rows[i].get(spec.key_column)))
            .unwrap_or_default();

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, (order.len().saturating_sub(1)).max(1) as f64])
                    .labels(vec![Span::raw(first), Span::raw(last)]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, y_max])
                    .labels(vec![
                        Span::raw("0"),
                        Span::raw(format!("{y_max:.0}")),
                    ]),
            );

        chart.render(inner, buf);
    }
}

impl Widget for ChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (self.result, self.spec) {
            (Some(result), Some(spec)) if !result.is_empty() => match spec.kind {
                ChartKind::Bar => self.render_bar(result, spec, area, buf),
                ChartKind::Line => self.render_line(result, spec, area, buf),
            },
            _ => self.render_notice(area, buf),
        }
    }
}

/// Display label for a key-column value, truncated for bar labels.
fn key_label(value: Option<&crate::db::Value>) -> String {
    let label = value.map(|v| v.to_display_string()).unwrap_or_default();
    if label.chars().count() > MAX_BAR_LABEL {
        let kept: String = label.chars().take(MAX_BAR_LABEL - 1).collect();
        format!("{kept}…")
    } else {
        label
    }
}

/// Coerces a value-column cell to a bar height, charting non-numbers as zero.
fn numeric(value: Option<&crate::db::Value>) -> u64 {
    value
        .and_then(|v| v.as_f64())
        .map(|v| v.max(0.0).round() as u64)
        .unwrap_or(0)
}

/// Picks a bar width that fits the available space.
fn bar_width_for(width: u16, bars: usize) -> u16 {
    let per_bar = (width as usize / bars.max(1)).saturating_sub(1);
    per_bar.clamp(3, MAX_BAR_LABEL) as u16
}

/// Cycle of colors for multi-series charts.
fn series_color(index: usize) -> Color {
    const COLORS: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Green, Color::Magenta];
    COLORS[index % COLORS.len()]
}
