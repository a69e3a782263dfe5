//! # Widget: Charts
//!
//! ## Responsibility
//! Draws a [`ChartHandle`] in the terminal: proportional charts as coloured
//! share bars with percentages, categorical charts as horizontal fill bars,
//! and time series as a sparkline.
//!
//! ## Guarantees
//! - Never panics on empty, zero-total, or negative series
//! - Values are always displayed through the chart's tooltip formatting

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Sparkline};
use ratatui::Frame;

use crate::chart::{ChartHandle, ChartKind, ChartSurface, Legend, Rgb};
use crate::format::format_number;
use crate::tui::widgets::activity::truncate_with_ellipsis;

/// Width of the label column in bar-style charts.
const LABEL_WIDTH: usize = 14;

/// Converts a palette colour to a terminal colour.
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Builds a fill bar string using Unicode block characters.
pub fn fill_bar(ratio: f64, width: usize) -> String {
    let clamped = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (clamped * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(empty))
}

/// Share of `value` in `total` as a percentage; 0 when the total is not
/// positive.
pub fn share_percent(value: f64, total: f64) -> f64 {
    if total > 0.0 && value.is_finite() {
        (value / total * 100.0).max(0.0)
    } else {
        0.0
    }
}

/// Sparkline samples for a line chart (negative and non-finite values
/// become 0).
pub fn sparkline_data(chart: &ChartHandle) -> Vec<u64> {
    chart
        .values()
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { v.round() as u64 } else { 0 })
        .collect()
}

fn proportional_lines(chart: &ChartHandle, width: usize) -> Vec<Line<'static>> {
    let total = chart.total();
    let bar_width = width.saturating_sub(LABEL_WIDTH + 10).max(4);
    chart
        .labels()
        .iter()
        .zip(chart.values())
        .enumerate()
        .map(|(i, (label, value))| {
            let share = share_percent(*value, total);
            let style = Style::default().fg(color(chart.color_at(i)));
            let mut spans = vec![Span::styled("\u{25cf} ", style)];
            if chart.options().legend != Legend::Hidden {
                spans.push(Span::styled(
                    format!(
                        "{:<w$}",
                        truncate_with_ellipsis(label, LABEL_WIDTH - 1),
                        w = LABEL_WIDTH
                    ),
                    Style::default().fg(Color::White),
                ));
            }
            spans.push(Span::styled(fill_bar(share / 100.0, bar_width), style));
            spans.push(Span::styled(
                format!(" {share:>5.1}%"),
                Style::default().fg(Color::DarkGray),
            ));
            Line::from(spans)
        })
        .collect()
}

fn bar_lines(chart: &ChartHandle, width: usize) -> Vec<Line<'static>> {
    let max = chart.max_value();
    let bar_width = width.saturating_sub(LABEL_WIDTH + 10).max(4);
    chart
        .labels()
        .iter()
        .zip(chart.values())
        .enumerate()
        .map(|(i, (label, value))| {
            let ratio = if max > 0.0 { value / max } else { 0.0 };
            Line::from(vec![
                Span::styled(
                    format!(
                        "{:<w$}",
                        truncate_with_ellipsis(label, LABEL_WIDTH - 1),
                        w = LABEL_WIDTH
                    ),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    fill_bar(ratio, bar_width),
                    Style::default().fg(color(chart.color_at(i))),
                ),
                Span::styled(
                    format!(" {}", format_number(*value)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

/// Caption under a line chart: label range and the latest point's tooltip.
pub fn trend_caption(chart: &ChartHandle) -> String {
    let labels = chart.labels();
    match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => {
            let latest = chart
                .tooltip(labels.len() - 1)
                .unwrap_or_default();
            format!("{first} \u{2192} {last}  |  {latest}")
        }
        _ => String::new(),
    }
}

/// Renders one chart surface. `None` means the chart was never constructed
/// (still loading, or its source failed).
pub fn render(f: &mut Frame, area: Rect, surface: ChartSurface, chart: Option<&ChartHandle>) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", surface.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(chart) = chart.filter(|c| !c.labels().is_empty()) else {
        f.render_widget(
            Paragraph::new(Span::styled("No data.", Style::default().fg(Color::DarkGray))),
            inner,
        );
        return;
    };

    let width = inner.width as usize;
    match chart.kind() {
        ChartKind::Donut => {
            f.render_widget(Paragraph::new(proportional_lines(chart, width)), inner);
        }
        ChartKind::Bar => {
            f.render_widget(Paragraph::new(bar_lines(chart, width)), inner);
        }
        ChartKind::Line => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(inner);
            let data = sparkline_data(chart);
            let sparkline = Sparkline::default()
                .data(&data)
                .style(Style::default().fg(color(chart.color_at(0))));
            f.render_widget(sparkline, chunks[0]);
            f.render_widget(
                Paragraph::new(Span::styled(
                    truncate_with_ellipsis(&trend_caption(chart), width),
                    Style::default().fg(Color::DarkGray),
                )),
                chunks[1],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{present, DisplayOptions};
    use crate::model::AggregateSeries;

    fn line_chart(values: &[f64]) -> ChartHandle {
        let labels = (0..values.len()).map(|i| format!("d{i}")).collect();
        present(
            None,
            ChartSurface::UsageTrend,
            ChartKind::Line,
            &AggregateSeries::new(labels, values.to_vec()),
            DisplayOptions::usage_trend(),
        )
    }

    #[test]
    fn test_fill_bar_bounds() {
        assert_eq!(fill_bar(0.0, 4), "\u{2591}\u{2591}\u{2591}\u{2591}");
        assert_eq!(fill_bar(1.5, 2), "\u{2588}\u{2588}");
        assert_eq!(fill_bar(f64::NAN, 2), "\u{2591}\u{2591}");
    }

    #[test]
    fn test_share_percent_zero_total() {
        assert_eq!(share_percent(5.0, 0.0), 0.0);
        assert_eq!(share_percent(1.0, 4.0), 25.0);
    }

    #[test]
    fn test_sparkline_data_clamps_negative() {
        let chart = line_chart(&[3.4, -2.0, 7.6]);
        assert_eq!(sparkline_data(&chart), vec![3, 0, 8]);
    }

    #[test]
    fn test_trend_caption_uses_tooltip() {
        let chart = line_chart(&[1.0, 1500.0]);
        assert_eq!(trend_caption(&chart), "d0 \u{2192} d1  |  # of Items: 1,500");
        assert_eq!(trend_caption(&line_chart(&[])), "");
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
