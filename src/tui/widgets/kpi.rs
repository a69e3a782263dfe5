//! # Widget: KPI Header
//!
//! Renders the summary counters and linked spend as a row of cards.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::format::{format_count, format_currency};
use crate::model::SummaryStats;
use crate::tui::app::App;

/// One KPI card: label, formatted value, accent colour.
pub type KpiCell = (&'static str, String, Color);

/// Builds the KPI cards for a summary.
pub fn kpi_cells(stats: &SummaryStats) -> [KpiCell; 6] {
    [
        ("TOTAL DETECTED", format_count(stats.total_detected), Color::White),
        ("SHADOW IT", format_count(stats.shadow_count), Color::Magenta),
        ("HIGH RISK", format_count(stats.high_risk), Color::Red),
        ("MEDIUM RISK", format_count(stats.medium_risk), Color::Yellow),
        ("LOW RISK", format_count(stats.low_risk), Color::Green),
        ("LINKED SPEND", format_currency(stats.linked_spend), Color::Cyan),
    ]
}

/// Renders the KPI header.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let cells = kpi_cells(app.dashboard.stats());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, cells.len() as u32); 6])
        .split(area);

    for ((label, value, color), chunk) in cells.into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .title(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::DarkGray),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(para, *chunk);
    }
}
