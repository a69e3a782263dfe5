//! # Module: TUI Rendering
//!
//! ## Responsibility
//! Orchestrates the overall dashboard layout by dividing the terminal into regions
//! and delegating to individual widget renderers. Handles the minimum size guard,
//! the detail popup, and the help overlay.
//!
//! ## Guarantees
//! - Minimum size guard displays a centered message if terminal is too small
//! - No panics during rendering regardless of terminal dimensions

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, MIN_COLS, MIN_ROWS};
use super::widgets;
use crate::chart::ChartSurface;

/// Key hints shown in the footer of the outer frame.
pub const FOOTER_HINTS: &str = concat!(
    " [q]uit  [r]eload  [/] filter  [1-0] sort  [\u{2191}\u{2193}] select",
    "  [Enter] details  [x] dismiss  [h]elp "
);

const HELP_LINES: [(&str, &str); 14] = [
    ("q, Ctrl+C", "Quit"),
    ("h, ?", "Toggle this help"),
    ("r", "Reload all data"),
    ("/", "Edit the filter (Enter/Esc to finish)"),
    ("1-9, 0", "Sort by column (again to reverse)"),
    ("\u{2191} \u{2193}", "Move the selection"),
    ("Enter", "Open application details"),
    ("Esc", "Close application details"),
    ("s", "Mark Sanctioned"),
    ("b", "Mark Blocked"),
    ("i", "Mark Investigating"),
    ("f", "Mark FalsePositive"),
    ("x", "Dismiss the current notice"),
    ("", "Press any key to close"),
];

/// Returns a rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(percent_x.min(100)) / 100;
    let height = area.height.saturating_mul(percent_y.min(100)) / 100;
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

/// Renders the complete dashboard UI into the given frame.
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    if size.width < MIN_COLS || size.height < MIN_ROWS {
        draw_too_small(f, size);
        return;
    }

    if app.show_help {
        draw_help_overlay(f, size);
        return;
    }

    let updated = app.dashboard.updated_label();
    let title = format!(
        " shadow-inventory {:>width$} ",
        updated,
        width = (size.width as usize).saturating_sub(22),
    );

    let outer_block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            FOOTER_HINTS,
            Style::default().fg(Color::DarkGray),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = outer_block.inner(size);
    f.render_widget(outer_block, size);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // KPIs
            Constraint::Length(1),  // Notice banner
            Constraint::Min(10),    // Table + insights
            Constraint::Length(10), // Charts
        ])
        .split(inner);

    widgets::kpi::render(f, main_chunks[0], app);
    widgets::activity::render_banner(
        f,
        main_chunks[1],
        app.dashboard.notifier().visible().as_ref(),
    );

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[2]);
    widgets::table::render(f, body_chunks[0], app);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(body_chunks[1]);
    widgets::insights::render(f, side_chunks[0], app);
    widgets::activity::render(f, side_chunks[1], app);

    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(main_chunks[3]);
    for (surface, chunk) in [
        ChartSurface::RiskDistribution,
        ChartSurface::SpendByCategory,
        ChartSurface::UsageTrend,
    ]
    .into_iter()
    .zip(chart_chunks.iter())
    {
        widgets::charts::render(f, *chunk, surface, app.dashboard.chart(surface));
    }

    if app.detail_open() {
        widgets::detail::render(f, centered_rect(70, 80, size), app);
    }
}

/// Renders the "terminal too small" warning.
fn draw_too_small(f: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too small: resize to at least {}x{}",
        MIN_COLS, MIN_ROWS
    );
    let current_size = format!("Current size: {}x{}", area.width, area.height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            msg,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            current_size,
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(para, area);
}

/// Renders the help overlay.
fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (HELP_LINES.len() as u16 + 5).min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let mut help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Shadow IT inventory",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    help_text.extend(HELP_LINES.iter().map(|(keys, action)| {
        if keys.is_empty() {
            Line::from(Span::styled(
                format!("  {action}"),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(vec![
                Span::styled(format!("    {keys:<12}"), Style::default().fg(Color::White)),
                Span::styled(*action, Style::default().fg(Color::DarkGray)),
            ])
        }
    }));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let para = Paragraph::new(help_text).block(block);
    f.render_widget(para, popup_area);
}
