//! # Widget: Inventory Table
//!
//! ## Responsibility
//! Renders the filter box and the filtered/sorted application table, with
//! status badges, risk row highlights, and the active sort arrow.
//!
//! ## Guarantees
//! - An empty projection renders exactly one placeholder line
//! - The selected row is always highlighted when rows exist

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::dataset::{SortColumn, SortState};
use crate::tui::app::App;
use crate::view::table::{RowHighlight, StatusBadge, COLUMN_COUNT};
use crate::view::TableBody;

const STATUS_CELL: usize = 3;

const WIDTHS: [Constraint; COLUMN_COUNT] = [
    Constraint::Min(16),
    Constraint::Min(12),
    Constraint::Length(12),
    Constraint::Length(14),
    Constraint::Length(8),
    Constraint::Length(7),
    Constraint::Length(10),
    Constraint::Length(7),
    Constraint::Length(11),
    Constraint::Length(11),
    Constraint::Length(4),
];

/// Header text for a column, with its shortcut digit and the sort arrow
/// when it is the active sort column.
pub fn header_label(index: usize, column: SortColumn, sort: Option<SortState>) -> String {
    let key = (index + 1) % 10;
    match sort {
        Some(s) if s.column == column => {
            format!("{key} {} {}", column.header(), s.direction.arrow())
        }
        _ => format!("{key} {}", column.header()),
    }
}

/// Colour of a status badge.
pub fn badge_color(badge: StatusBadge) -> Color {
    match badge {
        StatusBadge::Neutral => Color::Gray,
        StatusBadge::Positive => Color::Green,
        StatusBadge::Negative => Color::Red,
        StatusBadge::Info => Color::Cyan,
        StatusBadge::Primary => Color::Blue,
    }
}

/// Text colour of a row highlight.
pub fn highlight_color(highlight: RowHighlight) -> Color {
    match highlight {
        RowHighlight::Danger => Color::LightRed,
        RowHighlight::Warning => Color::LightYellow,
        RowHighlight::Neutral => Color::White,
        RowHighlight::Informational => Color::LightCyan,
    }
}

fn filter_line(app: &App) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Filter: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.filter().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    if app.editing_filter() {
        spans.push(Span::styled("\u{258f}", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            "  [Enter] done",
            Style::default().fg(Color::DarkGray),
        ));
    } else if app.filter().is_empty() {
        spans.push(Span::styled(
            "[/] to search",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Renders the table widget.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.dashboard;
    let block = Block::default()
        .title(Span::styled(
            format!(" APPLICATIONS ({}) ", dashboard.visible_count()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.editing_filter() {
            Color::Yellow
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(2)])
        .split(inner);
    f.render_widget(Paragraph::new(filter_line(app)), chunks[0]);

    let sort = dashboard.view_state().sort;
    let mut header_cells: Vec<Cell> = SortColumn::ALL
        .iter()
        .enumerate()
        .map(|(i, column)| Cell::from(header_label(i, *column, sort)))
        .collect();
    header_cells.push(Cell::from("Res"));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    );

    match dashboard.table() {
        TableBody::Rows(rows) => {
            let rows: Vec<Row> = rows
                .into_iter()
                .map(|row| {
                    let row_style = Style::default().fg(highlight_color(row.highlight));
                    let badge = badge_color(row.badge);
                    let cells = row.cells.into_iter().enumerate().map(|(i, text)| {
                        if i == STATUS_CELL {
                            Cell::from(text).style(Style::default().fg(badge))
                        } else {
                            Cell::from(text)
                        }
                    });
                    Row::new(cells).style(row_style)
                })
                .collect();

            let table = Table::new(rows, WIDTHS)
                .header(header)
                .column_spacing(1)
                .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("\u{25b6} ");
            let mut state =
                TableState::default().with_selected(Some(dashboard.view_state().selected));
            f.render_stateful_widget(table, chunks[1], &mut state);
        }
        TableBody::Placeholder { text, error } => {
            let table_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(chunks[1]);
            f.render_widget(
                Table::new(Vec::<Row>::new(), WIDTHS).header(header),
                table_chunks[0],
            );
            let color = if error { Color::Red } else { Color::DarkGray };
            f.render_widget(
                Paragraph::new(Span::styled(text, Style::default().fg(color)))
                    .alignment(Alignment::Center),
                table_chunks[1],
            );
        }
    }
}
