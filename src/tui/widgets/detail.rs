//! # Widget: Application Detail Panel
//!
//! ## Responsibility
//! Renders the read-only detail popup for the record selected through the
//! identifier map, plus the triage actions and their in-flight indicator.
//!
//! ## Guarantees
//! - Every field renders a value or an explicit `N/A`
//! - While a submission is in flight the actions render disabled

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::Submission;
use crate::tui::app::{App, TRIAGE_KEYS};
use crate::view::detail::{DetailField, DetailValue, Indicator};
use crate::view::detail_view;

/// Shown when the open identifier no longer resolves to a record.
pub const MISSING_RECORD: &str = "Error: Could not load application details.";

/// Indicator glyph and colour.
pub fn indicator_style(indicator: Indicator) -> (&'static str, Color) {
    match indicator {
        Indicator::Good => ("\u{2714}", Color::Green),
        Indicator::Bad => ("\u{2718}", Color::Red),
    }
}

/// Action bar text: the triage keys, or the in-flight indicator.
pub fn action_hint(submission: Option<&Submission>) -> String {
    match submission {
        Some(s) => s.indicator.clone(),
        None => {
            let actions: Vec<String> = TRIAGE_KEYS
                .iter()
                .map(|(key, outcome)| format!("[{key}] {outcome}"))
                .collect();
            format!("{}   [Esc] close", actions.join("  "))
        }
    }
}

fn field_lines(field: &DetailField) -> Vec<Line<'static>> {
    let label = Span::styled(
        format!("  {}: ", field.label),
        Style::default().fg(Color::DarkGray),
    );
    match &field.value {
        DetailValue::Text(text) => vec![Line::from(vec![
            label,
            Span::styled(text.clone(), Style::default().fg(Color::White)),
        ])],
        DetailValue::Flag(indicator, text) => {
            let (glyph, color) = indicator_style(*indicator);
            vec![Line::from(vec![
                label,
                Span::styled(format!("{glyph} {text}"), Style::default().fg(color)),
            ])]
        }
        DetailValue::List(items) => {
            let mut lines = vec![Line::from(label)];
            lines.extend(items.iter().map(|item| {
                Line::from(Span::styled(
                    format!("    \u{2022} {item}"),
                    Style::default().fg(Color::White),
                ))
            }));
            lines
        }
    }
}

/// Renders the detail popup into `area` (already sized by the caller).
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(Clear, area);

    let dashboard = &app.dashboard;
    let submission = dashboard.submission();
    let (title, mut lines) = match dashboard.detail_record() {
        Some(record) => {
            let view = detail_view(&record);
            let mut lines = Vec::new();
            for section in &view.sections {
                lines.push(Line::from(Span::styled(
                    section.title,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
                for field in &section.fields {
                    lines.extend(field_lines(field));
                }
                lines.push(Line::from(""));
            }
            (view.title, lines)
        }
        None => (
            "Application".to_string(),
            vec![Line::from(Span::styled(
                MISSING_RECORD,
                Style::default().fg(Color::Red),
            ))],
        ),
    };

    let hint_style = if submission.is_some_and(|s| s.control_disabled) {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::Yellow)
    };
    lines.push(Line::from(Span::styled(action_hint(submission), hint_style)));

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}
