//! # Widget: Activity Log and Notice Banner
//!
//! ## Responsibility
//! Renders the notifier's message history with colour-coded severities, and
//! the single-line banner for the currently visible notice.
//!
//! ## Guarantees
//! - Fixed-width clock column for alignment
//! - Long lines truncated with `…` rather than wrapping
//! - Handles an empty history gracefully
//! - Newest entries appear at the bottom

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::notifier::{Notice, Severity};
use crate::tui::app::App;

/// Returns the display color for a severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}

/// Truncates a string to a maximum width in characters, adding `…` if
/// truncated.
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width <= 1 {
        return "\u{2026}".to_string();
    }
    let head: String = s.chars().take(max_width - 1).collect();
    format!("{head}\u{2026}")
}

/// Renders the activity log widget.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" ACTIVITY ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let history = app.dashboard.notifier().history();
    if history.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No activity yet.",
                Style::default().fg(Color::DarkGray),
            )),
            inner,
        );
        return;
    }

    let visible_count = inner.height as usize;
    let max_line_width = inner.width as usize;
    let skip = history.len().saturating_sub(visible_count);

    let lines: Vec<Line> = history
        .iter()
        .skip(skip)
        .map(|notice| {
            let color = severity_color(notice.severity);
            let prefix = format!("[{}] {}  ", notice.clock, notice.severity.label());
            let remaining_width = max_line_width.saturating_sub(prefix.chars().count());

            Line::from(vec![
                Span::styled(
                    format!("[{}] ", notice.clock),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}  ", notice.severity.label()),
                    Style::default().fg(color),
                ),
                Span::styled(
                    truncate_with_ellipsis(&notice.message, remaining_width),
                    Style::default().fg(color),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Renders the one-line banner for the visible notice, if any.
pub fn render_banner(f: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let color = severity_color(notice.severity);
    let text = truncate_with_ellipsis(
        &format!(" {}  [x] dismiss ", notice.message),
        area.width as usize,
    );
    let banner = Paragraph::new(Span::styled(
        text,
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(banner, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(Severity::Info), Color::Cyan);
        assert_eq!(severity_color(Severity::Success), Color::Green);
        assert_eq!(severity_color(Severity::Warning), Color::Yellow);
        assert_eq!(severity_color(Severity::Danger), Color::Red);
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_with_ellipsis("hello world", 6), "hello\u{2026}");
    }

    #[test]
    fn test_truncate_width_zero_and_one() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
        assert_eq!(truncate_with_ellipsis("hello", 1), "\u{2026}");
    }

    #[test]
    fn test_truncate_multibyte_does_not_split_chars() {
        assert_eq!(truncate_with_ellipsis("\u{e9}t\u{e9} long", 3), "\u{e9}t\u{2026}");
    }
}
