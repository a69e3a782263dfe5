//! # Widget: Behavior Insights
//!
//! Renders the three insight lists. Each list shows its own placeholder
//! when it is empty, still loading, or failed to load.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::format::{format_count, format_mb};
use crate::model::{HighUploadApp, InsightList, UserCount};
use crate::tui::app::App;
use crate::tui::widgets::activity::truncate_with_ellipsis;

/// Placeholder when no user touches several shadow applications.
pub const NO_APP_COUNT_USERS: &str = "No significant shadow IT usage detected.";

/// Placeholder when no shadow accesses are recorded.
pub const NO_ACCESS_USERS: &str = "No shadow IT access recorded.";

/// Placeholder when no application exceeds the upload threshold.
pub const NO_HIGH_UPLOAD: &str = "No apps with high data uploads detected.";

/// Placeholder for a list whose source failed.
pub const INSIGHTS_ERROR: &str = "Error loading insights.";

/// Placeholder before the first load settles.
pub const INSIGHTS_PENDING: &str = "Loading...";

/// Result of projecting one insight list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListLines {
    /// Entries to show.
    Items(Vec<String>),
    /// Placeholder text, and whether it reports an error.
    Placeholder(&'static str, bool),
}

/// Projects an insight list into display lines.
pub fn list_lines<T>(
    list: &InsightList<T>,
    empty: &'static str,
    item: impl Fn(&T) -> String,
) -> ListLines {
    match list {
        InsightList::Pending => ListLines::Placeholder(INSIGHTS_PENDING, false),
        InsightList::Failed => ListLines::Placeholder(INSIGHTS_ERROR, true),
        InsightList::Loaded(items) if items.is_empty() => ListLines::Placeholder(empty, false),
        InsightList::Loaded(items) => ListLines::Items(items.iter().map(item).collect()),
    }
}

/// `alice (4 apps)`
pub fn app_count_item(entry: &UserCount) -> String {
    format!("{} ({} apps)", entry.0, format_count(entry.1))
}

/// `alice (1,200 accesses)`
pub fn access_count_item(entry: &UserCount) -> String {
    format!("{} ({} accesses)", entry.0, format_count(entry.1))
}

/// `Dropbox (dropbox.com): 1500.3 MB`
pub fn high_upload_item(entry: &HighUploadApp) -> String {
    format!(
        "{} ({}): {} MB",
        entry.app_name,
        entry.domain,
        format_mb(entry.uploaded_mb)
    )
}

fn render_list(f: &mut Frame, area: Rect, title: &str, lines: ListLines) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let lines: Vec<Line> = match lines {
        ListLines::Items(items) => items
            .iter()
            .map(|text| {
                Line::from(vec![
                    Span::styled("\u{2022} ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        truncate_with_ellipsis(text, width.saturating_sub(2)),
                        Style::default().fg(Color::White),
                    ),
                ])
            })
            .collect(),
        ListLines::Placeholder(text, error) => {
            let color = if error { Color::Red } else { Color::DarkGray };
            vec![Line::from(Span::styled(text, Style::default().fg(color)))]
        }
    };
    f.render_widget(Paragraph::new(lines), inner);
}

/// Renders the insights column.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let insights = app.dashboard.insights();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_list(
        f,
        chunks[0],
        "TOP USERS BY APP COUNT",
        list_lines(&insights.top_users_by_app_count, NO_APP_COUNT_USERS, app_count_item),
    );
    render_list(
        f,
        chunks[1],
        "TOP USERS BY ACCESS COUNT",
        list_lines(
            &insights.top_users_by_access_count,
            NO_ACCESS_USERS,
            access_count_item,
        ),
    );
    render_list(
        f,
        chunks[2],
        "HIGH DATA UPLOAD",
        list_lines(&insights.high_upload_apps, NO_HIGH_UPLOAD, high_upload_item),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_state_has_its_placeholder() {
        let pending: InsightList<UserCount> = InsightList::Pending;
        let failed: InsightList<UserCount> = InsightList::Failed;
        let empty: InsightList<UserCount> = InsightList::Loaded(Vec::new());
        assert_eq!(
            list_lines(&pending, NO_APP_COUNT_USERS, app_count_item),
            ListLines::Placeholder(INSIGHTS_PENDING, false)
        );
        assert_eq!(
            list_lines(&failed, NO_APP_COUNT_USERS, app_count_item),
            ListLines::Placeholder(INSIGHTS_ERROR, true)
        );
        assert_eq!(
            list_lines(&empty, NO_APP_COUNT_USERS, app_count_item),
            ListLines::Placeholder(NO_APP_COUNT_USERS, false)
        );
    }

    #[test]
    fn test_item_formats() {
        let user = UserCount("alice".into(), 1200);
        assert_eq!(app_count_item(&user), "alice (1,200 apps)");
        assert_eq!(access_count_item(&user), "alice (1,200 accesses)");
        let upload = HighUploadApp {
            app_name: "Dropbox".into(),
            domain: "dropbox.com".into(),
            uploaded_mb: 1500.26,
        };
        assert_eq!(high_upload_item(&upload), "Dropbox (dropbox.com): 1500.3 MB");
    }

    #[test]
    fn test_loaded_list_projects_items() {
        let list = InsightList::Loaded(vec![UserCount("bob".into(), 2)]);
        assert_eq!(
            list_lines(&list, NO_APP_COUNT_USERS, app_count_item),
            ListLines::Items(vec!["bob (2 apps)".into()])
        );
    }
}
