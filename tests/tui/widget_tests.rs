//! Full-frame rendering tests against ratatui's test backend.
//!
//! Each test draws the whole dashboard and searches the rendered buffer for
//! the text a user would see.

use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;
use shadow_inventory::tui::app::App;
use shadow_inventory::tui::events::{apply_event, InputEvent};
use shadow_inventory::tui::ui;
use shadow_inventory::view::table::{LOAD_ERROR, LOADING, NO_MATCHES};
use shadow_inventory::{LoadOutcome, Notifier, Resolution, Severity};

fn render(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test: terminal");
    terminal.draw(|f| ui::draw(f, app)).expect("test: draw");
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn full_outcome() -> LoadOutcome {
    LoadOutcome {
        stats: Some(json!({
            "total_detected": 1234, "shadow_count": 2, "high_risk": 1,
            "medium_risk": 0, "low_risk": 1, "linked_spend": 940.0
        })),
        apps: Some(json!([
            {"id": 1, "domain": "dropbox.com", "app_name": "Dropbox", "category": "Storage",
             "status": "unsanctioned", "calculated_risk_level": "High",
             "linked_expense_total": 40.0, "risk_factors": ["Known breach"]},
            {"id": 2, "domain": "slack.com", "app_name": "Slack", "category": "Chat",
             "status": "sanctioned", "calculated_risk_level": "Low", "linked_expense_total": 900.0}
        ])),
        behavior: Some(json!({
            "top_shadow_users_by_app_count": [["alice", 4]],
            "top_shadow_users_by_access_count": [],
            "apps_with_high_data_upload": [
                {"app_name": "Dropbox", "domain": "dropbox.com", "uploaded_mb": 1500.26}
            ]
        })),
        risk_distribution: Some(json!({"labels": ["High", "Low"], "values": [1, 1]})),
        spend_by_category: Some(json!({"labels": ["Chat", "Storage"], "values": [900, 40]})),
        usage_trend: Some(json!({"labels": ["Mon", "Tue"], "values": [3, 9]})),
    }
}

fn loaded_app() -> App {
    let mut app = App::new(Notifier::default(), Duration::from_millis(250));
    app.dashboard.begin_load();
    app.dashboard.apply_load(full_outcome());
    app
}

#[test]
fn test_small_terminal_shows_guard() {
    let app = loaded_app();
    let text = render(&app, 80, 20);
    assert!(text.contains("Terminal too small"));
    assert!(!text.contains("APPLICATIONS"));
}

#[test]
fn test_before_first_load_shows_loading_placeholder() {
    let app = App::new(Notifier::default(), Duration::from_millis(250));
    let text = render(&app, 220, 50);
    assert!(text.contains("shadow-inventory"));
    assert!(text.contains(LOADING));
}

#[test]
fn test_loaded_dashboard_renders_every_region() {
    let app = loaded_app();
    let text = render(&app, 220, 50);
    assert!(text.contains("APPLICATIONS (2)"));
    assert!(text.contains("Dropbox"));
    assert!(text.contains("slack.com"));
    assert!(text.contains("TOTAL DETECTED"));
    assert!(text.contains("1,234"));
    assert!(text.contains("$940.00"));
    assert!(text.contains("RISK DISTRIBUTION"));
    assert!(text.contains("SPEND BY CATEGORY"));
    assert!(text.contains("USAGE TREND"));
    assert!(text.contains("alice (4 apps)"));
    assert!(text.contains("No shadow IT access recorded."));
    assert!(text.contains("Updated: "));
}

#[test]
fn test_filter_without_matches_shows_placeholder() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::StartFilter);
    for c in "nothing-here".chars() {
        apply_event(&mut app, InputEvent::FilterChar(c));
    }
    let text = render(&app, 220, 50);
    assert!(text.contains("APPLICATIONS (0)"));
    assert!(text.contains(NO_MATCHES));
    assert!(text.contains("Filter: nothing-here"));
}

#[test]
fn test_failed_collection_shows_error_placeholder() {
    let mut app = App::new(Notifier::default(), Duration::from_millis(250));
    app.dashboard.begin_load();
    app.dashboard.apply_load(LoadOutcome {
        apps: None,
        ..full_outcome()
    });
    let text = render(&app, 220, 50);
    assert!(text.contains(LOAD_ERROR));
}

#[test]
fn test_failed_reload_hides_previous_rows() {
    let mut app = loaded_app();
    app.dashboard.begin_load();
    app.dashboard.apply_load(LoadOutcome {
        apps: None,
        ..full_outcome()
    });
    apply_event(&mut app, InputEvent::Open);
    assert!(!app.detail_open());

    let text = render(&app, 220, 50);
    assert!(text.contains("APPLICATIONS (0)"));
    assert!(text.contains(LOAD_ERROR));
    assert!(!text.contains("slack.com"));
}

#[test]
fn test_detail_popup_lists_sections_and_actions() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Open);
    let text = render(&app, 220, 50);
    assert!(text.contains("Dropbox (dropbox.com)"));
    assert!(text.contains("Risk Assessment"));
    assert!(text.contains("Known breach"));
    assert!(text.contains("Financial Information"));
    assert!(text.contains("[b] Blocked"));
}

#[test]
fn test_detail_popup_shows_indicator_while_submitting() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Open);
    apply_event(&mut app, InputEvent::Resolve(Resolution::Sanctioned));
    let text = render(&app, 220, 50);
    assert!(text.contains("Updating to Sanctioned..."));
    assert!(!text.contains("[b] Blocked"));
}

#[test]
fn test_notice_banner_and_activity_log() {
    let app = loaded_app();
    app.dashboard
        .notifier()
        .notify("Error fetching data from /api/summary_stats. Status: 500", Severity::Danger);
    let text = render(&app, 220, 50);
    assert!(text.contains("Status: 500"));
    assert!(text.contains("Status: 500  [x] dismiss"));
}

#[test]
fn test_help_overlay_lists_triage_keys() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Help);
    let text = render(&app, 220, 50);
    assert!(text.contains("Mark Blocked"));
    assert!(text.contains("Press any key to close"));
}

#[test]
fn test_sort_arrow_in_header() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Sort(shadow_inventory::SortColumn::Spend));
    let text = render(&app, 220, 50);
    assert!(text.contains("Spend \u{25b2}"));
}
