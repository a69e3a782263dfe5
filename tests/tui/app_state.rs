//! Integration tests for App state transitions driven by input events.

use std::time::Duration;

use serde_json::{json, Value};
use shadow_inventory::controller::{ResolveCall, WorkflowEvent, MISSING_TARGET};
use shadow_inventory::tui::app::{App, InputMode};
use shadow_inventory::tui::events::{apply_event, Command, InputEvent};
use shadow_inventory::{AppId, LoadOutcome, Notifier, Phase, Resolution, Severity, SortColumn};

fn apps() -> Value {
    json!([
        {"id": 1, "domain": "dropbox.com", "app_name": "Dropbox", "category": "Storage",
         "status": "unsanctioned", "calculated_risk_level": "High", "linked_expense_total": 40.0},
        {"id": 2, "domain": "slack.com", "app_name": "Slack", "category": "Chat",
         "status": "sanctioned", "calculated_risk_level": "Low", "linked_expense_total": 900.0},
        {"id": 3, "domain": "notion.so", "app_name": "Notion", "category": "Docs",
         "status": "unknown", "calculated_risk_level": "Medium", "linked_expense_total": 15.0}
    ])
}

fn loaded_app() -> App {
    let mut app = App::new(Notifier::default(), Duration::from_millis(250));
    app.dashboard.begin_load();
    app.dashboard.apply_load(LoadOutcome {
        stats: Some(json!({"total_detected": 3})),
        apps: Some(apps()),
        behavior: Some(json!({})),
        risk_distribution: Some(json!({"labels": ["High"], "values": [1]})),
        spend_by_category: Some(json!({"labels": ["Chat"], "values": [900]})),
        usage_trend: Some(json!({"labels": ["Mon"], "values": [3]})),
    });
    app
}

fn type_filter(app: &mut App, text: &str) {
    apply_event(app, InputEvent::StartFilter);
    for c in text.chars() {
        apply_event(app, InputEvent::FilterChar(c));
    }
    apply_event(app, InputEvent::FinishFilter);
}

fn visible_ids(app: &App) -> Vec<String> {
    app.dashboard
        .view()
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}

#[test]
fn test_filter_typing_narrows_table() {
    let mut app = loaded_app();
    type_filter(&mut app, "DROP");
    assert_eq!(app.mode, InputMode::Browse);
    assert_eq!(app.filter(), "DROP");
    assert_eq!(visible_ids(&app), vec!["1"]);

    apply_event(&mut app, InputEvent::StartFilter);
    for _ in 0..4 {
        apply_event(&mut app, InputEvent::FilterBackspace);
    }
    assert_eq!(app.dashboard.visible_count(), 3);
}

#[test]
fn test_filter_matching_nothing_counts_zero() {
    let mut app = loaded_app();
    type_filter(&mut app, "zzz");
    assert_eq!(app.dashboard.visible_count(), 0);
    assert_eq!(app.dashboard.table().row_count(), 0);
}

#[test]
fn test_sort_twice_reverses() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Sort(SortColumn::Spend));
    assert_eq!(visible_ids(&app), vec!["3", "1", "2"]);
    apply_event(&mut app, InputEvent::Sort(SortColumn::Spend));
    assert_eq!(visible_ids(&app), vec!["2", "1", "3"]);
}

#[test]
fn test_sort_survives_filter_change() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Sort(SortColumn::Spend));
    type_filter(&mut app, "o");
    let spends: Vec<f64> = app
        .dashboard
        .view()
        .iter()
        .map(|r| r.linked_expense_total)
        .collect();
    assert!(spends.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_open_selected_row_shows_its_record() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Down);
    apply_event(&mut app, InputEvent::Open);
    assert!(app.detail_open());
    let record = app.dashboard.detail_record().expect("test: detail record");
    assert_eq!(record.id, AppId::new("2"));

    apply_event(&mut app, InputEvent::Close);
    assert!(!app.detail_open());
}

#[test]
fn test_resolve_returns_command_and_disables_control() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Open);
    let command = apply_event(&mut app, InputEvent::Resolve(Resolution::Blocked));
    assert_eq!(
        command,
        Some(Command::Resolve(ResolveCall {
            id: AppId::new("1"),
            outcome: Resolution::Blocked,
        }))
    );
    let submission = app.dashboard.submission().expect("test: submission");
    assert!(submission.control_disabled);
    assert_eq!(submission.indicator, "Updating to Blocked...");

    // a second action while one is in flight is ignored
    assert_eq!(
        apply_event(&mut app, InputEvent::Resolve(Resolution::Sanctioned)),
        None
    );
    assert_eq!(app.dashboard.notifier().count(Severity::Danger), 0);
}

#[test]
fn test_resolve_without_detail_reports_error() {
    let mut app = loaded_app();
    assert_eq!(
        apply_event(&mut app, InputEvent::Resolve(Resolution::Blocked)),
        None
    );
    let visible = app.dashboard.notifier().visible().expect("test: notice");
    assert_eq!(visible.message, MISSING_TARGET);
    assert_eq!(visible.severity, Severity::Danger);
}

#[test]
fn test_successful_resolution_requests_reload() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Open);
    apply_event(&mut app, InputEvent::Resolve(Resolution::Investigating));

    let reload = app.dashboard.handle(WorkflowEvent::Resolved(Some(
        json!({"success": true, "message": "Updated"}),
    )));
    assert!(reload);
    assert!(!app.detail_open());
    assert!(app.dashboard.submission().is_none());
    let visible = app.dashboard.notifier().visible().expect("test: notice");
    assert_eq!(visible.message, "Updated");
    assert_eq!(visible.severity, Severity::Success);
}

#[test]
fn test_reload_event_enters_loading() {
    let mut app = loaded_app();
    assert_eq!(app.dashboard.phase(), Phase::Ready);
    assert_eq!(apply_event(&mut app, InputEvent::Reload), Some(Command::Reload));
    assert_eq!(app.dashboard.phase(), Phase::Loading);
    assert_eq!(app.dashboard.updated_label(), "Updating...");
}

#[test]
fn test_reload_resets_view_state() {
    let mut app = loaded_app();
    type_filter(&mut app, "slack");
    apply_event(&mut app, InputEvent::Sort(SortColumn::Domain));
    apply_event(&mut app, InputEvent::Open);

    app.dashboard.handle(WorkflowEvent::Loaded(LoadOutcome {
        apps: Some(apps()),
        ..LoadOutcome::default()
    }));
    assert_eq!(app.filter(), "");
    assert!(app.dashboard.view_state().sort.is_none());
    assert!(!app.detail_open());
    assert_eq!(app.dashboard.visible_count(), 3);
}

#[test]
fn test_dismiss_hides_notice() {
    let mut app = loaded_app();
    app.dashboard
        .notifier()
        .notify("Updated", Severity::Success);
    apply_event(&mut app, InputEvent::Dismiss);
    assert!(app.dashboard.notifier().visible().is_none());
    assert_eq!(app.dashboard.notifier().history().len(), 1);
}

#[test]
fn test_quit_and_help() {
    let mut app = loaded_app();
    apply_event(&mut app, InputEvent::Help);
    assert!(app.show_help);
    apply_event(&mut app, InputEvent::Help);
    assert!(!app.show_help);
    apply_event(&mut app, InputEvent::Quit);
    assert!(app.should_quit);
}
