//! # Module: TUI Event Handling
//!
//! ## Responsibility
//! Polls crossterm events and translates keyboard input into dashboard
//! interactions. Interactions that need the network come back as a
//! [`Command`] for the event loop to dispatch.
//!
//! ## Guarantees
//! - Non-blocking event polling with configurable timeout
//! - No panics on any key combination
//! - Ctrl+C always triggers quit

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, InputMode, TRIAGE_KEYS};
use crate::controller::ResolveCall;
use crate::dataset::SortColumn;
use crate::model::Resolution;

/// A translated terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// User pressed quit (q or Ctrl+C).
    Quit,
    /// User toggled the help overlay.
    Help,
    /// User requested a full reload.
    Reload,
    /// User dismissed the visible notice.
    Dismiss,
    /// User started editing the filter.
    StartFilter,
    /// A character typed into the filter.
    FilterChar(char),
    /// Backspace in the filter.
    FilterBackspace,
    /// User finished editing the filter.
    FinishFilter,
    /// User activated a column header.
    Sort(SortColumn),
    /// Selection up.
    Up,
    /// Selection down.
    Down,
    /// Open the detail panel for the selected row.
    Open,
    /// Close the detail panel.
    Close,
    /// Triage the record in the detail panel.
    Resolve(Resolution),
    /// A terminal resize occurred.
    Resize(u16, u16),
    /// No actionable event within the poll window.
    None,
}

/// Work the event loop must start after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a full load batch.
    Reload,
    /// Submit a validated triage request.
    Resolve(ResolveCall),
}

/// Polls for a single input event with the given timeout.
///
/// Returns `InputEvent::None` on any crossterm polling error (never panics).
pub fn poll_event(timeout: Duration, app: &App) -> InputEvent {
    let available = match event::poll(timeout) {
        Ok(v) => v,
        Err(_) => return InputEvent::None,
    };
    if !available {
        return InputEvent::None;
    }

    match event::read() {
        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => translate_key(key, app),
        Ok(Event::Resize(w, h)) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Applies an input event to the app state.
///
/// Returns the network work to start, if any.
pub fn apply_event(app: &mut App, event: InputEvent) -> Option<Command> {
    match event {
        InputEvent::Quit => app.should_quit = true,
        InputEvent::Help => app.show_help = !app.show_help,
        InputEvent::Reload => {
            app.dashboard.begin_load();
            return Some(Command::Reload);
        }
        InputEvent::Dismiss => app.dashboard.notifier().dismiss(),
        InputEvent::StartFilter => app.mode = InputMode::Filter,
        InputEvent::FilterChar(c) => app.push_filter_char(c),
        InputEvent::FilterBackspace => app.pop_filter_char(),
        InputEvent::FinishFilter => app.mode = InputMode::Browse,
        InputEvent::Sort(column) => app.dashboard.click_sort(column),
        InputEvent::Up => app.dashboard.select_prev(),
        InputEvent::Down => app.dashboard.select_next(),
        InputEvent::Open => {
            app.dashboard.open_selected();
        }
        InputEvent::Close => app.dashboard.close_detail(),
        InputEvent::Resolve(outcome) => {
            return app
                .dashboard
                .begin_resolve(Some(outcome))
                .map(Command::Resolve);
        }
        InputEvent::Resize(_, _) | InputEvent::None => {}
    }
    None
}

fn sort_key(c: char) -> Option<SortColumn> {
    let index = match c {
        '1'..='9' => c as usize - '1' as usize,
        '0' => 9,
        _ => return None,
    };
    SortColumn::ALL.get(index).copied()
}

/// Translates a crossterm key event to an `InputEvent` in the context of
/// the current app state.
pub fn translate_key(key: KeyEvent, app: &App) -> InputEvent {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }

    // any key closes help
    if app.show_help {
        return InputEvent::Help;
    }

    if app.editing_filter() {
        return match key.code {
            KeyCode::Char(c) => InputEvent::FilterChar(c),
            KeyCode::Backspace => InputEvent::FilterBackspace,
            KeyCode::Enter | KeyCode::Esc => InputEvent::FinishFilter,
            KeyCode::Up => InputEvent::Up,
            KeyCode::Down => InputEvent::Down,
            _ => InputEvent::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => InputEvent::Quit,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => InputEvent::Help,
        KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Reload,
        KeyCode::Char('x') | KeyCode::Char('X') => InputEvent::Dismiss,
        KeyCode::Char('/') => InputEvent::StartFilter,
        KeyCode::Char(c) => {
            // triage keys act only on the record in an open detail panel
            if app.detail_open() {
                let lower = c.to_ascii_lowercase();
                if let Some((_, outcome)) = TRIAGE_KEYS.iter().find(|(k, _)| *k == lower) {
                    return InputEvent::Resolve(*outcome);
                }
            }
            sort_key(c).map_or(InputEvent::None, InputEvent::Sort)
        }
        KeyCode::Up => InputEvent::Up,
        KeyCode::Down => InputEvent::Down,
        KeyCode::Enter => InputEvent::Open,
        KeyCode::Esc if app.detail_open() => InputEvent::Close,
        _ => InputEvent::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppId;
    use crate::notifier::{Notifier, Severity};

    fn app() -> App {
        App::new(Notifier::default(), Duration::from_millis(250))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_translate_key_q_quits() {
        assert_eq!(translate_key(key(KeyCode::Char('q')), &app()), InputEvent::Quit);
    }

    #[test]
    fn test_translate_key_ctrl_c_quits_even_while_filtering() {
        let mut app = app();
        app.mode = InputMode::Filter;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_c, &app), InputEvent::Quit);
    }

    #[test]
    fn test_translate_key_filter_mode_captures_characters() {
        let mut app = app();
        app.mode = InputMode::Filter;
        assert_eq!(
            translate_key(key(KeyCode::Char('q')), &app),
            InputEvent::FilterChar('q')
        );
        assert_eq!(
            translate_key(key(KeyCode::Backspace), &app),
            InputEvent::FilterBackspace
        );
        assert_eq!(translate_key(key(KeyCode::Esc), &app), InputEvent::FinishFilter);
    }

    #[test]
    fn test_translate_key_digits_sort_columns() {
        let app = app();
        assert_eq!(
            translate_key(key(KeyCode::Char('1')), &app),
            InputEvent::Sort(SortColumn::Domain)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('0')), &app),
            InputEvent::Sort(SortColumn::Spend)
        );
    }

    #[test]
    fn test_translate_key_triage_keys() {
        let mut app = app();
        app.dashboard.open_detail(AppId::new("1"));
        assert_eq!(
            translate_key(key(KeyCode::Char('b')), &app),
            InputEvent::Resolve(Resolution::Blocked)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('F')), &app),
            InputEvent::Resolve(Resolution::FalsePositive)
        );
    }

    #[test]
    fn test_translate_key_triage_keys_ignored_without_detail() {
        let app = app();
        for c in ['s', 'b', 'i', 'f', 'B'] {
            assert_eq!(translate_key(key(KeyCode::Char(c)), &app), InputEvent::None);
        }
        assert!(app.dashboard.notifier().history().is_empty());
    }

    #[test]
    fn test_translate_key_esc_closes_detail_only_when_open() {
        let mut app = app();
        assert_eq!(translate_key(key(KeyCode::Esc), &app), InputEvent::None);
        app.dashboard.open_detail(AppId::new("1"));
        assert_eq!(translate_key(key(KeyCode::Esc), &app), InputEvent::Close);
    }

    #[test]
    fn test_translate_key_any_key_closes_help() {
        let mut app = app();
        app.show_help = true;
        assert_eq!(translate_key(key(KeyCode::Char('z')), &app), InputEvent::Help);
    }

    #[test]
    fn test_apply_event_reload_returns_command() {
        let mut app = app();
        assert_eq!(apply_event(&mut app, InputEvent::Reload), Some(Command::Reload));
        assert_eq!(app.dashboard.updated_label(), "Updating...");
    }

    #[test]
    fn test_apply_event_resolve_without_detail_reports_inconsistency() {
        let mut app = app();
        assert_eq!(
            apply_event(&mut app, InputEvent::Resolve(Resolution::Blocked)),
            None
        );
        assert_eq!(app.dashboard.notifier().count(Severity::Danger), 1);
    }

    #[test]
    fn test_apply_event_resolve_with_detail_returns_call() {
        let mut app = app();
        app.dashboard.open_detail(AppId::new("42"));
        let command = apply_event(&mut app, InputEvent::Resolve(Resolution::Blocked));
        assert_eq!(
            command,
            Some(Command::Resolve(ResolveCall {
                id: AppId::new("42"),
                outcome: Resolution::Blocked,
            }))
        );
    }

    #[test]
    fn test_apply_event_filter_mode_transitions() {
        let mut app = app();
        apply_event(&mut app, InputEvent::StartFilter);
        assert!(app.editing_filter());
        apply_event(&mut app, InputEvent::FilterChar('x'));
        assert_eq!(app.filter(), "x");
        apply_event(&mut app, InputEvent::FinishFilter);
        assert!(!app.editing_filter());
        assert_eq!(app.filter(), "x");
    }

    #[test]
    fn test_apply_event_dismiss_hides_notice() {
        let mut app = app();
        app.dashboard.notifier().notify("hello", Severity::Info);
        apply_event(&mut app, InputEvent::Dismiss);
        assert!(app.dashboard.notifier().visible().is_none());
    }

    #[test]
    fn test_apply_event_help_toggles() {
        let mut app = app();
        apply_event(&mut app, InputEvent::Help);
        assert!(app.show_help);
        apply_event(&mut app, InputEvent::Help);
        assert!(!app.show_help);
    }
}
