//! # Module: TUI App State
//!
//! ## Responsibility
//! Wraps the [`Dashboard`] application state with terminal-only concerns:
//! whether the filter box is being edited, whether help is shown, and
//! whether the loop should exit.
//!
//! ## Guarantees
//! - The filter text has a single owner (the dashboard view state)
//! - Every mutation goes through a named method that is testable in isolation

use std::time::Duration;

use crate::controller::Dashboard;
use crate::model::Resolution;
use crate::notifier::Notifier;

/// Minimum terminal width for the dashboard to render.
pub const MIN_COLS: u16 = 100;

/// Minimum terminal height for the dashboard to render.
pub const MIN_ROWS: u16 = 30;

/// Key for each triage outcome, in menu order.
pub const TRIAGE_KEYS: [(char, Resolution); 4] = [
    ('s', Resolution::Sanctioned),
    ('b', Resolution::Blocked),
    ('i', Resolution::Investigating),
    ('f', Resolution::FalsePositive),
];

/// What keystrokes currently drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and commands.
    #[default]
    Browse,
    /// Characters edit the filter text.
    Filter,
}

/// Primary application state for the terminal dashboard.
#[derive(Debug)]
pub struct App {
    /// Dashboard state owned by the workflow controller.
    pub dashboard: Dashboard,
    /// Current input mode.
    pub mode: InputMode,
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Redraw interval.
    pub tick_rate: Duration,
}

impl App {
    /// Creates a new `App` around a fresh dashboard.
    pub fn new(notifier: Notifier, tick_rate: Duration) -> Self {
        Self::with_dashboard(Dashboard::new(notifier), tick_rate)
    }

    /// Creates a new `App` around an existing dashboard.
    pub fn with_dashboard(dashboard: Dashboard, tick_rate: Duration) -> Self {
        Self {
            dashboard,
            mode: InputMode::Browse,
            should_quit: false,
            show_help: false,
            tick_rate,
        }
    }

    /// Current filter text.
    pub fn filter(&self) -> &str {
        &self.dashboard.view_state().filter
    }

    /// Whether the filter box is being edited.
    pub fn editing_filter(&self) -> bool {
        self.mode == InputMode::Filter
    }

    /// Whether the detail panel is open.
    pub fn detail_open(&self) -> bool {
        self.dashboard.view_state().detail.is_some()
    }

    /// Appends a character to the filter and re-derives the table.
    pub fn push_filter_char(&mut self, c: char) {
        let mut text = self.filter().to_string();
        text.push(c);
        self.dashboard.set_filter(text);
    }

    /// Removes the last filter character and re-derives the table.
    pub fn pop_filter_char(&mut self) {
        let mut text = self.filter().to_string();
        if text.pop().is_some() {
            self.dashboard.set_filter(text);
        }
    }
}
