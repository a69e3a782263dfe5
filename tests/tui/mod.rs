//! Integration tests for the terminal dashboard.
//!
//! These tests drive the dashboard through keyboard events and render full
//! frames into a test backend: filter editing, sorting, detail navigation,
//! triage dispatch, and the placeholders shown before and after loads.

#[cfg(feature = "tui")]
mod app_state;
#[cfg(feature = "tui")]
mod widget_tests;
