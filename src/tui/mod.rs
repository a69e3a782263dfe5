//! # Module: TUI Dashboard
//!
//! ## Responsibility
//! Terminal front end for the shadow IT inventory, built on Ratatui. Renders
//! the KPI header, the filterable application table, the detail panel with
//! triage actions, behavior insights, the three charts, and the notice log.
//!
//! ## Guarantees
//! - No panics in any rendering or update path
//! - Clean terminal restore on exit, including on panic
//! - Graceful resize handling down to the minimum size
//!
//! ## NOT Responsible For
//! - Fetching or decoding (delegates to [`crate::controller`])
//! - Deriving rows or charts (delegates to [`crate::view`] and [`crate::chart`])

pub mod app;
pub mod events;
pub mod ui;
pub mod widgets;
