//! # Module: TUI Widgets
//!
//! ## Responsibility
//! Individual rendering widgets for each dashboard section. Each widget is a pure
//! function that takes app state and a layout rect, and renders into a frame.
//!
//! ## Guarantees
//! - All widgets handle zero-data gracefully (placeholder rendering)
//! - No widget panics on any input range
//! - Severity and risk colours are consistent across widgets

pub mod activity;
pub mod charts;
pub mod detail;
pub mod insights;
pub mod kpi;
pub mod table;
