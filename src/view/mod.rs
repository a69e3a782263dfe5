//! # Module: View Projections
//!
//! ## Responsibility
//! Stateless projections from records to presentation models: table rows with
//! badges and highlights, the sectioned detail panel, and the explicit view
//! state (filter, sort, open detail) with its transition table.
//!
//! ## Guarantees
//! - Projections are pure functions of their input
//! - Absent optional fields render an explicit `N/A` marker, never blank
//!
//! ## NOT Responsible For
//! - Drawing to a terminal (see `tui::widgets`)
//! - Owning records (see `dataset`)

pub mod detail;
pub mod state;
pub mod table;

pub use detail::{detail_view, DetailView};
pub use state::{ViewState, ViewTransition};
pub use table::{table_body, CollectionState, RowView, TableBody};
