//! View state and its transition table.
//!
//! | Transition        | filter    | sort                   | detail  | selection |
//! |-------------------|-----------|------------------------|---------|-----------|
//! | `Reload`          | reset     | reset                  | closed  | reset     |
//! | `FilterChanged`   | replaced  | kept                   | kept    | reset     |
//! | `SortClicked(c)`  | kept      | toggled / set asc      | kept    | kept      |
//! | `OpenDetail(id)`  | kept      | kept                   | `id`    | kept      |
//! | `CloseDetail`     | kept      | kept                   | closed  | kept      |

use crate::dataset::{SortColumn, SortDirection, SortState};
use crate::model::AppId;

/// A user- or workflow-driven change to the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewTransition {
    /// A full dashboard reload completed.
    Reload,
    /// The filter text changed.
    FilterChanged(String),
    /// A sortable column header was activated.
    SortClicked(SortColumn),
    /// The detail panel was opened for a record.
    OpenDetail(AppId),
    /// The detail panel was closed.
    CloseDetail,
}

/// Ephemeral UI-only state of the inventory table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Active filter text (matched case-insensitively).
    pub filter: String,
    /// Active sort, if any.
    pub sort: Option<SortState>,
    /// Identifier of the record shown in the detail panel.
    pub detail: Option<AppId>,
    /// Selected row in the current projection.
    pub selected: usize,
}

impl ViewState {
    /// Applies one transition.
    pub fn apply(&mut self, transition: ViewTransition) {
        match transition {
            ViewTransition::Reload => *self = Self::default(),
            ViewTransition::FilterChanged(text) => {
                self.filter = text;
                self.selected = 0;
            }
            ViewTransition::SortClicked(column) => {
                let direction = match self.sort {
                    Some(s) if s.column == column && s.direction == SortDirection::Asc => {
                        SortDirection::Desc
                    }
                    _ => SortDirection::Asc,
                };
                self.sort = Some(SortState { column, direction });
            }
            ViewTransition::OpenDetail(id) => self.detail = Some(id),
            ViewTransition::CloseDetail => self.detail = None,
        }
    }

    /// Moves the selection up one row.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the selection down one row, bounded by `rows`.
    pub fn select_next(&mut self, rows: usize) {
        if rows == 0 {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1).min(rows - 1);
        }
    }

    /// Clamps the selection into `0..rows`.
    pub fn clamp_selection(&mut self, rows: usize) {
        self.selected = self.selected.min(rows.saturating_sub(1));
    }
}
