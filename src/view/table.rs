//! Inventory table projection.
//!
//! Turns a derived view into display rows. Each row keeps the record's
//! identifier so the detail panel resolves it through the dataset index
//! instead of re-serialising the record into the presentation.

use std::sync::Arc;

use crate::format::{format_count, format_currency, format_mb, format_number};
use crate::model::{AppId, AppRecord, AppStatus, Resolution, RiskLevel};

/// Placeholder row text for an empty projection.
pub const NO_MATCHES: &str = "No applications match the criteria.";

/// Placeholder row text when the collection failed to load.
pub const LOAD_ERROR: &str = "Error loading application data.";

/// Placeholder row text while the first load is in flight.
pub const LOADING: &str = "Loading applications...";

/// Number of columns in the table.
pub const COLUMN_COUNT: usize = 11;

/// Badge style for an application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    /// Neutral grey.
    Neutral,
    /// Positive green.
    Positive,
    /// Negative red.
    Negative,
    /// Informational cyan.
    Info,
    /// Primary blue.
    Primary,
}

impl From<AppStatus> for StatusBadge {
    fn from(status: AppStatus) -> Self {
        match status {
            AppStatus::Unknown => Self::Neutral,
            AppStatus::Sanctioned => Self::Positive,
            AppStatus::Unsanctioned => Self::Negative,
            AppStatus::Irrelevant => Self::Info,
            AppStatus::ConditionallyApproved => Self::Primary,
        }
    }
}

/// Row highlight derived from the risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    /// High risk.
    Danger,
    /// Medium risk.
    Warning,
    /// Low risk, and the fallback for an absent level.
    Neutral,
    /// Informational.
    Informational,
}

impl From<Option<RiskLevel>> for RowHighlight {
    fn from(level: Option<RiskLevel>) -> Self {
        match level {
            Some(RiskLevel::High) => Self::Danger,
            Some(RiskLevel::Medium) => Self::Warning,
            Some(RiskLevel::Low) | None => Self::Neutral,
            Some(RiskLevel::Info) => Self::Informational,
        }
    }
}

/// Compact marker for the resolution column.
pub fn resolution_marker(resolution: Option<Resolution>) -> &'static str {
    match resolution {
        Some(Resolution::Sanctioned) => "\u{2714}",
        Some(Resolution::Blocked) => "\u{2718}",
        Some(Resolution::Investigating) => "\u{2026}",
        Some(Resolution::FalsePositive) => "FP",
        None => "?",
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Identifier of the source record.
    pub id: AppId,
    /// Display cells in column order.
    pub cells: [String; COLUMN_COUNT],
    /// Status badge style.
    pub badge: StatusBadge,
    /// Row highlight.
    pub highlight: RowHighlight,
}

impl RowView {
    /// Builds the row for one record.
    pub fn from_record(record: &AppRecord) -> Self {
        Self {
            id: record.id.clone(),
            cells: [
                record.domain.clone(),
                record.app_name.clone(),
                record.category.clone(),
                record.status.as_str().to_string(),
                record.risk_label().to_string(),
                format_number(record.calculated_risk_score),
                format_count(record.network_access_count),
                format_count(record.user_count() as u64),
                format_mb(record.total_data_uploaded_mb),
                format_currency(record.linked_expense_total),
                resolution_marker(record.resolution_status).to_string(),
            ],
            badge: record.status.into(),
            highlight: record.calculated_risk_level.into(),
        }
    }
}

/// Load state of the record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionState {
    /// No load has completed yet.
    #[default]
    Loading,
    /// The last load delivered a collection.
    Ready,
    /// The last load failed.
    Failed,
}

/// Table body contents.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// Data rows.
    Rows(Vec<RowView>),
    /// A single placeholder row (no matches, load error, loading).
    Placeholder {
        /// Placeholder text.
        text: &'static str,
        /// Whether the placeholder reports an error.
        error: bool,
    },
}

impl TableBody {
    /// Number of data rows (placeholders count as zero).
    pub fn row_count(&self) -> usize {
        match self {
            Self::Rows(rows) => rows.len(),
            Self::Placeholder { .. } => 0,
        }
    }
}

/// Projects a view into a table body.
pub fn table_body(view: &[Arc<AppRecord>], state: CollectionState) -> TableBody {
    match state {
        CollectionState::Failed => TableBody::Placeholder {
            text: LOAD_ERROR,
            error: true,
        },
        CollectionState::Loading if view.is_empty() => TableBody::Placeholder {
            text: LOADING,
            error: false,
        },
        _ if view.is_empty() => TableBody::Placeholder {
            text: NO_MATCHES,
            error: false,
        },
        _ => TableBody::Rows(view.iter().map(|r| RowView::from_record(r)).collect()),
    }
}
