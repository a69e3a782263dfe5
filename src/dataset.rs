//! # Module: Dataset Store
//!
//! ## Responsibility
//! Holds the canonical application collection from the last successful full
//! reload and derives filtered and sorted projections from it.
//!
//! ## Guarantees
//! - `filtered` and `sorted` never mutate their input; they return new
//!   sequences of shared, immutable records
//! - Sorting is stable and total: missing numbers sort as 0, missing strings
//!   as "", missing user sets as size 0
//! - Identifier lookups are O(1) through an index rebuilt on every `replace`
//!
//! ## NOT Responsible For
//! - Fetching records (see `controller`)
//! - Persisting view preferences (see `view::state`)

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{AppId, AppRecord};

/// A derived, read-only projection of the dataset.
pub type View = Vec<Arc<AppRecord>>;

/// Canonical, single-writer application collection.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<Arc<AppRecord>>,
    index: HashMap<AppId, usize>,
    generation: u64,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a new collection wholesale.
    ///
    /// Bumps the generation counter so views derived from the previous
    /// collection can be recognised as stale. When an identifier repeats, the
    /// index points at its first occurrence.
    pub fn replace(&mut self, records: Vec<AppRecord>) {
        self.records = records.into_iter().map(Arc::new).collect();
        self.index = HashMap::with_capacity(self.records.len());
        for (pos, record) in self.records.iter().enumerate() {
            self.index.entry(record.id.clone()).or_insert(pos);
        }
        self.generation += 1;
    }

    /// All records in server order.
    pub fn records(&self) -> &[Arc<AppRecord>] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks a record up by identifier.
    pub fn get(&self, id: &AppId) -> Option<Arc<AppRecord>> {
        self.index
            .get(id)
            .and_then(|&pos| self.records.get(pos))
            .cloned()
    }

    /// Number of `replace` calls so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A fresh unfiltered, unsorted view.
    pub fn all(&self) -> View {
        self.records.clone()
    }
}

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    /// Destination domain.
    Domain,
    /// Application name.
    AppName,
    /// Category.
    Category,
    /// Internal status.
    Status,
    /// Risk level label.
    RiskLevel,
    /// Numeric risk score.
    RiskScore,
    /// Access count.
    AccessCount,
    /// Distinct user count.
    Users,
    /// Uploaded megabytes.
    UploadMb,
    /// Linked expense total.
    Spend,
}

/// Comparator family used for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Collated string comparison.
    Text,
    /// Numeric difference.
    Numeric,
    /// Set cardinality.
    Cardinality,
}

impl SortColumn {
    /// Columns in table order.
    pub const ALL: [SortColumn; 10] = [
        SortColumn::Domain,
        SortColumn::AppName,
        SortColumn::Category,
        SortColumn::Status,
        SortColumn::RiskLevel,
        SortColumn::RiskScore,
        SortColumn::AccessCount,
        SortColumn::Users,
        SortColumn::UploadMb,
        SortColumn::Spend,
    ];

    /// Wire field name of the column.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::AppName => "app_name",
            Self::Category => "category",
            Self::Status => "status",
            Self::RiskLevel => "calculated_risk_level",
            Self::RiskScore => "calculated_risk_score",
            Self::AccessCount => "network_access_count",
            Self::Users => "unique_users_network",
            Self::UploadMb => "total_data_uploaded_mb",
            Self::Spend => "linked_expense_total",
        }
    }

    /// Looks a column up by its wire field name.
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.field() == field)
    }

    /// Table header label.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::AppName => "App Name",
            Self::Category => "Category",
            Self::Status => "Status",
            Self::RiskLevel => "Risk",
            Self::RiskScore => "Score",
            Self::AccessCount => "Accesses",
            Self::Users => "Users",
            Self::UploadMb => "Upload MB",
            Self::Spend => "Spend",
        }
    }

    /// Comparator family for this column.
    pub fn kind(&self) -> SortKind {
        match self {
            Self::Domain | Self::AppName | Self::Category | Self::Status | Self::RiskLevel => {
                SortKind::Text
            }
            Self::RiskScore | Self::AccessCount | Self::UploadMb | Self::Spend => {
                SortKind::Numeric
            }
            Self::Users => SortKind::Cardinality,
        }
    }

    fn text<'a>(&self, record: &'a AppRecord) -> &'a str {
        match self {
            Self::Domain => &record.domain,
            Self::AppName => &record.app_name,
            Self::Category => &record.category,
            Self::Status => record.status.as_str(),
            Self::RiskLevel => record.risk_label(),
            _ => "",
        }
    }

    fn number(&self, record: &AppRecord) -> f64 {
        let value = match self {
            Self::RiskScore => record.calculated_risk_score,
            Self::AccessCount => record.network_access_count as f64,
            Self::UploadMb => record.total_data_uploaded_mb,
            Self::Spend => record.linked_expense_total,
            Self::Users => record.user_count() as f64,
            _ => 0.0,
        };
        if value.is_nan() {
            0.0
        } else {
            value
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to the active header.
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "\u{25b2}",
            Self::Desc => "\u{25bc}",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Column being sorted.
    pub column: SortColumn,
    /// Direction.
    pub direction: SortDirection,
}

/// Whether `text` (case-folded) occurs in any searchable field.
///
/// Searchable fields: domain, app name, category, status and risk level.
/// An empty `text` matches every record.
pub fn matches_filter(record: &AppRecord, text: &str) -> bool {
    let needle = text.to_lowercase();
    matches_folded(record, &needle)
}

fn matches_folded(record: &AppRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        record.domain.as_str(),
        record.app_name.as_str(),
        record.category.as_str(),
        record.status.as_str(),
        record.risk_label(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Returns the records matching `text`, in input order.
pub fn filtered(records: &[Arc<AppRecord>], text: &str) -> View {
    let needle = text.to_lowercase();
    records
        .iter()
        .filter(|r| matches_folded(r, &needle))
        .cloned()
        .collect()
}

/// Returns a new sequence sorted by `column` in `direction`.
///
/// The sort is stable: equal keys keep their input order in both directions.
pub fn sorted(records: &[Arc<AppRecord>], column: SortColumn, direction: SortDirection) -> View {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let ord = compare(a, b, column);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

/// Filter then sort, as shown in the table.
pub fn project(records: &[Arc<AppRecord>], text: &str, sort: Option<SortState>) -> View {
    let view = filtered(records, text);
    match sort {
        Some(s) => sorted(&view, s.column, s.direction),
        None => view,
    }
}

/// Compares two records on one column.
pub fn compare(a: &AppRecord, b: &AppRecord, column: SortColumn) -> Ordering {
    match column.kind() {
        SortKind::Text => collate(column.text(a), column.text(b)),
        SortKind::Numeric | SortKind::Cardinality => column.number(a).total_cmp(&column.number(b)),
    }
}

/// Case-sensitive collation: case-folded order first, lowercase before
/// uppercase on ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
