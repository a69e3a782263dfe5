//! Read-only detail projection of a single record.

use crate::format::{
    format_count, format_currency, format_date, format_mb, format_number, NOT_AVAILABLE,
};
use crate::model::AppRecord;

/// Text shown when a record lists no risk factors.
pub const NO_RISK_FACTORS: &str = "No specific risk factors logged.";

/// Binary indicator for a boolean field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Compliant / no breach.
    Good,
    /// Non-compliant / breach.
    Bad,
}

impl Indicator {
    /// Indicator for a compliance flag (`true` is good).
    pub fn compliance(flag: bool) -> Self {
        if flag {
            Self::Good
        } else {
            Self::Bad
        }
    }

    /// Indicator for a breach flag (`true` is bad).
    pub fn breach(flag: bool) -> Self {
        if flag {
            Self::Bad
        } else {
            Self::Good
        }
    }
}

/// Value of one detail field.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    /// Plain text (already formatted).
    Text(String),
    /// A binary indicator with its label.
    Flag(Indicator, &'static str),
    /// An enumerated list of members.
    List(Vec<String>),
}

/// One labelled field.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailField {
    /// Field label.
    pub label: String,
    /// Field value.
    pub value: DetailValue,
}

/// A titled group of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailSection {
    /// Section title.
    pub title: &'static str,
    /// Fields in display order.
    pub fields: Vec<DetailField>,
}

/// Full detail presentation of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// Panel title, `"{app_name} ({domain})"`.
    pub title: String,
    /// Sections in display order.
    pub sections: Vec<DetailSection>,
}

impl DetailView {
    /// Finds a field by label across sections.
    pub fn field(&self, label: &str) -> Option<&DetailValue> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.label == label)
            .map(|f| &f.value)
    }
}

fn text(label: impl Into<String>, value: impl Into<String>) -> DetailField {
    DetailField {
        label: label.into(),
        value: DetailValue::Text(value.into()),
    }
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

/// Builds the detail presentation for a record.
pub fn detail_view(record: &AppRecord) -> DetailView {
    let factors = if record.risk_factors.is_empty() {
        vec![NO_RISK_FACTORS.to_string()]
    } else {
        record.risk_factors.clone()
    };
    let users = if record.unique_users_network.is_empty() {
        vec![NOT_AVAILABLE.to_string()]
    } else {
        record.unique_users_network.clone()
    };
    let level = record
        .calculated_risk_level
        .map_or(NOT_AVAILABLE, |l| l.as_str());

    DetailView {
        title: format!("{} ({})", or_na(&record.app_name), or_na(&record.domain)),
        sections: vec![
            DetailSection {
                title: "Risk Assessment",
                fields: vec![
                    text(
                        "Level",
                        format!(
                            "{} (Score: {})",
                            level,
                            format_number(record.calculated_risk_score)
                        ),
                    ),
                    DetailField {
                        label: "Risk Factors".into(),
                        value: DetailValue::List(factors),
                    },
                ],
            },
            DetailSection {
                title: "Application Info",
                fields: vec![
                    text("Identifier", record.id.to_string()),
                    text("Category", or_na(&record.category)),
                    text("Internal Status", record.status.as_str()),
                    text(
                        "Resolution Status",
                        record
                            .resolution_status
                            .map_or(NOT_AVAILABLE, |r| r.as_str()),
                    ),
                    DetailField {
                        label: "GDPR Compliant".into(),
                        value: DetailValue::Flag(
                            Indicator::compliance(record.compliance_gdpr),
                            if record.compliance_gdpr { "Compliant" } else { "Non-compliant" },
                        ),
                    },
                    DetailField {
                        label: "HIPAA Compliant".into(),
                        value: DetailValue::Flag(
                            Indicator::compliance(record.compliance_hipaa),
                            if record.compliance_hipaa { "Compliant" } else { "Non-compliant" },
                        ),
                    },
                    DetailField {
                        label: "Known Breach History".into(),
                        value: DetailValue::Flag(
                            Indicator::breach(record.known_breach),
                            if record.known_breach { "Yes" } else { "No" },
                        ),
                    },
                ],
            },
            DetailSection {
                title: "Usage Information",
                fields: vec![
                    text("Access Count", format_count(record.network_access_count)),
                    DetailField {
                        label: format!("Unique Users ({})", record.user_count()),
                        value: DetailValue::List(users),
                    },
                    text(
                        "Total Data Uploaded",
                        format!("{} MB", format_mb(record.total_data_uploaded_mb)),
                    ),
                    text(
                        "Total Data Downloaded",
                        format!("{} MB", format_mb(record.total_data_downloaded_mb)),
                    ),
                    text("First Seen", format_date(record.first_seen_network.as_deref())),
                    text("Last Seen", format_date(record.last_seen_network.as_deref())),
                ],
            },
            DetailSection {
                title: "Financial Information",
                fields: vec![
                    text("Linked Expense Count", format_count(record.linked_expense_count)),
                    text("Linked Expense Total", format_currency(record.linked_expense_total)),
                ],
            },
        ],
    }
}
