//! # Module: Inventory Data Model
//!
//! ## Responsibility
//! Typed views of the JSON documents served by the inventory API: application
//! records, KPI summary, behavior insights, aggregate chart series and the
//! resolver response.
//!
//! ## Guarantees
//! - Missing **and** null fields decode to their defaults instead of failing
//!   the whole document
//! - Unrecognised enum values degrade (`unknown` status, absent risk level or
//!   resolution) rather than rejecting the record
//! - A record without an identifier is rejected individually
//!
//! ## NOT Responsible For
//! - Fetching documents (see `transport`)
//! - Display strings (see `format` and `view`)

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier of an application record.
///
/// The API serves identifiers as strings or integers; both are normalised to
/// their string form, which is also the resolver path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for AppId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) if !s.is_empty() => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(de::Error::custom(format!(
                "application id must be a non-empty string or number, got {other}"
            ))),
        }
    }
}

/// Internal classification status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStatus {
    /// Formally approved.
    Sanctioned,
    /// Explicitly not approved.
    Unsanctioned,
    /// Not relevant to the inventory.
    Irrelevant,
    /// Approved with conditions.
    ConditionallyApproved,
    /// Not yet classified. Also used for unrecognised values.
    #[default]
    #[serde(other)]
    Unknown,
}

impl AppStatus {
    /// Wire name, which is also the displayed and filtered text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Sanctioned => "sanctioned",
            Self::Unsanctioned => "unsanctioned",
            Self::Irrelevant => "irrelevant",
            Self::ConditionallyApproved => "conditionally_approved",
        }
    }
}

/// Calculated risk level, ordered `Info < Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Informational only.
    Info,
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

impl RiskLevel {
    /// Display label (`High`, `Medium`, `Low`, `Info`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Analyst triage decision for an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Approved for use.
    Sanctioned,
    /// Access should be blocked.
    Blocked,
    /// Under investigation.
    Investigating,
    /// Detection was a false positive.
    FalsePositive,
}

impl Resolution {
    /// All outcomes in menu order.
    pub const ALL: [Resolution; 4] = [
        Resolution::Sanctioned,
        Resolution::Blocked,
        Resolution::Investigating,
        Resolution::FalsePositive,
    ];

    /// Wire name, also used as the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sanctioned => "Sanctioned",
            Self::Blocked => "Blocked",
            Self::Investigating => "Investigating",
            Self::FalsePositive => "FalsePositive",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the application inventory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppRecord {
    /// Stable identifier, the only key used for cross-view correlation.
    pub id: AppId,
    /// Observed destination domain.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    /// Human-readable application name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub app_name: String,
    /// Application category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Internal classification status.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AppStatus,
    /// Calculated risk level; absent when missing or unrecognised.
    #[serde(default, deserialize_with = "lenient_option")]
    pub calculated_risk_level: Option<RiskLevel>,
    /// Calculated numeric risk score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub calculated_risk_score: f64,
    /// Number of observed network accesses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub network_access_count: u64,
    /// Distinct users seen accessing the application.
    #[serde(default, deserialize_with = "string_list")]
    pub unique_users_network: Vec<String>,
    /// Total uploaded volume in megabytes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_data_uploaded_mb: f64,
    /// Total downloaded volume in megabytes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_data_downloaded_mb: f64,
    /// Number of expense entries linked to the application.
    #[serde(default, deserialize_with = "null_as_default")]
    pub linked_expense_count: u64,
    /// Sum of linked expenses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub linked_expense_total: f64,
    /// First network sighting (ISO-8601).
    #[serde(default)]
    pub first_seen_network: Option<String>,
    /// Last network sighting (ISO-8601).
    #[serde(default)]
    pub last_seen_network: Option<String>,
    /// Human-readable risk factors, in assessment order.
    #[serde(default, deserialize_with = "string_list")]
    pub risk_factors: Vec<String>,
    /// GDPR compliance flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub compliance_gdpr: bool,
    /// HIPAA compliance flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub compliance_hipaa: bool,
    /// Known breach history flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub known_breach: bool,
    /// Current triage decision, if any.
    #[serde(default, deserialize_with = "lenient_option")]
    pub resolution_status: Option<Resolution>,
}

impl AppRecord {
    /// Creates a record with the given identifier and every other field
    /// defaulted.
    pub fn new(id: impl Into<AppId>) -> Self {
        Self {
            id: id.into(),
            domain: String::new(),
            app_name: String::new(),
            category: String::new(),
            status: AppStatus::Unknown,
            calculated_risk_level: None,
            calculated_risk_score: 0.0,
            network_access_count: 0,
            unique_users_network: Vec::new(),
            total_data_uploaded_mb: 0.0,
            total_data_downloaded_mb: 0.0,
            linked_expense_count: 0,
            linked_expense_total: 0.0,
            first_seen_network: None,
            last_seen_network: None,
            risk_factors: Vec::new(),
            compliance_gdpr: false,
            compliance_hipaa: false,
            known_breach: false,
            resolution_status: None,
        }
    }

    /// Risk level label, or the empty string when absent.
    pub fn risk_label(&self) -> &'static str {
        self.calculated_risk_level.map_or("", |r| r.as_str())
    }

    /// Number of distinct users.
    pub fn user_count(&self) -> usize {
        self.unique_users_network.len()
    }
}

/// Result of decoding the `/api/apps` collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    /// Successfully decoded records in server order.
    pub records: Vec<AppRecord>,
    /// Number of entries that could not be decoded and were skipped.
    pub skipped: usize,
}

/// Decodes the application collection record by record.
///
/// # Errors
///
/// Returns an error only when the document is not a JSON array. Individual
/// undecodable entries are counted in [`RecordBatch::skipped`].
pub fn decode_records(value: Value) -> Result<RecordBatch, serde_json::Error> {
    let items: Vec<Value> = serde_json::from_value(value)?;
    let mut batch = RecordBatch {
        records: Vec::with_capacity(items.len()),
        skipped: 0,
    };
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<AppRecord>(item) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable application record");
                batch.skipped += 1;
            }
        }
    }
    Ok(batch)
}

/// KPI summary served by `/api/summary_stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    /// Relevant applications detected.
    #[serde(deserialize_with = "null_as_default")]
    pub total_detected: u64,
    /// Applications counted as shadow IT.
    #[serde(deserialize_with = "null_as_default")]
    pub shadow_count: u64,
    /// High-risk applications.
    #[serde(deserialize_with = "null_as_default")]
    pub high_risk: u64,
    /// Medium-risk applications.
    #[serde(deserialize_with = "null_as_default")]
    pub medium_risk: u64,
    /// Low-risk applications.
    #[serde(deserialize_with = "null_as_default")]
    pub low_risk: u64,
    /// Applications marked irrelevant or false positive.
    #[serde(deserialize_with = "null_as_default")]
    pub irrelevant_or_fp: u64,
    /// Total linked spend.
    #[serde(deserialize_with = "null_as_default")]
    pub linked_spend: f64,
}

/// A `(user, count)` pair from the behavior insights.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserCount(
    /// User identifier.
    #[serde(deserialize_with = "lenient_string")]
    pub String,
    /// Number of applications or accesses.
    pub u64,
);

/// An application with unusually high upload volume.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HighUploadApp {
    /// Application name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub app_name: String,
    /// Destination domain.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    /// Uploaded volume in megabytes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uploaded_mb: f64,
}

/// One insight list, decoded independently of its siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightList<T> {
    /// Not loaded yet.
    Pending,
    /// Decoded entries (possibly none).
    Loaded(Vec<T>),
    /// The source failed or this list was malformed.
    Failed,
}

impl<T> Default for InsightList<T> {
    fn default() -> Self {
        Self::Pending
    }
}

/// Behavior insights served by `/api/behavior_insights`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviorInsights {
    /// Users touching the most distinct shadow applications.
    pub top_users_by_app_count: InsightList<UserCount>,
    /// Users with the most shadow accesses.
    pub top_users_by_access_count: InsightList<UserCount>,
    /// Applications with high upload volume.
    pub high_upload_apps: InsightList<HighUploadApp>,
}

impl BehaviorInsights {
    /// All lists marked as failed.
    pub fn failed() -> Self {
        Self {
            top_users_by_app_count: InsightList::Failed,
            top_users_by_access_count: InsightList::Failed,
            high_upload_apps: InsightList::Failed,
        }
    }

    /// Decodes each list from the insights document independently.
    ///
    /// A missing or malformed list becomes [`InsightList::Failed`] without
    /// affecting the others.
    pub fn from_value(value: &Value) -> Self {
        Self {
            top_users_by_app_count: decode_list(value, "top_shadow_users_by_app_count"),
            top_users_by_access_count: decode_list(value, "top_shadow_users_by_access_count"),
            high_upload_apps: decode_list(value, "apps_with_high_data_upload"),
        }
    }
}

fn decode_list<T: DeserializeOwned>(value: &Value, key: &str) -> InsightList<T> {
    match value.get(key) {
        Some(list) => match serde_json::from_value(list.clone()) {
            Ok(items) => InsightList::Loaded(items),
            Err(e) => {
                tracing::warn!(list = key, error = %e, "malformed insight list");
                InsightList::Failed
            }
        },
        None => InsightList::Failed,
    }
}

/// Pre-aggregated `(labels, values)` series driving one chart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AggregateSeries {
    /// Category or time labels.
    #[serde(default, deserialize_with = "string_list")]
    pub labels: Vec<String>,
    /// Values, index-aligned with `labels`.
    #[serde(default, deserialize_with = "number_list")]
    pub values: Vec<f64>,
}

impl AggregateSeries {
    /// Creates a series, truncating to the shorter of the two sequences.
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }.aligned()
    }

    /// Truncates labels and values to a common length.
    pub fn aligned(mut self) -> Self {
        let len = self.labels.len().min(self.values.len());
        self.labels.truncate(len);
        self.values.truncate(len);
        self
    }

    /// Number of index-aligned points.
    pub fn len(&self) -> usize {
        self.labels.len().min(self.values.len())
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body posted to the resolver endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Target triage outcome.
    pub resolution_status: Resolution,
}

/// Resolver success-path response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResolveResponse {
    /// Whether the update was applied.
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

// ── Lenient field decoders ─────────────────────────────────────────────────

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().filter_map(scalar_to_string).collect())
}

fn number_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let items = Option::<Vec<Option<f64>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
