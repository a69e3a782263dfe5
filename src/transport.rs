//! # Module: Transport
//!
//! ## Responsibility
//! Single-round-trip retrieval and submission primitives against the
//! inventory API, plus the [`Gateway`] that turns failures into user-visible
//! notices and a sentinel `None` so orchestration code can keep going.
//!
//! ## Guarantees
//! - No automatic retries
//! - Non-2xx status, connection/timeout failures and malformed bodies are all
//!   reported as [`FetchError`]; nothing panics
//! - Every failure seen by the [`Gateway`] posts exactly one danger notice
//!
//! ## NOT Responsible For
//! - Deciding what a missing document means for the UI (see `controller`)

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::AppId;
use crate::notifier::{Notifier, Severity};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// An inventory API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /api/summary_stats`
    SummaryStats,
    /// `GET /api/apps`
    Apps,
    /// `GET /api/behavior_insights`
    BehaviorInsights,
    /// `GET /api/chart_data/risk_distribution`
    RiskDistribution,
    /// `GET /api/chart_data/spend_by_category`
    SpendByCategory,
    /// `GET /api/chart_data/usage_trend`
    UsageTrend,
    /// `POST /api/apps/{app_id}/resolve`
    Resolve(AppId),
}

impl Endpoint {
    /// The six retrievals issued by a full dashboard load.
    pub const LOAD_BATCH: [Endpoint; 6] = [
        Endpoint::SummaryStats,
        Endpoint::Apps,
        Endpoint::BehaviorInsights,
        Endpoint::RiskDistribution,
        Endpoint::SpendByCategory,
        Endpoint::UsageTrend,
    ];

    /// Request path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Self::SummaryStats => "/api/summary_stats".to_string(),
            Self::Apps => "/api/apps".to_string(),
            Self::BehaviorInsights => "/api/behavior_insights".to_string(),
            Self::RiskDistribution => "/api/chart_data/risk_distribution".to_string(),
            Self::SpendByCategory => "/api/chart_data/spend_by_category".to_string(),
            Self::UsageTrend => "/api/chart_data/usage_trend".to_string(),
            Self::Resolve(id) => format!("/api/apps/{}/resolve", encode_segment(id.as_str())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Percent-encodes characters that would break a single path segment.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Failure of a single request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// DNS, connection, or timeout failure.
    #[error("network error for {endpoint}: {message}")]
    Network {
        /// Request path.
        endpoint: String,
        /// Underlying error text.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {endpoint}: {message}")]
    Status {
        /// Request path.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Server-supplied `error` text, or the reason phrase.
        message: String,
    },

    /// The response body was not valid JSON.
    #[error("malformed response from {endpoint}: {message}")]
    Decode {
        /// Request path.
        endpoint: String,
        /// Parser error text.
        message: String,
    },
}

/// JSON request primitives.
///
/// Implementations must be thread-safe (Send + Sync) so loads can run on
/// spawned tasks; the trait is object-safe for `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET path`, returning the decoded JSON body.
    async fn get_json(&self, path: &str) -> Result<Value, FetchError>;

    /// `POST path` with a JSON body, returning the decoded JSON response.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, FetchError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn finish(
        &self,
        path: &str,
        response: reqwest::Response,
        error_from_body: bool,
    ) -> Result<Value, FetchError> {
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("").to_string();
            let message = if error_from_body {
                let body = response.text().await.unwrap_or_default();
                server_error_message(&body).unwrap_or(reason)
            } else {
                reason
            };
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Network {
            endpoint: path.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Extracts the `error` field of a JSON error body.
pub fn server_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        debug!(endpoint = path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        self.finish(path, response, false).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, FetchError> {
        debug!(endpoint = path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        self.finish(path, response, true).await
    }
}

/// Failure-absorbing front of a [`Transport`].
///
/// Converts every [`FetchError`] into a danger notice and a `None` result.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    notifier: Notifier,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

impl Gateway {
    /// Wraps a transport, reporting failures to `notifier`.
    pub fn new(transport: Arc<dyn Transport>, notifier: Notifier) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    /// The notifier failures are reported to.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Retrieves a document, or `None` after notifying the failure.
    pub async fn retrieve(&self, endpoint: &Endpoint) -> Option<Value> {
        let path = endpoint.path();
        match self.transport.get_json(&path).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(endpoint = %path, error = %e, "retrieval failed");
                let message = match &e {
                    FetchError::Status { status, .. } => {
                        format!("Error fetching data from {path}. Status: {status}")
                    }
                    FetchError::Network { .. } | FetchError::Decode { .. } => {
                        format!("Network error fetching data from {path}.")
                    }
                };
                self.notifier.notify(message, Severity::Danger);
                None
            }
        }
    }

    /// Submits a payload, or `None` after notifying the failure.
    pub async fn submit(&self, endpoint: &Endpoint, payload: &Value) -> Option<Value> {
        let path = endpoint.path();
        match self.transport.post_json(&path, payload).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(endpoint = %path, error = %e, "submission failed");
                let message = match &e {
                    FetchError::Status { message, .. } => {
                        format!("API Error on update: {message}")
                    }
                    FetchError::Network { .. } | FetchError::Decode { .. } => {
                        "Network error during update.".to_string()
                    }
                };
                self.notifier.notify(message, Severity::Danger);
                None
            }
        }
    }
}
