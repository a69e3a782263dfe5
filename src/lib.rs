//! # shadow-inventory
//!
//! Terminal dashboard client for a shadow IT application inventory.
//!
//! ## Architecture
//!
//! ```text
//! key events → tui::events → Dashboard (controller) → Gateway → Transport (HTTP)
//!                                 │                       │
//!                                 ├─ Dataset → view projections → tui::widgets
//!                                 ├─ chart::present → ChartHandle → tui::widgets
//!                                 └─ Notifier ←───────────┘
//! ```
//!
//! The six load retrievals run as one concurrent batch; one failing source
//! degrades only its own widget. A successful triage triggers a full reload.

// ── Lint policy ────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(missing_docs)]

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod chart;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod format;
pub mod model;
pub mod notifier;
pub mod transport;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;

// Re-exports for convenience
pub use config::DashboardConfig;
pub use controller::{Controller, Dashboard, LoadOutcome, Phase, WorkflowEvent};
pub use dataset::{Dataset, SortColumn, SortDirection};
pub use model::{AppId, AppRecord, Resolution};
pub use notifier::{Notifier, Severity};
pub use transport::{Endpoint, FetchError, Gateway, HttpTransport, Transport};

/// Initialise the global tracing subscriber, writing to `log_file`.
///
/// The terminal UI owns stdout and stderr, so logs only go to a file. With
/// `None` no subscriber is installed.
///
/// Reads the `LOG_FORMAT` environment variable to choose output format:
/// `"json"` for structured output, anything else for plain text. Filter level
/// is controlled by `RUST_LOG` (e.g. `RUST_LOG=shadow_inventory=debug`).
///
/// # Errors
///
/// Returns [`DashboardError::Terminal`] if the log file cannot be opened and
/// [`DashboardError::Other`] if a global subscriber is already set.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), DashboardError> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let writer = Mutex::new(file);
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let result = match format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_current_span(true)
            .with_writer(writer)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_ansi(false)
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(writer)
            .try_init(),
    };

    result.map_err(|e| DashboardError::Other(format!("tracing init failed: {e}")))
}

/// Top-level dashboard errors.
///
/// Startup and terminal failures surface here; data-source failures never do
/// (they become notices and placeholders instead).
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] config::validation::ConfigError),

    /// Terminal or log-file I/O failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// A request failed outside the notifier-backed workflows.
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),

    /// Catch-all for errors that do not fit a specific variant.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_without_file_is_noop() {
        assert!(init_tracing(None).is_ok());
    }

    #[test]
    fn test_init_tracing_unwritable_path_is_terminal_error() {
        let result = init_tracing(Some(Path::new("/nonexistent/dir/dashboard.log")));
        assert!(matches!(result, Err(DashboardError::Terminal(_))));
    }

    #[test]
    fn test_error_display() {
        let err = DashboardError::Other("boom".into());
        assert_eq!(err.to_string(), "boom");
        let err = DashboardError::from(FetchError::Status {
            endpoint: "/api/apps".into(),
            status: 503,
            message: "Service Unavailable".into(),
        });
        assert!(err.to_string().contains("503"));
    }
}
