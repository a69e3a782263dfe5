//! # Module: Dashboard Configuration
//!
//! ## Responsibility
//! Parse and validate the TOML configuration of the dashboard client:
//! where the inventory API lives, how the terminal UI ticks and how long
//! notices stay visible, and where logs go.
//! ```text
//! shadow-dashboard --config dashboard.toml
//! ```
//!
//! ## Guarantees
//! - Every field is defaulted; an empty file is a valid configuration
//! - Validated: all semantic constraints are checked before a config is accepted
//! - Overrides apply in order: file, then `SHADOW_API_URL`, then `--api-url`
//!
//! ## NOT Responsible For
//! - Parsing command-line arguments (that belongs to the binary)
//! - Installing the tracing subscriber (that belongs to `init_tracing`)

pub mod loader;
pub mod validation;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "SHADOW_API_URL";

// ── Default value functions ──────────────────────────────────────────────

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_notice_ttl_secs() -> u64 {
    5
}

// ── Top-level config ─────────────────────────────────────────────────────

/// Root configuration of the dashboard client.
///
/// # Example
///
/// ```toml
/// [api]
/// base_url = "http://inventory.internal:5000"
/// timeout_ms = 5000
///
/// [ui]
/// tick_rate_ms = 200
///
/// [logging]
/// file = "/tmp/shadow-dashboard.log"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Inventory API connection.
    pub api: ApiConfig,
    /// Terminal UI behaviour.
    pub ui: UiConfig,
    /// Log destination.
    pub logging: LoggingConfig,
}

/// Inventory API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the fixed endpoint paths are appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ApiConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw / input poll interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Seconds a notice stays visible before self-dismissing.
    pub notice_ttl_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            notice_ttl_secs: default_notice_ttl_secs(),
        }
    }
}

impl UiConfig {
    /// Redraw interval.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Notice time-to-live.
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }
}

/// Log destination settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// File the tracing output is appended to. `None` disables logging, since
    /// stderr would corrupt the terminal UI.
    pub file: Option<PathBuf>,
}

impl DashboardConfig {
    /// Applies the environment and command-line API URL overrides.
    ///
    /// Empty values are ignored. The command-line value wins over the
    /// environment value.
    pub fn apply_overrides(&mut self, env_url: Option<String>, cli_url: Option<String>) {
        for url in [env_url, cli_url].into_iter().flatten() {
            let url = url.trim();
            if !url.is_empty() {
                self.api.base_url = url.to_string();
            }
        }
    }
}
