//! Configuration validation engine.
//!
//! ## Responsibility
//! Validate semantic constraints on a parsed [`DashboardConfig`] that cannot
//! be expressed through the type system alone.
//!
//! ## Guarantees
//! - Validation collects *all* errors before returning (no short-circuit)
//! - Error messages include the field path and the invalid value
//!
//! ## NOT Responsible For
//! - Parsing TOML (that belongs to `loader`)
//! - File I/O (that belongs to `loader`)

use super::DashboardConfig;

/// Errors arising from configuration parsing, validation, or I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing failed.
    #[error("Parse error in {file}: {source}")]
    Parse {
        /// Path of the file that failed to parse.
        file: String,
        /// Underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// One or more semantic validation rules failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A specific field has an out-of-range value.
    #[error("Field '{field}' has invalid value {value}: {reason}")]
    InvalidField {
        /// Dot-separated field path (e.g., "api.timeout_ms").
        field: String,
        /// String representation of the invalid value.
        value: String,
        /// Human-readable explanation of the constraint.
        reason: String,
    },

    /// File I/O error.
    #[error("IO error reading {file}: {source}")]
    Io {
        /// Path of the file that could not be read.
        file: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Validate all semantic constraints on a [`DashboardConfig`].
///
/// # Returns
///
/// - `Ok(())` if all constraints pass.
/// - `Err(Vec<ConfigError>)` with every violation found.
pub fn validate(config: &DashboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // ── API ──────────────────────────────────────────────────────────
    let url = config.api.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ConfigError::InvalidField {
            field: "api.base_url".into(),
            value: format!("{url:?}"),
            reason: "must be an http:// or https:// URL".into(),
        });
    }

    if config.api.timeout_ms == 0 {
        errors.push(ConfigError::InvalidField {
            field: "api.timeout_ms".into(),
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }

    // ── UI ───────────────────────────────────────────────────────────
    if !(10..=5_000).contains(&config.ui.tick_rate_ms) {
        errors.push(ConfigError::InvalidField {
            field: "ui.tick_rate_ms".into(),
            value: config.ui.tick_rate_ms.to_string(),
            reason: "must be between 10 and 5000".into(),
        });
    }

    if config.ui.notice_ttl_secs == 0 {
        errors.push(ConfigError::InvalidField {
            field: "ui.notice_ttl_secs".into(),
            value: "0".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    // ── Logging ──────────────────────────────────────────────────────
    if let Some(file) = &config.logging.file {
        if file.as_os_str().is_empty() {
            errors.push(ConfigError::InvalidField {
                field: "logging.file".into(),
                value: String::new(),
                reason: "must not be empty when set".into(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
