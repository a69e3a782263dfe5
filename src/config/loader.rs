//! Configuration file loading.
//!
//! ## Responsibility
//! Read a TOML file from disk, parse it into a [`DashboardConfig`], apply the
//! API URL overrides and run validation before returning.
//!
//! ## Guarantees
//! - A successfully loaded config is always validated
//! - I/O errors and parse errors are distinguished in the error type
//! - File path is included in every error message

use std::path::Path;

use super::validation::{self, ConfigError};
use super::{DashboardConfig, API_URL_ENV};

/// Load a [`DashboardConfig`] from a TOML file.
///
/// # Returns
///
/// - `Ok(DashboardConfig)` if the file is readable, well-formed, and valid.
/// - `Err(ConfigError::Io)` if the file cannot be read.
/// - `Err(ConfigError::Parse)` if the TOML is malformed.
/// - `Err(ConfigError::Validation)` if semantic constraints are violated.
pub fn load_from_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        file: path.display().to_string(),
        source: e,
    })?;

    load_from_str(&content, &path.display().to_string())
}

/// Load a [`DashboardConfig`] from a TOML string.
///
/// `source_name` identifies the source in error messages.
pub fn load_from_str(content: &str, source_name: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        file: source_name.to_string(),
        source: e,
    })?;

    check(&config)?;
    Ok(config)
}

/// Resolve the effective configuration at startup.
///
/// Starts from `path` (or the defaults when `None`), applies the
/// `SHADOW_API_URL` environment variable and then `cli_url`, and validates
/// the result.
pub fn resolve(
    path: Option<&Path>,
    cli_url: Option<String>,
) -> Result<DashboardConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => DashboardConfig::default(),
    };
    config.apply_overrides(std::env::var(API_URL_ENV).ok(), cli_url);
    check(&config)?;
    tracing::debug!(base_url = %config.api.base_url, "configuration resolved");
    Ok(config)
}

fn check(config: &DashboardConfig) -> Result<(), ConfigError> {
    validation::validate(config).map_err(|errors| {
        ConfigError::Validation(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    })
}
