//! Configuration file loading with precedence handling.

use crate::export::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_DOCUMENT_TITLE};
use crate::query::PageSize;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or values.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/recview/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per page on startup; must be one of the allowed page sizes.
    #[serde(default)]
    pub page_size: Option<PageSize>,

    /// Directory exports are written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Heading of printable exports.
    #[serde(default)]
    pub document_title: Option<String>,

    /// Currency symbol used by printable exports.
    #[serde(default)]
    pub currency_symbol: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page for new browsers.
    pub page_size: PageSize,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
    /// Heading of printable exports.
    pub document_title: String,
    /// Currency symbol of printable exports.
    pub currency_symbol: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            export_dir: default_export_dir(),
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/recview/recview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("recview").join("recview.log")
    } else {
        PathBuf::from("recview.log")
    }
}

/// Resolve default export directory: the user's download directory, or the
/// current directory when there is none.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/recview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("recview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument
/// 2. `RECVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/recview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("RECVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        document_title: config.document_title.unwrap_or(defaults.document_title),
        currency_symbol: config.currency_symbol.unwrap_or(defaults.currency_symbol),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `RECVIEW_PAGE_SIZE`: Override page size (ignored with a warning if not
///   an allowed size)
/// - `RECVIEW_EXPORT_DIR`: Override export directory
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("RECVIEW_PAGE_SIZE") {
        match raw.trim().parse::<usize>().ok().map(PageSize::new) {
            Some(Ok(size)) => config.page_size = size,
            _ => warn!(value = %raw, "Ignoring invalid RECVIEW_PAGE_SIZE"),
        }
    }

    if let Ok(dir) = std::env::var("RECVIEW_EXPORT_DIR") {
        config.export_dir = PathBuf::from(dir);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
