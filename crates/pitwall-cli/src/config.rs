//! # CLI Configuration
//!
//! Environment-based defaults; command-line flags override them.

use std::env;
use std::path::PathBuf;

use pitwall_analytics::DEFAULT_SUGGESTION_LIMIT;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the four CSV tables
    pub data_dir: PathBuf,

    /// Catalog entries listed as suggestions
    pub suggestion_limit: usize,

    /// Logging level
    pub log_level: String,
}

/// Log filter directive from `PITWALL_LOG`, then `LOG_LEVEL`, else `warn`.
///
/// Read before [`Config::from_env`] so its warnings reach an installed subscriber.
pub fn log_level(var: impl Fn(&str) -> Option<String>) -> String {
    var("PITWALL_LOG")
        .or_else(|| var("LOG_LEVEL"))
        .unwrap_or_else(|| "warn".to_string())
}

impl Config {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through `var`, which looks up one variable.
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let suggestion_limit = match var("SUGGESTION_LIMIT") {
            None => DEFAULT_SUGGESTION_LIMIT,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid SUGGESTION_LIMIT, using default");
                DEFAULT_SUGGESTION_LIMIT
            }),
        };

        Self {
            data_dir: var("PITWALL_DATA_DIR")
                .map_or_else(|| PathBuf::from("./data"), PathBuf::from),
            suggestion_limit,
            log_level: log_level(&var),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
