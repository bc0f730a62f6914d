//! # API Configuration
//!
//! Environment-based configuration for the HTTP service.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use pitwall_analytics::DEFAULT_SUGGESTION_LIMIT;
use pitwall_persistence::ReadStrategy;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Directory holding the four CSV tables
    pub data_dir: PathBuf,

    /// How dataset and catalog reads use the snapshot cache
    pub read_strategy: ReadStrategy,

    /// Catalog entries returned by `/drivers` without `limit`
    pub suggestion_limit: usize,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

/// Log filter directive from `LOG_LEVEL`, else `info`.
///
/// Read before [`Config::from_env`] so its warnings reach an installed subscriber.
pub fn log_level(var: impl Fn(&str) -> Option<String>) -> String {
    var("LOG_LEVEL").unwrap_or_else(|| "info".to_string())
}

impl Config {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through `var`, which looks up one variable.
    ///
    /// Invalid values fall back to their defaults with a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server_addr: parsed(&var, "SERVER_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080))),
            data_dir: var("PITWALL_DATA_DIR")
                .map_or_else(|| PathBuf::from("./data"), PathBuf::from),
            read_strategy: parsed(&var, "READ_STRATEGY", ReadStrategy::default()),
            suggestion_limit: parsed(&var, "SUGGESTION_LIMIT", DEFAULT_SUGGESTION_LIMIT),
            log_level: log_level(&var),
            cors_origins: var("CORS_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parsed<T: std::str::FromStr>(
    var: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    let Some(raw) = var(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, "Invalid configuration value, using default");
        default
    })
}
