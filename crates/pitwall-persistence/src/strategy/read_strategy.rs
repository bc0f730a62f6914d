//! Read strategy implementations using enum dispatch.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::SnapshotCache;

/// Read strategy enum - determines cache/source access pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStrategy {
    /// Check cache first, fall back to source on miss
    #[default]
    CacheFirst,
    /// Only read from source, skip cache
    SourceOnly,
    /// Read from source, populate cache on success
    ReadThrough,
}

impl ReadStrategy {
    /// Execute a read according to the strategy.
    ///
    /// `source` computes a fresh value; it is only called when the strategy
    /// requires it.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `source`.
    pub fn read<T, E>(
        &self,
        cache: &SnapshotCache<T>,
        source: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        match self {
            Self::CacheFirst => {
                if let Some(value) = cache.get() {
                    tracing::debug!("Cache hit");
                    return Ok(value);
                }
                tracing::debug!("Cache miss, falling back to source");
                source().map(|value| cache.put(value))
            }

            Self::SourceOnly => source().map(Arc::new),

            Self::ReadThrough => source().map(|value| cache.put(value)),
        }
    }
}

impl FromStr for ReadStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cache_first" | "cache-first" => Ok(Self::CacheFirst),
            "source_only" | "source-only" => Ok(Self::SourceOnly),
            "read_through" | "read-through" => Ok(Self::ReadThrough),
            other => Err(format!("unknown read strategy '{other}'")),
        }
    }
}
