//! # Dataset Store
//!
//! Couples a repository with a snapshot cache so callers share one loaded
//! dataset instead of re-reading the tables per query.

use std::sync::Arc;

use crate::cache::{CacheStats, SnapshotCache};
use crate::dataset::RaceDataset;
use crate::error::Result;
use crate::repository::RaceDataRepository;
use crate::strategy::ReadStrategy;

/// Cached access to the current dataset snapshot.
pub struct DatasetStore {
    repository: Box<dyn RaceDataRepository>,
    cache: SnapshotCache<RaceDataset>,
    strategy: ReadStrategy,
}

impl DatasetStore {
    pub fn new(repository: impl RaceDataRepository + 'static) -> Self {
        Self {
            repository: Box::new(repository),
            cache: SnapshotCache::new(),
            strategy: ReadStrategy::default(),
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: ReadStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Dataset according to the configured strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has to load and fails.
    pub fn snapshot(&self) -> Result<Arc<RaceDataset>> {
        self.strategy.read(&self.cache, || self.load())
    }

    /// Reload from the repository and replace the cached snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails; the previous snapshot is kept.
    pub fn reload(&self) -> Result<Arc<RaceDataset>> {
        ReadStrategy::ReadThrough.read(&self.cache, || self.load())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn load(&self) -> Result<RaceDataset> {
        tracing::info!(source = %self.repository.describe(), "Loading race dataset");
        self.repository.load()
    }
}

impl std::fmt::Debug for DatasetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetStore")
            .field("source", &self.repository.describe())
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
