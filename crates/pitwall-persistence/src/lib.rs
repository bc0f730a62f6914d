//! # Pitwall Persistence
//!
//! Loading layer for the historical race tables.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DatasetStore                           │
//! │            (applies the configured ReadStrategy)            │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     SnapshotCache       │   │     RaceDataRepository       │
//! │  (Arc<RaceDataset>)     │   │  (CSV directory, in-memory)  │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pitwall_persistence::{CsvConfig, CsvRepository, DatasetStore};
//!
//! let store = DatasetStore::new(CsvRepository::new(CsvConfig::new("./data")));
//! let dataset = store.snapshot()?;
//! println!("{} drivers", dataset.drivers().len());
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod dataset;
pub mod error;
pub mod repository;
pub mod store;
pub mod strategy;

// Re-export commonly used types
pub use cache::{CacheStats, SnapshotCache};
pub use dataset::RaceDataset;
pub use error::{PersistenceError, Result};
pub use repository::{CsvConfig, CsvRepository, InMemoryRepository, RaceDataRepository};
pub use store::DatasetStore;
pub use strategy::ReadStrategy;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load a dataset snapshot from a CSV directory with the standard file names.
///
/// # Errors
///
/// Returns an error if any table is missing or malformed.
pub fn load_csv_dir(data_dir: impl Into<std::path::PathBuf>) -> Result<RaceDataset> {
    CsvRepository::new(CsvConfig::new(data_dir)).load()
}
