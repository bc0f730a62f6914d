//! # Repository Traits
//!
//! Abstract source of the race tables. Implementations can be swapped for
//! different backends (CSV directory, prebuilt in-memory tables, ...).

use crate::dataset::RaceDataset;
use crate::error::Result;

/// Loads a complete, indexed snapshot of the race tables.
pub trait RaceDataRepository: Send + Sync {
    /// Human-readable origin of the data, for logs.
    fn describe(&self) -> String;

    /// Read every table and build a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if a table cannot be read or fails validation.
    fn load(&self) -> Result<RaceDataset>;
}
