//! # Cache Module
//!
//! In-process snapshot cache for hot-path data access.

pub mod snapshot_cache;

pub use snapshot_cache::{CacheStats, SnapshotCache};
