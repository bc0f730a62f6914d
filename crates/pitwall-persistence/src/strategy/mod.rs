//! # Strategy Module
//!
//! Enum-based cache/source access strategies using dispatch pattern.
//!
//! ## Read Strategies
//! - `CacheFirst` - Serve the cached snapshot, load from source on miss (default)
//! - `SourceOnly` - Always load from source, leave the cache untouched
//! - `ReadThrough` - Always load from source, refresh the cache
//!
//! ## Example
//!
//! ```rust,ignore
//! use pitwall_persistence::strategy::ReadStrategy;
//!
//! let snapshot = ReadStrategy::CacheFirst.read(&cache, || repo.load())?;
//! ```

pub mod read_strategy;

pub use read_strategy::ReadStrategy;
