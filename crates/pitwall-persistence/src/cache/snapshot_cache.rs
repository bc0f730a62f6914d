//! # Snapshot Cache
//!
//! Holds the latest immutable snapshot of a value behind an `Arc`. Readers
//! clone the `Arc` and never block each other; a writer only swaps the slot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-slot cache of an immutable snapshot.
#[derive(Debug)]
pub struct SnapshotCache<T> {
    slot: RwLock<Option<Arc<T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> SnapshotCache<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Current snapshot, if one has been stored.
    pub fn get(&self) -> Option<Arc<T>> {
        let value = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let counter = if value.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Replace the snapshot and return the shared handle.
    pub fn put(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&value));
        value
    }

    /// Drop the snapshot. Returns whether one was present.
    pub fn invalidate(&self) -> bool {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
