//! # Repository Module
//!
//! Sources of the race tables.

pub mod csv_impl;
pub mod memory_impl;
pub mod traits;

pub use csv_impl::{CsvConfig, CsvRepository};
pub use memory_impl::InMemoryRepository;
pub use traits::RaceDataRepository;
