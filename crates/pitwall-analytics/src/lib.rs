//! # Pitwall Analytics
//!
//! Head-to-head comparison engine over historical race results.
//!
//! ## Features
//!
//! - Driver catalog ranked by starts
//! - Free-text driver resolution (reference, code, full name, surname)
//! - Side-by-side comparison rows with pit-lane grid adjustment
//! - H2H wins, ties and per-driver finishing statistics
//! - Cumulative advantage series in chronological order
//! - Markdown and JSON reports

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod catalog;
pub mod comparison;
pub mod engine;
pub mod error;
pub mod reports;
pub mod resolver;
pub mod series;
pub mod stats;

#[cfg(test)]
mod testing;

pub use catalog::build_catalog;
pub use comparison::build_comparison_rows;
pub use engine::{DEFAULT_SUGGESTION_LIMIT, H2hEngine};
pub use error::{AnalyticsError, Result};
pub use reports::{H2hReport, WinsBar};
pub use resolver::resolve_driver;
pub use series::{AdvantagePoint, advantage_series, final_advantage};
pub use stats::{DriverSummary, H2hSummary, summarize};
