//! # Pitwall CLI
//!
//! Command-line adapter over the head-to-head engine.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;

use std::sync::Arc;

use anyhow::Context;
use pitwall_analytics::H2hEngine;

pub use commands::OutputFormat;
pub use config::{Config, log_level};

/// Load the CSV tables under `config.data_dir` into a ready engine.
///
/// # Errors
///
/// Returns an error if the tables cannot be read or are malformed.
pub fn load_engine(config: &Config) -> anyhow::Result<H2hEngine> {
    let dataset = pitwall_persistence::load_csv_dir(&config.data_dir).with_context(|| {
        format!("loading race tables from {}", config.data_dir.display())
    })?;
    Ok(H2hEngine::new(Arc::new(dataset)))
}
