//! Subcommand implementations. Each renders its output as a string so the
//! binary only decides where it goes.

use std::fmt::Write as _;

use clap::ValueEnum;
use pitwall_analytics::{AnalyticsError, H2hEngine, Result};
use pitwall_domain::{DomainError, YearRange, parse_pair};

/// Report rendering for `h2h`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Numbered suggestion list, most starts first.
#[must_use]
pub fn catalog(engine: &H2hEngine, limit: usize) -> String {
    let mut out = String::new();
    for (idx, entry) in engine.suggestions(limit).iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {}  [{} starts]",
            idx + 1,
            entry.display_label,
            entry.starts_count
        );
    }
    out
}

/// Resolve a query or suggestion index to one driver.
///
/// # Errors
///
/// `NotFound` or `InvalidSelection` from the engine.
pub fn resolve(engine: &H2hEngine, token: &str, limit: usize) -> Result<String> {
    let driver = engine.select_driver(token, limit)?;
    Ok(format!(
        "{} ({}, id {})",
        driver.full_name, driver.reference, driver.id
    ))
}

/// The two driver tokens, either given separately or as one `"A, B"` pair.
///
/// # Errors
///
/// `InvalidSelection` when the pair is malformed or a side is missing.
pub fn driver_tokens(
    driver_a: Option<String>,
    driver_b: Option<String>,
    pair: Option<&str>,
) -> Result<(String, String)> {
    if let Some(raw) = pair {
        return Ok(parse_pair(raw)?);
    }
    match (driver_a, driver_b) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(DomainError::InvalidSelection("two drivers are required".to_string()).into()),
    }
}

/// Run a head-to-head comparison and render the report.
///
/// # Errors
///
/// Any resolution or comparison error, or `InvalidYearRange`.
pub fn h2h(
    engine: &H2hEngine,
    (token_a, token_b): (&str, &str),
    (from, to): (Option<i32>, Option<i32>),
    limit: usize,
    format: OutputFormat,
) -> Result<String> {
    let years = YearRange::new(from, to)?;
    let a = engine.select_driver(token_a, limit)?;
    let b = engine.select_driver(token_b, limit)?;

    tracing::info!(driver_a = %a.reference, driver_b = %b.reference, %years, "Comparing");
    let report = engine.compare_head_to_head(a.id, b.id, years)?;

    match format {
        OutputFormat::Markdown => Ok(report.to_markdown()),
        OutputFormat::Json => report.to_json(),
    }
}

/// Exit status for a failed command: 2 for a recoverable lookup or
/// comparison outcome, 1 for everything else.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AnalyticsError>() {
        Some(err) if err.is_recoverable() => 2,
        _ => 1,
    }
}
