//! # Driver Resolver
//!
//! Maps a free-text query to one driver. Matching is case-insensitive and
//! tiered: the exact tier is tried first, the substring tier only when the
//! exact tier finds nothing. Within a tier the first driver in table order
//! wins.

use pitwall_domain::{Driver, ResolvedDriver};

use crate::error::{AnalyticsError, Result};

/// Lowercased match keys of one driver.
struct MatchKeys {
    reference: String,
    code: Option<String>,
    full_name: String,
    surname: String,
}

impl MatchKeys {
    fn of(driver: &Driver) -> Self {
        Self {
            reference: driver.reference.to_lowercase(),
            code: driver.code().map(str::to_lowercase),
            full_name: driver.full_name().to_lowercase(),
            surname: driver.surname.to_lowercase(),
        }
    }
}

type Matcher = fn(&MatchKeys, &str) -> bool;

/// Reference, code, full name or surname equal to the query.
fn exact(keys: &MatchKeys, query: &str) -> bool {
    keys.reference == query
        || keys.code.as_deref() == Some(query)
        || keys.full_name == query
        || keys.surname == query
}

/// Full name or surname containing the query.
fn substring(keys: &MatchKeys, query: &str) -> bool {
    keys.full_name.contains(query) || keys.surname.contains(query)
}

const TIERS: [(&str, Matcher); 2] = [("exact", exact), ("substring", substring)];

/// Resolve `query` against `drivers` (in table order).
///
/// # Errors
///
/// Returns `NotFound` carrying the original query when no tier matches,
/// including for a blank query.
pub fn resolve_driver(drivers: &[Driver], query: &str) -> Result<ResolvedDriver> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(not_found(query));
    }

    let keys: Vec<MatchKeys> = drivers.iter().map(MatchKeys::of).collect();

    for (tier, matcher) in TIERS {
        if let Some(idx) = keys.iter().position(|k| matcher(k, &needle)) {
            let driver = &drivers[idx];
            tracing::debug!(
                query,
                tier,
                driver_id = driver.id,
                reference = %driver.reference,
                "Driver resolved"
            );
            return Ok(ResolvedDriver::from(driver));
        }
    }

    tracing::debug!(query, "No driver matched");
    Err(not_found(query))
}

fn not_found(query: &str) -> AnalyticsError {
    AnalyticsError::NotFound {
        query: query.to_string(),
    }
}
