//! # Pitwall - Domain Model
//!
//! Core entities, derived rows and scoring policies for historical
//! motor-racing result analysis. These types are the single source of truth
//! across all layers: loading, the head-to-head engine, and the front ends.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTIFIERS & POLICIES
// =============================================================================

pub type DriverId = u32;
pub type RaceId = u32;
pub type CircuitId = u32;

/// Grid slot recorded for a pit-lane start or a missing grid position.
pub const PIT_LANE_GRID: u32 = 0;

/// Grid slot assigned to a pit-lane start: one behind a full 19-car field.
pub const PIT_LANE_GRID_PENALTY: u32 = 20;

/// Points credited when a result carries no points value.
pub const MISSING_POINTS: f64 = 0.0;

/// Null marker used by the source tables.
pub const NULL_MARKER: &str = "\\N";

/// Replace the pit-lane sentinel with the back-of-grid penalty slot.
#[must_use]
pub const fn adjust_grid(grid: u32) -> u32 {
    if grid == PIT_LANE_GRID {
        PIT_LANE_GRID_PENALTY
    } else {
        grid
    }
}

/// True when a raw text field holds no value.
#[must_use]
pub fn is_null_marker(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NULL_MARKER
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Driver entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    /// Short unique code such as `hamilton` or `max_verstappen`
    pub reference: String,
    /// Three-letter abbreviation, absent for most pre-2000s drivers
    pub code: Option<String>,
    pub forename: String,
    pub surname: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
}

impl Driver {
    /// "Forename Surname"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }

    /// Abbreviation, if it carries a real value.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code
            .as_deref()
            .filter(|code| !is_null_marker(code))
            .map(str::trim)
    }

    /// Human-readable label used in suggestion lists.
    #[must_use]
    pub fn display_label(&self) -> String {
        let mut label = format!("{} — {} {}", self.reference, self.forename, self.surname);
        if let Some(code) = self.code() {
            label.push_str(&format!(" ({code})"));
        }
        label
    }
}

/// Race entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub year: i32,
    /// Unique within `year`
    pub round: u32,
    pub circuit_id: CircuitId,
    pub name: String,
    pub date: Option<NaiveDate>,
}

impl Race {
    #[must_use]
    pub const fn key(&self) -> RaceKey {
        RaceKey {
            year: self.year,
            round: self.round,
        }
    }
}

/// One classified (or unclassified) entry of a driver in a race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_id: RaceId,
    pub driver_id: DriverId,
    /// Starting slot; `PIT_LANE_GRID` for pit-lane starts
    pub grid: u32,
    /// Final classified order, lower is better
    pub position_order: Option<u32>,
    pub points: Option<f64>,
}

impl RaceResult {
    #[must_use]
    pub const fn adjusted_grid(&self) -> u32 {
        adjust_grid(self.grid)
    }
}

/// Circuit entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    pub id: CircuitId,
    pub reference: String,
    pub name: String,
    pub location: Option<String>,
    pub country: Option<String>,
}

// =============================================================================
// DERIVED TYPES
// =============================================================================

/// Chronological position of a race: `(year, round)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RaceKey {
    pub year: i32,
    pub round: u32,
}

impl fmt::Display for RaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.round)
    }
}

/// Suggestion-list entry for a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverCatalogEntry {
    pub driver_id: DriverId,
    pub reference: String,
    pub forename: String,
    pub surname: String,
    pub code: Option<String>,
    /// Distinct races with a result
    pub starts_count: usize,
    pub display_label: String,
}

impl DriverCatalogEntry {
    #[must_use]
    pub fn new(driver: &Driver, starts_count: usize) -> Self {
        Self {
            driver_id: driver.id,
            reference: driver.reference.clone(),
            forename: driver.forename.clone(),
            surname: driver.surname.clone(),
            code: driver.code().map(str::to_string),
            starts_count,
            display_label: driver.display_label(),
        }
    }
}

/// A driver picked out by a free-text query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDriver {
    pub id: DriverId,
    pub full_name: String,
    pub reference: String,
}

impl From<&Driver> for ResolvedDriver {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            full_name: driver.full_name(),
            reference: driver.reference.clone(),
        }
    }
}

/// Who finished ahead in a shared race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    AheadA,
    AheadB,
    Tie,
}

impl Outcome {
    /// Contribution to the cumulative advantage of driver A.
    #[must_use]
    pub const fn step(self) -> i64 {
        match self {
            Self::AheadA => 1,
            Self::AheadB => -1,
            Self::Tie => 0,
        }
    }
}

/// One race contested and classified by both compared drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub race_id: RaceId,
    pub year: i32,
    pub round: u32,
    pub race_name: String,
    pub date: Option<NaiveDate>,

    pub position_a: u32,
    pub position_b: u32,

    /// Never `PIT_LANE_GRID`
    pub adjusted_grid_a: u32,
    pub adjusted_grid_b: u32,

    pub points_a: f64,
    pub points_b: f64,
}

impl ComparisonRow {
    #[must_use]
    pub const fn key(&self) -> RaceKey {
        RaceKey {
            year: self.year,
            round: self.round,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.position_a.cmp(&self.position_b) {
            std::cmp::Ordering::Less => Outcome::AheadA,
            std::cmp::Ordering::Greater => Outcome::AheadB,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

// =============================================================================
// QUERY/FILTER TYPES
// =============================================================================

/// Inclusive season filter; an absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearRange {
    /// Validated range; rejects `from > to`.
    pub fn new(from: Option<i32>, to: Option<i32>) -> Result<Self, DomainError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(DomainError::InvalidYearRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Range with no bounds.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        self.from.is_none_or(|from| year >= from) && self.to.is_none_or(|to| year <= to)
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (None, None) => write!(f, "all seasons"),
            (Some(from), None) => write!(f, "{from} onwards"),
            (None, Some(to)) => write!(f, "up to {to}"),
            (Some(from), Some(to)) => write!(f, "{from}-{to}"),
        }
    }
}

/// Split "A, B" into two trimmed tokens at the first comma.
pub fn parse_pair(raw: &str) -> Result<(String, String), DomainError> {
    let (a, b) = raw.split_once(',').ok_or_else(|| {
        DomainError::InvalidSelection("enter two values separated by a comma".to_string())
    })?;
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return Err(DomainError::InvalidSelection(format!(
            "both sides of '{raw}' must name a driver"
        )));
    }
    Ok((a.to_string(), b.to_string()))
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid year range: {from} is after {to}")]
    InvalidYearRange { from: i32, to: i32 },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}
