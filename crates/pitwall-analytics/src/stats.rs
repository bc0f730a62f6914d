//! H2H statistics over the comparison rows.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

use pitwall_domain::{ComparisonRow, Outcome, ResolvedDriver};

use crate::error::{AnalyticsError, Result};

/// One driver's side of the head-to-head summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub driver: String,
    pub reference: String,
    /// Races finished ahead of the other driver
    pub h2h_wins: usize,
    pub ties: usize,
    pub races_together: usize,
    pub mean_position: f64,
    pub median_position: f64,
    pub mean_grid: f64,
    pub total_points: f64,
    /// Lowest finishing position
    pub best_result: u32,
}

/// Two-row head-to-head summary, driver A first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct H2hSummary {
    pub driver_a: DriverSummary,
    pub driver_b: DriverSummary,
}

impl H2hSummary {
    #[must_use]
    pub const fn wins_a(&self) -> usize {
        self.driver_a.h2h_wins
    }

    #[must_use]
    pub const fn wins_b(&self) -> usize {
        self.driver_b.h2h_wins
    }

    #[must_use]
    pub const fn ties(&self) -> usize {
        self.driver_a.ties
    }

    #[must_use]
    pub const fn total_races(&self) -> usize {
        self.driver_a.races_together
    }

    /// Both rows, for tabular rendering.
    #[must_use]
    pub const fn rows(&self) -> [&DriverSummary; 2] {
        [&self.driver_a, &self.driver_b]
    }
}

/// Compute the summary for `rows` of driver `a` against driver `b`.
///
/// # Errors
///
/// Returns `NoValidComparisons` for an empty row set.
pub fn summarize(
    rows: &[ComparisonRow],
    a: &ResolvedDriver,
    b: &ResolvedDriver,
) -> Result<H2hSummary> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoValidComparisons {
            driver_a: a.id,
            driver_b: b.id,
        });
    }

    let (mut wins_a, mut wins_b, mut ties) = (0, 0, 0);
    for row in rows {
        match row.outcome() {
            Outcome::AheadA => wins_a += 1,
            Outcome::AheadB => wins_b += 1,
            Outcome::Tie => ties += 1,
        }
    }

    let side_a = side(
        a,
        wins_a,
        ties,
        rows.iter().map(|r| (r.position_a, r.adjusted_grid_a, r.points_a)),
    );
    let side_b = side(
        b,
        wins_b,
        ties,
        rows.iter().map(|r| (r.position_b, r.adjusted_grid_b, r.points_b)),
    );

    Ok(H2hSummary {
        driver_a: side_a,
        driver_b: side_b,
    })
}

fn side(
    driver: &ResolvedDriver,
    wins: usize,
    ties: usize,
    entries: impl Iterator<Item = (u32, u32, f64)>,
) -> DriverSummary {
    let mut positions = Vec::new();
    let mut grids = Vec::new();
    let mut total_points = 0.0;
    let mut best_result = u32::MAX;

    for (position, grid, points) in entries {
        positions.push(f64::from(position));
        grids.push(f64::from(grid));
        total_points += points;
        best_result = best_result.min(position);
    }

    DriverSummary {
        driver: driver.full_name.clone(),
        reference: driver.reference.clone(),
        h2h_wins: wins,
        ties,
        races_together: positions.len(),
        mean_position: positions.iter().mean(),
        median_position: Data::new(positions).median(),
        mean_grid: grids.iter().mean(),
        total_points,
        best_result,
    }
}
