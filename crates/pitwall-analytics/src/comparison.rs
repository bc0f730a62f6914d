//! # Comparison Dataset Builder
//!
//! Reshapes the results of two drivers into one row per shared race, with
//! each driver's finishing position, adjusted grid slot and points side by
//! side. Rows come out ordered by race id; chronological order is imposed
//! by the series generator.

use std::collections::BTreeMap;

use pitwall_domain::{
    ComparisonRow, DriverId, MISSING_POINTS, Race, RaceId, RaceResult, YearRange,
};
use pitwall_persistence::RaceDataset;

use crate::error::{AnalyticsError, Result};

/// One driver's entry in a race, folded with `min` over duplicate rows.
#[derive(Debug, Clone, Copy)]
struct Entry {
    position: Option<u32>,
    adjusted_grid: u32,
    points: Option<f64>,
}

impl Entry {
    fn of(result: &RaceResult) -> Self {
        Self {
            position: result.position_order,
            adjusted_grid: result.adjusted_grid(),
            points: result.points,
        }
    }

    /// Missing values never win over present ones.
    fn merge(self, other: Self) -> Self {
        Self {
            position: min_present(self.position, other.position, u32::min),
            adjusted_grid: self.adjusted_grid.min(other.adjusted_grid),
            points: min_present(self.points, other.points, f64::min),
        }
    }
}

fn min_present<T>(a: Option<T>, b: Option<T>, min: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(min(a, b)),
        (a, b) => a.or(b),
    }
}

#[derive(Debug, Default)]
struct Slot {
    a: Option<Entry>,
    b: Option<Entry>,
}

fn fold(side: &mut Option<Entry>, entry: Entry) {
    *side = Some(side.map_or(entry, |current| current.merge(entry)));
}

/// Build the side-by-side comparison of drivers `a` and `b`.
///
/// A race only produces a row when both drivers have a classified
/// `positionOrder` there. Grid `0` becomes the pit-lane penalty slot and
/// missing points count as `MISSING_POINTS`.
///
/// # Errors
///
/// - `NoCommonRaces` when no race inside `years` has a result for both.
/// - `NoValidComparisons` when shared races exist but none classified both.
pub fn build_comparison_rows(
    dataset: &RaceDataset,
    a: DriverId,
    b: DriverId,
    years: YearRange,
) -> Result<Vec<ComparisonRow>> {
    let in_range = |result: &&RaceResult| {
        dataset
            .race(result.race_id)
            .is_some_and(|race| years.contains(race.year))
    };

    let mut slots: BTreeMap<RaceId, Slot> = BTreeMap::new();
    for result in dataset.results_for(a).filter(in_range) {
        fold(&mut slots.entry(result.race_id).or_default().a, Entry::of(result));
    }
    for result in dataset.results_for(b).filter(in_range) {
        fold(&mut slots.entry(result.race_id).or_default().b, Entry::of(result));
    }

    let shared: Vec<(RaceId, Entry, Entry)> = slots
        .into_iter()
        .filter_map(|(race_id, slot)| Some((race_id, slot.a?, slot.b?)))
        .collect();

    if shared.is_empty() {
        tracing::debug!(driver_a = a, driver_b = b, %years, "No common races");
        return Err(AnalyticsError::NoCommonRaces {
            driver_a: a,
            driver_b: b,
            years,
        });
    }

    let shared_count = shared.len();
    let rows: Vec<ComparisonRow> = shared
        .into_iter()
        .filter_map(|(race_id, entry_a, entry_b)| {
            let race = dataset.race(race_id)?;
            Some(row(race, entry_a.position?, entry_b.position?, entry_a, entry_b))
        })
        .collect();

    tracing::debug!(
        driver_a = a,
        driver_b = b,
        shared_races = shared_count,
        classified = rows.len(),
        "Comparison rows built"
    );

    if rows.is_empty() {
        return Err(AnalyticsError::NoValidComparisons {
            driver_a: a,
            driver_b: b,
        });
    }
    Ok(rows)
}

fn row(race: &Race, position_a: u32, position_b: u32, a: Entry, b: Entry) -> ComparisonRow {
    ComparisonRow {
        race_id: race.id,
        year: race.year,
        round: race.round,
        race_name: race.name.clone(),
        date: race.date,
        position_a,
        position_b,
        adjusted_grid_a: a.adjusted_grid,
        adjusted_grid_b: b.adjusted_grid,
        points_a: a.points.unwrap_or(MISSING_POINTS),
        points_b: b.points.unwrap_or(MISSING_POINTS),
    }
}
