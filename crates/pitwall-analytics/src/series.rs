//! Cumulative advantage series in race chronology.

use serde::{Deserialize, Serialize};

use pitwall_domain::{ComparisonRow, RaceKey};

/// Running advantage of driver A after one shared race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvantagePoint {
    /// `"{year}-{round}"`
    pub label: String,
    pub key: RaceKey,
    /// +1 A ahead, -1 B ahead, 0 tie
    pub step: i64,
    pub cumulative: i64,
}

/// Series over `rows` ordered by `(year, round)`.
///
/// The sort is stable, so rows sharing a key keep their input order. The
/// first point equals the first step; the last equals `wins_a - wins_b`.
#[must_use]
pub fn advantage_series(rows: &[ComparisonRow]) -> Vec<AdvantagePoint> {
    let mut ordered: Vec<&ComparisonRow> = rows.iter().collect();
    ordered.sort_by_key(|row| row.key());

    ordered
        .into_iter()
        .scan(0_i64, |total, row| {
            let step = row.outcome().step();
            *total += step;
            Some(AdvantagePoint {
                label: row.key().to_string(),
                key: row.key(),
                step,
                cumulative: *total,
            })
        })
        .collect()
}

/// Final value of the series, 0 when empty.
#[must_use]
pub fn final_advantage(series: &[AdvantagePoint]) -> i64 {
    series.last().map_or(0, |point| point.cumulative)
}
