//! # Race Dataset
//!
//! Immutable snapshot of the driver, race, result and circuit tables with
//! the lookup indexes every query needs. Built once per load and shared as
//! `Arc<RaceDataset>`; readers never need a lock.

use std::collections::{HashMap, HashSet};

use pitwall_domain::{Circuit, CircuitId, Driver, DriverId, Race, RaceId, RaceResult};

use crate::error::{PersistenceError, Result};

/// Read-only, indexed view over the source tables.
#[derive(Debug, Clone, Default)]
pub struct RaceDataset {
    drivers: Vec<Driver>,
    races: Vec<Race>,
    results: Vec<RaceResult>,
    circuits: Vec<Circuit>,

    driver_index: HashMap<DriverId, usize>,
    race_index: HashMap<RaceId, usize>,
    circuit_index: HashMap<CircuitId, usize>,
    results_by_driver: HashMap<DriverId, Vec<usize>>,
    starts_by_driver: HashMap<DriverId, usize>,
}

impl RaceDataset {
    /// Build the snapshot and its indexes.
    ///
    /// Table order is preserved. Results pointing at an unknown race or
    /// driver are dropped with a warning. Start counts are taken before that
    /// filter, so a result whose race is missing still counts for its driver.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if a driver, race or circuit id repeats.
    pub fn new(
        drivers: Vec<Driver>,
        races: Vec<Race>,
        results: Vec<RaceResult>,
        circuits: Vec<Circuit>,
    ) -> Result<Self> {
        let driver_index = index_by("drivers", &drivers, |d| d.id)?;
        let race_index = index_by("races", &races, |r| r.id)?;
        let circuit_index = index_by("circuits", &circuits, |c| c.id)?;

        let starts_by_driver = count_starts(&results, &driver_index);

        let total = results.len();
        let results: Vec<RaceResult> = results
            .into_iter()
            .filter(|result| {
                let known = race_index.contains_key(&result.race_id)
                    && driver_index.contains_key(&result.driver_id);
                if !known {
                    tracing::warn!(
                        race_id = result.race_id,
                        driver_id = result.driver_id,
                        "Skipping result with unknown race or driver"
                    );
                }
                known
            })
            .collect();

        let mut results_by_driver: HashMap<DriverId, Vec<usize>> = HashMap::new();
        for (idx, result) in results.iter().enumerate() {
            results_by_driver.entry(result.driver_id).or_default().push(idx);
        }

        tracing::info!(
            drivers = drivers.len(),
            races = races.len(),
            results = results.len(),
            skipped_results = total - results.len(),
            circuits = circuits.len(),
            "Race dataset indexed"
        );

        Ok(Self {
            drivers,
            races,
            results,
            circuits,
            driver_index,
            race_index,
            circuit_index,
            results_by_driver,
            starts_by_driver,
        })
    }

    /// Drivers in table order.
    #[must_use]
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    #[must_use]
    pub fn races(&self) -> &[Race] {
        &self.races
    }

    #[must_use]
    pub fn results(&self) -> &[RaceResult] {
        &self.results
    }

    #[must_use]
    pub fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    #[must_use]
    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.driver_index.get(&id).map(|&idx| &self.drivers[idx])
    }

    #[must_use]
    pub fn race(&self, id: RaceId) -> Option<&Race> {
        self.race_index.get(&id).map(|&idx| &self.races[idx])
    }

    #[must_use]
    pub fn circuit(&self, id: CircuitId) -> Option<&Circuit> {
        self.circuit_index.get(&id).map(|&idx| &self.circuits[idx])
    }

    /// A driver's results in table order, empty if the driver never started.
    pub fn results_for(&self, driver_id: DriverId) -> impl Iterator<Item = &RaceResult> + '_ {
        self.results_by_driver
            .get(&driver_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.results[idx])
    }

    /// Distinct race ids among the driver's results in the source table.
    #[must_use]
    pub fn starts(&self, driver_id: DriverId) -> usize {
        self.starts_by_driver.get(&driver_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty() && self.races.is_empty() && self.results.is_empty()
    }
}

fn count_starts(
    results: &[RaceResult],
    driver_index: &HashMap<DriverId, usize>,
) -> HashMap<DriverId, usize> {
    let mut races: HashMap<DriverId, HashSet<RaceId>> = HashMap::new();
    for result in results.iter().filter(|r| driver_index.contains_key(&r.driver_id)) {
        races.entry(result.driver_id).or_default().insert(result.race_id);
    }
    races.into_iter().map(|(id, set)| (id, set.len())).collect()
}

fn index_by<T, K>(table: &str, rows: &[T], key: impl Fn(&T) -> K) -> Result<HashMap<K, usize>>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    let mut index = HashMap::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let k = key(row);
        if index.contains_key(&k) {
            return Err(PersistenceError::DuplicateKey {
                table: table.to_string(),
                key: k.to_string(),
            });
        }
        index.insert(k, idx);
    }
    Ok(index)
}
