//! In-memory repository over prebuilt tables.

use pitwall_domain::{Circuit, Driver, Race, RaceResult};

use crate::dataset::RaceDataset;
use crate::error::Result;
use crate::repository::RaceDataRepository;

/// Repository serving tables that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    pub drivers: Vec<Driver>,
    pub races: Vec<Race>,
    pub results: Vec<RaceResult>,
    pub circuits: Vec<Circuit>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(
        drivers: Vec<Driver>,
        races: Vec<Race>,
        results: Vec<RaceResult>,
        circuits: Vec<Circuit>,
    ) -> Self {
        Self {
            drivers,
            races,
            results,
            circuits,
        }
    }
}

impl RaceDataRepository for InMemoryRepository {
    fn describe(&self) -> String {
        format!(
            "in-memory tables ({} drivers, {} races, {} results)",
            self.drivers.len(),
            self.races.len(),
            self.results.len()
        )
    }

    fn load(&self) -> Result<RaceDataset> {
        RaceDataset::new(
            self.drivers.clone(),
            self.races.clone(),
            self.results.clone(),
            self.circuits.clone(),
        )
    }
}
