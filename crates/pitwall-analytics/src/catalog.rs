//! Driver catalog: starts per driver and suggestion labels.

use pitwall_domain::DriverCatalogEntry;
use pitwall_persistence::RaceDataset;

/// Catalog of every driver, most distinct race starts first.
///
/// Starts are the distinct race ids among a driver's rows in the results
/// table, including rows whose race is missing from the races table.
/// Drivers with no results are included with zero starts. Ties keep the
/// driver table order.
#[must_use]
pub fn build_catalog(dataset: &RaceDataset) -> Vec<DriverCatalogEntry> {
    let mut entries: Vec<DriverCatalogEntry> = dataset
        .drivers()
        .iter()
        .map(|driver| DriverCatalogEntry::new(driver, dataset.starts(driver.id)))
        .collect();

    entries.sort_by(|a, b| b.starts_count.cmp(&a.starts_count));

    tracing::debug!(entries = entries.len(), "Driver catalog built");
    entries
}
