//! Head-to-head engine over a shared dataset snapshot.

use std::convert::Infallible;
use std::sync::Arc;

use pitwall_domain::{DomainError, DriverCatalogEntry, DriverId, ResolvedDriver, YearRange};
use pitwall_persistence::{RaceDataset, ReadStrategy, SnapshotCache};

use crate::catalog::build_catalog;
use crate::comparison::build_comparison_rows;
use crate::error::{AnalyticsError, Result};
use crate::reports::{H2hReport, WinsBar};
use crate::resolver::resolve_driver;
use crate::series::advantage_series;
use crate::stats::summarize;

/// Number of catalog entries offered as suggestions by default.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 30;

/// H2H comparison engine.
///
/// Every operation reads the immutable dataset only, so one engine can
/// serve concurrent queries. The driver catalog does not depend on the
/// compared drivers and is cached according to the read strategy.
#[derive(Debug)]
pub struct H2hEngine {
    dataset: Arc<RaceDataset>,
    catalog: SnapshotCache<Vec<DriverCatalogEntry>>,
    strategy: ReadStrategy,
}

impl H2hEngine {
    #[must_use]
    pub fn new(dataset: Arc<RaceDataset>) -> Self {
        Self {
            dataset,
            catalog: SnapshotCache::new(),
            strategy: ReadStrategy::default(),
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: ReadStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn dataset(&self) -> &Arc<RaceDataset> {
        &self.dataset
    }

    /// All drivers, most starts first.
    pub fn build_catalog(&self) -> Arc<Vec<DriverCatalogEntry>> {
        let Ok(catalog) = self
            .strategy
            .read(&self.catalog, || Ok::<_, Infallible>(build_catalog(&self.dataset)));
        catalog
    }

    /// First `limit` catalog entries.
    pub fn suggestions(&self, limit: usize) -> Vec<DriverCatalogEntry> {
        self.build_catalog().iter().take(limit).cloned().collect()
    }

    /// Resolve a free-text query to one driver.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no driver matches.
    pub fn resolve_driver(&self, query: &str) -> Result<ResolvedDriver> {
        resolve_driver(self.dataset.drivers(), query)
    }

    /// Resolve a suggestion-list token: an all-digit token is a 1-based
    /// position among the first `limit` suggestions, anything else is a
    /// free-text query.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSelection` for an out-of-range position and
    /// `NotFound` for an unmatched query.
    pub fn select_driver(&self, token: &str, limit: usize) -> Result<ResolvedDriver> {
        let token = token.trim();
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return self.resolve_driver(token);
        }

        let catalog = self.build_catalog();
        let shown = limit.min(catalog.len());
        let entry = token
            .parse::<usize>()
            .ok()
            .filter(|idx| (1..=shown).contains(idx))
            .map(|idx| &catalog[idx - 1])
            .ok_or_else(|| {
                DomainError::InvalidSelection(format!("index out of range: {token} (1-{shown})"))
            })?;

        let driver = self
            .dataset
            .driver(entry.driver_id)
            .ok_or(AnalyticsError::UnknownDriver(entry.driver_id))?;
        Ok(ResolvedDriver::from(driver))
    }

    /// Compare two drivers by id over the races inside `years`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDriver` for an id not in the dataset, otherwise
    /// `NoCommonRaces` or `NoValidComparisons` as described on
    /// [`build_comparison_rows`].
    pub fn compare_head_to_head(
        &self,
        driver_a: DriverId,
        driver_b: DriverId,
        years: YearRange,
    ) -> Result<H2hReport> {
        let a = self.lookup(driver_a)?;
        let b = self.lookup(driver_b)?;

        let rows = build_comparison_rows(&self.dataset, a.id, b.id, years)?;
        let summary = summarize(&rows, &a, &b)?;
        let series = advantage_series(&rows);

        tracing::debug!(
            driver_a = %a.reference,
            driver_b = %b.reference,
            races = summary.total_races(),
            wins_a = summary.wins_a(),
            wins_b = summary.wins_b(),
            ties = summary.ties(),
            "H2H computed"
        );

        Ok(H2hReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            wins_chart: vec![
                WinsBar {
                    reference: a.reference.clone(),
                    wins: summary.wins_a(),
                },
                WinsBar {
                    reference: b.reference.clone(),
                    wins: summary.wins_b(),
                },
            ],
            driver_a: a,
            driver_b: b,
            years,
            summary,
            series,
            rows,
        })
    }

    /// Resolve both queries, then compare.
    ///
    /// # Errors
    ///
    /// Any error of [`Self::resolve_driver`] or [`Self::compare_head_to_head`].
    pub fn compare_queries(
        &self,
        query_a: &str,
        query_b: &str,
        years: YearRange,
    ) -> Result<H2hReport> {
        let a = self.resolve_driver(query_a)?;
        let b = self.resolve_driver(query_b)?;
        self.compare_head_to_head(a.id, b.id, years)
    }

    fn lookup(&self, id: DriverId) -> Result<ResolvedDriver> {
        self.dataset
            .driver(id)
            .map(ResolvedDriver::from)
            .ok_or(AnalyticsError::UnknownDriver(id))
    }
}
