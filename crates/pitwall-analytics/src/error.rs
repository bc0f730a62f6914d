//! Analytics error types.

use pitwall_domain::{DomainError, DriverId, YearRange};
use thiserror::Error;

/// Analytics errors.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// No driver matched the query by any tier
    #[error("No driver found for '{query}'. Try a driver reference, code or full name.")]
    NotFound { query: String },

    /// The drivers never shared a race inside the season filter
    #[error("No common races for drivers {driver_a} and {driver_b} ({years})")]
    NoCommonRaces {
        driver_a: DriverId,
        driver_b: DriverId,
        years: YearRange,
    },

    /// Shared races exist but none classified both drivers
    #[error("No common races with a valid classification for drivers {driver_a} and {driver_b}")]
    NoValidComparisons {
        driver_a: DriverId,
        driver_b: DriverId,
    },

    /// Driver id not present in the dataset
    #[error("Unknown driver id: {0}")]
    UnknownDriver(DriverId),

    /// Invalid caller input
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Report serialization error
    #[error("Data conversion error: {0}")]
    Conversion(String),
}

impl AnalyticsError {
    /// Stable machine-readable code for this error
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::NoCommonRaces { .. } => "NO_COMMON_RACES",
            Self::NoValidComparisons { .. } => "NO_VALID_COMPARISONS",
            Self::UnknownDriver(_) => "UNKNOWN_DRIVER",
            Self::Domain(_) => "INVALID_INPUT",
            Self::Conversion(_) => "CONVERSION_ERROR",
        }
    }

    /// Whether a front end should re-prompt rather than abort.
    ///
    /// Only the lookup and comparison outcomes qualify; invalid input, unknown
    /// ids and serialization failures do not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NoCommonRaces { .. } | Self::NoValidComparisons { .. }
        )
    }
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
