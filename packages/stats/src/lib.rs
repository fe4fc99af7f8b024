#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census statistics query engine.
//!
//! Each public `get_*` function answers one dashboard endpoint. They read
//! through the [`CensusStore`] seam, derive percentages and series from the
//! aggregates, and never fail: any data-access error is logged and replaced
//! by the static payloads in [`census_dashboard_stats_models::fallback`].
//! The matching `compute_*` functions expose the fallible path.

pub mod fallback;
pub mod overview;
pub mod ranking;
pub mod records;
pub mod sql;
pub mod store;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

pub use overview::{compute_overview, get_overview};
pub use ranking::{compute_top_regions, get_top_regions};
pub use records::{get_census_data, get_census_years, get_population_by_state};
pub use sql::SqlCensusStore;
pub use store::CensusStore;
pub use trend::{compute_trend, get_trend};

use thiserror::Error;

/// Errors that can occur while querying census statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// The query succeeded but matched no census units.
    #[error("No census data for year {year}")]
    NoData {
        /// The requested survey year.
        year: i32,
    },

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Rounds to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole` as a percentage rounded to one decimal; zero when
/// `whole` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round1(part as f64 / whole as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_half_away_from_zero() {
        assert!((round1(2.25) - 2.3).abs() < 1e-9);
        assert!((round1(0.04) - 0.0).abs() < 1e-9);
        assert!((round1(39.538_223) - 39.5).abs() < 1e-9);
    }

    #[test]
    fn percentage_of_zero_is_zero() {
        assert!((percentage(5, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert!((percentage(1, 3) - 33.3).abs() < 1e-9);
        assert!((percentage(2, 3) - 66.7).abs() < 1e-9);
        assert!((percentage(1, 2) - 50.0).abs() < 1e-9);
    }
}
