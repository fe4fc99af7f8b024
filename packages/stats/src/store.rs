//! Data-access seam for the query engine.
//!
//! [`CensusStore`] returns SQL-level aggregates; the engine modules turn
//! them into API payloads. [`crate::SqlCensusStore`] is the production
//! implementation.

use async_trait::async_trait;
use census_dashboard_stats_models::CensusRecord;

use crate::StatsError;

/// Aggregates over every census unit of one survey year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverviewAggregates {
    /// Number of units with a demographic row for the year.
    pub unit_count: i64,
    /// Sum of male + female population.
    pub total_population: i64,
    /// Unweighted mean of per-unit median ages, `None` with no units.
    pub median_age: Option<f64>,
    /// Units whose median age is under 15.
    pub youth_units: i64,
    /// Units whose median age is in `[15, 65)`.
    pub working_units: i64,
    /// Units whose median age is 65 or more.
    pub elderly_units: i64,
    /// Summed ethnicity counts.
    pub ethnicity: EthnicityTotals,
}

/// Summed population counts by ethnicity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EthnicityTotals {
    pub white: i64,
    pub black_or_african_american: i64,
    pub hispanic_or_latino: i64,
    pub asian: i64,
    pub american_indian: i64,
    pub native_hawaiian: i64,
}

/// Population totals of one state for one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTotals {
    /// Two-digit state FIPS code.
    pub state_fips: String,
    pub male: i64,
    pub female: i64,
    /// `male + female`.
    pub total: i64,
}

/// Raw per-year sums feeding the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTotals {
    pub year: i32,
    /// Male + female population.
    pub total: i64,
    /// Stand-in for births: summed `White` counts.
    pub births: i64,
    /// Stand-in for deaths: summed `BlackorAfricanAmerican` counts.
    pub deaths: i64,
    /// Stand-in for growth: summed `HispanicorLatino` counts.
    pub growth: i64,
}

/// Filters for the raw tract listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusRecordQuery {
    pub year: i32,
    /// Two-digit state FIPS code.
    pub state: Option<String>,
    /// Three-digit county FIPS code.
    pub county: Option<String>,
    /// Maximum number of rows.
    pub limit: u32,
}

/// Read access to the census fact tables.
#[async_trait]
pub trait CensusStore: Send + Sync {
    /// Aggregates the demographic table for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the query fails.
    async fn overview_aggregates(&self, year: i32) -> Result<OverviewAggregates, StatsError>;

    /// Per-state totals for `year`, largest first, at most `limit` rows
    /// (all states when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the query fails.
    async fn state_totals(
        &self,
        year: i32,
        limit: Option<u32>,
    ) -> Result<Vec<StateTotals>, StatsError>;

    /// Per-year sums for every year in `[start_year, end_year]`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the query fails.
    async fn yearly_totals(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearTotals>, StatsError>;

    /// Distinct survey years present, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the query fails.
    async fn census_years(&self) -> Result<Vec<i32>, StatsError>;

    /// Joined demographic + socioeconomic rows matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the query fails.
    async fn census_records(
        &self,
        query: &CensusRecordQuery,
    ) -> Result<Vec<CensusRecord>, StatsError>;
}
