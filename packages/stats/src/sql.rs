//! [`CensusStore`] backed by raw SQL through `switchy_database`.
//!
//! Queries are written to run unchanged on Postgres and `SQLite`: every
//! integer aggregate is cast to `BIGINT` and every fractional one to
//! `DOUBLE PRECISION` so that rows decode to `i64`/`f64` on both backends,
//! and every output column carries a lowercase alias.

use std::sync::Arc;

use async_trait::async_trait;
use census_dashboard_stats_models::CensusRecord;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue, Row};

use crate::StatsError;
use crate::store::{
    CensusRecordQuery, CensusStore, EthnicityTotals, OverviewAggregates, StateTotals, YearTotals,
};

/// Joins demographic rows to their geographic key.
const DEMOGRAPHICS_JOIN: &str = "FROM Population_Demographics pd
     JOIN Geoid_info gi ON pd.Year = gi.Year
         AND pd.StatFP = gi.StatFP
         AND pd.CountyFP = gi.CountyFP
         AND pd.Tract = gi.Tract";

/// Census statistics read from the relational database.
#[derive(Clone)]
pub struct SqlCensusStore {
    db: Arc<dyn Database>,
}

impl SqlCensusStore {
    /// Wraps a shared database handle.
    #[must_use]
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

/// `Year` columns are 32-bit; Postgres rejects a wider bound parameter.
fn year_param(year: i32) -> DatabaseValue {
    DatabaseValue::Int32(year)
}

/// Maps a column decode failure to [`StatsError::Conversion`].
fn malformed<E: std::fmt::Debug>(column: &'static str) -> impl FnOnce(E) -> StatsError {
    move |e| StatsError::Conversion {
        message: format!("Invalid {column} column: {e:?}"),
    }
}

/// Reads an integer aggregate. SQL `NULL` (`SUM` over zero rows) reads
/// as 0.
fn sum_column(row: &Row, column: &'static str) -> Result<i64, StatsError> {
    Ok(row
        .to_value::<Option<i64>>(column)
        .map_err(malformed(column))?
        .unwrap_or(0))
}

fn to_year(value: i64) -> Result<i32, StatsError> {
    i32::try_from(value).map_err(|e| StatsError::Conversion {
        message: format!("Year {value} out of range: {e}"),
    })
}

#[async_trait]
impl CensusStore for SqlCensusStore {
    async fn overview_aggregates(&self, year: i32) -> Result<OverviewAggregates, StatsError> {
        let sql = format!(
            "SELECT
                 CAST(COUNT(*) AS BIGINT) AS unit_count,
                 CAST(SUM(pd.TotalMalePopulation + pd.TotalFemalePopulation) AS BIGINT) AS total_population,
                 CAST(AVG(pd.MedianAge) AS DOUBLE PRECISION) AS median_age,
                 CAST(SUM(CASE WHEN pd.MedianAge < 15 THEN 1 ELSE 0 END) AS BIGINT) AS youth_units,
                 CAST(SUM(CASE WHEN pd.MedianAge >= 15 AND pd.MedianAge < 65 THEN 1 ELSE 0 END) AS BIGINT) AS working_units,
                 CAST(SUM(CASE WHEN pd.MedianAge >= 65 THEN 1 ELSE 0 END) AS BIGINT) AS elderly_units,
                 CAST(SUM(pd.White) AS BIGINT) AS white,
                 CAST(SUM(pd.BlackorAfricanAmerican) AS BIGINT) AS black,
                 CAST(SUM(pd.HispanicorLatino) AS BIGINT) AS hispanic,
                 CAST(SUM(pd.Asian) AS BIGINT) AS asian,
                 CAST(SUM(pd.AmericanIndian) AS BIGINT) AS american_indian,
                 CAST(SUM(pd.NativeHawaiian) AS BIGINT) AS native_hawaiian
             {DEMOGRAPHICS_JOIN}
             WHERE pd.Year = $1"
        );

        let rows = self.db.query_raw_params(&sql, &[year_param(year)]).await?;
        let Some(row) = rows.first() else {
            return Ok(OverviewAggregates::default());
        };

        Ok(OverviewAggregates {
            unit_count: sum_column(row, "unit_count")?,
            total_population: sum_column(row, "total_population")?,
            median_age: row.to_value("median_age").map_err(malformed("median_age"))?,
            youth_units: sum_column(row, "youth_units")?,
            working_units: sum_column(row, "working_units")?,
            elderly_units: sum_column(row, "elderly_units")?,
            ethnicity: EthnicityTotals {
                white: sum_column(row, "white")?,
                black_or_african_american: sum_column(row, "black")?,
                hispanic_or_latino: sum_column(row, "hispanic")?,
                asian: sum_column(row, "asian")?,
                american_indian: sum_column(row, "american_indian")?,
                native_hawaiian: sum_column(row, "native_hawaiian")?,
            },
        })
    }

    async fn state_totals(
        &self,
        year: i32,
        limit: Option<u32>,
    ) -> Result<Vec<StateTotals>, StatsError> {
        let mut params = vec![year_param(year)];
        let limit_clause = limit.map_or_else(String::new, |limit| {
            params.push(DatabaseValue::Int64(i64::from(limit)));
            " LIMIT $2".to_string()
        });

        let sql = format!(
            "SELECT
                 gi.StatFP AS state_fips,
                 CAST(SUM(pd.TotalMalePopulation) AS BIGINT) AS male,
                 CAST(SUM(pd.TotalFemalePopulation) AS BIGINT) AS female,
                 CAST(SUM(pd.TotalMalePopulation + pd.TotalFemalePopulation) AS BIGINT) AS total
             {DEMOGRAPHICS_JOIN}
             WHERE pd.Year = $1
             GROUP BY gi.StatFP
             ORDER BY total DESC, state_fips{limit_clause}"
        );

        let rows = self.db.query_raw_params(&sql, &params).await?;

        rows.iter()
            .map(|row| {
                Ok(StateTotals {
                    state_fips: row.to_value("state_fips").map_err(malformed("state_fips"))?,
                    male: sum_column(row, "male")?,
                    female: sum_column(row, "female")?,
                    total: sum_column(row, "total")?,
                })
            })
            .collect()
    }

    async fn yearly_totals(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearTotals>, StatsError> {
        let sql = format!(
            "SELECT
                 CAST(pd.Year AS BIGINT) AS year,
                 CAST(SUM(pd.TotalMalePopulation + pd.TotalFemalePopulation) AS BIGINT) AS total,
                 CAST(SUM(pd.White) AS BIGINT) AS births,
                 CAST(SUM(pd.BlackorAfricanAmerican) AS BIGINT) AS deaths,
                 CAST(SUM(pd.HispanicorLatino) AS BIGINT) AS growth
             {DEMOGRAPHICS_JOIN}
             WHERE pd.Year BETWEEN $1 AND $2
             GROUP BY pd.Year
             ORDER BY pd.Year"
        );

        let rows = self
            .db
            .query_raw_params(&sql, &[year_param(start_year), year_param(end_year)])
            .await?;

        rows.iter()
            .map(|row| {
                let year: i64 = row.to_value("year").map_err(malformed("year"))?;
                Ok(YearTotals {
                    year: to_year(year)?,
                    total: sum_column(row, "total")?,
                    births: sum_column(row, "births")?,
                    deaths: sum_column(row, "deaths")?,
                    growth: sum_column(row, "growth")?,
                })
            })
            .collect()
    }

    async fn census_years(&self) -> Result<Vec<i32>, StatsError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT DISTINCT CAST(Year AS BIGINT) AS year
                 FROM Geoid_info
                 ORDER BY year",
                &[],
            )
            .await?;

        rows.iter()
            .map(|row| to_year(row.to_value("year").map_err(malformed("year"))?))
            .collect()
    }

    async fn census_records(
        &self,
        query: &CensusRecordQuery,
    ) -> Result<Vec<CensusRecord>, StatsError> {
        let mut frags = vec!["gi.Year = $1".to_string()];
        let mut params = vec![year_param(query.year)];
        let mut idx = 2;

        if let Some(state) = &query.state {
            frags.push(format!("gi.StatFP = ${idx}"));
            params.push(DatabaseValue::String(state.clone()));
            idx += 1;
        }

        if let Some(county) = &query.county {
            frags.push(format!("gi.CountyFP = ${idx}"));
            params.push(DatabaseValue::String(county.clone()));
            idx += 1;
        }

        params.push(DatabaseValue::Int64(i64::from(query.limit)));

        let sql = format!(
            "SELECT
                 gi.StatFP AS state_fips,
                 gi.CountyFP AS county_fips,
                 gi.Tract AS tract,
                 CAST(pd.MedianAge AS DOUBLE PRECISION) AS median_age,
                 CAST(pd.White AS BIGINT) AS white,
                 CAST(pd.BlackorAfricanAmerican AS BIGINT) AS black,
                 CAST(pd.HispanicorLatino AS BIGINT) AS hispanic,
                 CAST(pd.Asian AS BIGINT) AS asian,
                 CAST(pd.AmericanIndian AS BIGINT) AS american_indian,
                 CAST(pd.NativeHawaiian AS BIGINT) AS native_hawaiian,
                 CAST(pd.TotalMalePopulation AS BIGINT) AS male,
                 CAST(pd.TotalFemalePopulation AS BIGINT) AS female,
                 CAST(pd.WithDisability AS BIGINT) AS with_disability,
                 CAST(pd.WithHealthInsurance AS BIGINT) AS with_health_insurance,
                 CAST(sf.MedianHouseholdIncome AS DOUBLE PRECISION) AS median_household_income,
                 CAST(sf.PerCapitaIncome AS DOUBLE PRECISION) AS per_capita_income,
                 CAST(sf.PeopleBelowPovertyLine AS BIGINT) AS below_poverty,
                 CAST(sf.ChildPovertyRate AS DOUBLE PRECISION) AS child_poverty_rate
             FROM Geoid_info gi
             JOIN Population_Demographics pd ON gi.Year = pd.Year
                 AND gi.StatFP = pd.StatFP
                 AND gi.CountyFP = pd.CountyFP
                 AND gi.Tract = pd.Tract
             JOIN Socioeconomic_Factors sf ON gi.Year = sf.Year
                 AND gi.StatFP = sf.StatFP
                 AND gi.CountyFP = sf.CountyFP
                 AND gi.Tract = sf.Tract
             WHERE {}
             ORDER BY gi.StatFP, gi.CountyFP, gi.Tract
             LIMIT ${idx}",
            frags.join(" AND ")
        );

        let rows = self.db.query_raw_params(&sql, &params).await?;

        rows.iter()
            .map(|row| {
                Ok(CensusRecord {
                    state_fips: row.to_value("state_fips").map_err(malformed("state_fips"))?,
                    county_fips: row.to_value("county_fips").map_err(malformed("county_fips"))?,
                    tract: row.to_value("tract").map_err(malformed("tract"))?,
                    median_age: row.to_value("median_age").unwrap_or(None),
                    white: row.to_value("white").unwrap_or(None),
                    black_or_african_american: row.to_value("black").unwrap_or(None),
                    hispanic_or_latino: row.to_value("hispanic").unwrap_or(None),
                    asian: row.to_value("asian").unwrap_or(None),
                    american_indian: row.to_value("american_indian").unwrap_or(None),
                    native_hawaiian: row.to_value("native_hawaiian").unwrap_or(None),
                    total_male_population: row.to_value("male").unwrap_or(None),
                    total_female_population: row.to_value("female").unwrap_or(None),
                    with_disability: row.to_value("with_disability").unwrap_or(None),
                    with_health_insurance: row.to_value("with_health_insurance").unwrap_or(None),
                    median_household_income: row
                        .to_value("median_household_income")
                        .unwrap_or(None),
                    per_capita_income: row.to_value("per_capita_income").unwrap_or(None),
                    people_below_poverty_line: row.to_value("below_poverty").unwrap_or(None),
                    child_poverty_rate: row.to_value("child_poverty_rate").unwrap_or(None),
                })
            })
            .collect()
    }
}
