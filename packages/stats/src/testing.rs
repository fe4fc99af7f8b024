//! In-memory [`CensusStore`] used by the engine tests.
//!
//! Aggregates with the same semantics as the SQL in [`crate::sql`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use census_dashboard_geography_models::GeoUnit;
use census_dashboard_stats_models::CensusRecord;

use crate::StatsError;
use crate::store::{
    CensusRecordQuery, CensusStore, EthnicityTotals, OverviewAggregates, StateTotals, YearTotals,
};

/// One demographic row.
#[derive(Debug, Clone)]
pub struct UnitRow {
    pub unit: GeoUnit,
    pub median_age: f64,
    pub male: i64,
    pub female: i64,
    pub ethnicity: EthnicityTotals,
}

impl UnitRow {
    pub fn new(year: i32, state: &str, tract: &str, median_age: f64, male: i64, female: i64) -> Self {
        Self {
            unit: GeoUnit::new(year, state, "001", tract),
            median_age,
            male,
            female,
            ethnicity: EthnicityTotals::default(),
        }
    }

    pub const fn with_ethnicity(mut self, ethnicity: EthnicityTotals) -> Self {
        self.ethnicity = ethnicity;
        self
    }
}

/// A store holding rows in memory, or failing every call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub rows: Vec<UnitRow>,
    pub failing: bool,
}

impl MemoryStore {
    pub const fn new(rows: Vec<UnitRow>) -> Self {
        Self {
            rows,
            failing: false,
        }
    }

    pub const fn failing() -> Self {
        Self {
            rows: Vec::new(),
            failing: true,
        }
    }

    fn check(&self) -> Result<(), StatsError> {
        if self.failing {
            Err(StatsError::Conversion {
                message: "connection refused".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn year_rows(&self, year: i32) -> impl Iterator<Item = &UnitRow> {
        self.rows.iter().filter(move |r| r.unit.year == year)
    }
}

#[async_trait]
impl CensusStore for MemoryStore {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    async fn overview_aggregates(&self, year: i32) -> Result<OverviewAggregates, StatsError> {
        self.check()?;
        let rows: Vec<_> = self.year_rows(year).collect();
        let count = |pred: fn(f64) -> bool| rows.iter().filter(|r| pred(r.median_age)).count() as i64;
        let sum = |f: fn(&EthnicityTotals) -> i64| rows.iter().map(|r| f(&r.ethnicity)).sum::<i64>();

        Ok(OverviewAggregates {
            unit_count: rows.len() as i64,
            total_population: rows.iter().map(|r| r.male + r.female).sum(),
            median_age: if rows.is_empty() {
                None
            } else {
                Some(rows.iter().map(|r| r.median_age).sum::<f64>() / rows.len() as f64)
            },
            youth_units: count(|a| a < 15.0),
            working_units: count(|a| (15.0..65.0).contains(&a)),
            elderly_units: count(|a| a >= 65.0),
            ethnicity: EthnicityTotals {
                white: sum(|e| e.white),
                black_or_african_american: sum(|e| e.black_or_african_american),
                hispanic_or_latino: sum(|e| e.hispanic_or_latino),
                asian: sum(|e| e.asian),
                american_indian: sum(|e| e.american_indian),
                native_hawaiian: sum(|e| e.native_hawaiian),
            },
        })
    }

    async fn state_totals(
        &self,
        year: i32,
        limit: Option<u32>,
    ) -> Result<Vec<StateTotals>, StatsError> {
        self.check()?;
        let mut by_state: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
        for row in self.year_rows(year) {
            let entry = by_state.entry(row.unit.state_fips.as_str()).or_default();
            entry.0 += row.male;
            entry.1 += row.female;
        }
        let mut totals: Vec<StateTotals> = by_state
            .into_iter()
            .map(|(fips, (male, female))| StateTotals {
                state_fips: fips.to_string(),
                male,
                female,
                total: male + female,
            })
            .collect();
        // Stable sort keeps FIPS order among ties, like the SQL secondary key.
        totals.sort_by(|a, b| b.total.cmp(&a.total));
        if let Some(limit) = limit {
            totals.truncate(limit as usize);
        }
        Ok(totals)
    }

    async fn yearly_totals(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearTotals>, StatsError> {
        self.check()?;
        let mut by_year: BTreeMap<i32, YearTotals> = BTreeMap::new();
        for row in self
            .rows
            .iter()
            .filter(|r| r.unit.year >= start_year && r.unit.year <= end_year)
        {
            let entry = by_year.entry(row.unit.year).or_insert(YearTotals {
                year: row.unit.year,
                total: 0,
                births: 0,
                deaths: 0,
                growth: 0,
            });
            entry.total += row.male + row.female;
            entry.births += row.ethnicity.white;
            entry.deaths += row.ethnicity.black_or_african_american;
            entry.growth += row.ethnicity.hispanic_or_latino;
        }
        Ok(by_year.into_values().collect())
    }

    async fn census_years(&self) -> Result<Vec<i32>, StatsError> {
        self.check()?;
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.unit.year).collect();
        years.sort_unstable();
        years.dedup();
        Ok(years)
    }

    async fn census_records(
        &self,
        query: &CensusRecordQuery,
    ) -> Result<Vec<CensusRecord>, StatsError> {
        self.check()?;
        Ok(self
            .year_rows(query.year)
            .filter(|r| query.state.as_ref().is_none_or(|s| *s == r.unit.state_fips))
            .filter(|r| query.county.as_ref().is_none_or(|c| *c == r.unit.county_fips))
            .take(query.limit as usize)
            .map(|r| CensusRecord {
                state_fips: r.unit.state_fips.clone(),
                county_fips: r.unit.county_fips.clone(),
                tract: r.unit.tract.clone(),
                median_age: Some(r.median_age),
                white: Some(r.ethnicity.white),
                black_or_african_american: Some(r.ethnicity.black_or_african_american),
                hispanic_or_latino: Some(r.ethnicity.hispanic_or_latino),
                asian: Some(r.ethnicity.asian),
                american_indian: Some(r.ethnicity.american_indian),
                native_hawaiian: Some(r.ethnicity.native_hawaiian),
                total_male_population: Some(r.male),
                total_female_population: Some(r.female),
                with_disability: None,
                with_health_insurance: None,
                median_household_income: None,
                per_capita_income: None,
                people_below_poverty_line: None,
                child_poverty_rate: None,
            })
            .collect())
    }
}
