#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census statistics result types.
//!
//! These are the JSON payloads of the dashboard API. Field names follow the
//! snake-case contract the dashboard frontend already consumes, so most types
//! are serialized without a `rename_all`.
//!
//! The [`fallback`] module holds the static payloads served when the
//! database cannot answer.

pub mod fallback;

use serde::{Deserialize, Serialize};

/// Population-wide statistics for a single survey year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationOverview {
    /// Sum of male and female population across all units.
    pub total_population: i64,
    /// Unweighted mean of per-unit median ages.
    pub median_age: f64,
    /// Share of units whose median age is in `[15, 65)`.
    pub working_age_percentage: f64,
    /// Share of units whose median age is 65 or more.
    pub elderly_percentage: f64,
    /// Share of units whose median age is under 15.
    pub youth_percentage: f64,
    /// Ethnicity shares of the total population.
    ///
    /// Absent from the fallback payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity_percentages: Option<EthnicityPercentages>,
    /// Placeholder daily birth count.
    pub births_today: i64,
    /// Placeholder daily death count.
    pub deaths_today: i64,
    /// Placeholder daily growth count.
    pub growth_today: i64,
}

/// Ethnicity group counts as percentages of total population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthnicityPercentages {
    /// White.
    pub white: f64,
    /// Black or African American.
    pub black_or_african_american: f64,
    /// Hispanic or Latino (any race).
    pub hispanic_or_latino: f64,
    /// Asian.
    pub asian: f64,
    /// American Indian and Alaska Native.
    pub american_indian: f64,
    /// Native Hawaiian and Other Pacific Islander.
    pub native_hawaiian: f64,
}

/// One row of the top-states ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRanking {
    /// 1-based position in the ranking.
    pub rank: u32,
    /// Display name of the state. Named `country` in the API contract.
    pub country: String,
    /// Total population (male + female).
    pub population: i64,
    /// Male population.
    pub male: i64,
    /// Female population.
    pub female: i64,
    /// Estimated urban population.
    pub urban: i64,
    /// Estimated rural population.
    pub rural: i64,
}

/// A yearly point of the population trend chart, in billions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar year. Serialized as a string.
    #[serde(with = "year_string")]
    pub year: i32,
    /// Birth series value.
    pub births: f64,
    /// Death series value.
    pub deaths: f64,
    /// Growth series value.
    pub growth: f64,
    /// Total population.
    pub total: f64,
}

impl TrendPoint {
    /// Builds a point from already-scaled values.
    #[must_use]
    pub const fn new(year: i32, births: f64, deaths: f64, growth: f64, total: f64) -> Self {
        Self {
            year,
            births,
            deaths,
            growth,
            total,
        }
    }
}

/// Population totals for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePopulation {
    /// Two-digit state FIPS code.
    #[serde(rename = "StatFP")]
    pub state_fips: String,
    /// Display name of the state.
    pub state_name: String,
    /// Male population.
    pub male_population: i64,
    /// Female population.
    pub female_population: i64,
    /// Male + female population.
    pub total_population: i64,
}

/// A joined demographic + socioeconomic row for one census tract.
///
/// Keys keep the column names of the census tables. Missing measurements
/// are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CensusRecord {
    #[serde(rename = "StatFP")]
    pub state_fips: String,
    #[serde(rename = "CountyFP")]
    pub county_fips: String,
    pub tract: String,
    pub median_age: Option<f64>,
    pub white: Option<i64>,
    #[serde(rename = "BlackorAfricanAmerican")]
    pub black_or_african_american: Option<i64>,
    #[serde(rename = "HispanicorLatino")]
    pub hispanic_or_latino: Option<i64>,
    pub asian: Option<i64>,
    pub american_indian: Option<i64>,
    pub native_hawaiian: Option<i64>,
    pub total_male_population: Option<i64>,
    pub total_female_population: Option<i64>,
    pub with_disability: Option<i64>,
    pub with_health_insurance: Option<i64>,
    pub median_household_income: Option<f64>,
    pub per_capita_income: Option<f64>,
    pub people_below_poverty_line: Option<i64>,
    pub child_poverty_rate: Option<f64>,
}

/// Serializes a year as a JSON string and accepts either form back.
mod year_string {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(i32),
        Text(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(year: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(year)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        match Year::deserialize(deserializer)? {
            Year::Number(n) => Ok(n),
            Year::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
