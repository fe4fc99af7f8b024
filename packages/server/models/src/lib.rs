#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the census dashboard server.
//!
//! Query parameters are all optional; the accessor methods apply the
//! documented defaults. Payload field names are part of the dashboard
//! frontend contract.

use census_dashboard_stats_models::{CensusRecord, StatePopulation};
use serde::{Deserialize, Serialize};

/// Survey year used when a request does not name one.
pub const DEFAULT_YEAR: i32 = 2020;
/// Ranking length used when a request does not name one.
pub const DEFAULT_TOP_LIMIT: i64 = 10;
/// First trend year used when a request does not name one.
pub const DEFAULT_TREND_START: i32 = 2012;
/// Last trend year used when a request does not name one.
pub const DEFAULT_TREND_END: i32 = 2020;

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Body of every 4xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Query parameters carrying only a survey year.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}

impl YearParams {
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year.unwrap_or(DEFAULT_YEAR)
    }
}

/// Query parameters for the state ranking endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopParams {
    /// Number of states to return. Zero or negative yields an empty list.
    pub limit: Option<i64>,
}

impl TopParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_TOP_LIMIT)
    }
}

/// Query parameters for the trend endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendParams {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl TrendParams {
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.start_year.unwrap_or(DEFAULT_TREND_START)
    }

    #[must_use]
    pub fn end_year(&self) -> i32 {
        self.end_year.unwrap_or(DEFAULT_TREND_END)
    }
}

/// Query parameters for the raw tract listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CensusDataParams {
    pub year: Option<i32>,
    /// Two-digit state FIPS code.
    pub state: Option<String>,
    /// Three-digit county FIPS code.
    pub county: Option<String>,
}

impl CensusDataParams {
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year.unwrap_or(DEFAULT_YEAR)
    }
}

/// Response of `GET /api/population/states`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatesResponse {
    pub year: i32,
    pub states: Vec<StatePopulation>,
    pub count: usize,
}

impl StatesResponse {
    #[must_use]
    pub fn new(year: i32, states: Vec<StatePopulation>) -> Self {
        Self {
            year,
            count: states.len(),
            states,
        }
    }
}

/// Response of `GET /api/census/data`. The filters are echoed back, `null`
/// when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusDataResponse {
    pub year: i32,
    pub state: Option<String>,
    pub county: Option<String>,
    pub data: Vec<CensusRecord>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_params() {
        assert_eq!(YearParams::default().year(), 2020);
        assert_eq!(TopParams::default().limit(), 10);
        let trend = TrendParams::default();
        assert_eq!((trend.start_year(), trend.end_year()), (2012, 2020));
        assert_eq!(CensusDataParams::default().year(), 2020);
    }

    #[test]
    fn explicit_params_win() {
        let trend = TrendParams {
            start_year: Some(2015),
            end_year: None,
        };
        assert_eq!((trend.start_year(), trend.end_year()), (2015, 2020));
        assert_eq!(TopParams { limit: Some(-1) }.limit(), -1);
    }

    #[test]
    fn census_data_response_echoes_null_filters() {
        let response = CensusDataResponse {
            year: 2020,
            state: Some("06".to_string()),
            county: None,
            data: Vec::new(),
            count: 0,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["state"], "06");
        assert!(json["county"].is_null());
        assert_eq!(json["count"], 0);
    }

    #[test]
    fn states_response_counts_states() {
        let response = StatesResponse::new(
            2019,
            vec![StatePopulation {
                state_fips: "06".to_string(),
                state_name: "California".to_string(),
                male_population: 1,
                female_population: 2,
                total_population: 3,
            }],
        );
        assert_eq!(response.count, 1);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["year"], 2019);
        assert_eq!(json["states"][0]["StatFP"], "06");
    }
}
