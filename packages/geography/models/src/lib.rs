#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic reference data for census statistics.
//!
//! Census fact tables are keyed by a [`GeoUnit`]: the survey year plus the
//! state, county and tract FIPS components. The [`fips`] module resolves
//! state codes to display names.

pub mod fips;

use serde::{Deserialize, Serialize};

/// The join key shared by every census fact table.
///
/// The `(year, state_fips, county_fips, tract)` tuple is unique per table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoUnit {
    /// ACS survey year.
    pub year: i32,
    /// Two-digit state FIPS code.
    pub state_fips: String,
    /// Three-digit county FIPS code.
    pub county_fips: String,
    /// Six-digit census tract code.
    pub tract: String,
}

impl GeoUnit {
    /// Builds a key from its components.
    #[must_use]
    pub fn new(
        year: i32,
        state_fips: impl Into<String>,
        county_fips: impl Into<String>,
        tract: impl Into<String>,
    ) -> Self {
        Self {
            year,
            state_fips: state_fips.into(),
            county_fips: county_fips.into(),
            tract: tract.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let unit = GeoUnit::new(2021, "06", "037", "101110");
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["stateFips"], "06");
        assert_eq!(json["countyFips"], "037");
        assert_eq!(json["year"], 2021);
    }
}
