//! US state FIPS reference table.
//!
//! The table is static configuration data: it is indexed once on first use
//! into immutable lookup maps that every request shares read-only.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One row of the state reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    /// Two-digit FIPS code (e.g. `"06"`).
    pub fips: &'static str,
    /// Two-letter postal abbreviation (e.g. `"CA"`).
    pub abbr: &'static str,
    /// Full state name (e.g. `"California"`).
    pub name: &'static str,
}

const fn state(fips: &'static str, abbr: &'static str, name: &'static str) -> StateInfo {
    StateInfo { fips, abbr, name }
}

/// The 50 US states + DC, ordered by FIPS code.
pub static STATES: &[StateInfo] = &[
    state("01", "AL", "Alabama"),
    state("02", "AK", "Alaska"),
    state("04", "AZ", "Arizona"),
    state("05", "AR", "Arkansas"),
    state("06", "CA", "California"),
    state("08", "CO", "Colorado"),
    state("09", "CT", "Connecticut"),
    state("10", "DE", "Delaware"),
    state("11", "DC", "District of Columbia"),
    state("12", "FL", "Florida"),
    state("13", "GA", "Georgia"),
    state("15", "HI", "Hawaii"),
    state("16", "ID", "Idaho"),
    state("17", "IL", "Illinois"),
    state("18", "IN", "Indiana"),
    state("19", "IA", "Iowa"),
    state("20", "KS", "Kansas"),
    state("21", "KY", "Kentucky"),
    state("22", "LA", "Louisiana"),
    state("23", "ME", "Maine"),
    state("24", "MD", "Maryland"),
    state("25", "MA", "Massachusetts"),
    state("26", "MI", "Michigan"),
    state("27", "MN", "Minnesota"),
    state("28", "MS", "Mississippi"),
    state("29", "MO", "Missouri"),
    state("30", "MT", "Montana"),
    state("31", "NE", "Nebraska"),
    state("32", "NV", "Nevada"),
    state("33", "NH", "New Hampshire"),
    state("34", "NJ", "New Jersey"),
    state("35", "NM", "New Mexico"),
    state("36", "NY", "New York"),
    state("37", "NC", "North Carolina"),
    state("38", "ND", "North Dakota"),
    state("39", "OH", "Ohio"),
    state("40", "OK", "Oklahoma"),
    state("41", "OR", "Oregon"),
    state("42", "PA", "Pennsylvania"),
    state("44", "RI", "Rhode Island"),
    state("45", "SC", "South Carolina"),
    state("46", "SD", "South Dakota"),
    state("47", "TN", "Tennessee"),
    state("48", "TX", "Texas"),
    state("49", "UT", "Utah"),
    state("50", "VT", "Vermont"),
    state("51", "VA", "Virginia"),
    state("53", "WA", "Washington"),
    state("54", "WV", "West Virginia"),
    state("55", "WI", "Wisconsin"),
    state("56", "WY", "Wyoming"),
];

static BY_FIPS: LazyLock<HashMap<&'static str, &'static StateInfo>> =
    LazyLock::new(|| STATES.iter().map(|s| (s.fips, s)).collect());

static BY_ABBR: LazyLock<HashMap<&'static str, &'static StateInfo>> =
    LazyLock::new(|| STATES.iter().map(|s| (s.abbr, s)).collect());

/// Looks up the reference row for a two-digit FIPS code.
#[must_use]
pub fn lookup(fips: &str) -> Option<&'static StateInfo> {
    BY_FIPS.get(fips).copied()
}

/// Returns the full state name for a FIPS code, if known.
#[must_use]
pub fn state_name(fips: &str) -> Option<&'static str> {
    lookup(fips).map(|s| s.name)
}

/// Returns the two-letter abbreviation for a FIPS code, if known.
#[must_use]
pub fn state_abbr(fips: &str) -> Option<&'static str> {
    lookup(fips).map(|s| s.abbr)
}

/// Maps a two-letter state abbreviation (any case) to its FIPS code.
#[must_use]
pub fn abbr_to_fips(abbr: &str) -> Option<&'static str> {
    BY_ABBR.get(abbr.to_uppercase().as_str()).map(|s| s.fips)
}

/// Display name used by the ranking endpoints.
///
/// Unknown codes render as `"State {code}"` so that rows for territories or
/// malformed codes still get a label.
#[must_use]
pub fn display_name(fips: &str) -> String {
    state_name(fips).map_or_else(|| format!("State {fips}"), ToString::to_string)
}

/// Iterates over every FIPS code in the table, in order.
pub fn all_fips() -> impl Iterator<Item = &'static str> {
    STATES.iter().map(|s| s.fips)
}
