//! ACS5 variables requested for every census tract.
//!
//! Codes are ACS detailed-table estimates (`_E` suffix). The order of a
//! catalog is the column order of the CSV output. A [`Profile`] picks the
//! catalog, the output file names and the default run settings.

use std::fmt;
use std::time::Duration;

/// Topic a variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableGroup {
    Demographics,
    Socioeconomic,
    Housing,
    Transportation,
    Health,
}

impl fmt::Display for VariableGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Demographics => "Population & Demographics",
            Self::Socioeconomic => "Socioeconomic Factors",
            Self::Housing => "Housing Data",
            Self::Transportation => "Transportation & Mobility",
            Self::Health => "Health & Disability",
        })
    }
}

/// One requested ACS variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcsVariable {
    /// ACS variable code, e.g. `B01002_001E`.
    pub code: &'static str,
    /// CSV column name.
    pub name: &'static str,
    pub group: VariableGroup,
}

const fn var(code: &'static str, name: &'static str, group: VariableGroup) -> AcsVariable {
    AcsVariable { code, name, group }
}

use VariableGroup::{Demographics, Health, Housing, Socioeconomic, Transportation};

/// Every variable requested per tract, in output order.
pub static VARIABLES: &[AcsVariable] = &[
    var("B01002_001E", "Median Age", Demographics),
    var("B02001_002E", "White", Demographics),
    var("B02001_003E", "Black or African American", Demographics),
    var("B03001_003E", "Hispanic or Latino", Demographics),
    var("B02001_005E", "Asian", Demographics),
    var("B02001_004E", "American Indian/Alaska Native", Demographics),
    var("B02001_006E", "Native Hawaiian & Pacific Islander", Demographics),
    var("B02001_008E", "Two or More Races", Demographics),
    var("B01001_002E", "Total Male Population", Demographics),
    var("B01001_026E", "Total Female Population", Demographics),
    var("B19013_001E", "Median Household Income", Socioeconomic),
    var("B19301_001E", "Per Capita Income", Socioeconomic),
    var("B17001_002E", "People Below Poverty Line", Socioeconomic),
    // B17024 has no single child-poverty estimate; the table total stands in.
    var("B17024_001E", "Child Poverty Rate", Socioeconomic),
    var("B15003_017E", "High School Graduate", Socioeconomic),
    var("B15003_018E", "Some College", Socioeconomic),
    var("B15003_021E", "Bachelor\u{2019}s Degree or Higher", Socioeconomic),
    var("B23025_002E", "In Labor Force", Socioeconomic),
    var("B23025_003E", "Civilian Labor Force", Socioeconomic),
    var("B23025_004E", "Employed", Socioeconomic),
    var("B23025_005E", "Unemployed", Socioeconomic),
    var("B23025_007E", "Not in Labor Force", Socioeconomic),
    var("B25002_002E", "Occupied Housing Units", Housing),
    var("B25002_003E", "Vacant Housing Units", Housing),
    var("B25003_002E", "Owner-Occupied Units", Housing),
    var("B25003_003E", "Renter-Occupied Units", Housing),
    var("B25077_001E", "Median Home Value", Housing),
    var("B25064_001E", "Median Gross Rent", Housing),
    var("B25010_001E", "Household Size", Housing),
    var("B08301_003E", "Drove Alone", Transportation),
    var("B08301_004E", "Carpooled", Transportation),
    var("B08301_010E", "Public Transportation", Transportation),
    var("B08301_019E", "Walked", Transportation),
    var("B08301_021E", "Worked at Home", Transportation),
    var("B08303_001E", "Average Travel Time to Work", Transportation),
    var("B25044_003E", "No Vehicle Available", Transportation),
    var("B25044_004E", "1 Vehicle Available", Transportation),
    var("B25044_005E", "2 Vehicles Available", Transportation),
    var("B25044_006E", "3 or More Vehicles Available", Transportation),
    var("B08201_001E", "Car Ownership per Household", Transportation),
    var("B18101_002E", "With Disability", Health),
    var("B27001_002E", "With Health Insurance", Health),
];

/// Race profile from table B03002: total population and the non-Hispanic
/// race breakdown. Column names match the race CSVs already in use.
pub static RACE_VARIABLES: &[AcsVariable] = &[
    var("B03002_001E", "Total Population", Demographics),
    var("B03002_002E", "White(Non-Hispanic)", Demographics),
    var("B03002_003E", "Hispanic_Latino", Demographics),
    var("B03002_004E", "Black_African_American", Demographics),
    var("B03002_005E", "American_Indian_Alaska_Native", Demographics),
    var("B03002_006E", "Asian", Demographics),
    var("B03002_007E", "Native_Hawaiian_Pacific_Islander", Demographics),
];

/// Which variable set a download run pulls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    /// Every variable in [`VARIABLES`], one `acs5_census_{year}.csv` per year.
    #[default]
    Full,
    /// The [`RACE_VARIABLES`] series feeding multi-year trends, one
    /// `acs_race_population_{year}.csv` per year.
    Race,
}

impl Profile {
    /// Returns the CLI spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Race => "race",
        }
    }

    /// Variables requested for every tract.
    #[must_use]
    pub const fn variables(self) -> &'static [AcsVariable] {
        match self {
            Self::Full => VARIABLES,
            Self::Race => RACE_VARIABLES,
        }
    }

    /// Output file name without the `_{year}.csv` suffix.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Full => "acs5_census",
            Self::Race => "acs_race_population",
        }
    }

    /// Default inclusive `(start, end)` survey years.
    #[must_use]
    pub const fn default_years(self) -> (i32, i32) {
        match self {
            Self::Full => (2023, 2024),
            Self::Race => (2010, 2024),
        }
    }

    /// Default pause after every request.
    #[must_use]
    pub const fn default_delay(self) -> Duration {
        match self {
            Self::Full => Duration::from_millis(1000),
            Self::Race => Duration::from_millis(500),
        }
    }

    /// Value of the `get` query parameter: `NAME` followed by every code.
    #[must_use]
    pub fn get_param(self) -> String {
        std::iter::once("NAME")
            .chain(self.variables().iter().map(|v| v.code))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// CSV header: the geographic key columns, then one column per variable.
    #[must_use]
    pub fn csv_header(self) -> Vec<&'static str> {
        ["year", "state", "county", "tract"]
            .into_iter()
            .chain(self.variables().iter().map(|v| v.name))
            .collect()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Profile {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "full" => Ok(Self::Full),
            "race" => Ok(Self::Race),
            _ => Err(format!("unknown profile: {value} (expected full or race)")),
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn codes_are_unique_estimates() {
        let codes: BTreeSet<_> = VARIABLES.iter().map(|v| v.code).collect();
        assert_eq!(codes.len(), VARIABLES.len());
        assert!(VARIABLES.iter().all(|v| v.code.ends_with('E')));
    }

    #[test]
    fn groups_are_contiguous() {
        let mut seen = Vec::new();
        for v in VARIABLES {
            if seen.last() != Some(&v.group) {
                assert!(!seen.contains(&v.group), "{} split", v.group);
                seen.push(v.group);
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn get_param_starts_with_name() {
        let param = Profile::Full.get_param();
        assert!(param.starts_with("NAME,B01002_001E,B02001_002E"));
        assert_eq!(param.split(',').count(), VARIABLES.len() + 1);
    }

    #[test]
    fn header_prefixes_geography() {
        let header = Profile::Full.csv_header();
        assert_eq!(&header[..5], ["year", "state", "county", "tract", "Median Age"]);
        assert_eq!(header.len(), VARIABLES.len() + 4);
        assert_eq!(header.last(), Some(&"With Health Insurance"));
    }

    #[test]
    fn race_profile_pulls_b03002() {
        let race = Profile::Race;
        assert_eq!(race.variables().len(), 7);
        assert!(race.variables().iter().all(|v| v.code.starts_with("B03002_")));
        assert_eq!(
            race.get_param(),
            "NAME,B03002_001E,B03002_002E,B03002_003E,B03002_004E,B03002_005E,B03002_006E,B03002_007E"
        );
        assert_eq!(race.csv_header()[4], "Total Population");
        assert_eq!(race.file_stem(), "acs_race_population");
        assert_eq!(race.default_years(), (2010, 2024));
        assert_eq!(race.default_delay(), Duration::from_millis(500));
    }

    #[test]
    fn profile_parses_cli_spelling() {
        assert_eq!("race".parse::<Profile>(), Ok(Profile::Race));
        assert_eq!("full".parse::<Profile>(), Ok(Profile::Full));
        assert_eq!(Profile::default(), Profile::Full);
        assert!("acs1".parse::<Profile>().is_err());
        assert_eq!(Profile::Race.to_string(), "race");
    }
}
