//! Static payloads served when the census database cannot answer.
//!
//! Offline and demo deployments rely on these exact figures, so they are
//! declared once here and shared by every query path.

use crate::{PopulationOverview, StateRanking, TrendPoint};

/// Placeholder daily birth count reported with every overview.
pub const BIRTHS_TODAY: i64 = 180_295;
/// Placeholder daily death count reported with every overview.
pub const DEATHS_TODAY: i64 = 80_295;
/// Placeholder daily growth count reported with every overview.
pub const GROWTH_TODAY: i64 = 105_295;

/// Historical points merged into every trend series for years the database
/// does not cover. Values are in billions.
pub static BASELINE_TREND: [TrendPoint; 8] = [
    TrendPoint::new(1700, 0.6, 0.5, 0.1, 0.6),
    TrendPoint::new(1750, 0.8, 0.7, 0.1, 0.8),
    TrendPoint::new(1800, 1.0, 0.9, 0.1, 1.0),
    TrendPoint::new(1850, 1.3, 1.1, 0.2, 1.3),
    TrendPoint::new(1900, 1.7, 1.5, 0.2, 1.7),
    TrendPoint::new(1950, 2.5, 2.0, 0.5, 2.5),
    TrendPoint::new(2000, 6.2, 4.0, 2.2, 6.2),
    TrendPoint::new(2050, 11.7, 6.8, 4.9, 11.7),
];

/// Extra point only present in the failure payload.
const FALLBACK_TREND_2020: TrendPoint = TrendPoint::new(2020, 9.5, 5.0, 4.0, 9.5);

/// Overview served when the overview query fails or finds no data.
#[must_use]
pub const fn overview() -> PopulationOverview {
    PopulationOverview {
        total_population: 7_981_681_536,
        median_age: 30.9,
        working_age_percentage: 65.0,
        elderly_percentage: 10.0,
        youth_percentage: 25.0,
        ethnicity_percentages: None,
        births_today: BIRTHS_TODAY,
        deaths_today: DEATHS_TODAY,
        growth_today: GROWTH_TODAY,
    }
}

/// Ranking served when the ranking query fails.
#[must_use]
pub fn top_states() -> Vec<StateRanking> {
    vec![
        ranking(1, "California", 39_538_223, 19_520_104, 20_018_119, 37_561_312, 1_976_911),
        ranking(2, "Texas", 29_145_505, 14_471_701, 14_673_804, 25_256_089, 3_889_416),
        ranking(3, "Florida", 21_538_187, 10_470_577, 11_067_610, 20_031_114, 1_507_073),
    ]
}

/// Trend series served when the trend query fails: the baseline plus 2020.
#[must_use]
pub fn trend() -> Vec<TrendPoint> {
    let mut points = BASELINE_TREND.to_vec();
    points.push(FALLBACK_TREND_2020);
    points.sort_by_key(|p| p.year);
    points
}

/// Years listed when the year query fails.
#[must_use]
pub fn census_years() -> Vec<i32> {
    vec![2020]
}

fn ranking(
    rank: u32,
    name: &str,
    population: i64,
    male: i64,
    female: i64,
    urban: i64,
    rural: i64,
) -> StateRanking {
    StateRanking {
        rank,
        country: name.to_string(),
        population,
        male,
        female,
        urban,
        rural,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_constants() {
        let o = overview();
        assert_eq!(o.total_population, 7_981_681_536);
        assert!((o.median_age - 30.9).abs() < f64::EPSILON);
        assert!((o.working_age_percentage - 65.0).abs() < f64::EPSILON);
        assert!((o.elderly_percentage - 10.0).abs() < f64::EPSILON);
        assert!((o.youth_percentage - 25.0).abs() < f64::EPSILON);
        assert_eq!(o.births_today, 180_295);
        assert_eq!(o.deaths_today, 80_295);
        assert_eq!(o.growth_today, 105_295);
    }

    #[test]
    fn top_states_are_ranked_and_consistent() {
        let states = top_states();
        let names: Vec<_> = states.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(names, ["California", "Texas", "Florida"]);
        for (i, s) in states.iter().enumerate() {
            assert_eq!(s.rank as usize, i + 1);
            assert_eq!(s.male + s.female, s.population);
            assert_eq!(s.urban + s.rural, s.population);
        }
    }

    #[test]
    fn baseline_years_are_ascending() {
        let years: Vec<_> = BASELINE_TREND.iter().map(|p| p.year).collect();
        assert_eq!(years, [1700, 1750, 1800, 1850, 1900, 1950, 2000, 2050]);
    }

    #[test]
    fn fallback_trend_inserts_2020_in_order() {
        let years: Vec<_> = trend().iter().map(|p| p.year).collect();
        assert_eq!(years, [1700, 1750, 1800, 1850, 1900, 1950, 2000, 2020, 2050]);
        let p2020 = trend()[7];
        assert!((p2020.total - 9.5).abs() < f64::EPSILON);
        assert!((p2020.growth - 4.0).abs() < f64::EPSILON);
    }
}
