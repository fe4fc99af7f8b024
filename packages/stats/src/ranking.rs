//! Top-N state ranking by total population.

use census_dashboard_geography_models::fips;
use census_dashboard_stats_models::StateRanking;
use census_dashboard_stats_models::fallback;

use crate::StatsError;
use crate::fallback::or_fallback;
use crate::store::{CensusStore, StateTotals};

/// Survey year every ranking is computed for.
pub const REFERENCE_YEAR: i32 = 2020;

/// Share of a state's population counted as urban, in percent.
const URBAN_SHARE_PERCENT: i64 = 65;

/// The `limit` most populous states of [`REFERENCE_YEAR`], or the static
/// three-state ranking if the store fails.
///
/// A `limit` of zero or less still queries the store and yields an empty
/// ranking.
pub async fn get_top_regions(store: &dyn CensusStore, limit: i64) -> Vec<StateRanking> {
    or_fallback(
        "state ranking",
        compute_top_regions(store, limit),
        fallback::top_states,
    )
    .await
}

/// Computes the ranking from the store.
///
/// # Errors
///
/// Returns any error returned by the store.
pub async fn compute_top_regions(
    store: &dyn CensusStore,
    limit: i64,
) -> Result<Vec<StateRanking>, StatsError> {
    let limit = u32::try_from(limit.max(0)).unwrap_or(u32::MAX);
    let totals = store.state_totals(REFERENCE_YEAR, Some(limit)).await?;
    Ok(rank_states(&totals, limit as usize))
}

/// Ranks `totals` (already ordered largest first) and keeps at most `limit`.
#[must_use]
pub fn rank_states(totals: &[StateTotals], limit: usize) -> Vec<StateRanking> {
    totals
        .iter()
        .take(limit)
        .zip(1..)
        .map(|(state, rank)| {
            let (urban, rural) = urban_rural_split(state.total);
            StateRanking {
                rank,
                country: fips::display_name(&state.state_fips),
                population: state.total,
                male: state.male,
                female: state.female,
                urban,
                rural,
            }
        })
        .collect()
}

/// Splits `total` into `(urban, rural)` with urban = floor(total * 0.65).
///
/// The product is taken in `i128`, so every `i64` total is accepted.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn urban_rural_split(total: i64) -> (i64, i64) {
    // |urban| <= |total|, so narrowing back cannot truncate.
    let urban = (total as i128 * URBAN_SHARE_PERCENT as i128).div_euclid(100) as i64;
    (urban, total - urban)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, UnitRow};

    #[test]
    fn urban_is_floored() {
        assert_eq!(urban_rural_split(100), (65, 35));
        assert_eq!(urban_rural_split(50), (32, 18));
        assert_eq!(urban_rural_split(0), (0, 0));
        assert_eq!(urban_rural_split(39_538_223), (25_699_844, 13_838_379));
    }

    #[test]
    fn split_of_huge_total_does_not_overflow() {
        let (urban, rural) = urban_rural_split(i64::MAX);
        assert_eq!(urban, 5_995_191_823_955_604_274);
        assert_eq!(urban + rural, i64::MAX);

        let (urban, rural) = urban_rural_split(i64::MAX / 65 + 1);
        assert_eq!(urban + rural, i64::MAX / 65 + 1);
        assert!(urban > rural);
    }

    #[tokio::test]
    async fn ranks_states_by_total() {
        let store = MemoryStore::new(vec![
            UnitRow::new(2020, "48", "000100", 30.0, 30, 20),
            UnitRow::new(2020, "06", "000100", 30.0, 60, 40),
            UnitRow::new(2019, "12", "000100", 30.0, 500, 500),
        ]);

        let ranking = get_top_regions(&store, 10).await;
        assert_eq!(ranking.len(), 2);

        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[0].country, "California");
        assert_eq!(ranking[0].population, 100);
        assert_eq!((ranking[0].male, ranking[0].female), (60, 40));
        assert_eq!((ranking[0].urban, ranking[0].rural), (65, 35));

        assert_eq!(ranking[1].rank, 2);
        assert_eq!(ranking[1].country, "Texas");
        assert_eq!((ranking[1].urban, ranking[1].rural), (32, 18));
    }

    #[tokio::test]
    async fn truncates_to_limit() {
        let store = MemoryStore::new(vec![
            UnitRow::new(2020, "06", "000100", 30.0, 60, 40),
            UnitRow::new(2020, "48", "000100", 30.0, 30, 20),
            UnitRow::new(2020, "12", "000100", 30.0, 10, 10),
        ]);

        let ranking = get_top_regions(&store, 2).await;
        let names: Vec<_> = ranking.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, ["California", "Texas"]);
    }

    #[tokio::test]
    async fn non_positive_limit_is_empty_on_success() {
        let store = MemoryStore::new(vec![UnitRow::new(2020, "06", "000100", 30.0, 60, 40)]);
        assert!(get_top_regions(&store, 0).await.is_empty());
        assert!(get_top_regions(&store, -3).await.is_empty());
    }

    #[tokio::test]
    async fn non_positive_limit_falls_back_on_failure() {
        let store = MemoryStore::failing();
        assert_eq!(get_top_regions(&store, 0).await, fallback::top_states());
    }

    #[tokio::test]
    async fn unknown_fips_gets_generic_name() {
        let store = MemoryStore::new(vec![UnitRow::new(2020, "72", "000100", 30.0, 5, 5)]);
        let ranking = get_top_regions(&store, 10).await;
        assert_eq!(ranking[0].country, "State 72");
    }

    #[test]
    fn ties_keep_input_order() {
        let totals = vec![
            StateTotals {
                state_fips: "02".to_string(),
                male: 5,
                female: 5,
                total: 10,
            },
            StateTotals {
                state_fips: "01".to_string(),
                male: 5,
                female: 5,
                total: 10,
            },
        ];
        let ranking = rank_states(&totals, 10);
        assert_eq!(ranking[0].country, "Alaska");
        assert_eq!(ranking[1].country, "Alabama");
        assert_eq!(ranking[1].rank, 2);
    }
}
