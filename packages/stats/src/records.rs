//! Listing queries backing the secondary dashboard views.

use census_dashboard_geography_models::fips;
use census_dashboard_stats_models::fallback;
use census_dashboard_stats_models::{CensusRecord, StatePopulation};

use crate::fallback::or_fallback;
use crate::store::{CensusRecordQuery, CensusStore};

/// Maximum number of tract rows returned by [`get_census_data`].
pub const CENSUS_DATA_LIMIT: u32 = 1000;

/// Survey years present in the database, ascending; `[2020]` on failure.
pub async fn get_census_years(store: &dyn CensusStore) -> Vec<i32> {
    or_fallback("census years", store.census_years(), fallback::census_years).await
}

/// Population of every state for `year`, most populous first; empty on
/// failure.
pub async fn get_population_by_state(store: &dyn CensusStore, year: i32) -> Vec<StatePopulation> {
    or_fallback(
        "population by state",
        async {
            let totals = store.state_totals(year, None).await?;
            Ok::<_, crate::StatsError>(
                totals
                    .into_iter()
                    .map(|t| StatePopulation {
                        state_name: fips::display_name(&t.state_fips),
                        state_fips: t.state_fips,
                        male_population: t.male,
                        female_population: t.female,
                        total_population: t.total,
                    })
                    .collect(),
            )
        },
        Vec::new,
    )
    .await
}

/// Tract-level rows for `year`, optionally narrowed to one state and
/// county, capped at [`CENSUS_DATA_LIMIT`]; empty on failure.
pub async fn get_census_data(
    store: &dyn CensusStore,
    year: i32,
    state: Option<String>,
    county: Option<String>,
) -> Vec<CensusRecord> {
    let query = CensusRecordQuery {
        year,
        state,
        county,
        limit: CENSUS_DATA_LIMIT,
    };
    or_fallback("census data", store.census_records(&query), Vec::new).await
}
