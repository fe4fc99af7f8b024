//! Population overview for one survey year.

use census_dashboard_stats_models::fallback::{self, BIRTHS_TODAY, DEATHS_TODAY, GROWTH_TODAY};
use census_dashboard_stats_models::{EthnicityPercentages, PopulationOverview};

use crate::fallback::or_fallback;
use crate::store::{CensusStore, EthnicityTotals, OverviewAggregates};
use crate::{StatsError, percentage};

/// Overview for `year`, or the static overview if the store fails or has
/// no units for that year.
pub async fn get_overview(store: &dyn CensusStore, year: i32) -> PopulationOverview {
    or_fallback(
        "population overview",
        compute_overview(store, year),
        fallback::overview,
    )
    .await
}

/// Computes the overview for `year` from the store.
///
/// # Errors
///
/// * [`StatsError::NoData`] if no census unit exists for `year`
/// * Any error returned by the store
pub async fn compute_overview(
    store: &dyn CensusStore,
    year: i32,
) -> Result<PopulationOverview, StatsError> {
    let aggregates = store.overview_aggregates(year).await?;
    if aggregates.unit_count == 0 {
        return Err(StatsError::NoData { year });
    }

    log::debug!(
        "Overview for {year}: {} units, population {}",
        aggregates.unit_count,
        aggregates.total_population
    );

    Ok(overview_from(&aggregates))
}

fn overview_from(agg: &OverviewAggregates) -> PopulationOverview {
    let units = agg.unit_count;
    PopulationOverview {
        total_population: agg.total_population,
        median_age: agg.median_age.unwrap_or(0.0),
        working_age_percentage: percentage(agg.working_units, units),
        elderly_percentage: percentage(agg.elderly_units, units),
        youth_percentage: percentage(agg.youth_units, units),
        ethnicity_percentages: (agg.total_population > 0)
            .then(|| ethnicity_shares(&agg.ethnicity, agg.total_population)),
        births_today: BIRTHS_TODAY,
        deaths_today: DEATHS_TODAY,
        growth_today: GROWTH_TODAY,
    }
}

fn ethnicity_shares(totals: &EthnicityTotals, population: i64) -> EthnicityPercentages {
    EthnicityPercentages {
        white: percentage(totals.white, population),
        black_or_african_american: percentage(totals.black_or_african_american, population),
        hispanic_or_latino: percentage(totals.hispanic_or_latino, population),
        asian: percentage(totals.asian, population),
        american_indian: percentage(totals.american_indian, population),
        native_hawaiian: percentage(totals.native_hawaiian, population),
    }
}
