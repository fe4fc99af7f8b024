//! Multi-year population trend series.

use std::collections::BTreeMap;

use census_dashboard_stats_models::TrendPoint;
use census_dashboard_stats_models::fallback::{self, BASELINE_TREND};

use crate::fallback::or_fallback;
use crate::store::{CensusStore, YearTotals};
use crate::{StatsError, round1};

/// Trend points for `[start_year, end_year]` merged with the baseline, or
/// the static series if the store fails.
pub async fn get_trend(store: &dyn CensusStore, start_year: i32, end_year: i32) -> Vec<TrendPoint> {
    or_fallback(
        "population trend",
        compute_trend(store, start_year, end_year),
        fallback::trend,
    )
    .await
}

/// Computes the merged trend series from the store.
///
/// A reversed range matches no rows, so the result is just the baseline.
///
/// # Errors
///
/// Returns any error returned by the store.
pub async fn compute_trend(
    store: &dyn CensusStore,
    start_year: i32,
    end_year: i32,
) -> Result<Vec<TrendPoint>, StatsError> {
    let totals = store.yearly_totals(start_year, end_year).await?;
    log::debug!(
        "Trend {start_year}..={end_year}: {} database years",
        totals.len()
    );
    let points = totals.iter().map(to_point).collect::<Vec<_>>();
    Ok(merge_baseline(points))
}

/// Converts a raw count to billions rounded to one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_billions(raw: i64) -> f64 {
    round1(raw as f64 / 1_000_000_000.0)
}

fn to_point(totals: &YearTotals) -> TrendPoint {
    TrendPoint::new(
        totals.year,
        to_billions(totals.births),
        to_billions(totals.deaths),
        to_billions(totals.growth),
        to_billions(totals.total),
    )
}

/// Adds every baseline point whose year is missing from `points`, then
/// orders by year. Database points are never replaced.
#[must_use]
pub fn merge_baseline(points: Vec<TrendPoint>) -> Vec<TrendPoint> {
    let mut by_year: BTreeMap<i32, TrendPoint> = BTreeMap::new();
    for point in points {
        by_year.entry(point.year).or_insert(point);
    }
    for point in &BASELINE_TREND {
        by_year.entry(point.year).or_insert(*point);
    }
    by_year.into_values().collect()
}
