//! HTTP handler functions for the census dashboard API.

use actix_web::{HttpResponse, web};
use census_dashboard_server_models::{
    ApiHealth, ApiStatus, CensusDataParams, CensusDataResponse, StatesResponse, TopParams,
    TrendParams, YearParams,
};
use census_dashboard_stats as stats;

use crate::AppState;

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiStatus {
        status: "ok".to_string(),
        message: "Census Population Dashboard API is running".to_string(),
    })
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/population/overview`
pub async fn overview(state: web::Data<AppState>, params: web::Query<YearParams>) -> HttpResponse {
    let overview = stats::get_overview(state.store.as_ref(), params.year()).await;
    HttpResponse::Ok().json(overview)
}

/// `GET /api/countries/top`
///
/// Ranks states by population for the reference year.
pub async fn top_states(state: web::Data<AppState>, params: web::Query<TopParams>) -> HttpResponse {
    let ranking = stats::get_top_regions(state.store.as_ref(), params.limit()).await;
    HttpResponse::Ok().json(ranking)
}

/// `GET /api/population/trend`
pub async fn trend(state: web::Data<AppState>, params: web::Query<TrendParams>) -> HttpResponse {
    let points =
        stats::get_trend(state.store.as_ref(), params.start_year(), params.end_year()).await;
    HttpResponse::Ok().json(points)
}

/// `GET /api/population/states`
pub async fn states(state: web::Data<AppState>, params: web::Query<YearParams>) -> HttpResponse {
    let year = params.year();
    let states = stats::get_population_by_state(state.store.as_ref(), year).await;
    HttpResponse::Ok().json(StatesResponse::new(year, states))
}

/// `GET /api/census/years`
pub async fn census_years(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(stats::get_census_years(state.store.as_ref()).await)
}

/// `GET /api/census/data`
///
/// Lists tract rows for a year, optionally filtered by state and county.
pub async fn census_data(
    state: web::Data<AppState>,
    params: web::Query<CensusDataParams>,
) -> HttpResponse {
    let params = params.into_inner();
    let year = params.year();
    let data = stats::get_census_data(
        state.store.as_ref(),
        year,
        params.state.clone(),
        params.county.clone(),
    )
    .await;

    HttpResponse::Ok().json(CensusDataResponse {
        year,
        state: params.state,
        county: params.county,
        count: data.len(),
        data,
    })
}
