#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the census dashboard.
//!
//! Serves population overview, state ranking, trend, and tract listing
//! endpoints backed by the census database. Every data endpoint answers
//! with `200`: when the database cannot, the static fallback payloads of
//! the statistics engine are served instead.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use census_dashboard_database::{db, ensure_schema};
use census_dashboard_server_models::ApiError;
use census_dashboard_stats::{CensusStore, SqlCensusStore};

/// Port used when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 5000;

/// Shared application state.
pub struct AppState {
    /// Census statistics source.
    pub store: Arc<dyn CensusStore>,
}

/// Registers every route and the query-string error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .route("/", web::get().to(handlers::index))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/population/overview", web::get().to(handlers::overview))
                .route("/population/trend", web::get().to(handlers::trend))
                .route("/population/states", web::get().to(handlers::states))
                .route("/countries/top", web::get().to(handlers::top_states))
                .route("/census/years", web::get().to(handlers::census_years))
                .route("/census/data", web::get().to(handlers::census_data)),
        );
}

/// Rejects malformed query strings with `400` and an `{"error": ...}` body.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::debug!("Rejected query string: {message}");
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ApiError { error: message }),
        )
        .into()
    })
}

/// Starts the census dashboard API server.
///
/// Waits for the database named by `DATABASE_URL` (or the `SQLite` file
/// at `CENSUS_DB_PATH`), creates any missing census tables, and serves on
/// `BIND_ADDR`:`PORT`. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the database is unreachable, the
/// schema cannot be created, or the HTTP server fails to bind.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to database...");
    let db_conn = db::wait_for_database()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!("Ensuring census schema...");
    ensure_schema(db_conn.as_ref())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = web::Data::new(AppState {
        store: Arc::new(SqlCensusStore::new(Arc::from(db_conn))),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
