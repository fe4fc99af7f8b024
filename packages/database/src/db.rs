//! Database connection utilities.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use switchy_database::Database;
use switchy_database_connection::{Credentials, init_sqlite_rusqlite};

use crate::DbError;

/// `SQLite` file used when `DATABASE_URL` does not name a Postgres server.
pub const DEFAULT_SQLITE_PATH: &str = "data/census.db";

/// Connection attempts made by [`wait_for_database`].
pub const WAIT_ATTEMPTS: u32 = 30;

/// Pause between [`wait_for_database`] attempts.
pub const WAIT_DELAY: Duration = Duration::from_secs(2);

/// Where the census database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Postgres connection URL without its query string.
    Postgres(String),
    /// Path of a `SQLite` file.
    Sqlite(PathBuf),
}

impl DatabaseTarget {
    /// Resolves the target from `DATABASE_URL` and `CENSUS_DB_PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("DATABASE_URL").ok().as_deref(),
            std::env::var("CENSUS_DB_PATH").ok().as_deref(),
        )
    }

    /// A `postgres://` or `postgresql://` URL selects Postgres; anything
    /// else selects the `SQLite` file at `sqlite_path` (or the default).
    #[must_use]
    pub fn resolve(database_url: Option<&str>, sqlite_path: Option<&str>) -> Self {
        match database_url {
            Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                // Strip query parameters (e.g., ?sslmode=require) that the
                // Credentials parser doesn't understand.
                let base = url.split('?').next().unwrap_or(url);
                Self::Postgres(base.to_string())
            }
            _ => Self::Sqlite(PathBuf::from(sqlite_path.unwrap_or(DEFAULT_SQLITE_PATH))),
        }
    }
}

/// Opens the database named by the environment.
///
/// # Errors
///
/// Returns [`DbError`] if the URL is invalid or the connection fails.
pub async fn connect_from_env() -> Result<Box<dyn Database>, DbError> {
    connect(&DatabaseTarget::from_env()).await
}

/// Opens `target`.
///
/// # Errors
///
/// Returns [`DbError`] if the URL is invalid or the connection fails.
pub async fn connect(target: &DatabaseTarget) -> Result<Box<dyn Database>, DbError> {
    match target {
        DatabaseTarget::Postgres(url) => {
            let creds = Credentials::from_url(url).map_err(|e| DbError::Connection {
                message: format!("Invalid DATABASE_URL: {e}"),
            })?;
            let db = switchy_database_connection::init_postgres_raw_native_tls(creds)
                .await
                .map_err(|e| DbError::Connection {
                    message: e.to_string(),
                })?;
            log::info!("Connected to Postgres");
            Ok(db)
        }
        DatabaseTarget::Sqlite(path) => open_sqlite(path),
    }
}

/// Opens (or creates) the `SQLite` file at `path`, creating its parent
/// directory.
///
/// # Errors
///
/// Returns [`DbError`] if the directory or the database cannot be created.
pub fn open_sqlite(path: &Path) -> Result<Box<dyn Database>, DbError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Connection {
        message: format!("Failed to open {}: {e}", path.display()),
    })?;
    log::info!("Opened SQLite database at {}", path.display());
    Ok(db)
}

/// Connects from the environment, retrying [`WAIT_ATTEMPTS`] times
/// [`WAIT_DELAY`] apart while the server comes up.
///
/// # Errors
///
/// Returns the last [`DbError`] once every attempt has failed.
pub async fn wait_for_database() -> Result<Box<dyn Database>, DbError> {
    let target = &DatabaseTarget::from_env();
    retry_connect(WAIT_ATTEMPTS, WAIT_DELAY, move || async move {
        let db = connect(target).await?;
        db.query_raw_params("SELECT 1", &[]).await?;
        Ok(db)
    })
    .await
}

/// Calls `connect` until it succeeds or `attempts` calls have failed.
///
/// # Errors
///
/// Returns the error of the final attempt.
pub async fn retry_connect<T, F, Fut>(
    attempts: u32,
    delay: Duration,
    mut connect: F,
) -> Result<T, DbError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match connect().await {
            Ok(value) => {
                log::info!("Database is ready");
                return Ok(value);
            }
            Err(e) if attempt < attempts => {
                log::info!("Database not ready yet (attempt {attempt}/{attempts}): {e}");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                log::error!("Could not connect to the database after {attempts} attempts");
                return Err(e);
            }
        }
    }
}
