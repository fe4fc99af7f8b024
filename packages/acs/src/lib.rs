#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Downloader for the Census Bureau's ACS 5-year tract data.
//!
//! For every (year, state) pair the ACS5 API is queried for the variables
//! of a [`variables::Profile`] at census-tract level, and the rows are
//! written to one CSV file per year. Requests go through
//! [`retry::fetch_with_retry`], which honours `Retry-After` on rate limits
//! and backs off exponentially on network failures.

pub mod download;
pub mod progress;
pub mod retry;
pub mod variables;

use thiserror::Error;

/// Errors from a single ACS request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a status other than 200 or 429.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Every attempt failed at the network level.
    #[error("Request failed after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        /// Number of attempts made.
        attempts: u32,
        /// Error of the final attempt.
        last_error: String,
    },

    /// The 200 response body was not valid JSON.
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors that abort a download run.
#[derive(Debug, Error)]
pub enum AcsError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Request setup error.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A `--states` entry is neither a FIPS code nor a state abbreviation.
    #[error("Unknown state: {0}")]
    UnknownState(String),
}
