//! The "serve something" policy shared by every dashboard query.

use std::fmt::Display;
use std::future::Future;

/// Awaits `fetch`; on error, logs it under `label` and returns `fallback()`.
///
/// Every endpoint of the query engine goes through this wrapper so that
/// the substitution and its log line stay identical across them.
pub async fn or_fallback<T, E, Fut, F>(label: &str, fetch: Fut, fallback: F) -> T
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    F: FnOnce() -> T,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            log::error!("Failed to query {label}, serving fallback data: {e}");
            fallback()
        }
    }
}
