//! HTTP retry loop for ACS requests.
//!
//! A request moves through these outcomes until it settles:
//!
//! * **200**: the body is parsed as JSON and returned.
//! * **429**: sleep for the server's `Retry-After` seconds (5 when absent
//!   or unparsable) and try again. Rate limiting does not count as an
//!   attempt, so a server that keeps answering 429 is retried forever.
//! * **Any other status**: logged and returned as [`FetchError::Status`]
//!   without retrying.
//! * **Network error**: sleep `2^attempt` seconds (1s, 2s, 4s, ...) and
//!   try again, up to `max_retries` attempts in total.

use std::time::Duration;

use async_trait::async_trait;

use crate::FetchError;

/// Per-request timeout of [`ReqwestTransport`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delay used when a 429 response carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Maximum length of the response body included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Boxed error returned by a transport for network-level failures.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// What the retry loop needs to know about an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Raw `Retry-After` header value, if any.
    pub retry_after: Option<String>,
    pub body: String,
}

/// Sends one GET request. Implemented over `reqwest` in production and by
/// scripted stubs in tests.
#[async_trait]
pub trait AcsTransport: Send + Sync {
    /// Sends `GET url?params`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<RawResponse, TransportError>;
}

/// [`AcsTransport`] over a `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AcsTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url).query(params).send().await?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;
        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Parses a `Retry-After` value in whole seconds.
#[must_use]
pub fn retry_after_secs(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Fetches `url` with `params`, retrying as described in the module docs.
///
/// # Errors
///
/// * [`FetchError::Status`] on a non-200, non-429 response
/// * [`FetchError::Json`] if a 200 body is not valid JSON
/// * [`FetchError::ExhaustedRetries`] after `max_retries` network errors
pub async fn fetch_with_retry(
    transport: &dyn AcsTransport,
    url: &str,
    params: &[(&str, String)],
    max_retries: u32,
) -> Result<serde_json::Value, FetchError> {
    let mut attempt: u32 = 0;
    let mut last_error = String::from("no attempt made");

    while attempt < max_retries {
        match transport.get(url, params).await {
            Ok(response) if response.status == 200 => {
                return Ok(serde_json::from_str(&response.body)?);
            }
            Ok(response) if response.status == 429 => {
                let secs = retry_after_secs(response.retry_after.as_deref());
                log::warn!("Rate limit exceeded. Retrying in {secs} seconds.");
                tokio::time::sleep(Duration::from_secs(secs)).await;
            }
            Ok(response) => {
                log::error!(
                    "Error {}: {}",
                    response.status,
                    preview(&response.body)
                );
                return Err(FetchError::Status {
                    status: response.status,
                    body: response.body,
                });
            }
            Err(e) => {
                let delay = Duration::from_secs(1u64 << attempt.min(63));
                log::warn!(
                    "Request failed (attempt {}/{max_retries}), retrying in {delay:?}: {e}",
                    attempt + 1
                );
                last_error = e.to_string();
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }

    Err(FetchError::ExhaustedRetries {
        attempts: attempt,
        last_error,
    })
}

fn preview(body: &str) -> &str {
    body.char_indices()
        .nth(BODY_PREVIEW_LEN)
        .map_or(body, |(i, _)| &body[..i])
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use tokio::time::Instant;

    use super::*;

    enum Step {
        Respond(u16, Option<&'static str>, &'static str),
        Fail,
    }

    /// Replays `steps` in order, then keeps failing at the network level.
    struct Scripted {
        steps: Mutex<VecDeque<Step>>,
        calls: Mutex<u32>,
    }

    impl Scripted {
        fn new(steps: Vec<Step>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl AcsTransport for Scripted {
        async fn get(
            &self,
            _url: &str,
            _params: &[(&str, String)],
        ) -> Result<RawResponse, TransportError> {
            *self.calls.lock().unwrap() += 1;
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some(Step::Respond(status, retry_after, body)) => Ok(RawResponse {
                    status,
                    retry_after: retry_after.map(String::from),
                    body: body.to_string(),
                }),
                Some(Step::Fail) | None => Err("connection reset".into()),
            }
        }
    }

    const URL: &str = "https://api.census.gov/data/2023/acs/acs5";

    #[tokio::test(start_paused = true)]
    async fn rate_limits_use_retry_after_only() {
        let transport = Scripted::new(vec![
            Step::Respond(429, Some("3"), ""),
            Step::Respond(429, Some("7"), ""),
            Step::Respond(200, None, r#"[["NAME"],["Tract 1"]]"#),
        ]);
        let start = Instant::now();

        let value = fetch_with_retry(&transport, URL, &[], 5).await.unwrap();

        assert_eq!(value[1][0], "Tract 1");
        assert_eq!(transport.calls(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_defaults_to_five_seconds() {
        let transport = Scripted::new(vec![
            Step::Respond(429, Some("soon"), ""),
            Step::Respond(200, None, "[]"),
        ]);
        let start = Instant::now();

        fetch_with_retry(&transport, URL, &[], 5).await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limits_do_not_consume_attempts() {
        let transport = Scripted::new(vec![
            Step::Fail,
            Step::Respond(429, None, ""),
            Step::Respond(429, None, ""),
            Step::Respond(429, None, ""),
            Step::Respond(200, None, "[]"),
        ]);

        let result = fetch_with_retry(&transport, URL, &[], 2).await;

        assert!(result.is_ok());
        assert_eq!(transport.calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn network_errors_back_off_exponentially() {
        let transport = Scripted::new(Vec::new());
        let start = Instant::now();

        let result = fetch_with_retry(&transport, URL, &[], 4).await;

        match result {
            Err(FetchError::ExhaustedRetries {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 4);
                assert_eq!(last_error, "connection reset");
            }
            other => panic!("expected exhausted retries, got {other:?}"),
        }
        assert_eq!(transport.calls(), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(1 + 2 + 4 + 8));
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_is_not_retried() {
        let transport = Scripted::new(vec![Step::Respond(500, None, "boom")]);
        let start = Instant::now();

        let result = fetch_with_retry(&transport, URL, &[], 5).await;

        assert!(matches!(
            result,
            Err(FetchError::Status { status: 500, ref body }) if body == "boom"
        ));
        assert_eq!(transport.calls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn network_error_then_success() {
        let transport = Scripted::new(vec![Step::Fail, Step::Respond(200, None, "[[1]]")]);
        let start = Instant::now();

        let value = fetch_with_retry(&transport, URL, &[], 5).await.unwrap();

        assert_eq!(value[0][0], 1);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_json_is_an_error() {
        let transport = Scripted::new(vec![Step::Respond(200, None, "<html>")]);
        let result = fetch_with_retry(&transport, URL, &[], 5).await;
        assert!(matches!(result, Err(FetchError::Json(_))));
    }

    #[tokio::test]
    async fn zero_retries_makes_no_request() {
        let transport = Scripted::new(vec![Step::Respond(200, None, "[]")]);
        let result = fetch_with_retry(&transport, URL, &[], 0).await;
        assert!(matches!(
            result,
            Err(FetchError::ExhaustedRetries { attempts: 0, .. })
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn retry_after_parsing() {
        assert_eq!(retry_after_secs(Some("12")), 12);
        assert_eq!(retry_after_secs(Some(" 3 ")), 3);
        assert_eq!(retry_after_secs(Some("Wed, 21 Oct 2015 07:28:00 GMT")), 5);
        assert_eq!(retry_after_secs(None), 5);
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(BODY_PREVIEW_LEN + 10);
        assert_eq!(preview(&long).chars().count(), BODY_PREVIEW_LEN);
        assert_eq!(preview("short"), "short");
    }
}
