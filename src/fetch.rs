//! Retrieval of ISSN Portal records.
//!
//! [`PortalClient`] issues one GET per ISSN and retries transient failures
//! (rate limiting, 5xx, connection problems) according to the configured
//! [`RetryPolicy`]. Retries never surface to the caller: every request ends in
//! exactly one [`FetchOutcome`], or an error if the transport kept failing.
//!
//! The classification of a final response is a pure function,
//! [`classify_response`], so it can be checked without a network.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::RETRY_AFTER;
use serde_json::Value;

use crate::config::{QueryConfig, RetryPolicy};
use crate::error::Result;

/// Body text the portal serves instead of JSON for unknown ISSNs.
pub const UNKNOWN_ISSN_MARKER: &str = "The requested numbers do not correspond to valid ISSNs";

/// HTTP status the portal uses to block a client.
pub const BLOCKED_STATUS: u16 = 403;

/// Final result of fetching one ISSN record.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The record as parsed JSON plus the raw response body.
    Success {
        /// Parsed response.
        document: Value,
        /// Unparsed response body.
        raw: String,
    },
    /// The portal refused service. The run must stop.
    Blocked,
    /// The portal does not know the ISSN.
    NotFound,
    /// Successful status but the body was not JSON.
    MalformedResponse,
    /// Any other unsuccessful status.
    HttpError(u16),
}

/// Source of portal records.
///
/// Implemented by [`PortalClient`] for real queries; tests drive the run loop
/// with scripted implementations.
pub trait Fetcher {
    /// Fetch the record of one ISSN.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport failed on every attempt.
    fn fetch(&self, issn: &str) -> Result<FetchOutcome>;
}

/// Classify a final HTTP response.
///
/// # Examples
///
/// ```
/// use keepers_query::fetch::{classify_response, FetchOutcome};
///
/// assert_eq!(classify_response(403, ""), FetchOutcome::Blocked);
/// assert_eq!(classify_response(200, "<html>"), FetchOutcome::MalformedResponse);
/// assert_eq!(classify_response(500, ""), FetchOutcome::HttpError(500));
/// ```
#[must_use]
pub fn classify_response(status: u16, body: &str) -> FetchOutcome {
    if status == BLOCKED_STATUS {
        return FetchOutcome::Blocked;
    }
    if !(200..400).contains(&status) {
        return FetchOutcome::HttpError(status);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(document) => FetchOutcome::Success {
            document,
            raw: body.to_string(),
        },
        Err(_) if body.contains(UNKNOWN_ISSN_MARKER) => FetchOutcome::NotFound,
        Err(_) => FetchOutcome::MalformedResponse,
    }
}

/// Blocking HTTP client for the ISSN Portal.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    config: QueryConfig,
}

impl PortalClient {
    /// Build a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &QueryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, ...).
    #[must_use]
    pub fn with_client(client: Client, config: &QueryConfig) -> Self {
        PortalClient {
            client,
            config: config.clone(),
        }
    }

    fn retry_policy(&self) -> &RetryPolicy {
        &self.config.retry
    }

    fn wait(&self, retry: u32, response: Option<&Response>) {
        let policy = self.retry_policy();
        let delay = response
            .and_then(retry_after)
            .map_or_else(|| policy.backoff(retry), |d| d.min(policy.max_backoff));
        tracing::debug!(retry, ?delay, "retrying portal request");
        thread::sleep(delay);
    }
}

impl Fetcher for PortalClient {
    fn fetch(&self, issn: &str) -> Result<FetchOutcome> {
        let url = self.config.record_url(issn);
        let max_retries = self.retry_policy().max_retries;
        let mut retry = 0;

        loop {
            match self.client.get(&url).send() {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if self.retry_policy().is_retryable(status) && retry < max_retries {
                        retry += 1;
                        tracing::debug!(status, %url, "transient portal status");
                        self.wait(retry, Some(&response));
                        continue;
                    }
                    let body = response.text()?;
                    return Ok(classify_response(status, &body));
                },
                Err(err) if is_transient(&err) && retry < max_retries => {
                    retry += 1;
                    tracing::debug!(error = %err, %url, "transient transport error");
                    self.wait(retry, None);
                },
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// `Retry-After` in seconds on rate-limit and unavailable responses.
fn retry_after(response: &Response) -> Option<Duration> {
    let status = response.status().as_u16();
    if status != 429 && status != 503 {
        return None;
    }
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
