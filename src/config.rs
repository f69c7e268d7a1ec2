//! Configuration options for a Keepers query run.
//!
//! This module provides the [`QueryConfig`] struct which controls how the ISSN
//! Portal is queried and where results are written, and the [`RetryPolicy`]
//! applied to every portal request.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{KeepersError, Result};

/// Default portal base URL.
pub const DEFAULT_BASE_URL: &str = "https://portal.issn.org";

/// Retry behavior for transient portal failures.
///
/// Failed attempts are retried after `backoff_factor * 2^(retry - 1)`
/// seconds, capped at `max_backoff`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Base of the exponential backoff, in seconds.
    pub backoff_factor: f64,
    /// Upper bound for a single backoff.
    pub max_backoff: Duration,
    /// HTTP statuses that are retried.
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 6,
            backoff_factor: 2.0,
            max_backoff: Duration::from_secs(120),
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether a response with this status should be retried.
    #[must_use]
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Backoff before the given retry (1-based).
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let seconds = self.backoff_factor * 2f64.powi(exponent);
        if !seconds.is_finite() || seconds >= self.max_backoff.as_secs_f64() {
            self.max_backoff
        } else {
            Duration::from_secs_f64(seconds)
        }
    }
}

/// Configuration for a Keepers query run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use keepers_query::QueryConfig;
///
/// let config = QueryConfig::new()
///     .with_delay(Duration::ZERO)
///     .with_save_records(true)
///     .with_output_dir("out");
///
/// assert_eq!(config.results_csv(), std::path::Path::new("out").join(format!(
///     "{}_keepers_query_results.csv",
///     config.timestamp
/// )));
/// ```
#[derive(Debug, Clone)]
pub struct QueryConfig {
    // === Portal ===
    /// Portal base URL, without trailing slash.
    pub base_url: String,

    /// Retry policy for portal requests.
    pub retry: RetryPolicy,

    /// Timeout of a single HTTP request.
    pub request_timeout: Duration,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Pause after each processed ISSN. Zero disables pacing.
    pub delay: Duration,

    // === Output ===
    /// Directory receiving all output files.
    pub output_dir: PathBuf,

    /// Prefix of every output file name, `%Y-%m-%d_%H-%M-%S` by default.
    pub timestamp: String,

    /// Save each raw JSON response to `<timestamp>_json_records/<issn>.json`.
    pub save_records: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            request_timeout: Duration::from_secs(60),
            user_agent: format!("keepers-query/{}", env!("CARGO_PKG_VERSION")),
            delay: Duration::from_secs(1),
            output_dir: PathBuf::from("."),
            timestamp: chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string(),
            save_records: false,
        }
    }
}

impl QueryConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portal base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the pause between ISSNs.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the output file name prefix.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Enables saving of raw JSON responses.
    #[must_use]
    pub const fn with_save_records(mut self, enabled: bool) -> Self {
        self.save_records = enabled;
        self
    }

    /// Converts a delay in (fractional) seconds as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`KeepersError::InvalidConfig`] for negative or non-finite values.
    pub fn delay_from_secs(seconds: f64) -> Result<Duration> {
        Duration::try_from_secs_f64(seconds)
            .map_err(|_| KeepersError::InvalidConfig(format!("invalid delay: {seconds}")))
    }

    /// Portal URL of the JSON record of an ISSN.
    #[must_use]
    pub fn record_url(&self, issn: &str) -> String {
        format!("{}/resource/ISSN/{issn}?format=json", self.base_url)
    }

    fn output_file(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{suffix}", self.timestamp))
    }

    /// Path of the CSV report.
    #[must_use]
    pub fn results_csv(&self) -> PathBuf {
        self.output_file("keepers_query_results.csv")
    }

    /// Path of the archive organization list.
    #[must_use]
    pub fn organizations_list(&self) -> PathBuf {
        self.output_file("encountered_archives_list.txt")
    }

    /// Path of the progress file listing finished ISSNs.
    #[must_use]
    pub fn done_issns(&self) -> PathBuf {
        self.output_file("done_issns.txt")
    }

    /// Path of the log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.output_file("keepers_query.log")
    }

    /// Directory receiving raw JSON responses.
    #[must_use]
    pub fn records_dir(&self) -> PathBuf {
        self.output_file("json_records")
    }
}
