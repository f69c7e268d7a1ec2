//! Error types for Keepers queries.
//!
//! This module provides the [`KeepersError`] type for all library operations
//! and the [`Result`] convenience type.
//!
//! Data-quality problems inside a portal record are *not* errors; they are
//! reported as [`DataQualityWarning`](crate::extract::DataQualityWarning)s.

use thiserror::Error;

/// Error type for all Keepers query operations.
#[derive(Error, Debug)]
pub enum KeepersError {
    /// The ISSN Portal refused service (HTTP 403). Terminates the whole run.
    #[error("ISSN Portal refused access (403 forbidden), stopping the query")]
    Blocked,

    /// A JSON document was valid but lacked the `@graph` array.
    #[error("Invalid JSON data: \"@graph\" node is missing")]
    MissingGraph,

    /// Invalid run configuration (log level, base URL, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Logging could not be installed.
    #[error("Logging setup failed: {0}")]
    LogSetup(String),

    /// HTTP transport error that survived all retries.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl KeepersError {
    /// Whether this error must stop the whole run rather than skip one ISSN.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Blocked)
    }
}

/// Convenience type alias for [`std::result::Result`] with [`KeepersError`].
pub type Result<T> = std::result::Result<T, KeepersError>;
