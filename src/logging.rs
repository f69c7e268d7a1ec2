//! Logging setup for the command line tool.
//!
//! Two `tracing` layers are installed: a terse one on stdout at INFO (can be
//! changed with `RUST_LOG`) showing progress and one-line errors, and a
//! detailed one writing to the run's log file at the requested level, with
//! timestamps and the ISSN span of every event.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{KeepersError, Result};

/// Parse a log level name such as `DEBUG`, `info` or `Error`.
///
/// # Errors
///
/// Returns [`KeepersError::InvalidConfig`] for unknown level names.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| KeepersError::InvalidConfig(format!("unknown log level: {level}")))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the level is unknown, the log file cannot be created,
/// or a subscriber is already installed.
pub fn init(level: &str, log_file: &Path) -> Result<()> {
    let file_level = parse_level(level)?;
    let file = File::create(log_file)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_filter(file_level);

    let stdout_layer = fmt::layer()
        .without_time()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| KeepersError::LogSetup(e.to_string()))
}
