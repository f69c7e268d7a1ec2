//! The per-ISSN query loop.
//!
//! A [`Runner`] fetches and extracts one ISSN after the other and feeds the
//! results into a [`QueryRun`], the run-wide accumulator. Failures are sorted
//! into three classes:
//!
//! - **Fatal**: the portal blocked us. The loop stops and
//!   [`KeepersError::Blocked`] is returned.
//! - **Skip**: unknown ISSN, non-JSON body, error status, missing `@graph`,
//!   or a transport failure. The ISSN is logged and skipped.
//! - **Data quality**: warnings from the extractor. Logged, never skipped.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, info_span, warn};

use crate::csv;
use crate::error::{KeepersError, Result};
use crate::extract::{extract, DataQualityWarning, Extraction};
use crate::fetch::{FetchOutcome, Fetcher};
use crate::graph::Document;
use crate::org_names::OrganizationNames;
use crate::progress::{ProgressLog, RecordArchive};
use crate::record::KeepersRecord;

/// Why an ISSN produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The portal does not know the ISSN.
    NotFound,
    /// The response was not JSON.
    MalformedResponse,
    /// The portal answered with an error status.
    HttpError(u16),
    /// The JSON lacked the `@graph` array.
    MissingGraph,
    /// The request failed on every attempt.
    Transport(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "ISSN seems to be unknown to the ISSN Portal."),
            Self::MalformedResponse => write!(f, "No valid JSON response for unknown reasons."),
            Self::HttpError(status) => {
                write!(f, "Received HTTP status {status} from ISSN Portal. No data.")
            },
            Self::MissingGraph => write!(f, "Invalid JSON data. \"@graph\" node is missing."),
            Self::Transport(message) => write!(f, "Request failed: {message}"),
        }
    }
}

/// Run-wide accumulation of records and organization names.
///
/// Records are only ever appended; the CSV header is derived from all of them
/// at write time.
#[derive(Debug, Default)]
pub struct QueryRun {
    records: Vec<KeepersRecord>,
    org_names: OrganizationNames,
    skipped: Vec<(String, SkipReason)>,
}

impl QueryRun {
    /// Create an empty run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the result of one extraction.
    pub fn accumulate(&mut self, extraction: Extraction) {
        self.org_names.merge(&extraction.org_names);
        self.records.push(extraction.record);
    }

    /// Note an ISSN that produced no record.
    pub fn skip(&mut self, issn: &str, reason: SkipReason) {
        self.skipped.push((issn.to_string(), reason));
    }

    /// Records in processing order.
    #[must_use]
    pub fn records(&self) -> &[KeepersRecord] {
        &self.records
    }

    /// Organization names of all records.
    #[must_use]
    pub fn org_names(&self) -> &OrganizationNames {
        &self.org_names
    }

    /// Skipped ISSNs with their reason, in processing order.
    #[must_use]
    pub fn skipped(&self) -> &[(String, SkipReason)] {
        &self.skipped
    }

    /// Write the CSV report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        info!("Writing results to file {}.", path.display());
        csv::write_records(BufWriter::new(File::create(path)?), &self.records)
    }

    /// Write the archive organization list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_organization_list(&self, path: &Path, started_at: &str) -> Result<()> {
        csv::write_organization_list(
            BufWriter::new(File::create(path)?),
            &self.org_names,
            started_at,
        )
    }
}

/// Drives the query loop over a list of ISSNs.
#[derive(Debug)]
pub struct Runner<F: Fetcher> {
    fetcher: F,
    delay: Duration,
    progress: Option<ProgressLog>,
    archive: Option<RecordArchive>,
}

impl<F: Fetcher> Runner<F> {
    /// Create a runner without pacing or side outputs.
    pub fn new(fetcher: F) -> Self {
        Runner {
            fetcher,
            delay: Duration::ZERO,
            progress: None,
            archive: None,
        }
    }

    /// Pause for `delay` after each ISSN.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Append finished ISSNs to a progress log.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressLog) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Save raw responses to a record archive.
    #[must_use]
    pub fn with_archive(mut self, archive: RecordArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// The fetcher in use.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Process all ISSNs in order.
    ///
    /// # Errors
    ///
    /// Returns [`KeepersError::Blocked`] as soon as the portal blocks access,
    /// leaving the remaining ISSNs unprocessed. Also fails if the progress log
    /// or record archive cannot be written.
    pub fn run(&mut self, issns: &[String], run: &mut QueryRun) -> Result<()> {
        for (position, issn) in issns.iter().enumerate() {
            self.process(issn, run)?;

            if position + 1 < issns.len() && !self.delay.is_zero() {
                debug!("Waiting {:?}...", self.delay);
                thread::sleep(self.delay);
            }
        }

        info!(
            processed = run.records().len(),
            skipped = run.skipped().len(),
            "Query completed."
        );
        Ok(())
    }

    /// Fetch, extract and accumulate a single ISSN.
    ///
    /// # Errors
    ///
    /// See [`Runner::run`].
    pub fn process(&mut self, issn: &str, run: &mut QueryRun) -> Result<()> {
        let span = info_span!("issn", %issn);
        let _entered = span.enter();
        info!("### Working on ISSN {issn}.");

        let reason = match self.fetcher.fetch(issn) {
            Ok(FetchOutcome::Success { document, raw }) => match Document::from_value(&document) {
                Ok(document) => return self.accept(issn, &document, &raw, run),
                Err(_) => SkipReason::MissingGraph,
            },
            Ok(FetchOutcome::Blocked) => {
                error!("Got 403 (forbidden) from ISSN Portal. Stopping query now.");
                return Err(KeepersError::Blocked);
            },
            Ok(FetchOutcome::NotFound) => SkipReason::NotFound,
            Ok(FetchOutcome::MalformedResponse) => SkipReason::MalformedResponse,
            Ok(FetchOutcome::HttpError(status)) => SkipReason::HttpError(status),
            Err(err) => SkipReason::Transport(err.to_string()),
        };

        error!("{reason}");
        info!("Continuing with next ISSN.");
        run.skip(issn, reason);
        Ok(())
    }

    fn accept(&mut self, issn: &str, document: &Document, raw: &str, run: &mut QueryRun) -> Result<()> {
        let extraction = extract(issn, document);
        log_warnings(&extraction.warnings);
        run.accumulate(extraction);

        if let Some(progress) = self.progress.as_mut() {
            progress.record(issn)?;
        }
        if let Some(archive) = &self.archive {
            let path = archive.save(issn, raw)?;
            debug!("Saved JSON record to {}.", path.display());
        }
        Ok(())
    }
}

fn log_warnings(warnings: &[DataQualityWarning]) {
    for warning in warnings {
        if warning.is_informational() {
            info!("{warning}");
        } else {
            warn!("{warning}");
        }
    }
}
