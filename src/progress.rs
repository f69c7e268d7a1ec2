//! Incremental side outputs of a run.
//!
//! The progress log lists every ISSN whose record made it into the results.
//! It is flushed after each line so an interrupted run still leaves a usable
//! exclusion list behind. The record archive keeps the raw portal responses.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Append-only list of finished ISSNs.
#[derive(Debug)]
pub struct ProgressLog {
    file: File,
    path: PathBuf,
}

impl ProgressLog {
    /// Open (or create) the progress file for appending.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(ProgressLog { file, path })
    }

    /// Append one finished ISSN and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be written.
    pub fn record(&mut self, issn: &str) -> Result<()> {
        writeln!(self.file, "{issn}")?;
        self.file.flush()?;
        Ok(())
    }

    /// Location of the progress file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Directory of raw JSON responses, one file per ISSN.
#[derive(Debug, Clone)]
pub struct RecordArchive {
    dir: PathBuf,
}

impl RecordArchive {
    /// Create the archive directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(RecordArchive { dir })
    }

    /// Save the raw response of an ISSN as `<issn>.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, issn: &str, raw: &str) -> Result<PathBuf> {
        let path = self.dir.join(format!("{issn}.json"));
        fs::write(&path, raw)?;
        Ok(path)
    }

    /// Location of the archive directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
