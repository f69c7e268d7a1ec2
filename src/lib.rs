#![warn(missing_docs)]

//! # Keepers Query
//!
//! Retrieves the Keepers archival status of serials from the ISSN Portal and
//! flattens it into one CSV row per ISSN.
//!
//! ## Quick Start
//!
//! ### Extracting a Portal Record
//!
//! ```
//! use keepers_query::{extract, Document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = Document::from_json_str(r#"{"@graph": [
//!     {"@id": "resource/ISSN/0378-5955#KeyTitle", "value": "Hearing research"}
//! ]}"#)?;
//!
//! let extraction = extract("0378-5955", &doc);
//! assert_eq!(extraction.record.get("08 keyTitle"), Some("Hearing research"));
//! assert_eq!(extraction.record.get("09 Number of Archives"), Some("0"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Running a Query
//!
//! ```ignore
//! use keepers_query::{PortalClient, QueryConfig, QueryRun, Runner};
//!
//! let config = QueryConfig::new();
//! let mut runner = Runner::new(PortalClient::new(&config)?).with_delay(config.delay);
//! let mut run = QueryRun::new();
//! runner.run(&["0378-5955".to_string()], &mut run)?;
//! run.write_csv(&config.results_csv())?;
//! ```
//!
//! ## Modules
//!
//! - [`fetch`] — Portal requests with retry and response classification
//! - [`graph`] — The JSON-LD document as a flat node list
//! - [`extract`] — Mapping of a graph onto a Keepers record
//! - [`record`] — Keepers records with fixed and per-archive columns
//! - [`org_names`] — Archive organization names
//! - [`run`] — The per-ISSN loop and run-wide accumulation
//! - [`csv`] — CSV report and organization list output
//! - [`input`] — ISSN and exclusion lists
//! - [`progress`] — Progress log and raw record archive
//! - [`issn`] — ISSN normalization and validation
//! - [`vocabulary`] — Portal vocabulary and column names
//! - [`config`] — Run configuration
//! - [`logging`] — Log setup for the command line tool
//! - [`error`] — Error types and result type

pub mod config;
pub mod csv;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod graph;
pub mod input;
pub mod issn;
pub mod logging;
pub mod org_names;
pub mod progress;
pub mod record;
pub mod run;
pub mod vocabulary;

pub use config::{QueryConfig, RetryPolicy};
pub use error::{KeepersError, Result};
pub use extract::{extract, DataQualityWarning, Extraction, RecordStatus};
pub use fetch::{FetchOutcome, Fetcher, PortalClient};
pub use graph::{Document, Node, NodeType};
pub use issn::IssnValidator;
pub use org_names::OrganizationNames;
pub use progress::{ProgressLog, RecordArchive};
pub use record::{KeepersRecord, RecordBuilder};
pub use run::{QueryRun, Runner, SkipReason};
