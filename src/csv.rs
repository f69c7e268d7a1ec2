//! CSV report and organization list output.
//!
//! Records do not share a fixed schema: each holding archive contributes its
//! own columns. The header is therefore computed only once all records exist,
//! as the sorted union of their column names. Cells a record lacks are
//! written as `n.a.`.
//!
//! # API Patterns
//!
//! - **Header**: [`header`] - Sorted union of all column names
//! - **Writer**: [`write_records`] - Writes records to any `io::Write`
//! - **String**: [`records_to_csv`] - Convenience wrapper returning a `String`
//! - **Organizations**: [`write_organization_list`] - The archive name list
//!
//! # Examples
//!
//! ```
//! use keepers_query::{csv, extract, Document};
//!
//! let doc = Document::from_json_str(r#"{"@graph": []}"#)?;
//! let record = extract("0378-5955", &doc).record;
//!
//! let csv = csv::records_to_csv(&[record])?;
//! assert!(csv.starts_with("01 ISSN,02 ISSN Status"));
//! # Ok::<(), keepers_query::KeepersError>(())
//! ```

use std::collections::BTreeSet;
use std::io::Write;

use crate::error::Result;
use crate::org_names::OrganizationNames;
use crate::record::KeepersRecord;

/// Width the organization codes are padded to in the organization list.
pub const ORGANIZATION_CODE_WIDTH: usize = 20;

/// Sorted union of the column names of all records.
#[must_use]
pub fn header(records: &[KeepersRecord]) -> Vec<String> {
    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(KeepersRecord::column_names)
        .collect();
    columns.into_iter().map(str::to_string).collect()
}

/// Write records as CSV, one row per record in the given order.
///
/// Nothing is written for an empty slice.
///
/// # Errors
///
/// Returns an error if the CSV cannot be written.
pub fn write_records<W: Write>(writer: W, records: &[KeepersRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let header = header(records);
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|column| record.get_or_na(column)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Convert records to a CSV string.
///
/// # Errors
///
/// Returns an error if the CSV cannot be written.
pub fn records_to_csv(records: &[KeepersRecord]) -> Result<String> {
    let mut output = Vec::new();
    write_records(&mut output, records)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Write the list of archive organizations encountered in a run.
///
/// Each code is padded to [`ORGANIZATION_CODE_WIDTH`] and followed by all of
/// its full names joined with `" | "`.
///
/// # Errors
///
/// Returns an error if the list cannot be written.
pub fn write_organization_list<W: Write>(
    mut writer: W,
    names: &OrganizationNames,
    started_at: &str,
) -> Result<()> {
    writeln!(writer, "List of Archive Organizations in Query")?;
    writeln!(writer, "started at {started_at}")?;
    writeln!(writer)?;
    for (code, aliases) in names.iter() {
        let aliases: Vec<&str> = aliases.iter().map(String::as_str).collect();
        writeln!(
            writer,
            "{code:<width$} {}",
            aliases.join(" | "),
            width = ORGANIZATION_CODE_WIDTH
        )?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
