//! Keepers records: one flat, CSV-ready row per queried ISSN.
//!
//! A record is assembled by a [`RecordBuilder`] while the extractor walks the
//! graph. Columns hold either a single value or a list of values collected in
//! encounter order. [`RecordBuilder::finish`] joins every list into a single
//! string and yields an immutable [`KeepersRecord`].
//!
//! Besides the fixed columns (see [`columns`]) every holding archive found
//! in the graph adds three dynamic columns, so the set of columns differs from
//! record to record.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::vocabulary::{columns, NOT_AVAILABLE};

/// Columns joined with `" | "` instead of `", "`.
const BAR_SEPARATED: [&str; 4] = ["description", "temporalCoverage", "mainTitle", "keyTitle"];

/// Columns joined as a sorted, de-duplicated set.
const SET_SEPARATED: &str = "creativeWorkStatus";

/// Value of a column while the record is being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    /// A single value.
    Text(String),
    /// Values in encounter order.
    List(Vec<String>),
}

/// Incrementally built record for one ISSN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBuilder {
    columns: IndexMap<String, ColumnValue>,
}

impl RecordBuilder {
    /// Create a record with every fixed column set to its neutral default.
    #[must_use]
    pub fn new(issn: &str) -> Self {
        let text = |v: &str| ColumnValue::Text(v.to_string());
        let list = || ColumnValue::List(Vec::new());

        let mut columns = IndexMap::new();
        columns.insert(columns::ISSN.to_string(), text(issn));
        columns.insert(columns::ISSN_STATUS.to_string(), text(NOT_AVAILABLE));
        columns.insert(columns::RECORD_STATUS.to_string(), text(NOT_AVAILABLE));
        columns.insert(columns::ISSN_L.to_string(), list());
        columns.insert(columns::ISSN_L_STATUS.to_string(), text(NOT_AVAILABLE));
        columns.insert(columns::CANCELLED_IN_FAVOR_OF.to_string(), list());
        columns.insert(columns::MAIN_TITLE.to_string(), text(NOT_AVAILABLE));
        columns.insert(columns::KEY_TITLE.to_string(), text(NOT_AVAILABLE));
        columns.insert(columns::HOLDING_ARCHIVES.to_string(), list());

        RecordBuilder { columns }
    }

    /// Set a single-valued column.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        self.columns
            .insert(column.to_string(), ColumnValue::Text(value.into()));
    }

    /// Replace a column with a list of values.
    pub fn set_list(&mut self, column: &str, values: Vec<String>) {
        self.columns
            .insert(column.to_string(), ColumnValue::List(values));
    }

    /// Append to a list column, creating it if needed.
    ///
    /// A single-valued column of the same name is replaced by a list.
    pub fn push(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match self.columns.get_mut(column) {
            Some(ColumnValue::List(values)) => values.push(value),
            _ => {
                self.columns
                    .insert(column.to_string(), ColumnValue::List(vec![value]));
            },
        }
    }

    /// Record one archival holding for `archive`.
    ///
    /// The archive's three columns are created on first use and always grow
    /// together, one entry each per call.
    pub fn push_holding(&mut self, archive: &str, status: &str, description: &str, coverage: &str) {
        self.push(columns::HOLDING_ARCHIVES, archive);
        self.push(&columns::archive_status(archive), status);
        self.push(&columns::archive_description(archive), description);
        self.push(&columns::archive_coverage(archive), coverage);
    }

    /// Current value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.columns.get(column)
    }

    /// Current entries of a list column.
    #[must_use]
    pub fn list(&self, column: &str) -> Option<&[String]> {
        match self.columns.get(column) {
            Some(ColumnValue::List(values)) => Some(values),
            _ => None,
        }
    }

    /// Whether any archival holding was mapped into the record.
    ///
    /// Only the holding archives and the per-archive columns count. The fixed
    /// resource columns are filled for nearly every portal record, with or
    /// without Keepers data.
    #[must_use]
    pub fn has_archival_data(&self) -> bool {
        self.list(columns::HOLDING_ARCHIVES)
            .is_some_and(|codes| !codes.is_empty())
            || self.columns.keys().any(|name| !columns::is_fixed(name))
    }

    /// Normalize the record into its final, flat form.
    ///
    /// Holding archives become the sorted set of distinct codes and their
    /// count is stored in [`columns::NUMBER_OF_ARCHIVES`]. Empty values become
    /// `n.a.`; lists are joined according to the column name.
    #[must_use]
    pub fn finish(mut self) -> KeepersRecord {
        let archives: BTreeSet<String> = self
            .list(columns::HOLDING_ARCHIVES)
            .map(|codes| codes.iter().cloned().collect())
            .unwrap_or_default();
        let number_of_archives = archives.len();
        self.columns.insert(
            columns::HOLDING_ARCHIVES.to_string(),
            ColumnValue::List(archives.into_iter().collect()),
        );

        let mut values: IndexMap<String, String> = self
            .columns
            .into_iter()
            .map(|(name, value)| {
                let joined = join_column(&name, value);
                (name, joined)
            })
            .collect();
        values.insert(
            columns::NUMBER_OF_ARCHIVES.to_string(),
            number_of_archives.to_string(),
        );

        KeepersRecord { values }
    }
}

fn join_column(name: &str, value: ColumnValue) -> String {
    match value {
        ColumnValue::Text(text) if text.is_empty() => NOT_AVAILABLE.to_string(),
        ColumnValue::Text(text) => text,
        ColumnValue::List(values) if values.is_empty() => NOT_AVAILABLE.to_string(),
        ColumnValue::List(values) => {
            if BAR_SEPARATED.iter().any(|word| name.contains(word)) {
                values.join(" | ")
            } else if name.contains(SET_SEPARATED) {
                let distinct: BTreeSet<String> = values.into_iter().collect();
                distinct.into_iter().collect::<Vec<_>>().join(", ")
            } else {
                values.join(", ")
            }
        },
    }
}

/// Finalized Keepers data for one ISSN.
///
/// Column order follows insertion order; the CSV writer sorts the union of all
/// column names instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeepersRecord {
    values: IndexMap<String, String>,
}

impl KeepersRecord {
    /// Value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Value of a column, or `n.a.` if the record lacks it.
    #[must_use]
    pub fn get_or_na(&self, column: &str) -> &str {
        self.get(column).unwrap_or(NOT_AVAILABLE)
    }

    /// The queried ISSN.
    #[must_use]
    pub fn issn(&self) -> &str {
        self.get_or_na(columns::ISSN)
    }

    /// Distinct holding archive codes, sorted.
    #[must_use]
    pub fn holding_archives(&self) -> Vec<&str> {
        match self.get(columns::HOLDING_ARCHIVES) {
            None | Some(NOT_AVAILABLE) => Vec::new(),
            Some(joined) => joined.split(", ").collect(),
        }
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no columns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
