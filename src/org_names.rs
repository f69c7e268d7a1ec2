//! Archive organization names.
//!
//! Holding archives appear in records under a short code (`CLOCKSS`,
//! `PORTICO`, ...). The organization nodes carry the full display name, which
//! may vary between records, so each code maps to the set of all names seen.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Mapping from archive code to the distinct full names observed for it.
///
/// Codes keep first-encounter order; names are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationNames {
    names: IndexMap<String, BTreeSet<String>>,
}

impl OrganizationNames {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as an alias of `code`.
    pub fn add(&mut self, code: &str, name: &str) {
        self.names
            .entry(code.to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Merge another table into this one, uniting the alias sets.
    pub fn merge(&mut self, other: &OrganizationNames) {
        for (code, names) in &other.names {
            self.names
                .entry(code.clone())
                .or_default()
                .extend(names.iter().cloned());
        }
    }

    /// Aliases recorded for a code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&BTreeSet<String>> {
        self.names.get(code)
    }

    /// Codes in first-encounter order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// `(code, aliases)` pairs in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no organization has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
