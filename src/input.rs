//! Reading the ISSN list and the exclusion list.
//!
//! Both are plain text files with one ISSN per line. The exclusion list is
//! typically the progress file of an earlier, interrupted run.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::issn::IssnValidator;

/// Parse newline-delimited ISSNs, normalizing each and skipping blank lines.
///
/// # Examples
///
/// ```
/// use keepers_query::input::parse_issn_list;
///
/// let issns = parse_issn_list("0378-5955\n2434-561x\r\n\n");
/// assert_eq!(issns, vec!["0378-5955", "2434-561X"]);
/// ```
#[must_use]
pub fn parse_issn_list(text: &str) -> Vec<String> {
    text.lines()
        .map(IssnValidator::normalize)
        .filter(|issn| !issn.is_empty())
        .collect()
}

/// Read an ISSN list file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_issn_list(path: &Path) -> Result<Vec<String>> {
    Ok(parse_issn_list(&fs::read_to_string(path)?))
}

/// Remove every occurrence of every excluded ISSN, keeping the order of the rest.
///
/// ```
/// use keepers_query::input::remove_excluded;
///
/// let issns = vec!["A".to_string(), "B".to_string(), "A".to_string()];
/// assert_eq!(remove_excluded(issns, &["A".to_string()]), vec!["B"]);
/// ```
#[must_use]
pub fn remove_excluded(issns: Vec<String>, excluded: &[String]) -> Vec<String> {
    let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
    issns
        .into_iter()
        .filter(|issn| !excluded.contains(issn.as_str()))
        .collect()
}

/// ISSNs failing the shape or check digit test, in list order.
#[must_use]
pub fn invalid_issns(issns: &[String]) -> Vec<&str> {
    issns
        .iter()
        .map(String::as_str)
        .filter(|issn| !IssnValidator::validate(issn))
        .collect()
}
