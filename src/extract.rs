//! Mapping of a portal graph onto a flat Keepers record.
//!
//! The portal document is a flat list of nodes (see [`Document`]). One pass
//! over that list collects:
//!
//! - **Archive components**: one archival holding per node, keyed by the
//!   holding archive code. Each adds an entry to the archive's
//!   `creativeWorkStatus`, `description` and `temporalCoverage` columns.
//! - **Archive organizations**: the full names behind the archive codes, used
//!   for the organization list and to cross-check the components.
//! - **Resource nodes** of the queried ISSN: ISSN status, record status,
//!   ISSN-L, main title and key title.
//! - **Cancellations**: ISSNs a cancelled ISSN was replaced by.
//!
//! Extraction never fails. Missing or oddly shaped data degrades to `n.a.`
//! and a [`DataQualityWarning`] in the returned [`Extraction`]; logging those
//! is left to the caller.
//!
//! # Examples
//!
//! ```
//! use keepers_query::{extract, Document};
//!
//! let doc = Document::from_json_str(r#"{"@graph": [
//!     {"@type": "http://schema.org/ArchiveComponent",
//!      "holdingArchive": "http://issn.org/organization/keepers#CLOCKSS",
//!      "creativeWorkStatus": "Preserved",
//!      "temporalCoverage": "2010-2020"},
//!     {"@type": "http://schema.org/ArchiveOrganization",
//!      "identifier": "CLOCKSS", "name": "CLOCKSS Archive"}
//! ]}"#)?;
//!
//! let extraction = extract("0378-5955", &doc);
//! assert_eq!(extraction.record.get("10 Holding Archives"), Some("CLOCKSS"));
//! assert_eq!(
//!     extraction.record.get("CLOCKSS temporalCoverage"),
//!     Some("Preserved : 2010-2020")
//! );
//! # Ok::<(), keepers_query::KeepersError>(())
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::graph::{Document, FieldValue, Node, NodeType};
use crate::org_names::OrganizationNames;
use crate::record::{KeepersRecord, RecordBuilder};
use crate::vocabulary::{columns, fragment, last_segment, properties, resources, NOT_AVAILABLE};

/// Graphs with this many nodes or fewer are suspiciously small.
pub const SMALL_GRAPH_NODES: usize = 5;

/// Placeholder code for an organization node without any identifier field.
pub const MISSING_ORGANIZATION: &str = "MISSING";

/// Placeholder for an organization node without a name.
pub const NO_ORGANIZATION_NAME: &str = "no org name found";

/// Record lifecycle states worth a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// ISSN not yet assigned or reported.
    Unreported,
    /// The periodical was never published.
    Suppressed,
    /// Bibliographic information is likely missing.
    Legacy,
    /// The ISSN was cancelled.
    Cancelled,
}

impl RecordStatus {
    /// Recognize a notable record status, ignoring case.
    #[must_use]
    pub fn from_status(status: &str) -> Option<Self> {
        match status.to_lowercase().as_str() {
            "unreported" => Some(Self::Unreported),
            "suppressed" => Some(Self::Suppressed),
            "legacy" => Some(Self::Legacy),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreported => write!(f, "\"unreported\": Not yet assigned or reported"),
            Self::Suppressed => write!(f, "\"suppressed\": Periodical was not published"),
            Self::Legacy => write!(f, "\"legacy\": Bibliographic information likely missing"),
            Self::Cancelled => write!(f, "\"cancelled\": This ISSN was cancelled"),
        }
    }
}

/// A non-fatal sign that a portal record is incomplete or inconsistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataQualityWarning {
    /// The graph has very few nodes.
    SmallGraph {
        /// Number of nodes found.
        nodes: usize,
    },
    /// An organization node has no identifier field.
    OrganizationWithoutIdentifier,
    /// An organization identifier field is neither a string nor a list of strings.
    UnexpectedIdentifierShape {
        /// Name of the offending field.
        field: String,
    },
    /// An archive component node lacks `holdingArchive` and was skipped.
    MissingHoldingArchive,
    /// An archive component node lacks `creativeWorkStatus`.
    MissingCreativeWorkStatus {
        /// Archive the component belongs to.
        archive: String,
    },
    /// The record is in a notable lifecycle state.
    RecordStatus(RecordStatus),
    /// The record lists an ISSN reported as incorrect. Informational.
    IncorrectIssnReported {
        /// The incorrect ISSN as reported.
        incorrect: String,
    },
    /// The queried ISSN is itself the one reported as incorrect.
    QueriedIssnIsIncorrect,
    /// The ISSN was cancelled in favor of another one.
    CancelledInFavorOf {
        /// Replacement ISSN.
        issn: String,
    },
    /// A component field is neither a string nor a list of strings. The
    /// string parts, if any, are kept.
    UnexpectedFieldShape {
        /// Name of the offending field.
        field: String,
    },
    /// `cancelledInFavorOf` is neither a string nor a list of strings.
    UnexpectedCancelledInFavorOfShape,
    /// Archive components and archive organizations name different archives.
    OrganizationMismatch {
        /// Codes seen in archive component nodes.
        components: BTreeSet<String>,
        /// Codes seen in archive organization nodes.
        organizations: BTreeSet<String>,
    },
    /// The document mentions "keepers" but nothing was mapped.
    UnmappedKeepersMention,
}

impl DataQualityWarning {
    /// Whether the condition is worth noting but not a warning.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::IncorrectIssnReported { .. })
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallGraph { nodes } => write!(
                f,
                "Only {nodes} nodes in the record. The data is likely incomplete or invalid."
            ),
            Self::OrganizationWithoutIdentifier => {
                write!(f, "Found \"ArchiveOrganization\" node without identifier.")
            },
            Self::UnexpectedIdentifierShape { field } => {
                write!(f, "Unexpected data type in organization field \"{field}\".")
            },
            Self::MissingHoldingArchive => write!(
                f,
                "Detected missing \"holdingArchive\" information in node. Skipping incomplete node."
            ),
            Self::MissingCreativeWorkStatus { archive } => write!(
                f,
                "Missing \"creativeWorkStatus\" in archive component of {archive}."
            ),
            Self::RecordStatus(status) => write!(f, "ISSN record status is {status}."),
            Self::IncorrectIssnReported { incorrect } => {
                write!(f, "Record reports incorrect ISSN: {incorrect}.")
            },
            Self::QueriedIssnIsIncorrect => write!(f, "Used ISSN equals reported incorrect ISSN."),
            Self::CancelledInFavorOf { issn } => {
                write!(f, "This ISSN has been cancelled in favor of {issn}.")
            },
            Self::UnexpectedFieldShape { field } => {
                write!(f, "Unexpected data type in archive component field \"{field}\".")
            },
            Self::UnexpectedCancelledInFavorOfShape => {
                write!(f, "Unexpected data type in field \"cancelledInFavorOf\".")
            },
            Self::OrganizationMismatch {
                components,
                organizations,
            } => write!(
                f,
                "Organizations in \"ArchiveComponent\" ({}) do not match those in \
                 \"ArchiveOrganization\" ({}). This indicates incomplete data in the JSON record.",
                join_set(components),
                join_set(organizations)
            ),
            Self::UnmappedKeepersMention => write!(
                f,
                "Found string \"keepers\" in JSON data, but no Keepers data was mapped."
            ),
        }
    }
}

fn join_set(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Result of extracting one portal document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The flattened record.
    pub record: KeepersRecord,
    /// Organization names seen in this document.
    pub org_names: OrganizationNames,
    /// Data-quality conditions in the order they were detected.
    pub warnings: Vec<DataQualityWarning>,
}

/// Extract the Keepers data of `issn` from a portal document.
#[must_use]
pub fn extract(issn: &str, document: &Document) -> Extraction {
    let mut extractor = Extractor::new(issn);
    extractor.walk(document);
    extractor.finish(document)
}

/// `@id`s of the queried ISSN's resource nodes.
struct ResourceIds {
    serial: String,
    issn: String,
    issn_l: String,
    record: String,
    key_title: String,
}

impl ResourceIds {
    fn new(issn: &str) -> Self {
        ResourceIds {
            serial: resources::serial(issn),
            issn: resources::issn(issn),
            issn_l: resources::issn_l(issn),
            record: resources::record(issn),
            key_title: resources::key_title(issn),
        }
    }
}

struct Extractor {
    issn: String,
    ids: ResourceIds,
    builder: RecordBuilder,
    from_components: BTreeSet<String>,
    from_organizations: BTreeSet<String>,
    org_names: OrganizationNames,
    warnings: Vec<DataQualityWarning>,
}

impl Extractor {
    fn new(issn: &str) -> Self {
        Extractor {
            issn: issn.to_string(),
            ids: ResourceIds::new(issn),
            builder: RecordBuilder::new(issn),
            from_components: BTreeSet::new(),
            from_organizations: BTreeSet::new(),
            org_names: OrganizationNames::new(),
            warnings: Vec::new(),
        }
    }

    fn walk(&mut self, document: &Document) {
        if document.len() <= SMALL_GRAPH_NODES {
            self.warnings.push(DataQualityWarning::SmallGraph {
                nodes: document.len(),
            });
        }

        for node in document.nodes() {
            match node.node_type() {
                NodeType::ArchiveOrganization => self.visit_organization(node),
                NodeType::ArchiveComponent => self.visit_component(node),
                NodeType::Untyped => {},
            }
            self.visit_resource(node);
            self.visit_cancellation(node);
        }
    }

    fn visit_organization(&mut self, node: &Node) {
        let name = node.str_or(properties::NAME, NO_ORGANIZATION_NAME);
        let mut has_identifier = false;

        for (key, _) in node.fields() {
            if !key.contains(properties::IDENTIFIER_FRAGMENT) {
                continue;
            }
            has_identifier = true;

            let identifiers = match node.field_value(key) {
                Some(FieldValue::Text(id)) => vec![id],
                Some(FieldValue::List(ids, false)) => ids,
                _ => {
                    self.warnings
                        .push(DataQualityWarning::UnexpectedIdentifierShape {
                            field: key.to_string(),
                        });
                    continue;
                },
            };

            for id in identifiers {
                let code = fragment(id);
                self.from_organizations.insert(code.to_string());
                self.org_names.add(code, name);
            }
        }

        if !has_identifier {
            self.from_organizations
                .insert(MISSING_ORGANIZATION.to_string());
            self.warnings
                .push(DataQualityWarning::OrganizationWithoutIdentifier);
        }
    }

    fn visit_component(&mut self, node: &Node) {
        let Some(holding_archive) = node.str_field(properties::HOLDING_ARCHIVE) else {
            self.warnings.push(DataQualityWarning::MissingHoldingArchive);
            return;
        };
        let archive = fragment(holding_archive);
        self.from_components.insert(archive.to_string());

        let status = node
            .str_field(properties::CREATIVE_WORK_STATUS)
            .unwrap_or_else(|| {
                self.warnings
                    .push(DataQualityWarning::MissingCreativeWorkStatus {
                        archive: archive.to_string(),
                    });
                NOT_AVAILABLE
            });

        let description =
            prefix_status(status, &self.component_text(node, properties::DESCRIPTION));
        let coverage = format!(
            "{status} : {}",
            self.component_text(node, properties::TEMPORAL_COVERAGE)
        );

        self.builder
            .push_holding(archive, status, &description, &coverage);
    }

    /// Text of a free-form component field; list members are joined with
    /// `" | "`, absent or unusable values become `n.a.`.
    fn component_text(&mut self, node: &Node, field: &str) -> String {
        let (text, well_formed) = match node.field_value(field) {
            None => (NOT_AVAILABLE.to_string(), true),
            Some(FieldValue::Text(text)) => (text.to_string(), true),
            Some(FieldValue::List(parts, mixed)) if parts.is_empty() => {
                (NOT_AVAILABLE.to_string(), !mixed)
            },
            Some(FieldValue::List(parts, mixed)) => (parts.join(" | "), !mixed),
            Some(FieldValue::Unexpected) => (NOT_AVAILABLE.to_string(), false),
        };
        if !well_formed {
            self.warnings.push(DataQualityWarning::UnexpectedFieldShape {
                field: field.to_string(),
            });
        }
        text
    }

    fn visit_resource(&mut self, node: &Node) {
        let Some(id) = node.id() else {
            return;
        };

        if id == self.ids.issn {
            self.builder
                .set(columns::ISSN_STATUS, status_fragment(node));
        } else if id == self.ids.issn_l {
            match node.field_value(properties::VALUE) {
                Some(FieldValue::Text(value)) => self.builder.push(columns::ISSN_L, value),
                Some(FieldValue::List(values, _)) => {
                    for value in values {
                        self.builder.push(columns::ISSN_L, value);
                    }
                },
                _ => self.builder.push(columns::ISSN_L, NOT_AVAILABLE),
            }
            self.builder
                .set(columns::ISSN_L_STATUS, status_fragment(node));
        } else if id == self.ids.record {
            let status = status_fragment(node);
            if let Some(notable) = RecordStatus::from_status(status) {
                self.warnings.push(DataQualityWarning::RecordStatus(notable));
            }
            self.builder.set(columns::RECORD_STATUS, status);
        } else if id == self.ids.serial {
            self.set_title(columns::MAIN_TITLE, node, properties::MAIN_TITLE);
            if let Some(incorrect) = node.get(properties::HAS_INCORRECT_ISSN) {
                self.visit_incorrect_issn(incorrect);
            }
        } else if id == self.ids.key_title {
            self.set_title(columns::KEY_TITLE, node, properties::VALUE);
        }
    }

    fn visit_incorrect_issn(&mut self, incorrect: &serde_json::Value) {
        let (shown, matches_queried) = match incorrect {
            serde_json::Value::String(s) => (s.clone(), *s == self.issn),
            serde_json::Value::Array(items) => (
                incorrect.to_string(),
                items.iter().any(|item| item.as_str() == Some(self.issn.as_str())),
            ),
            other => (other.to_string(), false),
        };

        self.warnings
            .push(DataQualityWarning::IncorrectIssnReported { incorrect: shown });
        // Incorrect ISSNs are not expected to have a record of their own.
        if matches_queried {
            self.warnings.push(DataQualityWarning::QueriedIssnIsIncorrect);
        }
    }

    fn set_title(&mut self, column: &str, node: &Node, field: &str) {
        match node.field_value(field) {
            Some(FieldValue::Text(title)) => self.builder.set(column, title),
            Some(FieldValue::List(titles, _)) => self
                .builder
                .set_list(column, titles.into_iter().map(str::to_string).collect()),
            _ => self.builder.set(column, NOT_AVAILABLE),
        }
    }

    fn visit_cancellation(&mut self, node: &Node) {
        let links = match node.field_value(properties::CANCELLED_IN_FAVOR_OF) {
            None => return,
            Some(FieldValue::Text(link)) => vec![link],
            Some(FieldValue::List(links, mixed)) => {
                if mixed {
                    self.warnings
                        .push(DataQualityWarning::UnexpectedCancelledInFavorOfShape);
                }
                links
            },
            Some(FieldValue::Unexpected) => {
                self.warnings
                    .push(DataQualityWarning::UnexpectedCancelledInFavorOfShape);
                return;
            },
        };

        for link in links {
            let replacement = last_segment(link);
            self.warnings.push(DataQualityWarning::CancelledInFavorOf {
                issn: replacement.to_string(),
            });
            self.builder
                .push(columns::CANCELLED_IN_FAVOR_OF, replacement);
        }
    }

    fn finish(mut self, document: &Document) -> Extraction {
        if !self.builder.has_archival_data() && document.mentions_keepers() {
            self.warnings.push(DataQualityWarning::UnmappedKeepersMention);
        }

        if self.from_components != self.from_organizations {
            self.warnings.push(DataQualityWarning::OrganizationMismatch {
                components: self.from_components,
                organizations: self.from_organizations,
            });
        }

        Extraction {
            record: self.builder.finish(),
            org_names: self.org_names,
            warnings: self.warnings,
        }
    }
}

/// Text after the last `#` of the node's `status`, or `n.a.`.
fn status_fragment(node: &Node) -> &str {
    fragment(node.str_or(properties::STATUS, NOT_AVAILABLE))
}

/// Prefix `description` with `"<status> : "` unless it already starts with the
/// status, ignoring case.
#[must_use]
pub fn prefix_status(status: &str, description: &str) -> String {
    if description.to_lowercase().starts_with(&status.to_lowercase()) {
        description.to_string()
    } else {
        format!("{status} : {description}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ISSN: &str = "0378-5955";

    fn doc(nodes: serde_json::Value) -> Document {
        Document::from_value(&json!({ "@graph": nodes })).unwrap()
    }

    fn component(archive: &str, status: &str, description: &str, coverage: &str) -> serde_json::Value {
        json!({
            "@type": "http://schema.org/ArchiveComponent",
            "holdingArchive": format!("http://issn.org/organization/keepers#{archive}"),
            "creativeWorkStatus": status,
            "description": description,
            "temporalCoverage": coverage,
        })
    }

    fn organization(code: &str, name: &str) -> serde_json::Value {
        json!({
            "@type": "http://schema.org/ArchiveOrganization",
            "identifier": code,
            "name": name,
        })
    }

    #[test]
    fn test_entries_before_joining_follow_encounter_order() {
        let document = doc(json!([
            component("PORTICO", "Preserved", "first", "1990"),
            component("LOCKSS", "Preserved", "other", "2000"),
            component("PORTICO", "In Progress", "second", "1991"),
            component("PORTICO", "Preserved", "third", "1992"),
        ]));

        let mut extractor = Extractor::new(ISSN);
        extractor.walk(&document);

        let statuses = extractor.builder.list("PORTICO creativeWorkStatus").unwrap();
        let descriptions = extractor.builder.list("PORTICO description").unwrap();
        let coverages = extractor.builder.list("PORTICO temporalCoverage").unwrap();

        assert_eq!(statuses, ["Preserved", "In Progress", "Preserved"]);
        assert_eq!(
            descriptions,
            [
                "Preserved : first",
                "In Progress : second",
                "Preserved : third"
            ]
        );
        assert_eq!(coverages.len(), 3);
        assert_eq!(coverages[1], "In Progress : 1991");
    }

    #[test]
    fn test_structured_component_fields() {
        let document = doc(json!([
            {"@type": "http://schema.org/ArchiveComponent",
             "holdingArchive": "keepers#PORTICO",
             "creativeWorkStatus": "Preserved",
             "description": {"@value": "Volumes 1-10"},
             "temporalCoverage": ["1990-2000", "2005-2010"]},
            organization("PORTICO", "Portico"),
        ]));

        let extraction = extract(ISSN, &document);
        assert_eq!(
            extraction.record.get("PORTICO description"),
            Some("Preserved : Volumes 1-10")
        );
        assert_eq!(
            extraction.record.get("PORTICO temporalCoverage"),
            Some("Preserved : 1990-2000 | 2005-2010")
        );
        assert!(!extraction
            .warnings
            .iter()
            .any(|w| matches!(w, DataQualityWarning::UnexpectedFieldShape { .. })));
    }

    #[test]
    fn test_unusable_component_fields_are_reported() {
        let document = doc(json!([
            {"@type": "http://schema.org/ArchiveComponent",
             "holdingArchive": "keepers#PORTICO",
             "creativeWorkStatus": "Preserved",
             "description": {"@id": "_:b0"},
             "temporalCoverage": ["1990-2000", 2005]},
            organization("PORTICO", "Portico"),
        ]));

        let extraction = extract(ISSN, &document);
        assert_eq!(
            extraction.record.get("PORTICO description"),
            Some("Preserved : n.a.")
        );
        assert_eq!(
            extraction.record.get("PORTICO temporalCoverage"),
            Some("Preserved : 1990-2000")
        );
        for field in ["description", "temporalCoverage"] {
            assert!(extraction
                .warnings
                .contains(&DataQualityWarning::UnexpectedFieldShape {
                    field: field.to_string()
                }));
        }
    }

    #[test]
    fn test_prefix_status() {
        assert_eq!(prefix_status("Preserved", "preserved in full"), "preserved in full");
        assert_eq!(prefix_status("Preserved", "Complete"), "Preserved : Complete");
        assert_eq!(prefix_status("n.a.", "n.a."), "n.a.");
    }

    #[test]
    fn test_missing_holding_archive_skips_node() {
        let document = doc(json!([
            {"@type": "http://schema.org/ArchiveComponent",
             "creativeWorkStatus": "Preserved",
             "description": "Volumes 1-10"}
        ]));

        let extraction = extract(ISSN, &document);
        assert_eq!(extraction.record.get(columns::NUMBER_OF_ARCHIVES), Some("0"));
        assert!(extraction
            .warnings
            .contains(&DataQualityWarning::MissingHoldingArchive));
        assert_eq!(extraction.record.len(), 10);
    }

    #[test]
    fn test_missing_status_degrades_to_not_available() {
        let document = doc(json!([
            {"@type": "http://schema.org/ArchiveComponent",
             "holdingArchive": "keepers#HATHI",
             "temporalCoverage": "1950-1960"},
            organization("HATHI", "HathiTrust"),
        ]));

        let extraction = extract(ISSN, &document);
        assert_eq!(extraction.record.get("HATHI creativeWorkStatus"), Some("n.a."));
        assert_eq!(extraction.record.get("HATHI description"), Some("n.a."));
        assert_eq!(
            extraction.record.get("HATHI temporalCoverage"),
            Some("n.a. : 1950-1960")
        );
        assert!(extraction
            .warnings
            .contains(&DataQualityWarning::MissingCreativeWorkStatus {
                archive: "HATHI".to_string()
            }));
    }

    #[test]
    fn test_organization_without_identifier() {
        let document = doc(json!([
            {"@type": "http://schema.org/ArchiveOrganization", "name": "Nameless"}
        ]));

        let extraction = extract(ISSN, &document);
        assert!(extraction.org_names.is_empty());
        assert!(extraction
            .warnings
            .contains(&DataQualityWarning::OrganizationWithoutIdentifier));
        assert!(extraction.warnings.iter().any(|w| matches!(
            w,
            DataQualityWarning::OrganizationMismatch { organizations, .. }
                if organizations.contains(MISSING_ORGANIZATION)
        )));
    }

    #[test]
    fn test_loose_identifier_key_match_and_name_fallback() {
        let document = doc(json!([
            {"@type": "http://schema.org/ArchiveOrganization",
             "http://schema.org/identifier": "http://issn.org/organization/keepers#EPRESERVE"}
        ]));

        let extraction = extract(ISSN, &document);
        let names = extraction.org_names.get("EPRESERVE").unwrap();
        assert!(names.contains(NO_ORGANIZATION_NAME));
    }

    #[test]
    fn test_resource_nodes() {
        let document = doc(json!([
            {"@id": "resource/ISSN/0378-5955#ISSN",
             "status": "http://issn.org/vocabularies/IdentifierStatus#Valid"},
            {"@id": "resource/ISSN/0378-5955#ISSN-L",
             "value": "0378-5955",
             "status": "http://issn.org/vocabularies/IdentifierStatus#Valid"},
            {"@id": "resource/ISSN/0378-5955#Record",
             "status": "http://issn.org/vocabularies/RecordStatus#Register"},
            {"@id": "resource/ISSN/0378-5955",
             "mainTitle": ["Hearing research", "Hearing research (Online)"]},
            {"@id": "resource/ISSN/0378-5955#KeyTitle", "value": "Hearing research"},
            {"@id": "resource/ISSN/9999-9999#KeyTitle", "value": "Someone else"},
        ]));

        let record = extract(ISSN, &document).record;
        assert_eq!(record.get(columns::ISSN_STATUS), Some("Valid"));
        assert_eq!(record.get(columns::ISSN_L), Some("0378-5955"));
        assert_eq!(record.get(columns::ISSN_L_STATUS), Some("Valid"));
        assert_eq!(record.get(columns::RECORD_STATUS), Some("Register"));
        assert_eq!(
            record.get(columns::MAIN_TITLE),
            Some("Hearing research | Hearing research (Online)")
        );
        assert_eq!(record.get(columns::KEY_TITLE), Some("Hearing research"));
    }

    #[test]
    fn test_notable_record_status_and_incorrect_issn() {
        let document = doc(json!([
            {"@id": "resource/ISSN/0378-5955#Record",
             "status": "http://issn.org/vocabularies/RecordStatus#Legacy"},
            {"@id": "resource/ISSN/0378-5955", "mainTitle": "X", "hasIncorrectISSN": "0378-5955"},
        ]));

        let warnings = extract(ISSN, &document).warnings;
        assert!(warnings.contains(&DataQualityWarning::RecordStatus(RecordStatus::Legacy)));
        assert!(warnings.contains(&DataQualityWarning::QueriedIssnIsIncorrect));
        assert!(warnings
            .iter()
            .any(DataQualityWarning::is_informational));
    }

    #[test]
    fn test_cancelled_in_favor_of_shapes() {
        let single = doc(json!([{"cancelledInFavorOf": "resource/ISSN/1111-1111"}]));
        let record = extract(ISSN, &single).record;
        assert_eq!(record.get(columns::CANCELLED_IN_FAVOR_OF), Some("1111-1111"));

        let list = doc(json!([{"cancelledInFavorOf": [
            "resource/ISSN/1111-1111", "resource/ISSN/2222-2222"
        ]}]));
        let record = extract(ISSN, &list).record;
        assert_eq!(
            record.get(columns::CANCELLED_IN_FAVOR_OF),
            Some("1111-1111, 2222-2222")
        );

        let odd = doc(json!([{"cancelledInFavorOf": {"@id": "resource/ISSN/1111-1111"}}]));
        let extraction = extract(ISSN, &odd);
        assert_eq!(
            extraction.record.get(columns::CANCELLED_IN_FAVOR_OF),
            Some("n.a.")
        );
        let shape_warnings = extraction
            .warnings
            .iter()
            .filter(|w| **w == DataQualityWarning::UnexpectedCancelledInFavorOfShape)
            .count();
        assert_eq!(shape_warnings, 1);
    }

    #[test]
    fn test_unmapped_keepers_mention() {
        let document = doc(json!([
            {"@id": "http://issn.org/organization/keepers", "@type": "http://schema.org/Thing"}
        ]));
        let warnings = extract(ISSN, &document).warnings;
        assert!(warnings.contains(&DataQualityWarning::UnmappedKeepersMention));
        assert!(warnings.contains(&DataQualityWarning::SmallGraph { nodes: 1 }));
    }

    #[test]
    fn test_keepers_mention_with_resource_data_only() {
        let document = doc(json!([
            {"@id": "resource/ISSN/0378-5955#ISSN",
             "status": "http://issn.org/vocabularies/IdentifierStatus#Valid"},
            {"@id": "resource/ISSN/0378-5955#Record",
             "status": "http://issn.org/vocabularies/RecordStatus#Register",
             "note": "keepers data moved"},
        ]));

        let extraction = extract(ISSN, &document);
        assert_eq!(extraction.record.get(columns::ISSN_STATUS), Some("Valid"));
        assert_eq!(extraction.record.get(columns::NUMBER_OF_ARCHIVES), Some("0"));
        assert!(extraction
            .warnings
            .contains(&DataQualityWarning::UnmappedKeepersMention));
    }

    #[test]
    fn test_mapped_holdings_silence_keepers_mention() {
        let document = doc(json!([
            component("CLOCKSS", "Preserved", "Closed", "2010-2020"),
            organization("http://issn.org/organization/keepers#CLOCKSS", "CLOCKSS"),
        ]));
        let warnings = extract(ISSN, &document).warnings;
        assert!(!warnings.contains(&DataQualityWarning::UnmappedKeepersMention));
    }

    #[test]
    fn test_matching_organizations_do_not_warn() {
        let document = doc(json!([
            component("CLOCKSS", "Preserved", "Closed", "2010-2020"),
            organization("http://issn.org/organization/keepers#CLOCKSS", "CLOCKSS"),
        ]));
        let warnings = extract(ISSN, &document).warnings;
        assert!(!warnings
            .iter()
            .any(|w| matches!(w, DataQualityWarning::OrganizationMismatch { .. })));
    }
}
