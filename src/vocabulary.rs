//! ISSN Portal vocabulary and report column names.
//!
//! The portal serves a JSON-LD graph following the "ISSN linked data
//! application profile". Only the handful of node types and properties below
//! are understood; everything else in the graph is ignored.

/// Sentinel for values the record did not provide.
pub const NOT_AVAILABLE: &str = "n.a.";

/// Top-level document field holding the node list.
pub const GRAPH: &str = "@graph";

/// Node type URIs.
pub mod types {
    /// Organization running a preservation archive.
    pub const ARCHIVE_ORGANIZATION: &str = "http://schema.org/ArchiveOrganization";
    /// One archival holding of the serial by one archive.
    pub const ARCHIVE_COMPONENT: &str = "http://schema.org/ArchiveComponent";
}

/// Node property names.
pub mod properties {
    /// Node identifier.
    pub const ID: &str = "@id";
    /// Node type.
    pub const TYPE: &str = "@type";
    /// Substring matched against organization node keys. Known variants are
    /// `identifier` and `http://schema.org/identifier`.
    pub const IDENTIFIER_FRAGMENT: &str = "identifier";
    /// Display name of an organization.
    pub const NAME: &str = "name";
    /// Link from an archive component to its organization.
    pub const HOLDING_ARCHIVE: &str = "holdingArchive";
    /// Preservation status of an archive component.
    pub const CREATIVE_WORK_STATUS: &str = "creativeWorkStatus";
    /// Free-text description of an archive component.
    pub const DESCRIPTION: &str = "description";
    /// Archived range of an archive component.
    pub const TEMPORAL_COVERAGE: &str = "temporalCoverage";
    /// Status link of ISSN, ISSN-L and record nodes.
    pub const STATUS: &str = "status";
    /// Literal value of ISSN-L and key title nodes.
    pub const VALUE: &str = "value";
    /// Main title of the serial.
    pub const MAIN_TITLE: &str = "mainTitle";
    /// Cross-reference to an ISSN reported as incorrect.
    pub const HAS_INCORRECT_ISSN: &str = "hasIncorrectISSN";
    /// Link(s) to the ISSN(s) replacing a cancelled one.
    pub const CANCELLED_IN_FAVOR_OF: &str = "cancelledInFavorOf";
}

/// `@id` values of the per-ISSN resource nodes.
pub mod resources {
    /// The serial resource itself (`resource/ISSN/<issn>`).
    #[must_use]
    pub fn serial(issn: &str) -> String {
        format!("resource/ISSN/{issn}")
    }

    /// The ISSN node (`resource/ISSN/<issn>#ISSN`).
    #[must_use]
    pub fn issn(issn: &str) -> String {
        format!("resource/ISSN/{issn}#ISSN")
    }

    /// The linking ISSN node (`resource/ISSN/<issn>#ISSN-L`).
    #[must_use]
    pub fn issn_l(issn: &str) -> String {
        format!("resource/ISSN/{issn}#ISSN-L")
    }

    /// The record node (`resource/ISSN/<issn>#Record`).
    #[must_use]
    pub fn record(issn: &str) -> String {
        format!("resource/ISSN/{issn}#Record")
    }

    /// The key title node (`resource/ISSN/<issn>#KeyTitle`).
    #[must_use]
    pub fn key_title(issn: &str) -> String {
        format!("resource/ISSN/{issn}#KeyTitle")
    }
}

/// Fixed report columns. The numeric prefixes give the CSV header its order.
pub mod columns {
    /// Queried ISSN.
    pub const ISSN: &str = "01 ISSN";
    /// Status of the ISSN itself.
    pub const ISSN_STATUS: &str = "02 ISSN Status";
    /// Lifecycle status of the portal record.
    pub const RECORD_STATUS: &str = "03 ISSN Record Status";
    /// Linking ISSN.
    pub const ISSN_L: &str = "04 ISSN-L";
    /// Status of the linking ISSN.
    pub const ISSN_L_STATUS: &str = "05 ISSN-L Status";
    /// ISSNs replacing a cancelled one.
    pub const CANCELLED_IN_FAVOR_OF: &str = "06 Cancelled in Favor of";
    /// Main title.
    pub const MAIN_TITLE: &str = "07 mainTitle";
    /// Key title.
    pub const KEY_TITLE: &str = "08 keyTitle";
    /// Number of distinct holding archives.
    pub const NUMBER_OF_ARCHIVES: &str = "09 Number of Archives";
    /// Distinct holding archive codes.
    pub const HOLDING_ARCHIVES: &str = "10 Holding Archives";

    /// Columns every record carries, whatever the portal returned.
    pub const FIXED: [&str; 10] = [
        ISSN,
        ISSN_STATUS,
        RECORD_STATUS,
        ISSN_L,
        ISSN_L_STATUS,
        CANCELLED_IN_FAVOR_OF,
        MAIN_TITLE,
        KEY_TITLE,
        NUMBER_OF_ARCHIVES,
        HOLDING_ARCHIVES,
    ];

    /// Whether `name` is one of the [`FIXED`] columns.
    #[must_use]
    pub fn is_fixed(name: &str) -> bool {
        FIXED.contains(&name)
    }

    /// Per-archive status column name.
    #[must_use]
    pub fn archive_status(archive: &str) -> String {
        format!("{archive} creativeWorkStatus")
    }

    /// Per-archive description column name.
    #[must_use]
    pub fn archive_description(archive: &str) -> String {
        format!("{archive} description")
    }

    /// Per-archive coverage column name.
    #[must_use]
    pub fn archive_coverage(archive: &str) -> String {
        format!("{archive} temporalCoverage")
    }
}

/// Text after the last `#` of a fragment identifier, or the whole value.
///
/// ```
/// use keepers_query::vocabulary::fragment;
///
/// assert_eq!(fragment("http://issn.org/organization/keepers#CLOCKSS"), "CLOCKSS");
/// assert_eq!(fragment("PORTICO"), "PORTICO");
/// ```
#[must_use]
pub fn fragment(value: &str) -> &str {
    value.rsplit('#').next().unwrap_or(value)
}

/// Text after the last `/` of a resource path, or the whole value.
#[must_use]
pub fn last_segment(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}
