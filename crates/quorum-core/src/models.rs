// Rust guideline compliant 2026-02-06

//! Core data models for Quorum.
//!
//! The JSON field order of these structs is the export contract: exporters
//! serialize them directly, so fields are declared in output order.

use serde::{Deserialize, Serialize};

/// Raw issue payload as returned by the tracker.
///
/// Field values are shape-varying (string, object, array, null) and are
/// interpreted only by the normalizer and record builder.
pub type RawIssue = serde_json::Value;

/// Which side of a raw link the current issue occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The link's inward label describes the relationship.
    Inward,
    /// The link's outward label describes the relationship.
    Outward,
}

/// A resolved relationship edge from an issue to a related issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEdge {
    /// Key of the related issue.
    pub related_key: String,
    /// Display name of the link type.
    pub relation_name: String,
    /// Side of the raw link the current issue occupies.
    pub direction: Direction,
}

/// A governance issue flattened into canonical scalar fields.
///
/// Immutable once built; date fields are opaque strings passed through
/// verbatim, never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Unique stable issue key, non-empty.
    pub key: String,
    /// One-line summary.
    pub summary: String,
    /// Browse URL, derived from the server base address and key.
    pub url: String,
    /// Chair display name.
    pub chair: Option<String>,
    /// Chair email (dedicated field when a plain string, else the email
    /// embedded in the chair user reference).
    pub chair_email: Option<String>,
    /// Chair affiliation label.
    pub chair_affiliation: Option<String>,
    /// Vice-chair display name.
    pub vice_chair: Option<String>,
    /// Vice-chair email, same fallback rule as the chair email.
    pub vice_chair_email: Option<String>,
    /// Vice-chair affiliation label.
    pub vice_chair_affiliation: Option<String>,
    /// Chair then vice-chair emails, deduplicated, insertion order kept.
    pub emails: Vec<String>,
    /// Workflow status name.
    pub status: Option<String>,
    /// Charter URL.
    pub charter: Option<String>,
    /// Confluence space URL.
    pub confluence_space: Option<String>,
    /// Mailing list URL.
    pub mailing_list: Option<String>,
    /// Activity level label.
    pub activity_level: Option<String>,
    /// Meeting notes URL.
    pub meeting_notes: Option<String>,
    /// Group creation date (opaque string such as "2023-01-15").
    pub creation_date: Option<String>,
    /// Next election month label.
    pub next_election_month: Option<String>,
    /// Next election year label.
    pub next_election_year: Option<String>,
    /// Last election month label.
    pub last_election_month: Option<String>,
    /// Last election year label.
    pub last_election_year: Option<String>,
    /// Whether the chair is acting.
    pub is_acting_chair: bool,
    /// Whether the vice-chair is acting.
    pub is_acting_vice_chair: bool,
    /// Recharter approval date (opaque string).
    pub recharter_approval_date: Option<String>,
}

/// A related issue attached to a primary issue, with link metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedIssue {
    /// The related issue's flattened record.
    #[serde(flatten)]
    pub record: IssueRecord,
    /// Display name of the link type that produced this attachment.
    pub link_type: String,
    /// Side of the raw link the primary issue occupies.
    pub link_direction: Direction,
}

/// A primary issue together with its resolved linked issues.
///
/// Created once per pipeline run, immutable after assembly, and consumed
/// read-only by the exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueWithLinks {
    /// The primary issue record.
    pub issue: IssueRecord,
    /// Linked issues in link-list order.
    pub linked_issues: Vec<LinkedIssue>,
}
