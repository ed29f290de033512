// Rust guideline compliant 2026-02-06

//! Link resolution for raw tracker issues.
//!
//! A raw issue carries an `issuelinks` list whose entries name a link type
//! (with inward and outward labels) and the related issue on one or both
//! sides. Resolution matches the configured relation names against those
//! labels and yields at most one directed edge per entry.

use crate::models::{Direction, LinkEdge, RawIssue};
use serde_json::Value;

/// Resolves the relationship edges of a raw issue.
///
/// Link-list order is preserved. For each entry, the configured relation
/// names are tried in order; the first name that is a case-insensitive
/// substring of the entry's inward label (with an inward-side issue
/// present) or outward label (with an outward-side issue present) wins.
/// Entries matching no relation name contribute nothing.
pub fn resolve_links(raw: &RawIssue, relation_names: &[String]) -> Vec<LinkEdge> {
    let links = raw
        .get("fields")
        .and_then(|fields| fields.get("issuelinks"))
        .and_then(Value::as_array);

    let Some(links) = links else {
        return Vec::new();
    };

    links
        .iter()
        .filter_map(|link| resolve_entry(link, relation_names))
        .collect()
}

/// Resolves a single link entry, or None when no relation name matches.
fn resolve_entry(link: &Value, relation_names: &[String]) -> Option<LinkEdge> {
    let link_type = link.get("type")?;
    let inward_label = label(link_type, "inward");
    let outward_label = label(link_type, "outward");

    for name in relation_names {
        let needle = name.to_lowercase();

        if inward_label.contains(&needle) {
            if let Some(key) = related_key(link, "inwardIssue") {
                return Some(edge(link_type, key, Direction::Inward));
            }
        }

        if outward_label.contains(&needle) {
            if let Some(key) = related_key(link, "outwardIssue") {
                return Some(edge(link_type, key, Direction::Outward));
            }
        }
    }

    None
}

/// Case-folded link-type label, empty when absent.
fn label(link_type: &Value, member: &str) -> String {
    link_type
        .get(member)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

/// Key of the related issue on the given side, when present.
fn related_key(link: &Value, side: &str) -> Option<String> {
    link.get(side)
        .and_then(|issue| issue.get("key"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn edge(link_type: &Value, related_key: String, direction: Direction) -> LinkEdge {
    LinkEdge {
        related_key,
        relation_name: link_type
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        direction,
    }
}
