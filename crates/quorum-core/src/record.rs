// Rust guideline compliant 2026-02-06

//! Builds canonical issue records from raw tracker payloads.

use crate::config::Config;
use crate::fields;
use crate::models::{IssueRecord, RawIssue};
use crate::{Error, Result};
use serde_json::Value;

/// Builds an [`IssueRecord`] from a raw issue payload.
///
/// Normalization is pure: the same payload always produces the same record,
/// with no external state beyond the configured field ids and server URL.
///
/// The chair and vice-chair emails prefer the dedicated email field only
/// when it is a plain string; otherwise the email embedded in the person
/// reference is used. The `emails` list is chair then vice-chair,
/// deduplicated, skipping absent values.
///
/// # Errors
///
/// Returns [`Error::MalformedIssue`] if the payload has no non-empty `key`.
/// Well-formed tracker responses always carry one, so this signals a defect
/// upstream rather than a recoverable condition.
pub fn build_record(raw: &RawIssue, config: &Config) -> Result<IssueRecord> {
    let key = raw
        .get("key")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| Error::MalformedIssue("issue payload has no key".to_string()))?
        .to_string();

    let empty = Value::Null;
    let issue_fields = raw.get("fields").unwrap_or(&empty);
    let ids = &config.fields;
    let field = |id: &str| issue_fields.get(id);

    let chair = fields::person_ref(field(&ids.chair));
    let chair_email = plain_string(field(&ids.chair_email)).or_else(|| chair.email.clone());
    let vice_chair = fields::person_ref(field(&ids.vice_chair));
    let vice_chair_email =
        plain_string(field(&ids.vice_chair_email)).or_else(|| vice_chair.email.clone());

    let mut emails = Vec::new();
    for email in [&chair_email, &vice_chair_email].into_iter().flatten() {
        if !emails.contains(email) {
            emails.push(email.clone());
        }
    }

    Ok(IssueRecord {
        url: config.issue_url(&key),
        key,
        summary: issue_fields
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        chair: chair.display_name,
        chair_email,
        chair_affiliation: fields::dropdown_label(field(&ids.chair_affiliation)),
        vice_chair: vice_chair.display_name,
        vice_chair_email,
        vice_chair_affiliation: fields::dropdown_label(field(&ids.vice_chair_affiliation)),
        emails,
        status: fields::status_name(issue_fields.get("status")),
        charter: fields::url_value(field(&ids.charter)),
        confluence_space: fields::url_value(field(&ids.confluence_space)),
        mailing_list: fields::url_value(field(&ids.mailing_list)),
        activity_level: fields::dropdown_label(field(&ids.activity_level)),
        meeting_notes: fields::url_value(field(&ids.meeting_notes)),
        creation_date: plain_string(field(&ids.creation_date)),
        next_election_month: fields::dropdown_label(field(&ids.next_election_month)),
        next_election_year: fields::dropdown_label(field(&ids.next_election_year)),
        last_election_month: fields::dropdown_label(field(&ids.last_election_month)),
        last_election_year: fields::dropdown_label(field(&ids.last_election_year)),
        is_acting_chair: fields::bool_flag(field(&ids.is_acting_chair)),
        is_acting_vice_chair: fields::bool_flag(field(&ids.is_acting_vice_chair)),
        recharter_approval_date: plain_string(field(&ids.recharter_approval_date)),
    })
}

/// Returns the value only when it is a plain JSON string.
fn plain_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Config {
        let mut config = Config::default();
        config.server_url = "https://tracker.example.com".to_string();
        config
    }

    fn raw_with_fields(fields: serde_json::Value) -> RawIssue {
        json!({"key": "RVG-1", "fields": fields})
    }

    #[test]
    fn test_build_record_minimal() {
        let raw = raw_with_fields(json!({"summary": "Vector WG"}));
        let record = build_record(&raw, &config()).unwrap();
        assert_eq!(record.key, "RVG-1");
        assert_eq!(record.summary, "Vector WG");
        assert_eq!(record.url, "https://tracker.example.com/browse/RVG-1");
        assert_eq!(record.chair, None);
        assert!(record.emails.is_empty());
        assert!(!record.is_acting_chair);
    }

    #[test]
    fn test_build_record_missing_key() {
        let raw = json!({"fields": {"summary": "No key"}});
        assert!(build_record(&raw, &config()).is_err());
        let raw = json!({"key": "", "fields": {}});
        assert!(build_record(&raw, &config()).is_err());
    }

    #[test]
    fn test_email_fallback_prefers_plain_string_field() {
        let cfg = config();
        let raw = raw_with_fields(json!({
            "customfield_10092": {
                "displayName": "Ada",
                "emailAddress": "embedded@example.com"
            },
            "customfield_10093": "dedicated@example.com"
        }));
        let record = build_record(&raw, &cfg).unwrap();
        assert_eq!(record.chair_email.as_deref(), Some("dedicated@example.com"));
    }

    #[test]
    fn test_email_fallback_uses_embedded_when_field_not_string() {
        let cfg = config();
        // Dedicated field is an object, not a plain string: fall back.
        let raw = raw_with_fields(json!({
            "customfield_10092": {
                "displayName": "Ada",
                "emailAddress": "embedded@example.com"
            },
            "customfield_10093": {"emailAddress": "wrapped@example.com"}
        }));
        let record = build_record(&raw, &cfg).unwrap();
        assert_eq!(record.chair_email.as_deref(), Some("embedded@example.com"));
    }

    #[test]
    fn test_emails_deduplicated_in_order() {
        let cfg = config();
        let raw = raw_with_fields(json!({
            "customfield_10093": "shared@example.com",
            "customfield_10100": "shared@example.com"
        }));
        let record = build_record(&raw, &cfg).unwrap();
        assert_eq!(record.emails, vec!["shared@example.com"]);

        let raw = raw_with_fields(json!({
            "customfield_10093": "chair@example.com",
            "customfield_10100": "vice@example.com"
        }));
        let record = build_record(&raw, &cfg).unwrap();
        assert_eq!(record.emails, vec!["chair@example.com", "vice@example.com"]);

        let raw = raw_with_fields(json!({}));
        let record = build_record(&raw, &cfg).unwrap();
        assert!(record.emails.is_empty());
    }

    #[test]
    fn test_governance_fields_extracted() {
        let cfg = config();
        let raw = raw_with_fields(json!({
            "status": {"name": "Active"},
            "customfield_10086": {"href": "https://charter.example.com"},
            "customfield_10145": {"value": "High"},
            "customfield_10090": "2023-01-15",
            "customfield_10094": [{"value": "Yes"}],
            "customfield_10643": "2024-06-01"
        }));
        let record = build_record(&raw, &cfg).unwrap();
        assert_eq!(record.status.as_deref(), Some("Active"));
        assert_eq!(record.charter.as_deref(), Some("https://charter.example.com"));
        assert_eq!(record.activity_level.as_deref(), Some("High"));
        assert_eq!(record.creation_date.as_deref(), Some("2023-01-15"));
        assert!(record.is_acting_chair);
        assert!(!record.is_acting_vice_chair);
        assert_eq!(record.recharter_approval_date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn test_build_record_is_pure() {
        let cfg = config();
        let raw = raw_with_fields(json!({
            "summary": "Same in, same out",
            "customfield_10092": "Ada"
        }));
        let first = build_record(&raw, &cfg).unwrap();
        let second = build_record(&raw, &cfg).unwrap();
        assert_eq!(first, second);
    }
}
