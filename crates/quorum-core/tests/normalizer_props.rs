// Rust guideline compliant 2026-02-06

//! Property-based tests for field normalization and record building.
//!
//! These tests validate totality: for any JSON shape the tracker could
//! emit, normalization degrades to absent/empty values instead of failing.

use proptest::prelude::*;
use quorum_core::{build_record, fields, Config};
use serde_json::{json, Value};

/// Generates arbitrary JSON values, including nested arrays and objects.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9@ .,;_-]{0,40}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z]{1,12}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Every normalizer is total: any shape yields a value, never a panic,
    /// and the documented empty/absent fallback for non-matching shapes.
    #[test]
    fn test_normalizers_are_total(value in arb_json()) {
        let v = Some(&value);
        let _ = fields::person_ref(v);
        let _ = fields::email_list(v);
        let _ = fields::url_value(v);
        let _ = fields::dropdown_label(v);
        let _ = fields::bool_flag(v);
        let _ = fields::status_name(v);
    }

    /// Emails split from a string field all contain an `@`.
    #[test]
    fn test_email_list_string_tokens_are_addresses(s in "[a-zA-Z0-9@ .,;_-]{0,60}") {
        for email in fields::email_list(Some(&json!(s))) {
            prop_assert!(email.contains('@'));
            prop_assert!(!email.chars().any(char::is_whitespace));
        }
    }

    /// A keyed payload with arbitrary field content always builds, and
    /// building twice yields identical records (purity).
    #[test]
    fn test_record_builder_total_and_pure(fields_value in arb_json()) {
        let raw = json!({"key": "RVG-1", "fields": fields_value});
        let config = Config::default();
        let first = build_record(&raw, &config).unwrap();
        let second = build_record(&raw, &config).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.key.as_str(), "RVG-1");

        // Emails are deduplicated.
        let mut seen = first.emails.clone();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), first.emails.len());
    }

    /// Records survive a JSON round trip field for field.
    #[test]
    fn test_record_json_round_trip(fields_value in arb_json()) {
        let raw = json!({"key": "RVG-1", "fields": fields_value});
        let config = Config::default();
        let record = build_record(&raw, &config).unwrap();
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: quorum_core::IssueRecord = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(record, decoded);
    }
}
