// Rust guideline compliant 2026-02-06

//! Field normalization for raw tracker values.
//!
//! The tracker emits the same semantic field in several shapes: a user can
//! arrive as an object or a plain string, a checkbox as a boolean or a
//! one-element array, a URL as a string or an object. Every function here is
//! total over `serde_json::Value` with an explicit fallback arm; malformed
//! shapes degrade to the absent/empty value instead of failing the record.

use serde_json::Value;

/// A person reference normalized from a user field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonRef {
    /// Display name, when present.
    pub display_name: Option<String>,
    /// Email address embedded in the user object, when present.
    pub email: Option<String>,
    /// Tracker account id, when present.
    pub account_id: Option<String>,
}

fn string_member(value: &Value, member: &str) -> Option<String> {
    value.get(member).and_then(Value::as_str).map(str::to_string)
}

/// Normalizes a user field into a [`PersonRef`].
///
/// Objects contribute `displayName`, `emailAddress` and `accountId`
/// sub-fields; a plain string becomes the display name; anything else
/// yields an empty reference.
pub fn person_ref(value: Option<&Value>) -> PersonRef {
    match value {
        Some(v @ Value::Object(_)) => PersonRef {
            display_name: string_member(v, "displayName"),
            email: string_member(v, "emailAddress"),
            account_id: string_member(v, "accountId"),
        },
        Some(Value::String(s)) => PersonRef {
            display_name: Some(s.clone()),
            email: None,
            account_id: None,
        },
        _ => PersonRef::default(),
    }
}

/// Normalizes an email field into a list of addresses.
///
/// Strings are split on comma/semicolon/whitespace runs, keeping only
/// tokens containing `@`. Arrays keep object elements' `emailAddress`
/// sub-field and string elements containing `@`. Everything else is empty.
pub fn email_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => s
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .map(str::trim)
            .filter(|token| !token.is_empty() && token.contains('@'))
            .map(str::to_string)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => string_member(item, "emailAddress"),
                Value::String(s) if s.contains('@') => Some(s.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalizes a URL field.
///
/// Strings pass through; objects contribute `href`, else `url`.
pub fn url_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(v @ Value::Object(_)) => {
            string_member(v, "href").or_else(|| string_member(v, "url"))
        }
        _ => None,
    }
}

/// Normalizes a dropdown/select field into its label.
///
/// Strings pass through; objects contribute `value`, else `name`.
pub fn dropdown_label(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(v @ Value::Object(_)) => {
            string_member(v, "value").or_else(|| string_member(v, "name"))
        }
        _ => None,
    }
}

/// Normalizes a checkbox field into a boolean.
///
/// Checkbox fields arrive as null, a boolean, a one-element array of
/// `{"value": "Yes"/"No"}` objects, a bare object, or a scalar. "yes" is
/// matched case-insensitively; bare scalars also accept "true" and "1".
pub fn bool_flag(value: Option<&Value>) -> bool {
    fn is_yes(s: &str) -> bool {
        s.eq_ignore_ascii_case("yes")
    }

    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(items)) => match items.first() {
            Some(v @ Value::Object(_)) => {
                string_member(v, "value").is_some_and(|s| is_yes(&s))
            }
            Some(Value::String(s)) => is_yes(s),
            Some(other) => is_yes(&scalar_form(other)),
            None => false,
        },
        Some(v @ Value::Object(_)) => string_member(v, "value").is_some_and(|s| is_yes(&s)),
        Some(other) => {
            let s = scalar_form(other).to_ascii_lowercase();
            matches!(s.as_str(), "yes" | "true" | "1")
        }
    }
}

/// Normalizes a status field into its display name.
///
/// Status arrives as an object with a `name` sub-field; any other shape is
/// treated as absent.
pub fn status_name(value: Option<&Value>) -> Option<String> {
    match value {
        Some(v @ Value::Object(_)) => string_member(v, "name"),
        _ => None,
    }
}

/// String form of a scalar JSON value, without quoting.
fn scalar_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
