//! Input validation utilities.
//!
//! Shared building blocks for the sample and user-registration validators: the ordered
//! field-error map returned by every validator, and the small format checks both of them
//! apply to form text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::PHONE_DIGITS;

/// Simplified RFC 5322 address: something, `@`, something, `.`, something, no whitespace.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Mapping from field key to a single human-readable message.
///
/// An empty map means the payload is valid. Keys are kept ordered so that rendering the same
/// map twice (for example as JSON) yields identical output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`.
    ///
    /// The first message recorded for a field wins: validators report one problem per field.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field keys in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Returns the trimmed text when the value is present and not blank.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Records `message` under `field` when `value` is absent or blank.
///
/// Returns the trimmed value for follow-up format checks.
pub fn require<'a>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&'a str>,
    message: &str,
) -> Option<&'a str> {
    let value = present(value);
    if value.is_none() {
        errors.insert(field, message);
    }
    value
}

/// True when `value` is non-empty and made only of ASCII digits.
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// True when `value` is exactly ten ASCII digits.
pub fn is_phone_number(value: &str) -> bool {
    value.len() == PHONE_DIGITS && is_digits(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_rejects_letters_and_empty() {
        assert!(is_digits("1234567890"));
        assert!(!is_digits("12A34B"));
        assert!(!is_digits(""));
        assert!(!is_digits("12 34"));
        assert!(!is_digits("-123"));
    }

    #[test]
    fn phone_requires_exactly_ten_digits() {
        assert!(is_phone_number("3001234567"));
        assert!(!is_phone_number("300123456"));
        assert!(!is_phone_number("30012345678"));
        assert!(!is_phone_number("300123456a"));
    }

    #[test]
    fn email_uses_simplified_format() {
        assert!(is_email("ana@lab.com"));
        assert!(is_email("a.b+c@sub.domain.co"));
        assert!(!is_email("ana@lab"));
        assert!(!is_email("ana lab@x.com"));
        assert!(!is_email("@lab.com"));
        assert!(!is_email("ana@@lab.com"));
    }

    #[test]
    fn first_message_for_a_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("documento", "first");
        errors.insert("documento", "second");
        assert_eq!(errors.get("documento"), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn require_trims_and_reports_blank_values() {
        let mut errors = FieldErrors::new();
        assert_eq!(require(&mut errors, "a", Some("  x "), "missing"), Some("x"));
        assert_eq!(require(&mut errors, "b", Some("   "), "missing"), None);
        assert_eq!(require(&mut errors, "c", None, "missing"), None);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn serialises_as_flat_ordered_object() {
        let mut errors = FieldErrors::new();
        errors.insert("telefono", "t");
        errors.insert("email", "e");
        let json = serde_json::to_string(&errors).expect("serialise");
        assert_eq!(json, r#"{"email":"e","telefono":"t"}"#);
    }
}
