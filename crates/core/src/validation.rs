//! Primitive input validators.
//!
//! DTO-level validation functions (one per create/update DTO, living next to
//! the DTOs in `kennel-db`) are composed from these. Every failure is a
//! [`CoreError::Validation`] carrying a message that names the field.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of short name-like fields.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of free-text descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

fn locale_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("valid locale regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// Require a non-blank string of at most `max` characters.
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_length(field, value, max)
}

/// Like [`validate_required_text`] but only when a value is present.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_required_text(field, v, max),
        None => Ok(()),
    }
}

pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a BCP-47-style locale such as `en` or `pt-BR`.
pub fn validate_locale(locale: &str) -> Result<(), CoreError> {
    if !locale_pattern().is_match(locale) {
        return Err(CoreError::Validation(format!(
            "locale '{locale}' is not a valid locale (expected e.g. 'en' or 'pt-BR')"
        )));
    }
    Ok(())
}

pub fn validate_optional_email(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if !email_pattern().is_match(v) => Err(CoreError::Validation(format!(
            "{field} must be a valid email address"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_non_negative(field: &str, value: Option<i64>) -> Result<(), CoreError> {
    match value {
        Some(v) if v < 0 => Err(CoreError::Validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_non_zero(field: &str, value: Option<i64>) -> Result<(), CoreError> {
    match value {
        Some(0) => Err(CoreError::Validation(format!("{field} must not be zero"))),
        _ => Ok(()),
    }
}

/// Free-form metadata must be a JSON object when supplied.
pub fn validate_optional_object(
    field: &str,
    value: Option<&serde_json::Value>,
) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_object() => Err(CoreError::Validation(format!(
            "{field} must be a JSON object"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        let err = validate_required_text("name", "   ", 10).unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn long_text_is_rejected() {
        assert!(validate_required_text("name", "abcdef", 5).is_err());
        assert!(validate_required_text("name", "abcde", 5).is_ok());
    }

    #[test]
    fn absent_optional_text_passes() {
        assert!(validate_optional_text("description", None, 5).is_ok());
        assert!(validate_optional_text("description", Some(""), 5).is_err());
    }

    #[test]
    fn locales() {
        for ok in ["en", "fr", "pt-BR", "fil"] {
            assert!(validate_locale(ok).is_ok(), "{ok} should be valid");
        }
        for bad in ["", "EN", "en_US", "english", "pt-br"] {
            assert!(validate_locale(bad).is_err(), "{bad} should be invalid");
        }
    }

    #[test]
    fn emails() {
        assert!(validate_optional_email("email", Some("vet@example.com")).is_ok());
        assert!(validate_optional_email("email", Some("not-an-email")).is_err());
        assert!(validate_optional_email("email", None).is_ok());
    }

    #[test]
    fn numbers() {
        assert!(validate_non_negative("price", Some(-1)).is_err());
        assert!(validate_non_negative("price", Some(0)).is_ok());
        assert!(validate_non_zero("quantity", Some(0)).is_err());
        assert!(validate_non_zero("quantity", Some(-4)).is_ok());
    }

    #[test]
    fn metadata_must_be_object() {
        let arr = serde_json::json!([1, 2]);
        let obj = serde_json::json!({"a": 1});
        assert!(validate_optional_object("metadata", Some(&arr)).is_err());
        assert!(validate_optional_object("metadata", Some(&obj)).is_ok());
    }
}
