//! Field validators for request bodies
//!
//! Each validator inspects one raw JSON field and either borrows the string
//! out of it or returns the message to report for that field.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// Language codes: 2 to 5 ASCII letters
    static ref LANGUAGE_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z]{2,5}$").unwrap();
}

/// A required free-text field: present, a string, not blank
pub fn validate_text<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a str, String> {
    match value {
        None | Some(Value::Null) => Err(format!("{} is required", field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(format!("{} is required", field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(format!("{} must be a string", field)),
    }
}

/// A required language code
pub fn validate_language_code<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a str, String> {
    match value {
        None | Some(Value::Null) => Err(format!("{} is required", field)),
        Some(Value::String(s)) if is_language_code(s) => Ok(s),
        Some(Value::String(_)) => Err(format!(
            "{} must be a language code of 2 to 5 letters",
            field
        )),
        Some(_) => Err(format!("{} must be a string", field)),
    }
}

/// An optional language code: absence (or null) is accepted
pub fn validate_language_code_optional<'a>(
    value: Option<&'a Value>,
    field: &str,
) -> Result<Option<&'a str>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        other => validate_language_code(other, field).map(Some),
    }
}

pub fn is_language_code(value: &str) -> bool {
    LANGUAGE_CODE_REGEX.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text() {
        assert_eq!(validate_text(Some(&json!("Hello")), "text"), Ok("Hello"));
        assert_eq!(
            validate_text(None, "text"),
            Err("text is required".to_string())
        );
        assert_eq!(
            validate_text(Some(&json!("   ")), "text"),
            Err("text is required".to_string())
        );
        assert_eq!(
            validate_text(Some(&json!(42)), "text"),
            Err("text must be a string".to_string())
        );
    }

    #[test]
    fn test_language_code_bounds() {
        assert!(is_language_code("en"));
        assert!(is_language_code("zhHan"));
        assert!(!is_language_code("e"));
        assert!(!is_language_code("abcdef"));
        assert!(!is_language_code("zh-Hans"));
        assert!(!is_language_code(" fr"));
        assert!(!is_language_code("f1"));
    }

    #[test]
    fn test_language_code_messages() {
        assert_eq!(
            validate_language_code(None, "language"),
            Err("language is required".to_string())
        );
        assert_eq!(
            validate_language_code(Some(&json!(["fr"])), "language"),
            Err("language must be a string".to_string())
        );
        assert!(validate_language_code(Some(&json!("french!")), "language")
            .unwrap_err()
            .contains("2 to 5 letters"));
    }

    #[test]
    fn test_optional_language_code() {
        assert_eq!(validate_language_code_optional(None, "sourceLanguage"), Ok(None));
        assert_eq!(
            validate_language_code_optional(Some(&Value::Null), "sourceLanguage"),
            Ok(None)
        );
        assert_eq!(
            validate_language_code_optional(Some(&json!("de")), "sourceLanguage"),
            Ok(Some("de"))
        );
        assert!(validate_language_code_optional(Some(&json!("d")), "sourceLanguage").is_err());
    }
}
