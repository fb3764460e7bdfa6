use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything between an opening `<` and the next `>`
    static ref TAG_PATTERN: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Strip HTML-like tags, then trim surrounding whitespace.
///
/// Applied to every free-text and language-code field before it leaves the
/// process. The output never contains a complete `<...>` pair, so running it
/// twice gives the same result as running it once.
pub fn sanitize(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").trim().to_string()
}

/// Sanitize an optional field, collapsing blank results to `None`
pub fn sanitize_optional(value: Option<&str>) -> Option<String> {
    value.map(sanitize).filter(|s| !s.is_empty())
}
