//! Tag identifiers and helpers.

/// A normalized topical label: lowercase, underscore-separated.
pub type Tag = String;

/// Normalize a raw tag string: trim surrounding whitespace and quotes,
/// then lowercase.
///
/// Word separators are left as-is; the Scanner is responsible for the
/// underscore convention, and variant forms (`k-12` vs `k_12`) are the
/// standardization suggester's concern.
pub fn normalize(raw: &str) -> Tag {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').to_lowercase()
}

/// Check whether a tag follows the author-tag convention: a trailing
/// underscore denoting a person name. Author tags are excluded from
/// all analysis.
pub fn is_author_tag(tag: &str) -> bool {
    tag.ends_with('_')
}

/// Split a tag into its underscore-separated words, skipping empty
/// segments.
pub fn words(tag: &str) -> Vec<&str> {
    tag.split('_').filter(|w| !w.is_empty()).collect()
}
