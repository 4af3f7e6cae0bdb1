//! Input validation errors.

use thiserror::Error;

/// Errors raised when a tag fails the Scanner contract at index
/// insertion. The analysis stages themselves never fail; they operate
/// on an already-validated snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// Tag normalized to the empty string
    #[error("tag is empty after normalization")]
    Empty,

    /// Author tags (trailing underscore) are excluded from analysis
    #[error("author tag excluded from index: {0}")]
    AuthorTag(String),

    /// Tag contains characters outside the identifier alphabet
    #[error("malformed tag: {0}")]
    Malformed(String),
}
