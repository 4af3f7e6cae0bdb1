//! Analysis error types.

use thiserror::Error;

/// Errors that can occur while loading vocabulary or configuration.
///
/// The analysis stages themselves are infallible: they run over a
/// pre-validated in-memory snapshot, and edge conditions are modeled
/// as defined values rather than errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Vocabulary content failed validation
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}
