//! Document references.

use serde::{Deserialize, Serialize};

/// A calendar year derived from document metadata.
pub type Year = i32;

/// An opaque reference to a document in the corpus.
///
/// The engine never reads document content; it only needs a stable
/// identifier (for set membership and co-occurrence counting) and the
/// optional year the Scanner derived from the document's metadata.
///
/// `Ord` is derived so document sets iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Stable identifier (typically a relative path).
    pub id: String,
    /// Publication year, if one could be derived.
    pub year: Option<Year>,
}

impl DocumentRef {
    /// Create a reference with no derivable year.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year: None,
        }
    }

    /// Create a reference with a derived year.
    pub fn with_year(id: impl Into<String>, year: Year) -> Self {
        Self {
            id: id.into(),
            year: Some(year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ref_ordering_is_by_id() {
        let a = DocumentRef::new("a.md");
        let b = DocumentRef::with_year("b.md", 2020);
        assert!(a < b);
    }

    #[test]
    fn test_document_ref_year() {
        assert_eq!(DocumentRef::new("x.md").year, None);
        assert_eq!(DocumentRef::with_year("x.md", 2019).year, Some(2019));
    }

    #[test]
    fn test_document_ref_serde_round_trip() {
        let doc = DocumentRef::with_year("notes/2021 study.md", 2021);
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: DocumentRef = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, parsed);
    }
}
