//! The tag usage index snapshot.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::document::DocumentRef;
use crate::error::TagError;
use crate::tag::{is_author_tag, normalize, Tag};

/// Immutable snapshot mapping each tag to the set of documents
/// carrying it.
///
/// Invariants:
/// - every key has at least one document
/// - keys are normalized and never author tags
/// - iteration order is deterministic (BTree collections throughout)
///
/// The index is built once by the Scanner and then treated as
/// read-only by every analysis stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsageIndex {
    entries: BTreeMap<Tag, BTreeSet<DocumentRef>>,
}

impl TagUsageIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `document` carries `raw_tag`.
    ///
    /// The tag is normalized before insertion. Duplicate insertions of
    /// the same (tag, document) pair are idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`TagError`] if the tag normalizes to the empty string,
    /// follows the author-tag convention, or contains characters
    /// outside `[a-z0-9_-]`.
    pub fn insert(&mut self, raw_tag: &str, document: DocumentRef) -> Result<(), TagError> {
        let tag = normalize(raw_tag);
        if tag.is_empty() {
            return Err(TagError::Empty);
        }
        if is_author_tag(&tag) {
            return Err(TagError::AuthorTag(tag));
        }
        if !tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(TagError::Malformed(tag));
        }
        self.entries.entry(tag).or_default().insert(document);
        Ok(())
    }

    /// Number of documents carrying `tag` (0 when absent).
    pub fn usage(&self, tag: &str) -> usize {
        self.entries.get(tag).map_or(0, BTreeSet::len)
    }

    /// Documents carrying `tag`, if indexed.
    pub fn documents(&self, tag: &str) -> Option<&BTreeSet<DocumentRef>> {
        self.entries.get(tag)
    }

    /// Whether `tag` is present in the index.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Iterate tags in lexicographic order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.entries.keys()
    }

    /// Iterate (tag, documents) pairs in lexicographic tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &BTreeSet<DocumentRef>)> {
        self.entries.iter()
    }

    /// Number of unique tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total tag uses across all documents.
    pub fn total_uses(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Number of distinct documents referenced by any tag.
    pub fn document_count(&self) -> usize {
        self.entries
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Invert the index: each document mapped to its tag set.
    ///
    /// This is the view the co-occurrence graph builder walks.
    pub fn document_tags(&self) -> BTreeMap<&DocumentRef, BTreeSet<&Tag>> {
        let mut inverted: BTreeMap<&DocumentRef, BTreeSet<&Tag>> = BTreeMap::new();
        for (tag, documents) in &self.entries {
            for document in documents {
                inverted.entry(document).or_default().insert(tag);
            }
        }
        inverted
    }
}
