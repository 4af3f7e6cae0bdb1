//! Standardization suggestions.
//!
//! Maps known variant spellings onto their canonical forms using the
//! vocabulary's variant table. When both spellings exist in the index
//! the suggestion is a merge; otherwise it is a plain rename.

use serde::{Deserialize, Serialize};
use tag_types::{Tag, TagUsageIndex};
use tracing::debug;

use crate::vocabulary::Vocabulary;

/// Why a rename is suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionReason {
    /// The canonical form is already used in the collection
    VariantExists,
    /// Known variant, canonical form not in use yet
    Standardization,
}

/// One suggested rename from a variant to its canonical form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizationSuggestion {
    pub current: Tag,
    pub suggested: Tag,
    pub reason: SuggestionReason,
    pub current_uses: usize,
    /// Usage of the canonical form, when it exists
    pub standard_uses: Option<usize>,
}

/// Suggest canonical renames for all indexed variants, in index order.
pub fn suggest_standardizations(
    index: &TagUsageIndex,
    vocabulary: &Vocabulary,
) -> Vec<StandardizationSuggestion> {
    let mut suggestions = Vec::new();
    for tag in index.tags() {
        let Some(canonical) = vocabulary.canonical_form(tag) else {
            continue;
        };
        let suggestion = if index.contains(canonical) {
            StandardizationSuggestion {
                current: tag.clone(),
                suggested: canonical.to_string(),
                reason: SuggestionReason::VariantExists,
                current_uses: index.usage(tag),
                standard_uses: Some(index.usage(canonical)),
            }
        } else {
            StandardizationSuggestion {
                current: tag.clone(),
                suggested: canonical.to_string(),
                reason: SuggestionReason::Standardization,
                current_uses: index.usage(tag),
                standard_uses: None,
            }
        };
        suggestions.push(suggestion);
    }
    debug!(count = suggestions.len(), "standardization suggestions");
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_types::DocumentRef;

    #[test]
    fn test_merge_when_canonical_present() {
        let mut index = TagUsageIndex::default();
        for doc in ["a.md", "b.md", "c.md"] {
            index.insert("ai", DocumentRef::new(doc)).unwrap();
        }
        for doc in ["a.md", "d.md"] {
            index
                .insert("artificial_intelligence", DocumentRef::new(doc))
                .unwrap();
        }
        let suggestions = suggest_standardizations(&index, &Vocabulary::default());
        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.current, "ai");
        assert_eq!(suggestion.suggested, "artificial_intelligence");
        assert_eq!(suggestion.reason, SuggestionReason::VariantExists);
        assert_eq!(suggestion.current_uses, 3);
        assert_eq!(suggestion.standard_uses, Some(2));
    }

    #[test]
    fn test_rename_when_canonical_absent() {
        let mut index = TagUsageIndex::default();
        index.insert("k12", DocumentRef::new("a.md")).unwrap();
        let suggestions = suggest_standardizations(&index, &Vocabulary::default());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].suggested, "k_12");
        assert_eq!(suggestions[0].reason, SuggestionReason::Standardization);
        assert_eq!(suggestions[0].standard_uses, None);
    }

    #[test]
    fn test_unknown_tags_produce_nothing() {
        let mut index = TagUsageIndex::default();
        index
            .insert("quantum_pedagogy", DocumentRef::new("a.md"))
            .unwrap();
        let suggestions = suggest_standardizations(&index, &Vocabulary::default());
        assert!(suggestions.is_empty());
    }
}
