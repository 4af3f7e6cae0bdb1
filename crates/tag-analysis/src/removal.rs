//! Removal candidate analysis.
//!
//! Rule-based flagging of tags that are probably not worth keeping.
//! The per-tag predicates run in a fixed order and the first match
//! wins, so a one-letter tag is reported as too generic rather than
//! low value.

use serde::{Deserialize, Serialize};
use tag_types::{Tag, TagUsageIndex};
use tracing::debug;

use crate::config::RemovalConfig;
use crate::semantic::{GroupStrategy, SemanticGroup};
use crate::vocabulary::Vocabulary;

/// Why a tag was flagged for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalCategory {
    TooGeneric,
    TooSpecific,
    Malformed,
    Redundant,
    LowValue,
}

/// One tag recommended for removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalCandidate {
    pub tag: Tag,
    pub uses: usize,
    pub category: RemovalCategory,
    pub reason: String,
}

fn is_all_digits_or_underscores(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_digit() || c == '_')
}

/// Flag removal candidates across the whole index.
///
/// Per-tag predicates run first, in order: too generic (a known
/// generic word, or shorter than `config.min_tag_len`), too specific
/// (single use and longer than `config.too_specific_len`), malformed
/// (digits and underscores only), low value (single use). Redundant
/// candidates are then derived from the accepted stem and prefix
/// groups: the most-used member of each group is kept and the rest
/// reference it. Output order follows the index for the per-tag rules,
/// then group order for redundant entries.
pub fn find_removal_candidates(
    index: &TagUsageIndex,
    semantic_groups: &[SemanticGroup],
    vocabulary: &Vocabulary,
    config: &RemovalConfig,
) -> Vec<RemovalCandidate> {
    let mut candidates = Vec::new();
    for tag in index.tags() {
        let uses = index.usage(tag);
        if vocabulary.generic_words.contains(tag.as_str()) || tag.len() < config.min_tag_len {
            candidates.push(RemovalCandidate {
                tag: tag.clone(),
                uses,
                category: RemovalCategory::TooGeneric,
                reason: "Common word or too short".to_string(),
            });
        } else if uses == 1 && tag.len() > config.too_specific_len {
            candidates.push(RemovalCandidate {
                tag: tag.clone(),
                uses,
                category: RemovalCategory::TooSpecific,
                reason: "Single use and very long".to_string(),
            });
        } else if is_all_digits_or_underscores(tag) {
            candidates.push(RemovalCandidate {
                tag: tag.clone(),
                uses,
                category: RemovalCategory::Malformed,
                reason: "Contains only numbers or underscores".to_string(),
            });
        } else if uses <= config.low_value_max_uses && uses == 1 {
            candidates.push(RemovalCandidate {
                tag: tag.clone(),
                uses,
                category: RemovalCategory::LowValue,
                reason: "Single use tag".to_string(),
            });
        }
    }

    for group in semantic_groups {
        if !matches!(
            group.strategy,
            GroupStrategy::StemMatch | GroupStrategy::CommonPrefix
        ) {
            continue;
        }
        let mut by_use: Vec<(&Tag, usize)> = group
            .members
            .iter()
            .map(|tag| (tag, index.usage(tag)))
            .collect();
        by_use.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some((keeper, _)) = by_use.first() {
            let keeper = (*keeper).clone();
            for (tag, uses) in by_use.into_iter().skip(1) {
                candidates.push(RemovalCandidate {
                    tag: tag.clone(),
                    uses,
                    category: RemovalCategory::Redundant,
                    reason: format!("Redundant with '{keeper}'"),
                });
            }
        }
    }

    debug!(count = candidates.len(), "removal candidates found");
    candidates
}
