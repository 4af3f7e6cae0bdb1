//! Near-duplicate tag name detection.
//!
//! Flags pairs of distinct tags whose names are nearly identical,
//! which usually means a typo or an inconsistent spelling. Substring
//! pairs are excluded because the semantic grouping strategies
//! already cover those.

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;
use tag_types::{Tag, TagUsageIndex};
use tracing::debug;

use crate::config::SimilarityConfig;

/// Two tags with nearly identical names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarTagPair {
    pub tag_a: Tag,
    pub tag_b: Tag,

    /// Normalized edit similarity in [0, 1]
    pub similarity: f64,
}

/// Find pairs of tags whose normalized edit similarity strictly
/// exceeds `config.threshold`.
///
/// Pairs where one tag contains the other are skipped. Results are
/// sorted by similarity descending with the pair names as the
/// ascending tie-break, then capped at `config.max_pairs`.
pub fn find_similar_pairs(
    index: &TagUsageIndex,
    config: &SimilarityConfig,
) -> Vec<SimilarTagPair> {
    let tags: Vec<&Tag> = index.tags().collect();
    let mut pairs = Vec::new();
    for (i, tag_a) in tags.iter().enumerate() {
        for tag_b in &tags[i + 1..] {
            if tag_a.contains(tag_b.as_str()) || tag_b.contains(tag_a.as_str()) {
                continue;
            }
            let similarity = normalized_levenshtein(tag_a.as_str(), tag_b.as_str());
            if similarity > config.threshold {
                pairs.push(SimilarTagPair {
                    tag_a: (*tag_a).clone(),
                    tag_b: (*tag_b).clone(),
                    similarity,
                });
            }
        }
    }

    pairs.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.tag_a.cmp(&b.tag_a))
            .then_with(|| a.tag_b.cmp(&b.tag_b))
    });
    pairs.truncate(config.max_pairs);
    debug!(count = pairs.len(), "similar tag pairs found");
    pairs
}
