//! The assembled analysis report.

use serde::{Deserialize, Serialize};
use tag_types::{Tag, TagUsageIndex};

use crate::clusters::Cluster;
use crate::domains::{BridgeCandidate, DomainUsage};
use crate::graph::StrongAssociation;
use crate::quality::{CollectionMetrics, QualityScore};
use crate::removal::RemovalCandidate;
use crate::semantic::SemanticGroup;
use crate::similarity::SimilarTagPair;
use crate::standardize::StandardizationSuggestion;
use crate::temporal::TemporalTrends;

/// One row of the usage ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTag {
    pub tag: Tag,
    pub uses: usize,
}

/// Full ranking, most used first, name as tie-break. Downstream
/// reporters truncate for display; the report carries everything.
pub fn ranked_usage(index: &TagUsageIndex) -> Vec<RankedTag> {
    let mut ranked: Vec<RankedTag> = index
        .tags()
        .map(|tag| RankedTag {
            tag: tag.clone(),
            uses: index.usage(tag),
        })
        .collect();
    ranked.sort_by(|a, b| b.uses.cmp(&a.uses).then_with(|| a.tag.cmp(&b.tag)));
    ranked
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub collection: CollectionMetrics,
    pub ranked_usage: Vec<RankedTag>,
    pub strong_associations: Vec<StrongAssociation>,
    pub isolated_tags: Vec<Tag>,
    pub clusters: Vec<Cluster>,
    pub bridges: Vec<BridgeCandidate>,
    pub domain_usage: DomainUsage,
    pub temporal: TemporalTrends,
    pub semantic_groups: Vec<SemanticGroup>,
    pub similar_tags: Vec<SimilarTagPair>,
    pub quality: Vec<QualityScore>,
    pub removal_candidates: Vec<RemovalCandidate>,
    pub standardization: Vec<StandardizationSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_types::DocumentRef;

    #[test]
    fn test_ranked_usage_order() {
        let mut index = TagUsageIndex::default();
        for doc in ["a.md", "b.md"] {
            index.insert("twice_b", DocumentRef::new(doc)).unwrap();
            index.insert("twice_a", DocumentRef::new(doc)).unwrap();
        }
        index.insert("once", DocumentRef::new("a.md")).unwrap();
        let ranked = ranked_usage(&index);
        let order: Vec<&str> = ranked.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(order, vec!["twice_a", "twice_b", "once"]);
    }
}
