//! Per-tag quality scoring and collection-wide metrics.
//!
//! Five sub-scores in [0, 1] combine linearly into an overall score,
//! which buckets each tag into a quality category with concrete
//! curation recommendations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tag_types::{words, Tag, TagUsageIndex};
use tracing::debug;

use crate::config::QualityConfig;
use crate::graph::CoOccurrenceGraph;
use crate::temporal::TemporalProfile;
use crate::vocabulary::Vocabulary;

/// Quality bucket derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCategory {
    High,
    Medium,
    Low,
}

/// Composite quality assessment for one tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScore {
    pub tag: Tag,
    pub usage: f64,
    pub diversity: f64,
    pub clarity: f64,
    pub temporal: f64,
    pub semantic: f64,
    pub overall: f64,
    pub category: QualityCategory,
    pub recommendations: Vec<String>,
    pub uses: usize,
}

/// Score every tag in the index.
///
/// Sub-scores:
/// - usage: uses capped at `config.usage_cap`, linear below
/// - diversity: co-tags with edge weight above
///   `config.diversity_weight_floor`, capped at `config.diversity_cap`
/// - clarity: half a point for a length inside the configured band,
///   half for a word count inside its band
/// - temporal: activity density when the profile holds at least
///   `config.temporal_min_occurrences` dated occurrences, else 0
/// - semantic: 0.3 for a known generic term, 0.5 for a single-use
///   tag, 0.7 for conjunction compounds, 1.0 otherwise
///
/// Results are sorted by overall score descending with the tag name
/// as tie-break.
pub fn score_tags(
    index: &TagUsageIndex,
    graph: &CoOccurrenceGraph,
    profiles: &BTreeMap<Tag, TemporalProfile>,
    vocabulary: &Vocabulary,
    config: &QualityConfig,
) -> Vec<QualityScore> {
    let mut scores = Vec::new();
    for tag in index.tags() {
        let uses = index.usage(tag);

        let usage = (uses as f64 / config.usage_cap as f64).min(1.0);

        let co_tags = graph.degree_above(tag, config.diversity_weight_floor);
        let diversity = (co_tags as f64 / config.diversity_cap as f64).min(1.0);

        let mut clarity = 0.0;
        if (config.clarity_min_len..=config.clarity_max_len).contains(&tag.len()) {
            clarity += 0.5;
        }
        let word_count = words(tag).len();
        if (config.clarity_min_words..=config.clarity_max_words).contains(&word_count) {
            clarity += 0.5;
        }

        let temporal = profiles
            .get(tag)
            .filter(|profile| profile.total >= config.temporal_min_occurrences)
            .map(TemporalProfile::activity_density)
            .unwrap_or(0.0);

        let semantic = if vocabulary.generic_terms.contains(tag.as_str()) {
            0.3
        } else if uses == 1 {
            0.5
        } else if tag.contains("_and_") || tag.contains("_or_") {
            0.7
        } else {
            1.0
        };

        let weights = &config.weights;
        let overall = usage * weights.usage
            + diversity * weights.diversity
            + clarity * weights.clarity
            + temporal * weights.temporal
            + semantic * weights.semantic;

        let mut recommendations = Vec::new();
        let category = if overall >= config.high_threshold {
            recommendations.push("Promote as standard tag".to_string());
            QualityCategory::High
        } else if overall >= config.medium_threshold {
            if usage < 0.3 {
                recommendations.push("Increase usage across more articles".to_string());
            }
            if diversity < 0.3 {
                recommendations.push("Use with more diverse tags".to_string());
            }
            QualityCategory::Medium
        } else {
            if clarity < 0.5 {
                recommendations.push("Consider renaming for clarity".to_string());
            }
            if semantic < 0.5 {
                recommendations.push("Too generic or too specific".to_string());
            }
            if uses < 3 {
                recommendations.push("Consider removing due to low usage".to_string());
            }
            QualityCategory::Low
        };

        scores.push(QualityScore {
            tag: tag.clone(),
            usage,
            diversity,
            clarity,
            temporal,
            semantic,
            overall,
            category,
            recommendations,
            uses,
        });
    }

    scores.sort_by(|a, b| {
        b.overall
            .total_cmp(&a.overall)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    debug!(count = scores.len(), "quality scores computed");
    scores
}

/// Tags bucketed by how often they are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageDistribution {
    /// Exactly one use
    pub single_use: usize,
    /// 2 to 5 uses
    pub rare_use: usize,
    /// 6 to 20 uses
    pub moderate_use: usize,
    /// More than 20 uses
    pub common_use: usize,
}

impl UsageDistribution {
    pub fn from_index(index: &TagUsageIndex) -> Self {
        let mut distribution = Self::default();
        for tag in index.tags() {
            match index.usage(tag) {
                1 => distribution.single_use += 1,
                2..=5 => distribution.rare_use += 1,
                6..=20 => distribution.moderate_use += 1,
                _ => distribution.common_use += 1,
            }
        }
        distribution
    }
}

/// Tags bucketed by quality category. All three buckets are always
/// present so serialized metrics keep a stable shape even when a
/// bucket is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl QualityDistribution {
    pub fn from_scores(scores: &[QualityScore]) -> Self {
        let mut distribution = Self::default();
        for score in scores {
            match score.category {
                QualityCategory::High => distribution.high += 1,
                QualityCategory::Medium => distribution.medium += 1,
                QualityCategory::Low => distribution.low += 1,
            }
        }
        distribution
    }
}

/// Collection-wide health metrics. Every ratio falls back to zero
/// when its denominator is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionMetrics {
    pub total_documents: usize,
    pub total_unique_tags: usize,
    pub total_tag_uses: usize,
    pub avg_tags_per_document: f64,
    pub tag_density: f64,
    pub tag_reuse_ratio: f64,
    pub usage_distribution: UsageDistribution,
    pub quality_distribution: QualityDistribution,
}

/// Compute collection metrics from the index and the quality scores.
pub fn collection_metrics(
    index: &TagUsageIndex,
    scores: &[QualityScore],
) -> CollectionMetrics {
    let total_documents = index.document_count();
    let total_unique_tags = index.len();
    let total_tag_uses = index.total_uses();

    CollectionMetrics {
        total_documents,
        total_unique_tags,
        total_tag_uses,
        avg_tags_per_document: ratio(total_tag_uses, total_documents),
        tag_density: ratio(total_unique_tags, total_documents),
        tag_reuse_ratio: ratio(total_tag_uses, total_unique_tags),
        usage_distribution: UsageDistribution::from_index(index),
        quality_distribution: QualityDistribution::from_scores(scores),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemporalConfig;
    use crate::temporal::build_profiles;
    use tag_types::DocumentRef;

    fn score_one(index: &TagUsageIndex, tag: &str) -> QualityScore {
        let graph = CoOccurrenceGraph::build(index);
        let profiles = build_profiles(index, 2026, &TemporalConfig::default());
        let scores = score_tags(
            index,
            &graph,
            &profiles,
            &Vocabulary::default(),
            &QualityConfig::default(),
        );
        scores.into_iter().find(|s| s.tag == tag).unwrap()
    }

    #[test]
    fn test_usage_score_saturates() {
        let mut index = TagUsageIndex::default();
        for i in 0..25 {
            index
                .insert("popular_topic", DocumentRef::new(format!("d{i}.md")))
                .unwrap();
        }
        let score = score_one(&index, "popular_topic");
        assert!((score.usage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_clarity_band() {
        let mut index = TagUsageIndex::default();
        index.insert("good_tag", DocumentRef::new("a.md")).unwrap();
        index.insert("ab", DocumentRef::new("a.md")).unwrap();
        // 9 chars, 2 words: both clarity halves
        assert!((score_one(&index, "good_tag").clarity - 1.0).abs() < 1e-9);
        // 2 chars: length fails, word count passes
        assert!((score_one(&index, "ab").clarity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_temporal_requires_three_dated_uses() {
        let mut index = TagUsageIndex::default();
        for (i, year) in [2020, 2022].iter().enumerate() {
            index
                .insert("thin_history", DocumentRef::with_year(format!("d{i}.md"), *year))
                .unwrap();
        }
        for (i, year) in [2020, 2021, 2022].iter().enumerate() {
            index
                .insert("solid_history", DocumentRef::with_year(format!("e{i}.md"), *year))
                .unwrap();
        }
        assert!((score_one(&index, "thin_history").temporal - 0.0).abs() < 1e-9);
        assert!((score_one(&index, "solid_history").temporal - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_semantic_penalties() {
        let mut index = TagUsageIndex::default();
        index.insert("research", DocumentRef::new("a.md")).unwrap();
        index.insert("research", DocumentRef::new("b.md")).unwrap();
        index.insert("once_only", DocumentRef::new("a.md")).unwrap();
        index
            .insert("teaching_and_learning", DocumentRef::new("a.md"))
            .unwrap();
        index
            .insert("teaching_and_learning", DocumentRef::new("b.md"))
            .unwrap();
        assert!((score_one(&index, "research").semantic - 0.3).abs() < 1e-9);
        assert!((score_one(&index, "once_only").semantic - 0.5).abs() < 1e-9);
        assert!((score_one(&index, "teaching_and_learning").semantic - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_low_quality_recommendations() {
        let mut index = TagUsageIndex::default();
        // Generic term, used twice: clarity is fine but the semantic
        // and usage checks both fire
        for doc in ["a.md", "b.md"] {
            index.insert("research", DocumentRef::new(doc)).unwrap();
        }
        // Over-long multi-word tag: the renaming check fires
        let unwieldy = "very_long_tag_name_exceeding_thirty_chars";
        for doc in ["a.md", "b.md"] {
            index.insert(unwieldy, DocumentRef::new(doc)).unwrap();
        }
        let score = score_one(&index, "research");
        assert_eq!(score.category, QualityCategory::Low);
        assert!(score
            .recommendations
            .contains(&"Too generic or too specific".to_string()));
        assert!(score
            .recommendations
            .contains(&"Consider removing due to low usage".to_string()));

        let score = score_one(&index, unwieldy);
        assert_eq!(score.category, QualityCategory::Low);
        assert!(score
            .recommendations
            .contains(&"Consider renaming for clarity".to_string()));
    }

    #[test]
    fn test_scores_sorted_by_overall() {
        let mut index = TagUsageIndex::default();
        for i in 0..12 {
            index
                .insert("strong_tag", DocumentRef::new(format!("d{i}.md")))
                .unwrap();
        }
        index.insert("x", DocumentRef::new("d0.md")).unwrap();
        let graph = CoOccurrenceGraph::build(&index);
        let scores = score_tags(
            &index,
            &graph,
            &BTreeMap::new(),
            &Vocabulary::default(),
            &QualityConfig::default(),
        );
        assert_eq!(scores[0].tag, "strong_tag");
        assert!(scores.windows(2).all(|w| w[0].overall >= w[1].overall));
    }

    #[test]
    fn test_usage_distribution_buckets() {
        let mut index = TagUsageIndex::default();
        index.insert("once", DocumentRef::new("a.md")).unwrap();
        for i in 0..3 {
            index
                .insert("rare", DocumentRef::new(format!("r{i}.md")))
                .unwrap();
        }
        for i in 0..10 {
            index
                .insert("moderate", DocumentRef::new(format!("m{i}.md")))
                .unwrap();
        }
        for i in 0..21 {
            index
                .insert("common", DocumentRef::new(format!("c{i}.md")))
                .unwrap();
        }
        let distribution = UsageDistribution::from_index(&index);
        assert_eq!(
            distribution,
            UsageDistribution {
                single_use: 1,
                rare_use: 1,
                moderate_use: 1,
                common_use: 1,
            }
        );
    }

    #[test]
    fn test_collection_metrics_ratios() {
        let mut index = TagUsageIndex::default();
        for doc in ["a.md", "b.md"] {
            index.insert("shared", DocumentRef::new(doc)).unwrap();
        }
        index.insert("solo_tag", DocumentRef::new("a.md")).unwrap();
        let metrics = collection_metrics(&index, &[]);
        assert_eq!(metrics.total_documents, 2);
        assert_eq!(metrics.total_unique_tags, 2);
        assert_eq!(metrics.total_tag_uses, 3);
        assert!((metrics.avg_tags_per_document - 1.5).abs() < 1e-9);
        assert!((metrics.tag_density - 1.0).abs() < 1e-9);
        assert!((metrics.tag_reuse_ratio - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_quality_distribution_keeps_empty_buckets() {
        let mut index = TagUsageIndex::default();
        index.insert("x", DocumentRef::new("a.md")).unwrap();
        let graph = CoOccurrenceGraph::build(&index);
        let scores = score_tags(
            &index,
            &graph,
            &BTreeMap::new(),
            &Vocabulary::default(),
            &QualityConfig::default(),
        );
        let metrics = collection_metrics(&index, &scores);
        let value = serde_json::to_value(&metrics.quality_distribution).unwrap();
        // All three buckets serialize even when empty
        assert_eq!(value["high"], 0);
        assert_eq!(value["medium"], 0);
        assert_eq!(value["low"], 1);
    }

    #[test]
    fn test_empty_index_metrics_are_zero() {
        let index = TagUsageIndex::default();
        let metrics = collection_metrics(&index, &[]);
        assert!((metrics.avg_tags_per_document - 0.0).abs() < 1e-9);
        assert!((metrics.tag_reuse_ratio - 0.0).abs() < 1e-9);
    }
}
