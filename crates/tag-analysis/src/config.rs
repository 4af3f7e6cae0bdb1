//! Analysis configuration.
//!
//! Every numeric threshold the heuristics depend on is a named,
//! overridable field with a serde default, so boundary behavior can be
//! tested without rebuilding and deployments can tune the engine
//! without code changes.

use serde::{Deserialize, Serialize};

/// Master configuration for a full analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Co-occurrence association settings
    #[serde(default)]
    pub associations: AssociationConfig,

    /// Cluster detection settings
    #[serde(default)]
    pub clusters: ClusterConfig,

    /// Bridge tag detection settings
    #[serde(default)]
    pub bridges: BridgeConfig,

    /// Domain usage breakdown settings
    #[serde(default)]
    pub domain_usage: DomainUsageConfig,

    /// Temporal trend classification settings
    #[serde(default)]
    pub temporal: TemporalConfig,

    /// Semantic duplicate detection settings
    #[serde(default)]
    pub semantic: SemanticConfig,

    /// Near-duplicate name similarity settings
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Quality scoring settings
    #[serde(default)]
    pub quality: QualityConfig,

    /// Removal candidate settings
    #[serde(default)]
    pub removal: RemovalConfig,
}

/// Strong-association and isolation thresholds over the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationConfig {
    /// Only analyze tags used strictly more often than this
    #[serde(default = "default_assoc_min_usage")]
    pub min_usage: usize,

    /// Edge weight must strictly exceed this
    #[serde(default = "default_assoc_min_weight")]
    pub min_weight: u32,

    /// weight / usage must strictly exceed this
    #[serde(default = "default_assoc_min_strength")]
    pub min_strength: f64,

    /// Maximum associations reported
    #[serde(default = "default_max_associations")]
    pub max_associations: usize,

    /// Isolation check: tags used strictly more often than this...
    #[serde(default = "default_isolated_min_usage")]
    pub isolated_min_usage: usize,

    /// ...with fewer than this many co-tags of weight > 1 are isolated
    #[serde(default = "default_isolated_max_partners")]
    pub isolated_max_partners: usize,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            min_usage: default_assoc_min_usage(),
            min_weight: default_assoc_min_weight(),
            min_strength: default_assoc_min_strength(),
            max_associations: default_max_associations(),
            isolated_min_usage: default_isolated_min_usage(),
            isolated_max_partners: default_isolated_max_partners(),
        }
    }
}

fn default_assoc_min_usage() -> usize {
    5
}
fn default_assoc_min_weight() -> u32 {
    3
}
fn default_assoc_min_strength() -> f64 {
    0.3
}
fn default_max_associations() -> usize {
    30
}
fn default_isolated_min_usage() -> usize {
    3
}
fn default_isolated_max_partners() -> usize {
    2
}

/// Greedy seed-expansion clustering thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Seeds must be used strictly more often than this
    #[serde(default = "default_seed_min_usage")]
    pub seed_min_usage: usize,

    /// Seeds need strictly more qualifying neighbors than this
    #[serde(default = "default_seed_min_neighbors")]
    pub seed_min_neighbors: usize,

    /// A neighbor qualifies when the edge weight strictly exceeds this
    #[serde(default = "default_cluster_edge_floor")]
    pub edge_weight_floor: u32,

    /// Expand only the top N ranked seeds
    #[serde(default = "default_max_seeds")]
    pub max_seeds: usize,

    /// Member edge weight / seed usage must strictly exceed this
    #[serde(default = "default_member_ratio")]
    pub member_ratio: f64,

    /// Clusters must end up with strictly more members than this
    #[serde(default = "default_min_members")]
    pub min_members: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            seed_min_usage: default_seed_min_usage(),
            seed_min_neighbors: default_seed_min_neighbors(),
            edge_weight_floor: default_cluster_edge_floor(),
            max_seeds: default_max_seeds(),
            member_ratio: default_member_ratio(),
            min_members: default_min_members(),
        }
    }
}

fn default_seed_min_usage() -> usize {
    5
}
fn default_seed_min_neighbors() -> usize {
    5
}
fn default_cluster_edge_floor() -> u32 {
    3
}
fn default_max_seeds() -> usize {
    10
}
fn default_member_ratio() -> f64 {
    0.4
}
fn default_min_members() -> usize {
    2
}

/// Bridge tag detection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Minimum usage (inclusive) for a bridge candidate
    #[serde(default = "default_bridge_min_usage")]
    pub min_usage: usize,

    /// Minimum number of connected domains (inclusive)
    #[serde(default = "default_min_domains")]
    pub min_domains: usize,

    /// Maximum candidates reported
    #[serde(default = "default_max_bridges")]
    pub max_candidates: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            min_usage: default_bridge_min_usage(),
            min_domains: default_min_domains(),
            max_candidates: default_max_bridges(),
        }
    }
}

fn default_bridge_min_usage() -> usize {
    5
}
fn default_min_domains() -> usize {
    3
}
fn default_max_bridges() -> usize {
    15
}

/// Per-domain usage breakdown thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainUsageConfig {
    /// Unassigned tags used strictly more often than this land in the
    /// uncategorized bucket
    #[serde(default = "default_uncategorized_min_uses")]
    pub uncategorized_min_uses: usize,

    /// Top tags listed per domain
    #[serde(default = "default_max_top_tags")]
    pub max_top_tags: usize,

    /// Maximum cross-domain tags reported
    #[serde(default = "default_max_cross_domain")]
    pub max_cross_domain: usize,
}

impl Default for DomainUsageConfig {
    fn default() -> Self {
        Self {
            uncategorized_min_uses: default_uncategorized_min_uses(),
            max_top_tags: default_max_top_tags(),
            max_cross_domain: default_max_cross_domain(),
        }
    }
}

fn default_uncategorized_min_uses() -> usize {
    2
}
fn default_max_top_tags() -> usize {
    8
}
fn default_max_cross_domain() -> usize {
    10
}

/// Temporal trend classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalConfig {
    /// Years earlier than this are treated as noise
    #[serde(default = "default_min_year")]
    pub min_year: i32,

    /// Classification requires at least this many distinct years
    #[serde(default = "default_min_distinct_years")]
    pub min_distinct_years: usize,

    /// Classification requires at least this many total occurrences
    #[serde(default = "default_min_total_occurrences")]
    pub min_total_occurrences: usize,

    /// "Recent" means within this many years of the current year
    #[serde(default = "default_recent_window")]
    pub recent_window_years: i32,

    /// Emerging: recent ratio strictly above this
    #[serde(default = "default_emerging_ratio")]
    pub emerging_recent_ratio: f64,

    /// Declining: recent ratio strictly below this
    #[serde(default = "default_declining_ratio")]
    pub declining_recent_ratio: f64,

    /// Declining: peak year strictly older than current - this
    #[serde(default = "default_declining_peak_age")]
    pub declining_peak_age_years: i32,

    /// Stable: activity density strictly above this
    #[serde(default = "default_stable_density")]
    pub stable_min_density: f64,

    /// Caps for each reported list
    #[serde(default = "default_max_emerging")]
    pub max_emerging: usize,
    #[serde(default = "default_max_declining")]
    pub max_declining: usize,
    #[serde(default = "default_max_stable")]
    pub max_stable: usize,
    #[serde(default = "default_max_periodic")]
    pub max_periodic: usize,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            min_distinct_years: default_min_distinct_years(),
            min_total_occurrences: default_min_total_occurrences(),
            recent_window_years: default_recent_window(),
            emerging_recent_ratio: default_emerging_ratio(),
            declining_recent_ratio: default_declining_ratio(),
            declining_peak_age_years: default_declining_peak_age(),
            stable_min_density: default_stable_density(),
            max_emerging: default_max_emerging(),
            max_declining: default_max_declining(),
            max_stable: default_max_stable(),
            max_periodic: default_max_periodic(),
        }
    }
}

fn default_min_year() -> i32 {
    1990
}
fn default_min_distinct_years() -> usize {
    3
}
fn default_min_total_occurrences() -> usize {
    5
}
fn default_recent_window() -> i32 {
    2
}
fn default_emerging_ratio() -> f64 {
    0.7
}
fn default_declining_ratio() -> f64 {
    0.3
}
fn default_declining_peak_age() -> i32 {
    3
}
fn default_stable_density() -> f64 {
    0.5
}
fn default_max_emerging() -> usize {
    15
}
fn default_max_declining() -> usize {
    15
}
fn default_max_stable() -> usize {
    10
}
fn default_max_periodic() -> usize {
    10
}

/// Semantic duplicate detection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// Strategy confidences, highest wins ties in the merge
    #[serde(default = "default_stem_confidence")]
    pub stem_confidence: f64,
    #[serde(default = "default_synonym_confidence")]
    pub synonym_confidence: f64,
    #[serde(default = "default_prefix_confidence")]
    pub prefix_confidence: f64,
    #[serde(default = "default_suffix_confidence")]
    pub suffix_confidence: f64,
    #[serde(default = "default_compound_confidence")]
    pub compound_confidence: f64,

    /// Stems shorter than or equal to this are discarded
    #[serde(default = "default_min_stem_len")]
    pub min_stem_len: usize,

    /// Synonym groups are capped at this many members
    #[serde(default = "default_synonym_group_cap")]
    pub synonym_group_cap: usize,

    /// Pattern groups are capped at this many members
    #[serde(default = "default_pattern_group_cap")]
    pub pattern_group_cap: usize,

    /// Prefix keys span these lengths; only tags strictly longer than
    /// `prefix_min_tag_len` participate
    #[serde(default = "default_prefix_lengths")]
    pub prefix_lengths: Vec<usize>,
    #[serde(default = "default_prefix_min_tag_len")]
    pub prefix_min_tag_len: usize,

    /// Suffix keys span these lengths; only tags strictly longer than
    /// `suffix_min_tag_len` participate
    #[serde(default = "default_suffix_lengths")]
    pub suffix_lengths: Vec<usize>,
    #[serde(default = "default_suffix_min_tag_len")]
    pub suffix_min_tag_len: usize,

    /// Compound keys must be strictly longer than this
    #[serde(default = "default_compound_min_key_len")]
    pub compound_min_key_len: usize,

    /// Pattern groups need strictly more unclaimed members than this
    #[serde(default = "default_pattern_min_members")]
    pub pattern_min_members: usize,

    /// Maximum accepted groups after the merge
    #[serde(default = "default_max_groups")]
    pub max_groups: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            stem_confidence: default_stem_confidence(),
            synonym_confidence: default_synonym_confidence(),
            prefix_confidence: default_prefix_confidence(),
            suffix_confidence: default_suffix_confidence(),
            compound_confidence: default_compound_confidence(),
            min_stem_len: default_min_stem_len(),
            synonym_group_cap: default_synonym_group_cap(),
            pattern_group_cap: default_pattern_group_cap(),
            prefix_lengths: default_prefix_lengths(),
            prefix_min_tag_len: default_prefix_min_tag_len(),
            suffix_lengths: default_suffix_lengths(),
            suffix_min_tag_len: default_suffix_min_tag_len(),
            compound_min_key_len: default_compound_min_key_len(),
            pattern_min_members: default_pattern_min_members(),
            max_groups: default_max_groups(),
        }
    }
}

fn default_stem_confidence() -> f64 {
    0.8
}
fn default_synonym_confidence() -> f64 {
    0.7
}
fn default_prefix_confidence() -> f64 {
    0.6
}
fn default_suffix_confidence() -> f64 {
    0.6
}
fn default_compound_confidence() -> f64 {
    0.65
}
fn default_min_stem_len() -> usize {
    2
}
fn default_synonym_group_cap() -> usize {
    10
}
fn default_pattern_group_cap() -> usize {
    8
}
fn default_prefix_lengths() -> Vec<usize> {
    vec![5, 6, 7]
}
fn default_prefix_min_tag_len() -> usize {
    8
}
fn default_suffix_lengths() -> Vec<usize> {
    vec![4, 5, 6]
}
fn default_suffix_min_tag_len() -> usize {
    7
}
fn default_compound_min_key_len() -> usize {
    4
}
fn default_pattern_min_members() -> usize {
    2
}
fn default_max_groups() -> usize {
    20
}

/// Near-duplicate tag name detection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Pairs score strictly above this normalized edit similarity
    #[serde(default = "default_similarity_threshold")]
    pub threshold: f64,

    /// Maximum pairs reported
    #[serde(default = "default_max_pairs")]
    pub max_pairs: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: default_similarity_threshold(),
            max_pairs: default_max_pairs(),
        }
    }
}

fn default_similarity_threshold() -> f64 {
    0.85
}
fn default_max_pairs() -> usize {
    20
}

/// Linear weights for the composite quality score. They sum to 1.0 by
/// default; callers overriding them are responsible for keeping the
/// sum at 1.0 so `overall` stays in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityWeights {
    #[serde(default = "default_usage_weight")]
    pub usage: f64,
    #[serde(default = "default_diversity_weight")]
    pub diversity: f64,
    #[serde(default = "default_clarity_weight")]
    pub clarity: f64,
    #[serde(default = "default_temporal_weight")]
    pub temporal: f64,
    #[serde(default = "default_semantic_weight")]
    pub semantic: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            usage: default_usage_weight(),
            diversity: default_diversity_weight(),
            clarity: default_clarity_weight(),
            temporal: default_temporal_weight(),
            semantic: default_semantic_weight(),
        }
    }
}

fn default_usage_weight() -> f64 {
    0.25
}
fn default_diversity_weight() -> f64 {
    0.25
}
fn default_clarity_weight() -> f64 {
    0.20
}
fn default_temporal_weight() -> f64 {
    0.15
}
fn default_semantic_weight() -> f64 {
    0.15
}

/// Quality scoring thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Composite score weights
    #[serde(default)]
    pub weights: QualityWeights,

    /// Usage sub-score saturates at this many uses
    #[serde(default = "default_usage_cap")]
    pub usage_cap: usize,

    /// Diversity sub-score saturates at this many co-tags
    #[serde(default = "default_diversity_cap")]
    pub diversity_cap: usize,

    /// Co-tags only count towards diversity above this edge weight
    #[serde(default = "default_diversity_weight_floor")]
    pub diversity_weight_floor: u32,

    /// Clarity length band (inclusive)
    #[serde(default = "default_clarity_min_len")]
    pub clarity_min_len: usize,
    #[serde(default = "default_clarity_max_len")]
    pub clarity_max_len: usize,

    /// Clarity word-count band (inclusive)
    #[serde(default = "default_clarity_min_words")]
    pub clarity_min_words: usize,
    #[serde(default = "default_clarity_max_words")]
    pub clarity_max_words: usize,

    /// Temporal sub-score requires this many dated occurrences
    #[serde(default = "default_temporal_min_occurrences")]
    pub temporal_min_occurrences: usize,

    /// Category thresholds (inclusive lower bounds)
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            weights: QualityWeights::default(),
            usage_cap: default_usage_cap(),
            diversity_cap: default_diversity_cap(),
            diversity_weight_floor: default_diversity_weight_floor(),
            clarity_min_len: default_clarity_min_len(),
            clarity_max_len: default_clarity_max_len(),
            clarity_min_words: default_clarity_min_words(),
            clarity_max_words: default_clarity_max_words(),
            temporal_min_occurrences: default_temporal_min_occurrences(),
            high_threshold: default_high_threshold(),
            medium_threshold: default_medium_threshold(),
        }
    }
}

fn default_usage_cap() -> usize {
    10
}
fn default_diversity_cap() -> usize {
    20
}
fn default_diversity_weight_floor() -> u32 {
    1
}
fn default_clarity_min_len() -> usize {
    5
}
fn default_clarity_max_len() -> usize {
    30
}
fn default_clarity_min_words() -> usize {
    1
}
fn default_clarity_max_words() -> usize {
    3
}
fn default_temporal_min_occurrences() -> usize {
    3
}
fn default_high_threshold() -> f64 {
    0.7
}
fn default_medium_threshold() -> f64 {
    0.5
}

/// Removal candidate thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalConfig {
    /// Tags strictly shorter than this are too generic
    #[serde(default = "default_min_tag_len")]
    pub min_tag_len: usize,

    /// Single-use tags strictly longer than this are too specific
    #[serde(default = "default_too_specific_len")]
    pub too_specific_len: usize,

    /// Tags used at most this often are low value
    #[serde(default = "default_low_value_max_uses")]
    pub low_value_max_uses: usize,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            min_tag_len: default_min_tag_len(),
            too_specific_len: default_too_specific_len(),
            low_value_max_uses: default_low_value_max_uses(),
        }
    }
}

fn default_min_tag_len() -> usize {
    3
}
fn default_too_specific_len() -> usize {
    30
}
fn default_low_value_max_uses() -> usize {
    2
}
