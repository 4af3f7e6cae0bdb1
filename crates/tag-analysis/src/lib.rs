//! # tag-analysis
//!
//! Tag-relationship analytics over a document collection.
//!
//! Given a [`tag_types::TagUsageIndex`] snapshot, this crate derives
//! co-occurrence structure, related-tag clusters, cross-domain bridge
//! tags, multi-year usage trends, semantic duplicate groups, per-tag
//! quality scores and curation recommendations, assembled into one
//! [`AnalysisReport`].
//!
//! ## Features
//! - Symmetric co-occurrence graph with strong-association mining
//! - Greedy seed-expansion clustering with explicit claimed sets
//! - Bridge tag detection over an injectable domain vocabulary
//! - Temporal trend classification (emerging/declining/stable/periodic)
//! - Three-strategy semantic duplicate detection with greedy merge
//! - Near-duplicate name detection and per-domain usage breakdowns
//! - Weighted composite quality scoring
//! - Removal candidates and standardization suggestions
//!
//! Every stage is a pure function of the snapshot; identical inputs
//! always produce an identical report.

pub mod clusters;
pub mod config;
pub mod domains;
pub mod error;
pub mod graph;
pub mod orchestrator;
pub mod quality;
pub mod removal;
pub mod report;
pub mod semantic;
pub mod similarity;
pub mod standardize;
pub mod temporal;
pub mod vocabulary;

pub use clusters::{detect_clusters, Cluster};
pub use config::{
    AnalysisConfig, AssociationConfig, BridgeConfig, ClusterConfig, DomainUsageConfig,
    QualityConfig, QualityWeights, RemovalConfig, SemanticConfig, SimilarityConfig,
    TemporalConfig,
};
pub use domains::{
    detect_bridges, domain_usage, BridgeCandidate, CrossDomainTag, DomainStats, DomainUsage,
};
pub use error::AnalysisError;
pub use graph::{isolated_tags, strong_associations, CoOccurrenceGraph, StrongAssociation};
pub use orchestrator::AnalysisOrchestrator;
pub use quality::{
    collection_metrics, score_tags, CollectionMetrics, QualityCategory, QualityDistribution,
    QualityScore, UsageDistribution,
};
pub use removal::{find_removal_candidates, RemovalCandidate, RemovalCategory};
pub use report::{ranked_usage, AnalysisReport, RankedTag};
pub use semantic::{detect_duplicates, GroupStrategy, SemanticGroup};
pub use similarity::{find_similar_pairs, SimilarTagPair};
pub use standardize::{suggest_standardizations, StandardizationSuggestion, SuggestionReason};
pub use temporal::{
    build_profiles, classify_trends, DecliningTag, EmergingTag, PeriodicTag, StableTag,
    TemporalProfile, TemporalSummary, TemporalTrends,
};
pub use vocabulary::{DomainDef, Vocabulary};
