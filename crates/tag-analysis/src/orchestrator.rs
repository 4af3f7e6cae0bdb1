//! Runs every analysis stage and assembles the report.

use std::collections::BTreeSet;

use chrono::Datelike;
use tag_types::{Tag, TagUsageIndex, Year};
use tracing::{info, instrument};

use crate::clusters::detect_clusters;
use crate::config::AnalysisConfig;
use crate::domains::{detect_bridges, domain_usage};
use crate::graph::{isolated_tags, strong_associations, CoOccurrenceGraph};
use crate::quality::{collection_metrics, score_tags};
use crate::removal::find_removal_candidates;
use crate::report::{ranked_usage, AnalysisReport};
use crate::semantic::detect_duplicates;
use crate::similarity::find_similar_pairs;
use crate::standardize::suggest_standardizations;
use crate::temporal::{build_profiles, classify_trends};
use crate::vocabulary::Vocabulary;

/// Drives a full analysis run over one index snapshot.
///
/// The stages are pure functions; the orchestrator fixes their order
/// and wires shared inputs (graph, profiles, claimed sets) between
/// them. Runs are idempotent: the same snapshot, configuration and
/// current year always produce an identical report.
#[derive(Debug, Clone)]
pub struct AnalysisOrchestrator {
    config: AnalysisConfig,
    vocabulary: Vocabulary,
    current_year: Year,
}

impl AnalysisOrchestrator {
    /// Orchestrator with the wall-clock year.
    pub fn new(config: AnalysisConfig, vocabulary: Vocabulary) -> Self {
        Self::with_current_year(config, vocabulary, chrono::Utc::now().year())
    }

    /// Orchestrator with a pinned current year, for reproducible runs
    /// and tests.
    pub fn with_current_year(
        config: AnalysisConfig,
        vocabulary: Vocabulary,
        current_year: Year,
    ) -> Self {
        Self {
            config,
            vocabulary,
            current_year,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Run every stage over `index` and assemble the report.
    #[instrument(skip_all, fields(tags = index.len(), documents = index.document_count()))]
    pub fn analyze(&self, index: &TagUsageIndex) -> AnalysisReport {
        info!("starting analysis");

        let graph = CoOccurrenceGraph::build(index);
        let associations = strong_associations(index, &graph, &self.config.associations);
        let isolated = isolated_tags(index, &graph, &self.config.associations);

        let mut cluster_claimed: BTreeSet<Tag> = BTreeSet::new();
        let clusters = detect_clusters(index, &graph, &self.config.clusters, &mut cluster_claimed);

        let bridges = detect_bridges(index, &graph, &self.vocabulary, &self.config.bridges);
        let domain_usage = domain_usage(index, &self.vocabulary, &self.config.domain_usage);

        let profiles = build_profiles(index, self.current_year, &self.config.temporal);
        let temporal = classify_trends(&profiles, self.current_year, &self.config.temporal);

        let mut semantic_claimed: BTreeSet<Tag> = BTreeSet::new();
        let semantic_groups = detect_duplicates(
            index,
            &self.vocabulary,
            &self.config.semantic,
            &mut semantic_claimed,
        );
        let similar_tags = find_similar_pairs(index, &self.config.similarity);

        let quality = score_tags(index, &graph, &profiles, &self.vocabulary, &self.config.quality);
        let collection = collection_metrics(index, &quality);

        let removal_candidates = find_removal_candidates(
            index,
            &semantic_groups,
            &self.vocabulary,
            &self.config.removal,
        );
        let standardization = suggest_standardizations(index, &self.vocabulary);

        info!(
            clusters = clusters.len(),
            bridges = bridges.len(),
            semantic_groups = semantic_groups.len(),
            removal_candidates = removal_candidates.len(),
            "analysis complete"
        );

        AnalysisReport {
            collection,
            ranked_usage: ranked_usage(index),
            strong_associations: associations,
            isolated_tags: isolated,
            clusters,
            bridges,
            domain_usage,
            temporal,
            semantic_groups,
            similar_tags,
            quality,
            removal_candidates,
            standardization,
        }
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default(), Vocabulary::default())
    }
}
