//! Bridge tag detection and per-domain usage breakdown.
//!
//! A bridge tag is one whose co-occurring tags span three or more
//! topical domains, suggesting it acts as a conceptual hub between
//! otherwise separate areas of the collection. The usage breakdown
//! assigns every tag to the domains it matches and summarizes how
//! usage distributes across them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tag_types::{Tag, TagUsageIndex};
use tracing::debug;

use crate::config::{BridgeConfig, DomainUsageConfig};
use crate::graph::CoOccurrenceGraph;
use crate::report::RankedTag;
use crate::vocabulary::Vocabulary;

/// A tag connecting several topical domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeCandidate {
    pub tag: Tag,

    /// Domains reached through the co-occurring tags
    pub connected_domains: BTreeSet<String>,

    /// Per-domain sum of co-occurrence weights of the matching co-tags
    pub domain_strengths: BTreeMap<String, u32>,

    /// Mean domain strength over the connected domains
    pub bridge_strength: f64,

    /// Total number of distinct co-occurring tags
    pub connection_count: usize,

    pub uses: usize,
}

impl BridgeCandidate {
    pub fn domain_count(&self) -> usize {
        self.connected_domains.len()
    }
}

/// Find tags whose neighbors span at least `config.min_domains`
/// domains of the vocabulary.
///
/// Each co-tag contributes its edge weight exactly once per domain it
/// matches, even when it matches a domain by both a keyword and a
/// pattern. Results are sorted by domain count, bridge strength and
/// uses, all descending, with the tag name as the final ascending
/// tie-break, then capped at `config.max_candidates`.
pub fn detect_bridges(
    index: &TagUsageIndex,
    graph: &CoOccurrenceGraph,
    vocabulary: &Vocabulary,
    config: &BridgeConfig,
) -> Vec<BridgeCandidate> {
    let mut candidates = Vec::new();
    for tag in index.tags() {
        let uses = index.usage(tag);
        if uses < config.min_usage {
            continue;
        }

        let mut domain_strengths: BTreeMap<String, u32> = BTreeMap::new();
        let mut connection_count = 0;
        for (co_tag, weight) in graph.neighbors(tag) {
            connection_count += 1;
            for domain in vocabulary.matching_domains(co_tag) {
                *domain_strengths.entry(domain.to_string()).or_insert(0) += weight;
            }
        }

        if domain_strengths.len() >= config.min_domains {
            let total: u32 = domain_strengths.values().sum();
            let bridge_strength = f64::from(total) / domain_strengths.len() as f64;
            candidates.push(BridgeCandidate {
                tag: tag.clone(),
                connected_domains: domain_strengths.keys().cloned().collect(),
                domain_strengths,
                bridge_strength,
                connection_count,
                uses,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.domain_count()
            .cmp(&a.domain_count())
            .then_with(|| b.bridge_strength.total_cmp(&a.bridge_strength))
            .then_with(|| b.uses.cmp(&a.uses))
            .then_with(|| a.tag.cmp(&b.tag))
    });
    candidates.truncate(config.max_candidates);
    debug!(count = candidates.len(), "bridge candidates detected");
    candidates
}

/// Usage totals for one domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainStats {
    /// Summed usage of all tags assigned to the domain
    pub total_uses: usize,

    pub unique_tags: usize,

    /// Most used tags of the domain, uses descending
    pub top_tags: Vec<RankedTag>,

    /// Share of all categorized uses, in percent
    pub percentage: f64,
}

/// A tag assigned to more than one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossDomainTag {
    pub tag: Tag,
    pub domains: BTreeSet<String>,
    pub uses: usize,
}

/// Per-domain usage breakdown of the whole collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainUsage {
    pub domains: BTreeMap<String, DomainStats>,

    /// Well-used tags matching no domain. Its percentage stays 0
    /// since it is outside the categorized total.
    pub uncategorized: DomainStats,

    /// Tags matching several domains, most domains first
    pub cross_domain_tags: Vec<CrossDomainTag>,

    /// Share of tags assigned to at least one domain, in percent
    pub categorization_rate: f64,
}

/// Break collection usage down by vocabulary domain.
///
/// A tag counts towards every domain it matches, so the categorized
/// total weighs cross-domain tags once per domain. Unassigned tags
/// used strictly more often than `config.uncategorized_min_uses` are
/// collected separately.
pub fn domain_usage(
    index: &TagUsageIndex,
    vocabulary: &Vocabulary,
    config: &DomainUsageConfig,
) -> DomainUsage {
    let mut per_domain: BTreeMap<String, Vec<(Tag, usize)>> = BTreeMap::new();
    let mut uncategorized_tags: Vec<(Tag, usize)> = Vec::new();
    let mut cross_domain_tags: Vec<CrossDomainTag> = Vec::new();
    let mut categorized_count = 0usize;

    for tag in index.tags() {
        let uses = index.usage(tag);
        let matched = vocabulary.matching_domains(tag);
        if matched.is_empty() {
            if uses > config.uncategorized_min_uses {
                uncategorized_tags.push((tag.clone(), uses));
            }
            continue;
        }
        categorized_count += 1;
        for domain in &matched {
            per_domain
                .entry((*domain).to_string())
                .or_default()
                .push((tag.clone(), uses));
        }
        if matched.len() > 1 {
            cross_domain_tags.push(CrossDomainTag {
                tag: tag.clone(),
                domains: matched.iter().map(|d| (*d).to_string()).collect(),
                uses,
            });
        }
    }

    let total_categorized: usize = per_domain
        .values()
        .map(|tags| tags.iter().map(|(_, uses)| uses).sum::<usize>())
        .sum();

    let mut domains = BTreeMap::new();
    for (name, tags) in per_domain {
        domains.insert(
            name,
            domain_stats(tags, total_categorized, config.max_top_tags),
        );
    }
    let uncategorized = domain_stats(uncategorized_tags, 0, config.max_top_tags);

    cross_domain_tags.sort_by(|a, b| {
        b.domains
            .len()
            .cmp(&a.domains.len())
            .then_with(|| a.tag.cmp(&b.tag))
    });
    cross_domain_tags.truncate(config.max_cross_domain);

    let categorization_rate = if index.is_empty() {
        0.0
    } else {
        categorized_count as f64 / index.len() as f64 * 100.0
    };

    debug!(
        domains = domains.len(),
        cross_domain = cross_domain_tags.len(),
        "domain usage computed"
    );
    DomainUsage {
        domains,
        uncategorized,
        cross_domain_tags,
        categorization_rate,
    }
}

fn domain_stats(
    mut tags: Vec<(Tag, usize)>,
    total_categorized: usize,
    max_top_tags: usize,
) -> DomainStats {
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let total_uses: usize = tags.iter().map(|(_, uses)| *uses).sum();
    let unique_tags = tags.len();
    let percentage = if total_categorized > 0 {
        total_uses as f64 / total_categorized as f64 * 100.0
    } else {
        0.0
    };
    tags.truncate(max_top_tags);
    DomainStats {
        total_uses,
        unique_tags,
        top_tags: tags
            .into_iter()
            .map(|(tag, uses)| RankedTag { tag, uses })
            .collect(),
        percentage,
    }
}
