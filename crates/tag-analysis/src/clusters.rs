//! Greedy cluster detection over the co-occurrence graph.
//!
//! Highly connected tags become seeds; each seed absorbs the unclaimed
//! neighbors whose edge is strong relative to the seed's usage. A tag
//! belongs to at most one cluster, so detection order is part of the
//! contract: seeds are ranked deterministically and expanded one at a
//! time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tag_types::{Tag, TagUsageIndex};
use tracing::debug;

use crate::config::ClusterConfig;
use crate::graph::CoOccurrenceGraph;

/// A group of tags that consistently appear together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// The highly connected tag the cluster grew from
    pub seed: Tag,

    /// Absorbed neighbors, not including the seed
    pub members: BTreeSet<Tag>,

    /// Combined usage of the seed and all members
    pub total_uses: usize,
}

impl Cluster {
    /// Number of tags in the cluster, seed included.
    pub fn size(&self) -> usize {
        self.members.len() + 1
    }

    /// Whether `tag` is the seed or a member.
    pub fn contains(&self, tag: &str) -> bool {
        self.seed == tag || self.members.contains(tag)
    }
}

/// Detect clusters, claiming each absorbed tag in `claimed`.
///
/// Tags already present in `claimed` are skipped both as seeds and as
/// members; every tag placed in a cluster is added to it. Seed
/// candidates need usage strictly above `config.seed_min_usage` and
/// strictly more than `config.seed_min_neighbors` neighbors whose edge
/// weight exceeds `config.edge_weight_floor`. Candidates are ranked by
/// neighbor count descending, usage descending, then tag ascending,
/// and only the top `config.max_seeds` are expanded. A neighbor joins
/// when its edge weight exceeds the floor and the weight divided by
/// the seed's usage strictly exceeds `config.member_ratio`. Clusters
/// whose total size (seed included) does not strictly exceed
/// `config.min_members` are discarded, releasing nothing: their tags
/// stay claimed, matching the greedy single-pass contract.
pub fn detect_clusters(
    index: &TagUsageIndex,
    graph: &CoOccurrenceGraph,
    config: &ClusterConfig,
    claimed: &mut BTreeSet<Tag>,
) -> Vec<Cluster> {
    let mut candidates: Vec<(Tag, usize, usize)> = index
        .tags()
        .filter(|tag| !claimed.contains(*tag))
        .filter_map(|tag| {
            let usage = index.usage(tag);
            if usage <= config.seed_min_usage {
                return None;
            }
            let neighbors = graph.degree_above(tag, config.edge_weight_floor);
            if neighbors > config.seed_min_neighbors {
                Some((tag.clone(), neighbors, usage))
            } else {
                None
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut clusters = Vec::new();
    for (seed, _, seed_usage) in candidates.into_iter().take(config.max_seeds) {
        if claimed.contains(&seed) {
            continue;
        }
        claimed.insert(seed.clone());

        let mut members = BTreeSet::new();
        for (co_tag, weight) in graph.neighbors(&seed) {
            if claimed.contains(co_tag) || weight <= config.edge_weight_floor {
                continue;
            }
            let ratio = f64::from(weight) / seed_usage as f64;
            if ratio > config.member_ratio {
                members.insert(co_tag.clone());
                claimed.insert(co_tag.clone());
            }
        }

        if members.len() + 1 > config.min_members {
            let total_uses =
                seed_usage + members.iter().map(|tag| index.usage(tag)).sum::<usize>();
            clusters.push(Cluster {
                seed,
                members,
                total_uses,
            });
        }
    }

    clusters.sort_by(|a, b| {
        b.total_uses
            .cmp(&a.total_uses)
            .then_with(|| a.seed.cmp(&b.seed))
    });
    debug!(count = clusters.len(), "clusters detected");
    clusters
}
