//! Tag co-occurrence graph.
//!
//! An undirected weighted graph where an edge's weight is the number
//! of documents carrying both tags. Built once from an index snapshot
//! and shared read-only by the downstream detectors.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tag_types::{Tag, TagUsageIndex};
use tracing::debug;

use crate::config::AssociationConfig;

/// Undirected co-occurrence counts between tags.
///
/// Both directions of every edge are stored so neighbor lookups are a
/// single map access. Adjacency lists iterate in lexicographic order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoOccurrenceGraph {
    adjacency: BTreeMap<Tag, BTreeMap<Tag, u32>>,
}

impl CoOccurrenceGraph {
    /// Build the graph from every document's tag set.
    pub fn build(index: &TagUsageIndex) -> Self {
        let mut graph = Self::default();
        for (_, tags) in index.document_tags() {
            let tags: Vec<&&Tag> = tags.iter().collect();
            for i in 0..tags.len() {
                for j in (i + 1)..tags.len() {
                    graph.add_pair(tags[i], tags[j]);
                }
            }
        }
        debug!(tags = graph.adjacency.len(), "co-occurrence graph built");
        graph
    }

    /// Record one co-occurrence of `a` and `b`. Self-pairs are ignored.
    pub fn add_pair(&mut self, a: &Tag, b: &Tag) {
        if a == b {
            return;
        }
        *self
            .adjacency
            .entry(a.clone())
            .or_default()
            .entry(b.clone())
            .or_insert(0) += 1;
        *self
            .adjacency
            .entry(b.clone())
            .or_default()
            .entry(a.clone())
            .or_insert(0) += 1;
    }

    /// Edge weight between two tags, zero when no edge exists.
    pub fn weight(&self, a: &str, b: &str) -> u32 {
        self.adjacency
            .get(a)
            .and_then(|neighbors| neighbors.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Neighbors of `tag` with their edge weights, in lexicographic
    /// order. Empty when the tag has no edges.
    pub fn neighbors(&self, tag: &str) -> impl Iterator<Item = (&Tag, u32)> {
        self.adjacency
            .get(tag)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(t, w)| (t, *w)))
    }

    /// Number of neighbors with edge weight strictly above `floor`.
    pub fn degree_above(&self, tag: &str, floor: u32) -> usize {
        self.neighbors(tag).filter(|(_, w)| *w > floor).count()
    }

    /// Tags that have at least one edge.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.adjacency.keys()
    }
}

/// One unusually strong pairing between two tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrongAssociation {
    pub tag_a: Tag,
    pub tag_b: Tag,
    /// Documents carrying both tags
    pub weight: u32,
    /// weight divided by the usage of `tag_a`
    pub strength: f64,
}

/// Find tag pairs whose co-occurrence is strong relative to usage.
///
/// Each unordered pair is reported once, from the side that produced
/// the higher strength (ties resolve to the lexicographically earlier
/// source tag). Results are sorted by strength descending, then by
/// `tag_a`, then `tag_b`, and capped at `config.max_associations`.
pub fn strong_associations(
    index: &TagUsageIndex,
    graph: &CoOccurrenceGraph,
    config: &AssociationConfig,
) -> Vec<StrongAssociation> {
    let mut associations = Vec::new();
    for tag in index.tags() {
        let usage = index.usage(tag);
        if usage <= config.min_usage {
            continue;
        }
        for (co_tag, weight) in graph.neighbors(tag) {
            if weight <= config.min_weight {
                continue;
            }
            let strength = f64::from(weight) / usage as f64;
            if strength > config.min_strength {
                associations.push(StrongAssociation {
                    tag_a: tag.clone(),
                    tag_b: co_tag.clone(),
                    weight,
                    strength,
                });
            }
        }
    }

    associations.sort_by(|a, b| {
        b.strength
            .total_cmp(&a.strength)
            .then_with(|| a.tag_a.cmp(&b.tag_a))
            .then_with(|| a.tag_b.cmp(&b.tag_b))
    });

    // Keep the first appearance of each unordered pair
    let mut seen: BTreeSet<(Tag, Tag)> = BTreeSet::new();
    let mut deduped = Vec::new();
    for assoc in associations {
        let key = if assoc.tag_a <= assoc.tag_b {
            (assoc.tag_a.clone(), assoc.tag_b.clone())
        } else {
            (assoc.tag_b.clone(), assoc.tag_a.clone())
        };
        if seen.insert(key) {
            deduped.push(assoc);
            if deduped.len() >= config.max_associations {
                break;
            }
        }
    }
    deduped
}

/// Find moderately used tags that almost never appear with others.
///
/// A tag is isolated when its usage strictly exceeds
/// `config.isolated_min_usage` yet fewer than
/// `config.isolated_max_partners` of its co-tags have an edge weight
/// above one. Results are sorted lexicographically.
pub fn isolated_tags(
    index: &TagUsageIndex,
    graph: &CoOccurrenceGraph,
    config: &AssociationConfig,
) -> Vec<Tag> {
    index
        .tags()
        .filter(|tag| {
            index.usage(tag) > config.isolated_min_usage
                && graph.degree_above(tag, 1) < config.isolated_max_partners
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_types::DocumentRef;

    fn index_from(docs: &[(&str, &[&str])]) -> TagUsageIndex {
        let mut index = TagUsageIndex::default();
        for (doc, tags) in docs {
            for tag in *tags {
                index.insert(tag, DocumentRef::new(*doc)).unwrap();
            }
        }
        index
    }

    #[test]
    fn test_build_counts_pairs() {
        let index = index_from(&[
            ("a.md", &["rust", "parsing", "compilers"]),
            ("b.md", &["rust", "parsing"]),
        ]);
        let graph = CoOccurrenceGraph::build(&index);
        assert_eq!(graph.weight("rust", "parsing"), 2);
        assert_eq!(graph.weight("parsing", "rust"), 2);
        assert_eq!(graph.weight("rust", "compilers"), 1);
        assert_eq!(graph.weight("rust", "async"), 0);
    }

    #[test]
    fn test_add_pair_ignores_self() {
        let mut graph = CoOccurrenceGraph::default();
        let tag = "rust".to_string();
        graph.add_pair(&tag, &tag);
        assert_eq!(graph.weight("rust", "rust"), 0);
    }

    #[test]
    fn test_neighbors_sorted() {
        let index = index_from(&[("a.md", &["zebra", "rust", "alpha"])]);
        let graph = CoOccurrenceGraph::build(&index);
        let neighbors: Vec<&Tag> = graph.neighbors("rust").map(|(t, _)| t).collect();
        assert_eq!(neighbors, vec!["alpha", "zebra"]);
    }

    #[test]
    fn test_degree_above() {
        let index = index_from(&[
            ("a.md", &["rust", "parsing"]),
            ("b.md", &["rust", "parsing"]),
            ("c.md", &["rust", "compilers"]),
        ]);
        let graph = CoOccurrenceGraph::build(&index);
        assert_eq!(graph.degree_above("rust", 0), 2);
        assert_eq!(graph.degree_above("rust", 1), 1);
    }

    #[test]
    fn test_strong_associations_respect_thresholds() {
        // "alpha" used 8 times, 4 of them with "beta": strength 0.5
        let mut docs: Vec<(String, Vec<&str>)> = Vec::new();
        for i in 0..4 {
            docs.push((format!("ab{i}.md"), vec!["alpha", "beta"]));
        }
        for i in 0..4 {
            docs.push((format!("a{i}.md"), vec!["alpha"]));
        }
        for i in 0..2 {
            docs.push((format!("b{i}.md"), vec!["beta"]));
        }
        let mut index = TagUsageIndex::default();
        for (doc, tags) in &docs {
            for tag in tags {
                index.insert(tag, DocumentRef::new(doc)).unwrap();
            }
        }
        let graph = CoOccurrenceGraph::build(&index);
        let config = AssociationConfig::default();
        let associations = strong_associations(&index, &graph, &config);
        assert_eq!(associations.len(), 1);
        assert_eq!(associations[0].tag_a, "alpha");
        assert_eq!(associations[0].tag_b, "beta");
        assert_eq!(associations[0].weight, 4);
        assert!((associations[0].strength - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_strong_associations_dedupe_unordered_pairs() {
        // Both sides qualify; only one row should survive
        let mut index = TagUsageIndex::default();
        for i in 0..6 {
            index
                .insert("alpha", DocumentRef::new(format!("d{i}.md")))
                .unwrap();
            index
                .insert("beta", DocumentRef::new(format!("d{i}.md")))
                .unwrap();
        }
        let graph = CoOccurrenceGraph::build(&index);
        let associations = strong_associations(&index, &graph, &AssociationConfig::default());
        assert_eq!(associations.len(), 1);
    }

    #[test]
    fn test_isolated_tags() {
        let mut index = TagUsageIndex::default();
        // "loner" used 4 times, never alongside anything twice
        for i in 0..4 {
            index
                .insert("loner", DocumentRef::new(format!("l{i}.md")))
                .unwrap();
        }
        // "social" used 4 times, always with two steady partners
        for i in 0..4 {
            for tag in ["social", "friend", "buddy"] {
                index
                    .insert(tag, DocumentRef::new(format!("s{i}.md")))
                    .unwrap();
            }
        }
        let graph = CoOccurrenceGraph::build(&index);
        let config = AssociationConfig::default();
        let isolated = isolated_tags(&index, &graph, &config);
        assert_eq!(isolated, vec!["loner".to_string()]);
    }
}
