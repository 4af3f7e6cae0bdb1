//! Semantic duplicate detection.
//!
//! Three independent strategies propose groups of tags that likely
//! mean the same thing; a greedy merge then picks the winners. The
//! merge runs on a single ordered pass because later acceptance
//! decisions depend on which tags earlier groups already claimed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tag_types::{words, Tag, TagUsageIndex};
use tracing::debug;

use crate::config::SemanticConfig;
use crate::vocabulary::Vocabulary;

/// How a group of candidate duplicates was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStrategy {
    StemMatch,
    SynonymGroup,
    CommonPrefix,
    CommonSuffix,
    CompoundPattern,
}

/// Candidate set of tags that likely refer to one concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticGroup {
    pub strategy: GroupStrategy,

    /// The shared stem, concept, or pattern
    pub key: String,

    pub members: Vec<Tag>,

    /// Combined usage of the members
    pub total_uses: usize,

    /// How reliable the strategy is, in [0, 1]
    pub confidence: f64,
}

/// Derive the grouping stem for a tag.
///
/// The first token longer than 4 chars wins, with a common suffix
/// stripped when more than 3 chars remain. Tags with only short tokens
/// fall back to the first token that is not a skip word, then to their
/// longest token.
fn derive_stem<'a>(tag: &'a str, vocabulary: &Vocabulary) -> (String, Option<&'a str>) {
    let tokens = words(tag);
    // First token wins length ties
    let mut longest: &str = tokens.first().copied().unwrap_or(tag);
    for token in &tokens {
        if token.len() > longest.len() {
            longest = *token;
        }
    }

    let mut root: Option<String> = None;
    for token in &tokens {
        if token.len() > 4 {
            let stripped = vocabulary
                .stem_suffixes
                .iter()
                .find_map(|suffix| {
                    token
                        .strip_suffix(suffix.as_str())
                        .filter(|rest| rest.len() > 3)
                })
                .unwrap_or(*token);
            root = Some(stripped.to_string());
            break;
        }
    }

    let stem = root.unwrap_or_else(|| {
        tokens
            .iter()
            .find(|token| token.len() > 2 && !vocabulary.skip_words.contains(**token))
            .copied()
            .unwrap_or(longest)
            .to_string()
    });
    // Also index under the longest token when it adds signal
    let secondary = (longest != stem && longest.len() > 3).then_some(longest);
    (stem, secondary)
}

/// Group tags sharing a derived stem. Accepted groups claim their
/// members immediately since stems are the strongest signal.
fn stem_groups(
    index: &TagUsageIndex,
    vocabulary: &Vocabulary,
    config: &SemanticConfig,
    claimed: &mut BTreeSet<Tag>,
) -> Vec<SemanticGroup> {
    let mut by_stem: BTreeMap<String, Vec<Tag>> = BTreeMap::new();
    for tag in index.tags() {
        if claimed.contains(tag) {
            continue;
        }
        let (stem, secondary) = derive_stem(tag, vocabulary);
        by_stem.entry(stem.clone()).or_default().push(tag.clone());
        if let Some(longest) = secondary {
            by_stem.entry(longest.to_string()).or_default().push(tag.clone());
        }
    }

    let mut groups = Vec::new();
    for (stem, tags) in by_stem {
        if tags.len() < 2 || stem.len() <= config.min_stem_len {
            continue;
        }
        let members: Vec<Tag> = tags
            .into_iter()
            .filter(|tag| !claimed.contains(tag))
            .collect();
        if members.len() > 1 {
            let total_uses = members.iter().map(|tag| index.usage(tag)).sum();
            claimed.extend(members.iter().cloned());
            groups.push(SemanticGroup {
                strategy: GroupStrategy::StemMatch,
                key: stem,
                members,
                total_uses,
                confidence: config.stem_confidence,
            });
        }
    }
    groups
}

/// Group unclaimed tags under the synonym concepts they mention.
///
/// A tag belongs to a concept when any of its tokens equals a term, or
/// a term is a substring of a token. Groups are capped but do not
/// claim; the merge step decides.
fn synonym_groups(
    index: &TagUsageIndex,
    vocabulary: &Vocabulary,
    config: &SemanticConfig,
    claimed: &BTreeSet<Tag>,
) -> Vec<SemanticGroup> {
    let mut by_concept: BTreeMap<&str, Vec<Tag>> = BTreeMap::new();
    for tag in index.tags() {
        if claimed.contains(tag) {
            continue;
        }
        let tokens = words(tag);
        for (concept, terms) in &vocabulary.synonyms {
            let matched = std::iter::once(concept.as_str())
                .chain(terms.iter().map(String::as_str))
                .any(|term| {
                    tokens
                        .iter()
                        .any(|token| *token == term || token.contains(term))
                });
            if matched {
                by_concept.entry(concept.as_str()).or_default().push(tag.clone());
            }
        }
    }

    let mut groups = Vec::new();
    for (concept, tags) in by_concept {
        if tags.len() > 1 {
            let members: Vec<Tag> = tags.into_iter().take(config.synonym_group_cap).collect();
            let total_uses = members.iter().map(|tag| index.usage(tag)).sum();
            groups.push(SemanticGroup {
                strategy: GroupStrategy::SynonymGroup,
                key: concept.to_string(),
                members,
                total_uses,
                confidence: config.synonym_confidence,
            });
        }
    }
    groups
}

/// Group unclaimed tags by shared prefixes, suffixes and compound
/// token patterns.
fn pattern_groups(
    index: &TagUsageIndex,
    config: &SemanticConfig,
    claimed: &BTreeSet<Tag>,
) -> Vec<SemanticGroup> {
    let mut by_prefix: BTreeMap<String, Vec<Tag>> = BTreeMap::new();
    let mut by_suffix: BTreeMap<String, Vec<Tag>> = BTreeMap::new();
    let mut by_compound: BTreeMap<String, Vec<Tag>> = BTreeMap::new();

    for tag in index.tags() {
        if claimed.contains(tag) {
            continue;
        }
        if tag.len() > config.prefix_min_tag_len {
            for len in &config.prefix_lengths {
                if tag.len() > *len {
                    by_prefix
                        .entry(tag[..*len].to_string())
                        .or_default()
                        .push(tag.clone());
                }
            }
        }
        if tag.len() > config.suffix_min_tag_len {
            for len in &config.suffix_lengths {
                if tag.len() > *len {
                    by_suffix
                        .entry(tag[tag.len() - len..].to_string())
                        .or_default()
                        .push(tag.clone());
                }
            }
        }
        let tokens = words(tag);
        if tokens.len() >= 2 {
            let head = format!("{}_{}", tokens[0], tokens[1]);
            if head.len() > config.compound_min_key_len {
                by_compound.entry(head).or_default().push(tag.clone());
            }
            let tail = format!(
                "{}_{}",
                tokens[tokens.len() - 2],
                tokens[tokens.len() - 1]
            );
            if tail.len() > config.compound_min_key_len {
                by_compound.entry(tail).or_default().push(tag.clone());
            }
        }
    }

    let mut groups = Vec::new();
    let mut collect =
        |map: BTreeMap<String, Vec<Tag>>, strategy: GroupStrategy, confidence: f64| {
            for (key, tags) in map {
                if tags.len() > config.pattern_min_members {
                    let members: Vec<Tag> =
                        tags.into_iter().take(config.pattern_group_cap).collect();
                    let total_uses = members.iter().map(|tag| index.usage(tag)).sum();
                    groups.push(SemanticGroup {
                        strategy,
                        key,
                        members,
                        total_uses,
                        confidence,
                    });
                }
            }
        };
    collect(by_prefix, GroupStrategy::CommonPrefix, config.prefix_confidence);
    collect(by_suffix, GroupStrategy::CommonSuffix, config.suffix_confidence);
    collect(
        by_compound,
        GroupStrategy::CompoundPattern,
        config.compound_confidence,
    );
    groups
}

/// Run all strategies and merge their output into disjoint groups.
///
/// `claimed` carries tags already taken by earlier stages; every tag
/// in an accepted group is added to it. The merge pools the candidate
/// groups, sorts them by confidence, total uses and key, and accepts a
/// group only while at least half of its members are still free. An
/// accepted group keeps only its free members and recomputes its
/// usage. At most `config.max_groups` groups survive.
pub fn detect_duplicates(
    index: &TagUsageIndex,
    vocabulary: &Vocabulary,
    config: &SemanticConfig,
    claimed: &mut BTreeSet<Tag>,
) -> Vec<SemanticGroup> {
    let mut candidates = stem_groups(index, vocabulary, config, claimed);
    candidates.extend(synonym_groups(index, vocabulary, config, claimed));
    candidates.extend(pattern_groups(index, config, claimed));

    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.total_uses.cmp(&a.total_uses))
            .then_with(|| a.strategy.cmp(&b.strategy))
            .then_with(|| a.key.cmp(&b.key))
    });

    // Acceptance uses its own set: strategy-level claims decide what a
    // group may contain, merge-level claims decide which groups win.
    let mut accepted_tags: BTreeSet<Tag> = BTreeSet::new();
    let mut accepted = Vec::new();
    for mut group in candidates {
        let free: Vec<Tag> = group
            .members
            .iter()
            .filter(|tag| !accepted_tags.contains(*tag))
            .cloned()
            .collect();
        if free.len() * 2 >= group.members.len() {
            accepted_tags.extend(free.iter().cloned());
            group.total_uses = free.iter().map(|tag| index.usage(tag)).sum();
            group.members = free;
            accepted.push(group);
            if accepted.len() >= config.max_groups {
                break;
            }
        }
    }

    claimed.extend(accepted_tags);
    debug!(count = accepted.len(), "semantic duplicate groups accepted");
    accepted
}
