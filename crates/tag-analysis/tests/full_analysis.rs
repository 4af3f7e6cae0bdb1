//! End-to-end runs of the full analysis pipeline.

use std::collections::BTreeSet;

use tag_analysis::{
    AnalysisConfig, AnalysisOrchestrator, CoOccurrenceGraph, QualityCategory, SuggestionReason,
    Vocabulary,
};
use tag_types::{DocumentRef, TagUsageIndex};

const CURRENT_YEAR: i32 = 2024;

fn orchestrator() -> AnalysisOrchestrator {
    AnalysisOrchestrator::with_current_year(
        AnalysisConfig::default(),
        Vocabulary::default(),
        CURRENT_YEAR,
    )
}

/// A moderately rich corpus exercising every stage at once.
fn sample_index() -> TagUsageIndex {
    let mut index = TagUsageIndex::default();
    let mut add = |tag: &str, doc: &str| {
        index.insert(tag, DocumentRef::new(doc)).unwrap();
    };

    // A tight cluster around machine_learning
    for i in 0..10 {
        let doc = format!("ml{i}.md");
        add("machine_learning", &doc);
        if i < 6 {
            add("neural_networks", &doc);
        }
        if i < 5 {
            add("deep_learning", &doc);
        }
        if i < 5 {
            add("ai_ethics", &doc);
        }
        if i < 5 {
            add("classroom_practice", &doc);
        }
        if i < 5 {
            add("teaching_online", &doc);
        }
        if i < 5 {
            add("rubric_design", &doc);
        }
    }
    // Variants and noise
    add("k12", "k.md");
    add("x", "noise.md");
    add("once_used_tag", "noise.md");
    for i in 0..4 {
        add("standalone", &format!("alone{i}.md"));
    }
    index
}

#[test]
fn test_cooccurrence_weight_counts_shared_documents() {
    let mut index = TagUsageIndex::default();
    for i in 0..5 {
        let doc = format!("d{i}.md");
        index.insert("ai", DocumentRef::new(&doc)).unwrap();
        index.insert("education", DocumentRef::new(&doc)).unwrap();
    }
    let graph = CoOccurrenceGraph::build(&index);
    assert_eq!(graph.weight("ai", "education"), 5);
    assert_eq!(graph.weight("education", "ai"), 5);
}

#[test]
fn test_steady_usage_classified_stable() {
    let mut index = TagUsageIndex::default();
    let mut doc = 0;
    for year in 2019..=2023 {
        for _ in 0..2 {
            index
                .insert("online_learning", DocumentRef::with_year(format!("d{doc}.md"), year))
                .unwrap();
            doc += 1;
        }
    }
    let report = orchestrator().analyze(&index);
    assert_eq!(report.temporal.stable.len(), 1);
    let stable = &report.temporal.stable[0];
    assert_eq!(stable.tag, "online_learning");
    assert!((stable.activity_density - 1.0).abs() < 1e-9);
    assert!(report.temporal.emerging.is_empty());
    assert!(report.temporal.declining.is_empty());
}

#[test]
fn test_variant_without_canonical_suggests_rename() {
    let mut index = TagUsageIndex::default();
    index.insert("k12", DocumentRef::new("a.md")).unwrap();
    let report = orchestrator().analyze(&index);
    let suggestion = report
        .standardization
        .iter()
        .find(|s| s.current == "k12")
        .unwrap();
    assert_eq!(suggestion.suggested, "k_12");
    assert_eq!(suggestion.reason, SuggestionReason::Standardization);
}

#[test]
fn test_one_letter_tag_flagged_too_generic_first() {
    let mut index = TagUsageIndex::default();
    index.insert("x", DocumentRef::new("a.md")).unwrap();
    let report = orchestrator().analyze(&index);
    let flagged: Vec<_> = report
        .removal_candidates
        .iter()
        .filter(|c| c.tag == "x")
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(
        serde_json::to_value(flagged[0].category).unwrap(),
        serde_json::json!("too_generic")
    );
}

#[test]
fn test_bridge_tag_across_three_domains() {
    let mut index = TagUsageIndex::default();
    let mut doc = 0;
    let mut add_docs = |tags: &[&str], count: usize, index: &mut TagUsageIndex| {
        for _ in 0..count {
            let name = format!("d{doc}.md");
            for tag in tags {
                index.insert(tag, DocumentRef::new(&name)).unwrap();
            }
            doc += 1;
        }
    };
    // "t" in 10 documents total; per-domain co-tag weights 4, 6, 2
    add_docs(&["t", "neural_probe", "classroom_ideas"], 4, &mut index);
    add_docs(&["t", "classroom_ideas"], 2, &mut index);
    add_docs(&["t", "rubric_sheets"], 2, &mut index);
    add_docs(&["t"], 2, &mut index);

    let report = orchestrator().analyze(&index);
    let bridge = report.bridges.iter().find(|b| b.tag == "t").unwrap();
    assert_eq!(bridge.domain_count(), 3);
    let domains: Vec<&str> = bridge
        .connected_domains
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(domains, vec!["ai", "assessment", "education"]);
    assert_eq!(bridge.domain_strengths["ai"], 4);
    assert_eq!(bridge.domain_strengths["education"], 6);
    assert_eq!(bridge.domain_strengths["assessment"], 2);
    assert!((bridge.bridge_strength - 4.0).abs() < 1e-9);
    assert_eq!(bridge.uses, 10);
}

#[test]
fn test_repeated_runs_serialize_identically() {
    let index = sample_index();
    let orchestrator = orchestrator();
    let first = serde_json::to_vec(&orchestrator.analyze(&index)).unwrap();
    let second = serde_json::to_vec(&orchestrator.analyze(&index)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_no_tag_in_two_clusters() {
    let report = orchestrator().analyze(&sample_index());
    let mut seen = BTreeSet::new();
    for cluster in &report.clusters {
        assert!(seen.insert(cluster.seed.clone()));
        for member in &cluster.members {
            assert!(seen.insert(member.clone()), "{member} in two clusters");
        }
    }
}

#[test]
fn test_semantic_groups_disjoint() {
    let report = orchestrator().analyze(&sample_index());
    let mut seen = BTreeSet::new();
    for group in &report.semantic_groups {
        for member in &group.members {
            assert!(seen.insert(member.clone()), "{member} in two groups");
        }
    }
}

#[test]
fn test_quality_scores_bounded_and_categorized() {
    let report = orchestrator().analyze(&sample_index());
    assert!(!report.quality.is_empty());
    for score in &report.quality {
        assert!(score.overall >= 0.0 && score.overall <= 1.0, "{}", score.tag);
        match score.category {
            QualityCategory::High => assert!(score.overall >= 0.7),
            QualityCategory::Medium => assert!(score.overall >= 0.5 && score.overall < 0.7),
            QualityCategory::Low => assert!(score.overall < 0.5),
        }
    }
}

#[test]
fn test_temporal_categories_exclusive() {
    let mut index = TagUsageIndex::default();
    let mut doc = 0;
    let mut add_years = |tag: &str, years: &[i32], index: &mut TagUsageIndex| {
        for year in years {
            index
                .insert(tag, DocumentRef::with_year(format!("d{doc}.md"), *year))
                .unwrap();
            doc += 1;
        }
    };
    add_years("surging", &[2022, 2023, 2023, 2024, 2024], &mut index);
    add_years("fading", &[2005, 2005, 2006, 2007, 2010], &mut index);
    add_years("steady", &[2020, 2021, 2022, 2023, 2024], &mut index);
    add_years("cyclic", &[2014, 2014, 2018, 2018, 2022, 2022], &mut index);

    let report = orchestrator().analyze(&index);
    let mut assigned = BTreeSet::new();
    for tag in report.temporal.emerging.iter().map(|t| &t.tag) {
        assert!(assigned.insert(tag.clone()));
    }
    for tag in report.temporal.declining.iter().map(|t| &t.tag) {
        assert!(assigned.insert(tag.clone()));
    }
    for tag in report.temporal.stable.iter().map(|t| &t.tag) {
        assert!(assigned.insert(tag.clone()));
    }
    for tag in report.temporal.periodic.iter().map(|t| &t.tag) {
        assert!(assigned.insert(tag.clone()));
    }
    assert_eq!(assigned.len(), 4);
}

#[test]
fn test_collection_metrics_cover_whole_corpus() {
    let index = sample_index();
    let report = orchestrator().analyze(&index);
    assert_eq!(report.collection.total_unique_tags, index.len());
    assert_eq!(report.collection.total_tag_uses, index.total_uses());
    assert_eq!(
        report.ranked_usage.len(),
        report.collection.total_unique_tags
    );
    assert_eq!(report.ranked_usage[0].tag, "machine_learning");
}

#[test]
fn test_near_identical_names_reported() {
    let mut index = sample_index();
    index
        .insert("machine_lerning", DocumentRef::new("typo.md"))
        .unwrap();
    let report = orchestrator().analyze(&index);
    assert!(report
        .similar_tags
        .iter()
        .any(|p| p.tag_a == "machine_learning" && p.tag_b == "machine_lerning"));
    for pair in &report.similar_tags {
        assert!(pair.similarity > 0.85, "{} / {}", pair.tag_a, pair.tag_b);
        assert!(!pair.tag_a.contains(pair.tag_b.as_str()));
        assert!(!pair.tag_b.contains(pair.tag_a.as_str()));
    }
}

#[test]
fn test_domain_usage_percentages_sum_to_whole() {
    let report = orchestrator().analyze(&sample_index());
    let usage = &report.domain_usage;
    assert!(usage.domains["ai"]
        .top_tags
        .iter()
        .any(|t| t.tag == "machine_learning"));
    let total_share: f64 = usage.domains.values().map(|d| d.percentage).sum();
    assert!((total_share - 100.0).abs() < 1e-6);
    assert!(usage.categorization_rate > 0.0 && usage.categorization_rate <= 100.0);
    assert!((usage.uncategorized.percentage - 0.0).abs() < 1e-9);
}
