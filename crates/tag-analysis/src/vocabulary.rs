//! Domain and synonym vocabulary.
//!
//! The detectors are driven entirely by this structure, so swapping a
//! research-education vocabulary for, say, a software-engineering one
//! is a data change rather than a code change. The built-in default
//! targets academic literature collections; `load` reads a replacement
//! from a TOML file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;

/// One topical domain: keyword substrings plus prefix/suffix patterns
/// applied to the raw tag string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainDef {
    /// Tags containing any of these belong to the domain
    #[serde(default)]
    pub keywords: BTreeSet<String>,

    /// Tags starting with any of these belong to the domain
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// Tags ending with any of these belong to the domain
    #[serde(default)]
    pub suffixes: Vec<String>,
}

impl DomainDef {
    /// Whether `tag` matches this domain by keyword or pattern.
    pub fn matches(&self, tag: &str) -> bool {
        self.keywords.iter().any(|k| tag.contains(k.as_str()))
            || self.prefixes.iter().any(|p| tag.starts_with(p.as_str()))
            || self.suffixes.iter().any(|s| tag.ends_with(s.as_str()))
    }
}

/// Full vocabulary bundle for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Research domains, keyed by display name
    #[serde(default)]
    pub domains: BTreeMap<String, DomainDef>,

    /// Concept name to related terms, for synonym grouping
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,

    /// Suffixes stripped during stem derivation, longest first
    #[serde(default)]
    pub stem_suffixes: Vec<String>,

    /// Words skipped when picking a representative token
    #[serde(default)]
    pub skip_words: BTreeSet<String>,

    /// Common words that make a whole tag worthless
    #[serde(default)]
    pub generic_words: BTreeSet<String>,

    /// Terms too vague to score well semantically
    #[serde(default)]
    pub generic_terms: BTreeSet<String>,

    /// Known variant spellings mapped to their canonical form
    #[serde(default)]
    pub canonical: BTreeMap<String, String>,
}

impl Vocabulary {
    /// Parse a vocabulary from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, AnalysisError> {
        let vocabulary: Vocabulary = toml::from_str(text)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Load a vocabulary from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading vocabulary");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject vocabularies the detectors cannot use sensibly.
    fn validate(&self) -> Result<(), AnalysisError> {
        for (name, def) in &self.domains {
            if def.keywords.is_empty() && def.prefixes.is_empty() && def.suffixes.is_empty() {
                return Err(AnalysisError::InvalidVocabulary(format!(
                    "domain '{name}' has no keywords or patterns"
                )));
            }
        }
        for (concept, terms) in &self.synonyms {
            if terms.is_empty() {
                return Err(AnalysisError::InvalidVocabulary(format!(
                    "synonym concept '{concept}' has no terms"
                )));
            }
        }
        for (variant, target) in &self.canonical {
            if variant == target {
                return Err(AnalysisError::InvalidVocabulary(format!(
                    "canonical mapping '{variant}' points at itself"
                )));
            }
        }
        Ok(())
    }

    /// Names of all domains `tag` matches, in sorted order.
    pub fn matching_domains(&self, tag: &str) -> Vec<&str> {
        self.domains
            .iter()
            .filter(|(_, def)| def.matches(tag))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Canonical form for `tag`, if a mapping exists.
    pub fn canonical_form(&self, tag: &str) -> Option<&str> {
        self.canonical.get(tag).map(String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            domains: default_domains(),
            synonyms: default_synonyms(),
            stem_suffixes: strs(&[
                "tion", "ment", "ness", "ing", "ity", "est", "ed", "er", "ly",
            ]),
            skip_words: str_set(&["the", "a", "an", "in", "on", "at", "to", "for"]),
            generic_words: str_set(&[
                "the", "and", "or", "in", "on", "at", "to", "for", "of", "with", "new", "old",
                "good", "bad", "big", "small", "more", "less", "yes", "no", "true", "false",
                "article", "paper", "study", "research",
            ]),
            generic_terms: str_set(&[
                "research", "study", "paper", "article", "new", "good", "bad", "thing",
            ]),
            canonical: default_canonical(),
        }
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn str_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn domain(keywords: &[&str], prefixes: &[&str], suffixes: &[&str]) -> DomainDef {
    DomainDef {
        keywords: str_set(keywords),
        prefixes: strs(prefixes),
        suffixes: strs(suffixes),
    }
}

fn default_domains() -> BTreeMap<String, DomainDef> {
    let mut domains = BTreeMap::new();
    domains.insert(
        "education".to_string(),
        domain(
            &[
                "learning",
                "education",
                "pedagogy",
                "teaching",
                "student",
                "classroom",
                "curriculum",
                "instruction",
                "school",
                "academic",
            ],
            &["edu", "teach"],
            &["education", "learning"],
        ),
    );
    domains.insert(
        "ai".to_string(),
        domain(
            &[
                "ai",
                "artificial",
                "machine",
                "intelligence",
                "algorithm",
                "automated",
                "computational",
                "neural",
                "deep",
                "generative",
            ],
            &["ai", "ml", "intelligent"],
            &["ai", "learning"],
        ),
    );
    domains.insert(
        "research".to_string(),
        domain(
            &[
                "research",
                "method",
                "study",
                "analysis",
                "theory",
                "framework",
                "investigation",
                "empirical",
                "qualitative",
                "quantitative",
            ],
            &["research"],
            &["research", "method", "analysis", "study"],
        ),
    );
    domains.insert(
        "professional".to_string(),
        domain(
            &[
                "teacher",
                "professional",
                "development",
                "training",
                "practice",
                "competency",
                "faculty",
                "educator",
                "instructor",
            ],
            &["professional", "teacher"],
            &["development", "training"],
        ),
    );
    domains.insert(
        "social".to_string(),
        domain(
            &[
                "social",
                "online",
                "community",
                "collaborative",
                "network",
                "interaction",
                "communication",
                "virtual",
                "digital",
                "media",
            ],
            &["social", "online", "digital"],
            &["community", "network"],
        ),
    );
    domains.insert(
        "technology".to_string(),
        domain(
            &[
                "technology",
                "tech",
                "digital",
                "computer",
                "software",
                "platform",
                "tool",
                "system",
                "application",
                "interface",
            ],
            &["tech", "digital", "computer"],
            &["technology", "system"],
        ),
    );
    domains.insert(
        "assessment".to_string(),
        domain(
            &[
                "assessment",
                "evaluation",
                "testing",
                "measurement",
                "feedback",
                "grading",
                "performance",
                "outcome",
                "rubric",
            ],
            &["assess", "evaluat"],
            &["assessment", "evaluation"],
        ),
    );
    domains.insert(
        "cognitive".to_string(),
        domain(
            &[
                "cognitive",
                "thinking",
                "metacognition",
                "knowledge",
                "understanding",
                "reasoning",
                "problem",
                "critical",
                "creative",
            ],
            &["cognit", "meta"],
            &["thinking", "knowledge"],
        ),
    );
    domains
}

fn default_synonyms() -> BTreeMap<String, Vec<String>> {
    let mut synonyms = BTreeMap::new();
    synonyms.insert(
        "education".to_string(),
        strs(&[
            "teaching",
            "learning",
            "pedagogy",
            "instruction",
            "educational",
            "didactic",
            "scholastic",
            "academic",
            "schooling",
        ]),
    );
    synonyms.insert(
        "assessment".to_string(),
        strs(&[
            "evaluation",
            "testing",
            "grading",
            "examination",
            "appraisal",
            "measurement",
            "scoring",
            "judgment",
            "review",
        ]),
    );
    synonyms.insert(
        "technology".to_string(),
        strs(&[
            "tech",
            "digital",
            "computer",
            "it",
            "technological",
            "computational",
            "electronic",
            "software",
            "hardware",
        ]),
    );
    synonyms.insert(
        "research".to_string(),
        strs(&[
            "study",
            "investigation",
            "analysis",
            "inquiry",
            "examination",
            "exploration",
            "survey",
            "review",
            "experiment",
        ]),
    );
    synonyms.insert(
        "professional".to_string(),
        strs(&[
            "teacher",
            "educator",
            "faculty",
            "instructor",
            "practitioner",
            "expert",
            "specialist",
            "mentor",
            "coach",
        ]),
    );
    synonyms.insert(
        "development".to_string(),
        strs(&[
            "training",
            "growth",
            "improvement",
            "advancement",
            "progress",
            "evolution",
            "enhancement",
            "cultivation",
            "formation",
        ]),
    );
    synonyms.insert(
        "online".to_string(),
        strs(&[
            "virtual",
            "remote",
            "distance",
            "digital",
            "web",
            "internet",
            "cyber",
            "electronic",
            "networked",
        ]),
    );
    synonyms.insert(
        "student".to_string(),
        strs(&[
            "learner",
            "pupil",
            "scholar",
            "trainee",
            "apprentice",
            "disciple",
            "mentee",
            "participant",
        ]),
    );
    synonyms.insert(
        "artificial".to_string(),
        strs(&[
            "ai",
            "machine",
            "automated",
            "synthetic",
            "computational",
            "algorithmic",
            "robotic",
            "intelligent",
        ]),
    );
    synonyms.insert(
        "collaborative".to_string(),
        strs(&[
            "cooperative",
            "joint",
            "shared",
            "collective",
            "team",
            "group",
            "mutual",
            "participatory",
        ]),
    );
    synonyms.insert(
        "cognitive".to_string(),
        strs(&[
            "thinking",
            "mental",
            "intellectual",
            "reasoning",
            "thought",
            "mind",
            "brain",
            "psychological",
        ]),
    );
    synonyms.insert(
        "knowledge".to_string(),
        strs(&[
            "understanding",
            "comprehension",
            "awareness",
            "expertise",
            "wisdom",
            "insight",
            "information",
            "learning",
        ]),
    );
    synonyms
}

fn default_canonical() -> BTreeMap<String, String> {
    [
        ("higher_ed", "higher_education"),
        ("higher-education", "higher_education"),
        ("university", "higher_education"),
        ("k12", "k_12"),
        ("k-12", "k_12"),
        ("ai", "artificial_intelligence"),
        ("ml", "machine_learning"),
        ("dl", "deep_learning"),
        ("llm", "large_language_models"),
        ("llms", "large_language_models"),
        ("genai", "generative_ai"),
        ("gen_ai", "generative_ai"),
        ("e-learning", "online_learning"),
        ("elearning", "online_learning"),
        ("distance_learning", "online_learning"),
        ("mooc", "moocs"),
        ("massive_open_online_courses", "moocs"),
        ("lit_review", "literature_review"),
        ("systematic_literature_review", "systematic_review"),
        ("meta-analysis", "meta_analysis"),
        ("case-study", "case_study"),
        ("ict", "information_communication_technology"),
        ("hci", "human_computer_interaction"),
        ("ux", "user_experience"),
        ("ui", "user_interface"),
        ("pd", "professional_development"),
        ("cpd", "continuing_professional_development"),
    ]
    .iter()
    .map(|(variant, target)| (variant.to_string(), target.to_string()))
    .collect()
}
