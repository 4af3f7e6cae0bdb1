//! Temporal trend classification.
//!
//! Each tag with dated documents gets a year histogram; tags with
//! enough history are sorted into exactly one of four trend
//! categories. The bands are evaluated in strict priority order, so a
//! tag can never appear in two lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tag_types::{Tag, TagUsageIndex, Year};
use tracing::debug;

use crate::config::TemporalConfig;

/// Year histogram for one tag.
///
/// Counts one occurrence per (tag, document) pair; documents without a
/// year, or with a year outside the accepted window, do not appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalProfile {
    pub tag: Tag,
    pub histogram: BTreeMap<Year, usize>,
    pub total: usize,
}

impl TemporalProfile {
    pub fn first_year(&self) -> Option<Year> {
        self.histogram.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<Year> {
        self.histogram.keys().next_back().copied()
    }

    pub fn distinct_years(&self) -> usize {
        self.histogram.len()
    }

    /// Inclusive span from first to last year, zero when empty.
    pub fn year_span(&self) -> i64 {
        match (self.first_year(), self.last_year()) {
            (Some(first), Some(last)) => i64::from(last - first) + 1,
            _ => 0,
        }
    }

    /// Fraction of the span with at least one occurrence, zero when
    /// the profile is empty.
    pub fn activity_density(&self) -> f64 {
        let span = self.year_span();
        if span > 0 {
            self.distinct_years() as f64 / span as f64
        } else {
            0.0
        }
    }

    /// Year with the highest count. Ties resolve to the earliest year.
    pub fn peak(&self) -> Option<(Year, usize)> {
        self.histogram
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(year, count)| (*year, *count))
    }

    /// Occurrences within `window` years of `current_year`, inclusive.
    pub fn recent_count(&self, current_year: Year, window: i32) -> usize {
        self.histogram
            .range(current_year - window..)
            .map(|(_, count)| count)
            .sum()
    }
}

/// Build profiles for every tag with at least one dated document.
///
/// Years outside `[config.min_year, current_year]` are discarded as
/// noise (future-dated files, OCR artifacts).
pub fn build_profiles(
    index: &TagUsageIndex,
    current_year: Year,
    config: &TemporalConfig,
) -> BTreeMap<Tag, TemporalProfile> {
    let mut profiles = BTreeMap::new();
    for (tag, documents) in index.iter() {
        let mut histogram: BTreeMap<Year, usize> = BTreeMap::new();
        for document in documents {
            if let Some(year) = document.year {
                if year >= config.min_year && year <= current_year {
                    *histogram.entry(year).or_insert(0) += 1;
                }
            }
        }
        if !histogram.is_empty() {
            let total = histogram.values().sum();
            profiles.insert(
                tag.clone(),
                TemporalProfile {
                    tag: tag.clone(),
                    histogram,
                    total,
                },
            );
        }
    }
    debug!(count = profiles.len(), "temporal profiles built");
    profiles
}

/// A tag whose usage concentrates in the last few years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergingTag {
    pub tag: Tag,
    pub emergence_strength: f64,
    pub total_uses: usize,
    pub recent_uses: usize,
    pub recent_ratio: f64,
    pub first_year: Year,
    pub last_year: Year,
    pub years_active: usize,
    pub activity_density: f64,
}

/// A tag whose usage has moved into the past.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecliningTag {
    pub tag: Tag,
    pub decline_rate: f64,
    pub total_uses: usize,
    pub recent_uses: usize,
    pub recent_ratio: f64,
    pub peak_year: Year,
    pub peak_count: usize,
    pub years_since_peak: i32,
    pub first_year: Year,
    pub last_year: Year,
}

/// A tag used consistently across its whole span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StableTag {
    pub tag: Tag,
    pub stability_score: f64,
    pub total_uses: usize,
    pub years_active: usize,
    pub activity_density: f64,
    pub first_year: Year,
    pub last_year: Year,
}

/// A tag that resurfaces after multi-year gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodicTag {
    pub tag: Tag,
    pub total_uses: usize,
    pub years_active: usize,
    pub average_gap: f64,
    pub first_year: Year,
    pub last_year: Year,
}

/// Category counts before the per-list caps are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalSummary {
    pub total_profiled: usize,
    pub emerging: usize,
    pub declining: usize,
    pub stable: usize,
    pub periodic: usize,
    pub unclassified: usize,
}

/// Classified trend lists plus the uncapped summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalTrends {
    pub emerging: Vec<EmergingTag>,
    pub declining: Vec<DecliningTag>,
    pub stable: Vec<StableTag>,
    pub periodic: Vec<PeriodicTag>,
    pub summary: TemporalSummary,
}

/// Mean difference between consecutive distinct years, zero for a
/// single-year profile.
fn average_year_gap(profile: &TemporalProfile) -> f64 {
    let years: Vec<Year> = profile.histogram.keys().copied().collect();
    if years.len() < 2 {
        return 0.0;
    }
    let total: i64 = years
        .windows(2)
        .map(|pair| i64::from(pair[1] - pair[0]))
        .sum();
    total as f64 / (years.len() - 1) as f64
}

/// Mean of the consecutive distinct-year gaps strictly greater than
/// one. `None` when no such gap exists.
fn average_dormancy_gap(profile: &TemporalProfile) -> Option<f64> {
    let years: Vec<Year> = profile.histogram.keys().copied().collect();
    let gaps: Vec<i64> = years
        .windows(2)
        .map(|pair| i64::from(pair[1] - pair[0]))
        .filter(|gap| *gap > 1)
        .collect();
    if gaps.is_empty() {
        None
    } else {
        Some(gaps.iter().sum::<i64>() as f64 / gaps.len() as f64)
    }
}

/// Variance of the yearly counts across active years.
fn count_variance(profile: &TemporalProfile) -> f64 {
    let n = profile.distinct_years();
    if n == 0 {
        return 0.0;
    }
    let mean = profile.total as f64 / n as f64;
    profile
        .histogram
        .values()
        .map(|count| {
            let diff = *count as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n as f64
}

/// Classify every profile into at most one trend category.
///
/// Profiles with fewer than `config.min_distinct_years` distinct years
/// or fewer than `config.min_total_occurrences` occurrences stay
/// unclassified. The four bands are tested in order (emerging,
/// declining, stable, periodic); the first hit wins. Each output list
/// is sorted by its defining score with the tag name as the final
/// tie-break, then capped per `config`.
pub fn classify_trends(
    profiles: &BTreeMap<Tag, TemporalProfile>,
    current_year: Year,
    config: &TemporalConfig,
) -> TemporalTrends {
    let mut trends = TemporalTrends::default();
    trends.summary.total_profiled = profiles.len();

    for profile in profiles.values() {
        if profile.distinct_years() < config.min_distinct_years
            || profile.total < config.min_total_occurrences
        {
            trends.summary.unclassified += 1;
            continue;
        }

        // The gates above guarantee a non-empty histogram
        let (Some(first_year), Some(last_year), Some((peak_year, peak_count))) =
            (profile.first_year(), profile.last_year(), profile.peak())
        else {
            trends.summary.unclassified += 1;
            continue;
        };

        let recent_uses = profile.recent_count(current_year, config.recent_window_years);
        let recent_ratio = recent_uses as f64 / profile.total as f64;
        let activity_density = profile.activity_density();

        if recent_ratio > config.emerging_recent_ratio
            && last_year >= current_year - config.recent_window_years
        {
            let avg_gap = average_year_gap(profile);
            trends.emerging.push(EmergingTag {
                tag: profile.tag.clone(),
                emergence_strength: recent_ratio * (1.0 + 1.0 / (avg_gap + 1.0)),
                total_uses: profile.total,
                recent_uses,
                recent_ratio,
                first_year,
                last_year,
                years_active: profile.distinct_years(),
                activity_density,
            });
        } else if recent_ratio < config.declining_recent_ratio
            && peak_year < current_year - config.declining_peak_age_years
        {
            trends.declining.push(DecliningTag {
                tag: profile.tag.clone(),
                decline_rate: 1.0 - recent_ratio,
                total_uses: profile.total,
                recent_uses,
                recent_ratio,
                peak_year,
                peak_count,
                years_since_peak: current_year - peak_year,
                first_year,
                last_year,
            });
        } else if recent_ratio >= config.declining_recent_ratio
            && recent_ratio <= config.emerging_recent_ratio
            && activity_density > config.stable_min_density
        {
            trends.stable.push(StableTag {
                tag: profile.tag.clone(),
                stability_score: 1.0 / (1.0 + count_variance(profile)),
                total_uses: profile.total,
                years_active: profile.distinct_years(),
                activity_density,
                first_year,
                last_year,
            });
        } else if activity_density < config.stable_min_density {
            if let Some(average_gap) = average_dormancy_gap(profile) {
                trends.periodic.push(PeriodicTag {
                    tag: profile.tag.clone(),
                    total_uses: profile.total,
                    years_active: profile.distinct_years(),
                    average_gap,
                    first_year,
                    last_year,
                });
            } else {
                trends.summary.unclassified += 1;
            }
        } else {
            trends.summary.unclassified += 1;
        }
    }

    trends.summary.emerging = trends.emerging.len();
    trends.summary.declining = trends.declining.len();
    trends.summary.stable = trends.stable.len();
    trends.summary.periodic = trends.periodic.len();

    trends.emerging.sort_by(|a, b| {
        b.emergence_strength
            .total_cmp(&a.emergence_strength)
            .then_with(|| b.recent_uses.cmp(&a.recent_uses))
            .then_with(|| a.tag.cmp(&b.tag))
    });
    trends.declining.sort_by(|a, b| {
        b.decline_rate
            .total_cmp(&a.decline_rate)
            .then_with(|| b.years_since_peak.cmp(&a.years_since_peak))
            .then_with(|| a.tag.cmp(&b.tag))
    });
    trends.stable.sort_by(|a, b| {
        b.stability_score
            .total_cmp(&a.stability_score)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    trends.periodic.sort_by(|a, b| {
        b.total_uses
            .cmp(&a.total_uses)
            .then_with(|| a.tag.cmp(&b.tag))
    });

    trends.emerging.truncate(config.max_emerging);
    trends.declining.truncate(config.max_declining);
    trends.stable.truncate(config.max_stable);
    trends.periodic.truncate(config.max_periodic);

    debug!(
        emerging = trends.summary.emerging,
        declining = trends.summary.declining,
        stable = trends.summary.stable,
        periodic = trends.summary.periodic,
        unclassified = trends.summary.unclassified,
        "temporal trends classified"
    );
    trends
}
