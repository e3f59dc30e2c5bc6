//! Progressive Overload Advisor
//!
//! Looks at one exercise's logged weights and recommends the next session's
//! target weight, with a rationale and a confidence tier.
//!
//! Key rules:
//! - History is re-sorted newest-first before anything else
//! - Trend only compares the latest 3 sessions against the 3 before them;
//!   older history feeds max/min/average but not trend
//! - Success rate = share of the trailing window at or above the window average
//! - Decision is first-match: increase, hold, then back off (never below zero)
//! - Bad records fail the whole call; empty history is not an error

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AdvisorSettings;
use crate::error::{InvalidData, Result};
use crate::models::{WeightHistoryEntry, WeightUnit};

/// Relative slack for float noise when an entry equals the window average
const AVERAGE_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
/// Confidence Tier: how sure the advisor is about the suggestion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// Consistent lifts and a non-negative trend: add load
    High,
    /// Mostly consistent: hold load
    Medium,
    /// Inconsistent: back off
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    fn rationale(&self) -> &'static str {
        match self {
            Self::High => "consistent performance, progressive overload recommended",
            Self::Medium => "maintain current load, build consistency",
            Self::Low => "reduce load to rebuild consistent form",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
/// Weight Stats
// ---------------------------------------------------------------------------

/// Descriptive statistics over an exercise history. All zero for an empty
/// history, which the UI should treat as "no data".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub max: f64,
    pub min: f64,
    pub average: f64,
    /// Percent change of the recent half of the trend window vs the older half
    pub trend_percent: f64,
    /// Highest Epley estimate across all entries
    pub best_estimated_one_rep_max: f64,
}

pub fn compute_stats(entries: &[WeightHistoryEntry]) -> Result<WeightStats> {
    compute_stats_with(entries, &AdvisorSettings::default())
}

pub fn compute_stats_with(
    entries: &[WeightHistoryEntry],
    settings: &AdvisorSettings,
) -> Result<WeightStats> {
    settings.validate()?;
    let sorted = newest_first(entries)?;
    Ok(stats_from_sorted(&sorted, settings.trend_window_half))
}

fn stats_from_sorted(sorted: &[&WeightHistoryEntry], trend_half: usize) -> WeightStats {
    if sorted.is_empty() {
        return WeightStats::default();
    }

    let max = sorted.iter().map(|e| e.weight).fold(f64::MIN, f64::max);
    let min = sorted.iter().map(|e| e.weight).fold(f64::MAX, f64::min);
    let best_estimated_one_rep_max = sorted
        .iter()
        .map(|e| estimated_one_rep_max(e))
        .fold(0.0, f64::max);

    WeightStats {
        max,
        min,
        average: mean_weight(sorted),
        trend_percent: trend_percent(sorted, trend_half),
        best_estimated_one_rep_max,
    }
}

/// Needs two full halves; shorter histories report a flat trend.
fn trend_percent(sorted: &[&WeightHistoryEntry], half: usize) -> f64 {
    match half.checked_mul(2) {
        Some(needed) if sorted.len() >= needed => {}
        _ => return 0.0,
    }

    let recent = mean_weight(&sorted[..half]);
    let previous = mean_weight(&sorted[half..half * 2]);

    // Bodyweight-only history
    if previous == 0.0 {
        return 0.0;
    }

    (recent - previous) / previous * 100.0
}

fn mean_weight(entries: &[&WeightHistoryEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|e| e.weight).sum::<f64>() / entries.len() as f64
}

// ---------------------------------------------------------------------------
/// Next-Weight Suggestion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub weight: f64,
    pub unit: WeightUnit,
    pub rationale: String,
    pub confidence: ConfidenceTier,
    pub success_rate_percent: f64,
    pub trend_percent: f64,
    /// Size of the trailing window the success rate was taken over
    pub sessions_analyzed: usize,
}

/// Suggest the next target weight with the stock policy.
///
/// Returns `Ok(None)` for an empty history. A single entry lands in the high
/// tier: it trivially matches its own average and nothing contradicts it.
pub fn suggest_next_weight(entries: &[WeightHistoryEntry]) -> Result<Option<Suggestion>> {
    suggest_next_weight_with(entries, &AdvisorSettings::default())
}

pub fn suggest_next_weight_with(
    entries: &[WeightHistoryEntry],
    settings: &AdvisorSettings,
) -> Result<Option<Suggestion>> {
    settings.validate()?;
    let sorted = newest_first(entries)?;

    let Some(last) = sorted.first() else {
        return Ok(None);
    };

    let window = &sorted[..sorted.len().min(settings.success_window)];
    let success_rate_percent = success_rate(window);
    let trend_percent = trend_percent(&sorted, settings.trend_window_half);

    let confidence = if success_rate_percent >= settings.high_success_threshold && trend_percent >= 0.0 {
        ConfidenceTier::High
    } else if success_rate_percent >= settings.medium_success_threshold {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    };

    let increment = settings.increment_for(last.weight_unit);
    let weight = match confidence {
        ConfidenceTier::High => last.weight + increment,
        ConfidenceTier::Medium => last.weight,
        ConfidenceTier::Low => (last.weight - increment).max(0.0),
    };

    tracing::debug!(
        confidence = confidence.as_str(),
        success_rate_percent,
        trend_percent,
        sessions_analyzed = window.len(),
        last_weight = last.weight,
        suggested_weight = weight,
        "Computed next-weight suggestion"
    );

    Ok(Some(Suggestion {
        weight,
        unit: last.weight_unit,
        rationale: confidence.rationale().to_string(),
        confidence,
        success_rate_percent,
        trend_percent,
        sessions_analyzed: window.len(),
    }))
}

/// Percent of the window whose weight matched or beat the window average.
fn success_rate(window: &[&WeightHistoryEntry]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let average = mean_weight(window);
    let tolerance = AVERAGE_TOLERANCE * average.abs().max(1.0);
    let matched = window
        .iter()
        .filter(|e| e.weight + tolerance >= average)
        .count();
    matched as f64 / window.len() as f64 * 100.0
}

// ---------------------------------------------------------------------------
/// Chart Series and Volume
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub performed_at: DateTime<Utc>,
    pub weight: f64,
    pub reps: u32,
}

/// Oldest-first series for the weight chart
pub fn chart_points(entries: &[WeightHistoryEntry]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = entries
        .iter()
        .map(|e| ChartPoint {
            performed_at: e.performed_at,
            weight: e.weight,
            reps: e.reps,
        })
        .collect();
    points.sort_by_key(|p| p.performed_at);
    points
}

/// Epley estimate. A single rep is its own max.
pub fn estimated_one_rep_max(entry: &WeightHistoryEntry) -> f64 {
    if entry.reps <= 1 {
        entry.weight
    } else {
        entry.weight * (1.0 + entry.reps as f64 / 30.0)
    }
}

pub fn total_volume(entries: &[WeightHistoryEntry]) -> f64 {
    entries.iter().map(WeightHistoryEntry::volume).sum()
}

/// Validate every entry, require a single unit, then order newest-first.
/// The sort is stable so entries sharing a timestamp keep feed order.
fn newest_first(entries: &[WeightHistoryEntry]) -> Result<Vec<&WeightHistoryEntry>> {
    let expected_unit = entries.first().map(|e| e.weight_unit);

    for (index, entry) in entries.iter().enumerate() {
        let checked = entry.validate(index).and_then(|()| match expected_unit {
            Some(expected) if expected != entry.weight_unit => Err(InvalidData::MixedUnits {
                index,
                expected: expected.to_string(),
                found: entry.weight_unit.to_string(),
            }),
            _ => Ok(()),
        });
        if let Err(err) = checked {
            tracing::warn!(error = %err, "Rejected weight history");
            return Err(err.into());
        }
    }

    let mut sorted: Vec<&WeightHistoryEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));
    Ok(sorted)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
