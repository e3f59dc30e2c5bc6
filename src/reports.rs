//! Dashboard reports: fetch through the feeds, run the analytics, hand back
//! plain serialisable structures for the UI.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::AdvisorSettings;
use crate::error::Result;
use crate::feed::{load_activity_records, load_weight_history, DEFAULT_HISTORY_LIMIT};
use crate::progression::{
  chart_points, compute_stats_with, suggest_next_weight_with, total_volume, ChartPoint, Suggestion,
  WeightStats,
};
use crate::streak::ActivitySummary;

/// ---------------------------------------------------------------------------
/// Activity
/// ---------------------------------------------------------------------------

/// Calendar days of activity loaded for a report, `today` included
pub const ACTIVITY_WINDOW_DAYS: u64 = 365;

/// Streak and 7-day calendar over the year ending at `today`.
pub async fn activity_report(pool: &SqlitePool, user_id: &str, today: NaiveDate) -> Result<ActivitySummary> {
  let from = today
    .checked_sub_days(Days::new(ACTIVITY_WINDOW_DAYS - 1))
    .unwrap_or(NaiveDate::MIN);

  let records = load_activity_records(pool, user_id, from, today).await?;
  Ok(ActivitySummary::compute(&records, today))
}

/// ---------------------------------------------------------------------------
/// Exercise
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseReport {
  pub exercise_name: String,
  pub stats: WeightStats,
  /// None when nothing has been logged yet
  pub suggestion: Option<Suggestion>,
  pub chart: Vec<ChartPoint>,
  pub total_volume: f64,
}

impl ExerciseReport {
  pub fn to_json(&self) -> String {
    serde_json::to_string_pretty(self).unwrap_or_default()
  }
}

pub async fn exercise_report(
  pool: &SqlitePool,
  user_id: &str,
  exercise_name: &str,
  settings: &AdvisorSettings,
) -> Result<ExerciseReport> {
  let entries = load_weight_history(pool, user_id, exercise_name, DEFAULT_HISTORY_LIMIT).await?;

  let stats = compute_stats_with(&entries, settings)?;
  let suggestion = suggest_next_weight_with(&entries, settings)?;

  Ok(ExerciseReport {
    exercise_name: exercise_name.to_string(),
    stats,
    suggestion,
    chart: chart_points(&entries),
    total_volume: total_volume(&entries),
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
