//! Read-only feeds the analytics run on
//!
//! Records are written by the surrounding app; nothing here inserts or
//! updates. Stored values that don't parse fail the load instead of being
//! defaulted.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

use crate::error::{InvalidData, Result};
use crate::models::{ActivityRecord, WeightHistoryEntry, WeightUnit};

/// Upper bound on activity rows per load (one year of days)
pub const MAX_ACTIVITY_RECORDS: i64 = 365;

/// Analysis window for an exercise history
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Activity Log
// ---------------------------------------------------------------------------

/// Activity records for `user_id` between `from` and `to` inclusive,
/// oldest first.
pub async fn load_activity_records(
  pool: &SqlitePool,
  user_id: &str,
  from: NaiveDate,
  to: NaiveDate,
) -> Result<Vec<ActivityRecord>> {
  let rows = sqlx::query(
    r#"
    SELECT date, has_workout, has_logged_nutrition
    FROM activity_log
    WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
    ORDER BY date ASC
    LIMIT ?4
    "#,
  )
  .bind(user_id)
  .bind(from.format(DATE_FORMAT).to_string())
  .bind(to.format(DATE_FORMAT).to_string())
  .bind(MAX_ACTIVITY_RECORDS)
  .fetch_all(pool)
  .await?;

  let mut records = Vec::with_capacity(rows.len());
  for row in rows {
    let date_str: String = row.try_get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
      .map_err(|_| InvalidData::MalformedDate(date_str.clone()))?;

    records.push(ActivityRecord {
      date,
      has_workout: row.try_get("has_workout")?,
      has_logged_nutrition: row.try_get("has_logged_nutrition")?,
    });
  }

  tracing::debug!(user_id, count = records.len(), %from, %to, "Loaded activity records");

  Ok(records)
}

// ---------------------------------------------------------------------------
// Weight History
// ---------------------------------------------------------------------------

/// Most recent `limit` entries for one exercise, newest first.
/// Ordered by instant, so rows written with different UTC offsets still
/// land in the right window.
pub async fn load_weight_history(
  pool: &SqlitePool,
  user_id: &str,
  exercise_name: &str,
  limit: i64,
) -> Result<Vec<WeightHistoryEntry>> {
  let rows = sqlx::query(
    r#"
    SELECT performed_at, weight, weight_unit, reps, sets, notes
    FROM weight_history
    WHERE user_id = ?1 AND exercise_name = ?2
    ORDER BY julianday(performed_at) DESC, id DESC
    LIMIT ?3
    "#,
  )
  .bind(user_id)
  .bind(exercise_name)
  .bind(limit)
  .fetch_all(pool)
  .await?;

  let mut entries = Vec::with_capacity(rows.len());
  for (index, row) in rows.iter().enumerate() {
    let performed_at_str: String = row.try_get("performed_at")?;
    let performed_at = DateTime::parse_from_rfc3339(&performed_at_str)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(|_| InvalidData::MalformedTimestamp(performed_at_str.clone()))?;

    let unit_str: String = row.try_get("weight_unit")?;
    let weight_unit: WeightUnit = unit_str.parse()?;

    let reps: i64 = row.try_get("reps")?;
    let sets: i64 = row.try_get("sets")?;

    entries.push(WeightHistoryEntry {
      performed_at,
      weight: row.try_get("weight")?,
      weight_unit,
      reps: u32::try_from(reps).map_err(|_| InvalidData::NonPositiveReps { index })?,
      sets: u32::try_from(sets).map_err(|_| InvalidData::NonPositiveSets { index })?,
      notes: row.try_get("notes")?,
    });
  }

  tracing::debug!(user_id, exercise_name, count = entries.len(), "Loaded weight history");

  Ok(entries)
}
