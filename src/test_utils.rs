//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seeders for the activity log and weight history
//! - Mock data factories
//! - Helper assertions

use chrono::{DateTime, Days, Duration, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::models::{ActivityRecord, WeightHistoryEntry, WeightUnit};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert activity records for a user
pub async fn seed_activity_log(pool: &SqlitePool, user_id: &str, records: &[ActivityRecord]) {
  for record in records {
    sqlx::query(
      r#"
      INSERT INTO activity_log (user_id, date, has_workout, has_logged_nutrition)
      VALUES (?1, ?2, ?3, ?4)
      "#,
    )
    .bind(user_id)
    .bind(record.date.format("%Y-%m-%d").to_string())
    .bind(record.has_workout)
    .bind(record.has_logged_nutrition)
    .execute(pool)
    .await
    .expect("Failed to insert activity record");
  }
}

/// Insert weight history entries for a user's exercise
pub async fn seed_weight_history(
  pool: &SqlitePool,
  user_id: &str,
  exercise_name: &str,
  entries: &[WeightHistoryEntry],
) {
  for entry in entries {
    sqlx::query(
      r#"
      INSERT INTO weight_history (
        user_id, exercise_name, performed_at, weight, weight_unit, reps, sets, notes
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
      "#,
    )
    .bind(user_id)
    .bind(exercise_name)
    .bind(entry.performed_at.to_rfc3339())
    .bind(entry.weight)
    .bind(entry.weight_unit.as_str())
    .bind(entry.reps as i64)
    .bind(entry.sets as i64)
    .bind(entry.notes.clone())
    .execute(pool)
    .await
    .expect("Failed to insert weight history entry");
  }
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// `n` consecutive workout days ending at `last_day`, newest first
/// (index i is `last_day - i`)
pub fn mock_activity_run(last_day: NaiveDate, n: usize) -> Vec<ActivityRecord> {
  (0..n)
    .map(|i| ActivityRecord::new(last_day - Days::new(i as u64), true, false))
    .collect()
}

/// Fixed reference instant so history tests don't depend on the clock
pub fn reference_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
}

pub fn mock_weight_entry(weight: f64, reps: u32, unit: WeightUnit, days_ago: i64) -> WeightHistoryEntry {
  WeightHistoryEntry::new(reference_time() - Duration::days(days_ago), weight, unit, reps)
}

/// Newest-first history: `weights[i]` was lifted `i` days before the reference time
pub fn mock_weight_history(weights: &[f64], reps: u32, unit: WeightUnit) -> Vec<WeightHistoryEntry> {
  weights
    .iter()
    .enumerate()
    .map(|(i, w)| mock_weight_entry(*w, reps, unit, i as i64))
    .collect()
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {{
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  }};
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('activity_log', 'weight_history')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 2, "Expected 2 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_activity_log_rejects_duplicate_day() {
    let pool = setup_test_db().await;
    let day = date(2024, 3, 15);
    seed_activity_log(&pool, "alice", &[ActivityRecord::new(day, true, false)]).await;

    let duplicate = sqlx::query("INSERT INTO activity_log (user_id, date, has_workout) VALUES ('alice', '2024-03-15', 0)")
      .execute(&pool)
      .await;

    assert!(duplicate.is_err(), "one record per user per date");

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let run = mock_activity_run(date(2024, 3, 1), 3);
    assert_eq!(run.len(), 3);
    assert_eq!(run[0].date, date(2024, 3, 1));
    assert_eq!(run[2].date, date(2024, 2, 28));

    let history = mock_weight_history(&[60.0, 57.5], 8, WeightUnit::Kg);
    assert!(history[0].performed_at > history[1].performed_at);
    assert!(history.iter().enumerate().all(|(i, e)| e.validate(i).is_ok()));
  }
}
