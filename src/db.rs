use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::Path;

use crate::error::Result;

pub type DbPool = SqlitePool;

/// Open the SQLite store at `db_path` and run migrations.
/// Parent directories are created when missing.
pub async fn initialize_db(db_path: &Path) -> Result<DbPool> {
  if let Some(parent) = db_path.parent() {
    fs::create_dir_all(parent)?;
  }

  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  tracing::info!(path = %db_path.display(), "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_initialize_db_creates_file_and_schema() {
    // Arrange: nested path that doesn't exist yet
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("nested").join("lift-log.db");

    // Act
    let pool = initialize_db(&db_path).await.expect("Should initialize");

    // Assert
    assert!(db_path.exists());
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('activity_log', 'weight_history')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");
    assert_eq!(tables.len(), 2);

    pool.close().await;
  }

  #[tokio::test]
  async fn test_initialize_db_is_idempotent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("lift-log.db");

    let first = initialize_db(&db_path).await.expect("first open");
    first.close().await;

    let second = initialize_db(&db_path).await.expect("reopen runs no new migrations");
    second.close().await;
  }
}
