//! Error types shared by the analytics components and the store adapter

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InsightError>;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum InsightError {
  #[error("Invalid data: {0}")]
  InvalidData(#[from] InvalidData),

  #[error("Invalid settings: {0}")]
  InvalidSettings(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Logging setup failed: {0}")]
  Logging(String),
}

/// Out-of-range or malformed record fields.
///
/// `index` refers to the position in the slice the caller passed in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidData {
  #[error("entry {index}: negative weight {weight}")]
  NegativeWeight { index: usize, weight: f64 },

  #[error("entry {index}: weight is not a finite number")]
  NonFiniteWeight { index: usize },

  #[error("entry {index}: reps must be at least 1")]
  NonPositiveReps { index: usize },

  #[error("entry {index}: sets must be at least 1")]
  NonPositiveSets { index: usize },

  #[error("entry {index}: unit {found} differs from {expected}")]
  MixedUnits {
    index: usize,
    expected: String,
    found: String,
  },

  #[error("unknown weight unit: {0}")]
  UnknownUnit(String),

  #[error("malformed date: {0}")]
  MalformedDate(String),

  #[error("malformed timestamp: {0}")]
  MalformedTimestamp(String),
}
