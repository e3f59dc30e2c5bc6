//! Training log analytics
//!
//! Two stateless components over records fetched from the store:
//! - `streak`: consecutive active days and the 7-day activity calendar
//! - `progression`: weight stats and the next-session load suggestion
//!
//! `feed` and `reports` wire them to the SQLite store.

pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod progression;
pub mod reports;
pub mod streak;

#[cfg(test)]
mod test_utils;

pub use config::AdvisorSettings;
pub use error::{InsightError, InvalidData, Result};
pub use models::{ActivityRecord, WeightHistoryEntry, WeightUnit};
pub use progression::{compute_stats, suggest_next_weight, ConfidenceTier, Suggestion, WeightStats};
pub use streak::{compute_current_streak, compute_last_n_days, ActivitySummary, CalendarDay, CurrentStreak};
