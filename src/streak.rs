//! Activity Streak Calculator
//!
//! Derives "consecutive active days" from a sparse daily activity log.
//! A day is active when the user logged a workout or nutrition.
//!
//! Preconditions:
//! - `today` is a calendar date the caller already normalised to the user's
//!   local day. No time zone conversion happens here.
//! - Records belong to a single user. The log may be in any order.
//!
//! No gap tolerance: one missing or inactive day ends the current streak.

use std::collections::{BTreeSet, HashMap};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::ActivityRecord;

/// Calendar length shown on the dashboard
pub const DEFAULT_CALENDAR_DAYS: usize = 7;

// ---------------------------------------------------------------------------
/// Current Streak
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStreak {
    /// Consecutive active days ending at `today`
    pub streak_length: u32,
    /// Date of the most recent record in the log, active or not
    pub last_active_date: Option<NaiveDate>,
}

/// Count consecutive active days walking backward from `today`.
pub fn compute_current_streak(records: &[ActivityRecord], today: NaiveDate) -> CurrentStreak {
    if records.is_empty() {
        return CurrentStreak::default();
    }

    let last_active_date = records.iter().map(|r| r.date).max();
    let active_days = active_by_date(records);

    let mut streak_length = 0u32;
    let mut expected = today;
    while active_days.get(&expected).copied().unwrap_or(false) {
        streak_length += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }

    tracing::debug!(
        streak_length,
        records = records.len(),
        %today,
        "Computed current streak"
    );

    CurrentStreak {
        streak_length,
        last_active_date,
    }
}

// ---------------------------------------------------------------------------
/// Activity Calendar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Three-letter English weekday ("Mon" .. "Sun")
    pub day_label: String,
    pub is_active: bool,
    pub is_today: bool,
}

/// The `n` calendar days ending at and including `today`, oldest first.
pub fn compute_last_n_days(
    records: &[ActivityRecord],
    today: NaiveDate,
    n: usize,
) -> Vec<CalendarDay> {
    let active_days = active_by_date(records);

    (0..n)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(|date| CalendarDay {
            date,
            day_label: day_label(date),
            is_active: active_days.get(&date).copied().unwrap_or(false),
            is_today: date == today,
        })
        .collect()
}

pub fn compute_last_7_days(records: &[ActivityRecord], today: NaiveDate) -> Vec<CalendarDay> {
    compute_last_n_days(records, today, DEFAULT_CALENDAR_DAYS)
}

fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

// ---------------------------------------------------------------------------
/// Longest Streak
// ---------------------------------------------------------------------------

/// Best run of consecutive active days anywhere in the log.
pub fn compute_longest_streak(records: &[ActivityRecord]) -> u32 {
    let active: BTreeSet<NaiveDate> = records
        .iter()
        .filter(|r| r.is_active())
        .map(|r| r.date)
        .collect();

    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in active {
        run = match prev.and_then(|p| p.succ_opt()) {
            Some(next) if next == date => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(date);
    }

    best
}

// ---------------------------------------------------------------------------
/// Activity Summary: what the dashboard header renders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub current_streak: CurrentStreak,
    pub longest_streak: u32,
    pub last_7_days: Vec<CalendarDay>,
    pub active_days_last_7: usize,
}

impl ActivitySummary {
    pub fn compute(records: &[ActivityRecord], today: NaiveDate) -> Self {
        let last_7_days = compute_last_7_days(records, today);
        let active_days_last_7 = last_7_days.iter().filter(|d| d.is_active).count();

        Self {
            current_streak: compute_current_streak(records, today),
            longest_streak: compute_longest_streak(records),
            last_7_days,
            active_days_last_7,
        }
    }
}

/// Collapse the log into date -> active. Duplicate dates break the
/// one-record-per-day contract; treat the day as active if any copy is.
fn active_by_date(records: &[ActivityRecord]) -> HashMap<NaiveDate, bool> {
    let mut days = HashMap::with_capacity(records.len());
    for record in records {
        let active = days.entry(record.date).or_insert(false);
        *active |= record.is_active();
    }
    days
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
