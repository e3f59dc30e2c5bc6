use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a user's daily activity log.
///
/// Written by the surrounding app whenever a workout exercise is added or a
/// meal is logged. At most one record exists per user per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
  pub date: NaiveDate,
  pub has_workout: bool,
  pub has_logged_nutrition: bool,
}

impl ActivityRecord {
  pub fn new(date: NaiveDate, has_workout: bool, has_logged_nutrition: bool) -> Self {
    Self {
      date,
      has_workout,
      has_logged_nutrition,
    }
  }

  /// A day counts as active if the user trained or logged food
  pub fn is_active(&self) -> bool {
    self.has_workout || self.has_logged_nutrition
  }
}
