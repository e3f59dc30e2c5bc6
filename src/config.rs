//! Tunables for the progression advisor
//!
//! Stored as a JSON blob next to the user's other settings. Defaults reproduce
//! the stock policy: 10-session success window, 3+3 trend split, 80/50
//! thresholds, 2.5 kg / 5 lbs steps.

use serde::{Deserialize, Serialize};

use crate::error::{InsightError, Result};
use crate::models::WeightUnit;

/// Largest session window either setting may ask for (a year of daily logs)
pub const MAX_SESSION_WINDOW: usize = 365;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
  /// Most recent sessions considered for the success rate
  pub success_window: usize,
  /// Sessions per half of the trend comparison (recent vs previous)
  pub trend_window_half: usize,
  /// Success rate (percent) at or above which load goes up
  pub high_success_threshold: f64,
  /// Success rate (percent) at or above which load is held
  pub medium_success_threshold: f64,
  pub kg_increment: f64,
  pub lbs_increment: f64,
}

impl Default for AdvisorSettings {
  fn default() -> Self {
    Self {
      success_window: 10,
      trend_window_half: 3,
      high_success_threshold: 80.0,
      medium_success_threshold: 50.0,
      kg_increment: WeightUnit::Kg.default_increment(),
      lbs_increment: WeightUnit::Lbs.default_increment(),
    }
  }
}

impl AdvisorSettings {
  pub fn from_json(json: &str) -> Result<Self> {
    let settings: Self = serde_json::from_str(json)
      .map_err(|e| InsightError::InvalidSettings(format!("Failed to parse advisor settings: {}", e)))?;
    settings.validate()?;
    Ok(settings)
  }

  pub fn to_json(&self) -> String {
    serde_json::to_string(self).unwrap_or_default()
  }

  pub fn increment_for(&self, unit: WeightUnit) -> f64 {
    match unit {
      WeightUnit::Kg => self.kg_increment,
      WeightUnit::Lbs => self.lbs_increment,
    }
  }

  pub fn validate(&self) -> Result<()> {
    for (name, window) in [("success_window", self.success_window), ("trend_window_half", self.trend_window_half)] {
      if window == 0 || window > MAX_SESSION_WINDOW {
        return Err(InsightError::InvalidSettings(format!(
          "{} must be between 1 and {}, got {}",
          name, MAX_SESSION_WINDOW, window
        )));
      }
    }
    for (name, step) in [("kg_increment", self.kg_increment), ("lbs_increment", self.lbs_increment)] {
      if !step.is_finite() || step <= 0.0 {
        return Err(InsightError::InvalidSettings(format!("{} must be positive, got {}", name, step)));
      }
    }
    let in_range = |t: f64| (0.0..=100.0).contains(&t);
    if !in_range(self.high_success_threshold) || !in_range(self.medium_success_threshold) {
      return Err(InsightError::InvalidSettings("thresholds must be between 0 and 100".into()));
    }
    if self.medium_success_threshold > self.high_success_threshold {
      return Err(InsightError::InvalidSettings(format!(
        "medium threshold ({}) above high threshold ({})",
        self.medium_success_threshold, self.high_success_threshold
      )));
    }
    Ok(())
  }
}
