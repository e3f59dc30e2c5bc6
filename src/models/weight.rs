use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
  Kg,
  Lbs,
}

impl WeightUnit {
  pub fn as_str(&self) -> &'static str {
    match self {
      WeightUnit::Kg => "kg",
      WeightUnit::Lbs => "lbs",
    }
  }

  /// Smallest practical plate jump for this unit
  pub fn default_increment(&self) -> f64 {
    match self {
      WeightUnit::Kg => 2.5,
      WeightUnit::Lbs => 5.0,
    }
  }
}

impl std::fmt::Display for WeightUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for WeightUnit {
  type Err = InvalidData;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "kg" => Ok(Self::Kg),
      "lbs" => Ok(Self::Lbs),
      _ => Err(InvalidData::UnknownUnit(s.to_string())),
    }
  }
}

fn default_sets() -> u32 {
  1
}

/// A logged set-weight combination for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightHistoryEntry {
  pub performed_at: DateTime<Utc>,
  pub weight: f64,
  pub weight_unit: WeightUnit,
  pub reps: u32,
  /// Number of sets this entry stands for
  #[serde(default = "default_sets")]
  pub sets: u32,
  pub notes: Option<String>,
}

impl WeightHistoryEntry {
  pub fn new(performed_at: DateTime<Utc>, weight: f64, weight_unit: WeightUnit, reps: u32) -> Self {
    Self {
      performed_at,
      weight,
      weight_unit,
      reps,
      sets: default_sets(),
      notes: None,
    }
  }

  /// Check field ranges. `index` is echoed back in the error so callers can
  /// point at the offending row.
  pub fn validate(&self, index: usize) -> Result<(), InvalidData> {
    if !self.weight.is_finite() {
      return Err(InvalidData::NonFiniteWeight { index });
    }
    if self.weight < 0.0 {
      return Err(InvalidData::NegativeWeight {
        index,
        weight: self.weight,
      });
    }
    if self.reps == 0 {
      return Err(InvalidData::NonPositiveReps { index });
    }
    if self.sets == 0 {
      return Err(InvalidData::NonPositiveSets { index });
    }
    Ok(())
  }

  /// Work done in this entry: weight x reps x sets
  pub fn volume(&self) -> f64 {
    self.weight * self.reps as f64 * self.sets as f64
  }
}
