pub mod activity;
pub mod weight;

pub use activity::ActivityRecord;
pub use weight::{WeightHistoryEntry, WeightUnit};
