//! Activity Record
//!
//! A single day of tracked activity for one subject.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// == Activity Record ==
/// One day of activity. Dates are whole UTC calendar days; `NaiveDate`
/// enforces the normalization by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// The UTC calendar day this record covers
    pub date: NaiveDate,
    /// Steps taken
    pub steps: u64,
    /// Calories burned
    pub calories: u64,
    /// Minutes of workout
    pub workout_minutes: u64,
}
