//! Request DTOs for the stats service API
//!
//! Dates arrive as ISO-8601 calendar days and counts as non-negative
//! integers; serde enforces both shapes, leaving only the subject id to
//! validate by hand.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::activity::ActivityRecord;

/// Request body for creating or updating an activity record
/// (POST /activities, PUT /activities)
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityUpsertRequest {
    /// Subject the record belongs to
    pub user_id: String,
    /// UTC calendar day of the record
    pub date: NaiveDate,
    pub steps: u64,
    pub calories: u64,
    pub workout_minutes: u64,
}

impl ActivityUpsertRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.user_id.is_empty() {
            return Some("user_id cannot be empty".to_string());
        }
        None
    }

    /// The record described by this request.
    pub fn record(&self) -> ActivityRecord {
        ActivityRecord {
            date: self.date,
            steps: self.steps,
            calories: self.calories,
            workout_minutes: self.workout_minutes,
        }
    }
}

/// Request body for deleting a single activity record
/// (DELETE /activities)
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityDeleteRequest {
    pub user_id: String,
    pub date: NaiveDate,
}

impl ActivityDeleteRequest {
    pub fn validate(&self) -> Option<String> {
        if self.user_id.is_empty() {
            return Some("user_id cannot be empty".to_string());
        }
        None
    }
}

/// Optional inclusive date bounds for listing activities
/// (GET /users/:user_id/activities?from&to)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}
