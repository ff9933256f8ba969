//! Weekly Aggregate
//!
//! Folds a window's activity records into 7 ordered daily buckets plus
//! totals and per-field averages. Immutable once computed: a later mutation
//! invalidates the cached aggregate wholesale, nothing is patched in place.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityRecord;
use crate::stats::{TimeWindow, WINDOW_DAYS};

// == Day Bucket ==
/// One day of the series; days without a record are zero-valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub steps: u64,
    pub calories: u64,
    pub workout_minutes: u64,
}

impl DayBucket {
    fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            steps: 0,
            calories: 0,
            workout_minutes: 0,
        }
    }
}

// == Totals ==
/// Per-field sums (or rounded averages) over the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTotals {
    pub steps: u64,
    pub calories: u64,
    pub workout_minutes: u64,
}

// == Weekly Aggregate ==
/// The derived weekly summary: window, totals, rounded averages, and the
/// 7-day series in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    pub window: TimeWindow,
    pub totals: ActivityTotals,
    pub average: ActivityTotals,
    pub days: Vec<DayBucket>,
}

impl WeeklyAggregate {
    // == Fold ==
    /// Builds the aggregate from the window's records. Records outside the
    /// window are ignored; missing days become zero buckets. Totals are
    /// plain integer sums (order-independent), averages round half up.
    pub fn from_records(window: TimeWindow, records: &[ActivityRecord]) -> Self {
        let by_date: HashMap<NaiveDate, &ActivityRecord> = records
            .iter()
            .filter(|record| window.contains(record.date))
            .map(|record| (record.date, record))
            .collect();

        let days: Vec<DayBucket> = window
            .days()
            .map(|date| match by_date.get(&date) {
                Some(record) => DayBucket {
                    date,
                    steps: record.steps,
                    calories: record.calories,
                    workout_minutes: record.workout_minutes,
                },
                None => DayBucket::zero(date),
            })
            .collect();

        // Saturating sums: record fields are caller-supplied u64s, and the
        // fold must stay total even at the numeric extremes
        let mut totals = ActivityTotals::default();
        for day in &days {
            totals.steps = totals.steps.saturating_add(day.steps);
            totals.calories = totals.calories.saturating_add(day.calories);
            totals.workout_minutes = totals.workout_minutes.saturating_add(day.workout_minutes);
        }

        let average = ActivityTotals {
            steps: rounded_div(totals.steps, WINDOW_DAYS),
            calories: rounded_div(totals.calories, WINDOW_DAYS),
            workout_minutes: rounded_div(totals.workout_minutes, WINDOW_DAYS),
        };

        Self {
            window,
            totals,
            average,
            days,
        }
    }
}

/// Integer division rounded half up, matching `Math.round(total / 7)`.
/// Saturates instead of overflowing when the rounding bias cannot fit.
fn rounded_div(total: u64, divisor: u64) -> u64 {
    total.saturating_add(divisor / 2) / divisor
}
