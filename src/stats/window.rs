//! Time Window Module
//!
//! Closed 7-day intervals of whole UTC calendar days. Two anchors exist in
//! the system: the read path anchors to "now" (`current`), the write path
//! anchors to the mutated record's own date (`ending_on`). They coincide
//! only when the mutated date falls inside the current real-time window.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Width of every window, in days.
pub const WINDOW_DAYS: u64 = 7;

// == Time Window ==
/// A closed interval `[start, end]` of UTC calendar days, always exactly
/// 7 days wide (`end - start == 6 days`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    // == Write-Path Anchor ==
    /// Window ending on the given day: `end = date`, `start = date - 6`.
    ///
    /// Total for every representable date: within 6 days of the calendar's
    /// lower bound the start is clamped to `NaiveDate::MIN`. Dates reach
    /// this constructor straight from request bodies, so it must not panic.
    pub fn ending_on(end: NaiveDate) -> Self {
        let start = end
            .checked_sub_days(Days::new(WINDOW_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    // == Read-Path Anchor ==
    /// Window ending today (UTC) at query time.
    pub fn current(now: DateTime<Utc>) -> Self {
        Self::ending_on(now.date_naive())
    }

    // == Days ==
    /// Iterates the 7 days of the window in calendar order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..WINDOW_DAYS).map(|offset| self.start + Days::new(offset))
    }

    // == Contains ==
    /// Whether `date` falls inside the closed interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_window_is_seven_days_wide() {
        let window = TimeWindow::ending_on(date("2024-01-07"));

        assert_eq!(window.start, date("2024-01-01"));
        assert_eq!(window.end, date("2024-01-07"));
        assert_eq!((window.end - window.start).num_days(), 6);
    }

    #[test]
    fn test_window_spans_month_boundary() {
        let window = TimeWindow::ending_on(date("2024-03-02"));

        assert_eq!(window.start, date("2024-02-25"));
    }

    #[test]
    fn test_current_anchors_to_utc_today() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap();
        let window = TimeWindow::current(now);

        assert_eq!(window.end, date("2024-01-10"));
        assert_eq!(window.start, date("2024-01-04"));
    }

    #[test]
    fn test_days_are_ordered_and_complete() {
        let window = TimeWindow::ending_on(date("2024-01-07"));
        let days: Vec<NaiveDate> = window.days().collect();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0], window.start);
        assert_eq!(days[6], window.end);
        for pair in days.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }

    #[test]
    fn test_window_near_calendar_lower_bound_does_not_panic() {
        // Request bodies can carry any date serde accepts, including the
        // earliest representable one; derivation must stay total.
        let window = TimeWindow::ending_on(NaiveDate::MIN);

        assert_eq!(window.start, NaiveDate::MIN);
        assert_eq!(window.end, NaiveDate::MIN);
        assert_eq!(window.days().count(), 7);
    }

    #[test]
    fn test_contains() {
        let window = TimeWindow::ending_on(date("2024-01-07"));

        assert!(window.contains(date("2024-01-01")));
        assert!(window.contains(date("2024-01-07")));
        assert!(!window.contains(date("2023-12-31")));
        assert!(!window.contains(date("2024-01-08")));
    }
}
