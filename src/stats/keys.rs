//! Aggregate Keying
//!
//! Deterministic derivation of cache keys from (namespace, subject, window).
//! Key format: `"<namespace>:<subjectId>:<start>:<end>"` with ISO-8601
//! dates. Same inputs always yield the same string; distinct windows never
//! collide because both bounds are spelled out.

use std::fmt;

use crate::stats::TimeWindow;

// == Namespace ==
/// The two cached data families. Both are keyed on the same
/// (subject, window) pair so one mutation invalidates them together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Weekly aggregate totals
    WeeklyStats,
    /// Full day-by-day series
    WeeklyData,
}

impl Namespace {
    /// All namespaces, in invalidation order.
    pub const ALL: [Namespace; 2] = [Namespace::WeeklyStats, Namespace::WeeklyData];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::WeeklyStats => "weekly_stats",
            Namespace::WeeklyData => "weekly_data",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Key Derivation ==
/// Derives the cache key for one (namespace, subject, window). Pure.
pub fn window_key(namespace: Namespace, subject_id: &str, window: &TimeWindow) -> String {
    format!(
        "{}:{}:{}:{}",
        namespace, subject_id, window.start, window.end
    )
}

/// Wildcard pattern matching every cached window of one subject in one
/// namespace; feed to `TtlCache::delete_pattern`.
pub fn subject_pattern(namespace: Namespace, subject_id: &str) -> String {
    format!("{}:{}:*", namespace, subject_id)
}
