//! Response DTOs for the stats service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::activity::ActivityRecord;
use crate::cache::CacheStats;
use crate::stats::{ActivityTotals, DayBucket, TimeWindow, WeeklyAggregate};

/// Response body for activity create/update
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    /// Success message
    pub message: String,
    /// The stored record
    pub data: ActivityRecord,
}

impl ActivityResponse {
    /// Creates a response with the given message.
    pub fn new(message: impl Into<String>, data: ActivityRecord) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Response body for single-record deletion
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for activity listing
#[derive(Debug, Clone, Serialize)]
pub struct ActivityListResponse {
    pub count: usize,
    pub data: Vec<ActivityRecord>,
}

impl ActivityListResponse {
    pub fn new(data: Vec<ActivityRecord>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Response body for whole-subject removal
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub message: String,
    /// Number of records removed
    pub removed: usize,
}

impl PurgeResponse {
    pub fn new(user_id: &str, removed: usize) -> Self {
        Self {
            message: format!("All activities for '{}' removed", user_id),
            removed,
        }
    }
}

/// Response body for the weekly stats endpoint
/// (GET /users/:user_id/stats/weekly)
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStatsResponse {
    /// The 7-day window the aggregate covers
    pub range: TimeWindow,
    pub totals: ActivityTotals,
    pub average: ActivityTotals,
    /// 7 daily buckets in calendar order
    pub days: Vec<DayBucket>,
}

impl From<WeeklyAggregate> for WeeklyStatsResponse {
    fn from(aggregate: WeeklyAggregate) -> Self {
        Self {
            range: aggregate.window,
            totals: aggregate.totals,
            average: aggregate.average,
            days: aggregate.days,
        }
    }
}

/// Response body for the cache introspection endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub size: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Live cache keys
    pub keys: Vec<String>,
}

impl CacheStatsResponse {
    /// Creates a response from cache statistics and the live key set.
    pub fn new(stats: CacheStats, mut keys: Vec<String>) -> Self {
        keys.sort();
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            size: stats.size,
            hit_rate: stats.hit_rate(),
            keys,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
