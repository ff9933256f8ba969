//! Weekly Aggregate Service
//!
//! The read path: derive the current window's key, consult the cache, and
//! on a miss recompute from the source of record and repopulate with a TTL.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::activity::ActivitySource;
use crate::cache::TtlCache;
use crate::error::Result;
use crate::stats::keys::{window_key, Namespace};
use crate::stats::{TimeWindow, WeeklyAggregate};

/// TTL applied to populated weekly aggregates: one hour.
pub const DEFAULT_STATS_TTL: Duration = Duration::from_millis(3_600_000);

/// Shared handle to the aggregate cache.
pub type SharedCache = Arc<RwLock<TtlCache<WeeklyAggregate>>>;

// == Weekly Stats Service ==
/// Computes 7-day aggregates, memoized per (namespace, subject, window).
///
/// The check-miss-compute-populate sequence is not atomic: the cache lock is
/// released across the source query, so two racing reads for the same key
/// may both miss and both compute, and the last `set` wins. Redundant work,
/// not corruption; deliberately left unlocked.
#[derive(Debug)]
pub struct WeeklyStatsService<S> {
    cache: SharedCache,
    source: Arc<RwLock<S>>,
    ttl: Duration,
}

impl<S> Clone for WeeklyStatsService<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            source: Arc::clone(&self.source),
            ttl: self.ttl,
        }
    }
}

impl<S: ActivitySource> WeeklyStatsService<S> {
    // == Constructor ==
    /// Creates a service over an injected cache and source of record.
    pub fn new(cache: SharedCache, source: Arc<RwLock<S>>, ttl: Duration) -> Self {
        Self { cache, source, ttl }
    }

    // == Read Path: Aggregate Family ==
    /// Returns the subject's aggregate for the window ending today (UTC),
    /// cached under the `weekly_stats` namespace.
    pub async fn weekly_stats(&self, subject_id: &str) -> Result<WeeklyAggregate> {
        self.fetch(Namespace::WeeklyStats, subject_id).await
    }

    // == Read Path: Series Family ==
    /// Same aggregate cached under the `weekly_data` namespace, the family
    /// consumed by series/export callers. Keyed on the same (subject,
    /// window) pair as `weekly_stats`, so one mutation invalidates both.
    pub async fn weekly_data(&self, subject_id: &str) -> Result<WeeklyAggregate> {
        self.fetch(Namespace::WeeklyData, subject_id).await
    }

    async fn fetch(&self, namespace: Namespace, subject_id: &str) -> Result<WeeklyAggregate> {
        let window = TimeWindow::current(Utc::now());
        let key = window_key(namespace, subject_id, &window);

        // Write lock: get performs lazy expiry and updates hit/miss stats
        if let Some(cached) = self.cache.write().await.get(&key) {
            debug!(%key, "weekly aggregate cache hit");
            return Ok(cached);
        }
        debug!(%key, "weekly aggregate cache miss, recomputing");

        // Source failures propagate without touching the cache
        let records = self
            .source
            .read()
            .await
            .find_in_range(subject_id, window.start, window.end)?;
        let aggregate = WeeklyAggregate::from_records(window, &records);

        self.cache
            .write()
            .await
            .set(key, aggregate.clone(), Some(self.ttl));

        Ok(aggregate)
    }
}
