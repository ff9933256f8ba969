//! Invalidation Hook
//!
//! The write path: whenever a dated record is created, updated, or deleted,
//! the hook derives the window containing the mutated date and deletes both
//! cache families for it. Removal only; the next read repopulates lazily.
//!
//! The window here anchors to the record's own date, while the read path
//! anchors to "now". A write dated outside the current real-time window
//! therefore invalidates a key no current read uses, and the live weekly
//! aggregate can stay cached until its TTL elapses. This is the system's
//! documented behavior and is kept as is.

use chrono::NaiveDate;
use tracing::debug;

use crate::stats::keys::{subject_pattern, window_key, Namespace};
use crate::stats::service::SharedCache;
use crate::stats::TimeWindow;

// == Invalidation Hook ==
/// Deletes cached aggregates affected by a record mutation. Best effort:
/// deleting an absent key is a no-op, and nothing here can fail.
#[derive(Clone)]
pub struct InvalidationHook {
    cache: SharedCache,
}

impl InvalidationHook {
    // == Constructor ==
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    // == On Mutate ==
    /// Invalidates both families for the window ending on the mutated
    /// record's date. Must run before the mutation reports success so no
    /// caller can read a stale aggregate after a committed write.
    pub async fn on_mutate(&self, subject_id: &str, date: NaiveDate) {
        let window = TimeWindow::ending_on(date);
        let mut cache = self.cache.write().await;
        for namespace in Namespace::ALL {
            let key = window_key(namespace, subject_id, &window);
            if cache.delete(&key) {
                debug!(%key, "invalidated cached weekly aggregate");
            }
        }
    }

    // == On Subject Removed ==
    /// Purges every cached window for a subject in both families. Used when
    /// all of a subject's records are dropped at once.
    pub async fn on_subject_removed(&self, subject_id: &str) {
        let mut cache = self.cache.write().await;
        for namespace in Namespace::ALL {
            let removed = cache.delete_pattern(&subject_pattern(namespace, subject_id));
            if removed > 0 {
                debug!(subject_id, %namespace, removed, "purged cached windows for subject");
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::stats::{ActivityTotals, WeeklyAggregate};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;

    fn aggregate(window: TimeWindow) -> WeeklyAggregate {
        WeeklyAggregate {
            window,
            totals: ActivityTotals::default(),
            average: ActivityTotals::default(),
            days: Vec::new(),
        }
    }

    fn window(end: &str) -> TimeWindow {
        TimeWindow::ending_on(end.parse().unwrap())
    }

    async fn populated_cache(subject_id: &str, w: TimeWindow) -> SharedCache {
        let cache: SharedCache = Arc::new(RwLock::new(TtlCache::new()));
        {
            let mut guard = cache.write().await;
            for namespace in Namespace::ALL {
                guard.set(
                    window_key(namespace, subject_id, &w),
                    aggregate(w),
                    Some(Duration::from_secs(3600)),
                );
            }
        }
        cache
    }

    #[tokio::test]
    async fn test_on_mutate_deletes_both_families() {
        let w = window("2024-01-07");
        let cache = populated_cache("U1", w).await;
        let hook = InvalidationHook::new(Arc::clone(&cache));

        hook.on_mutate("U1", "2024-01-07".parse().unwrap()).await;

        let mut guard = cache.write().await;
        assert!(!guard.has(&window_key(Namespace::WeeklyStats, "U1", &w)));
        assert!(!guard.has(&window_key(Namespace::WeeklyData, "U1", &w)));
    }

    #[tokio::test]
    async fn test_on_mutate_absent_keys_is_noop() {
        let cache: SharedCache = Arc::new(RwLock::new(TtlCache::new()));
        let hook = InvalidationHook::new(Arc::clone(&cache));

        // Nothing cached; must not fail
        hook.on_mutate("U1", "2024-01-07".parse().unwrap()).await;

        assert!(cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_on_mutate_earliest_representable_date_does_not_panic() {
        // The mutated date comes straight from the request body; invalidation
        // runs after the record mutation committed, so it must stay total
        // even at the calendar's lower bound.
        let cache: SharedCache = Arc::new(RwLock::new(TtlCache::new()));
        let hook = InvalidationHook::new(Arc::clone(&cache));

        hook.on_mutate("U1", NaiveDate::MIN).await;

        assert!(cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_mutation_outside_window_leaves_entry_cached() {
        // Cached window [2024-01-01, 2024-01-07]; mutation dated 2024-01-10
        // targets [2024-01-04, 2024-01-10] and must not touch the original.
        let w = window("2024-01-07");
        let cache = populated_cache("U1", w).await;
        let hook = InvalidationHook::new(Arc::clone(&cache));

        hook.on_mutate("U1", "2024-01-10".parse().unwrap()).await;

        let mut guard = cache.write().await;
        assert!(guard.has(&window_key(Namespace::WeeklyStats, "U1", &w)));
        assert!(guard.has(&window_key(Namespace::WeeklyData, "U1", &w)));
    }

    #[tokio::test]
    async fn test_on_mutate_leaves_other_subjects_alone() {
        let w = window("2024-01-07");
        let cache = populated_cache("U1", w).await;
        {
            let mut guard = cache.write().await;
            guard.set(
                window_key(Namespace::WeeklyStats, "U2", &w),
                aggregate(w),
                None,
            );
        }
        let hook = InvalidationHook::new(Arc::clone(&cache));

        hook.on_mutate("U1", "2024-01-07".parse().unwrap()).await;

        assert!(cache
            .write()
            .await
            .has(&window_key(Namespace::WeeklyStats, "U2", &w)));
    }

    #[tokio::test]
    async fn test_on_subject_removed_purges_all_windows() {
        let w1 = window("2024-01-07");
        let w2 = window("2024-02-07");
        let cache = populated_cache("U1", w1).await;
        {
            let mut guard = cache.write().await;
            for namespace in Namespace::ALL {
                guard.set(window_key(namespace, "U1", &w2), aggregate(w2), None);
            }
            guard.set(window_key(Namespace::WeeklyStats, "U2", &w1), aggregate(w1), None);
        }
        let hook = InvalidationHook::new(Arc::clone(&cache));

        hook.on_subject_removed("U1").await;

        let mut guard = cache.write().await;
        assert_eq!(guard.len(), 1);
        assert!(guard.has(&window_key(Namespace::WeeklyStats, "U2", &w1)));
    }
}
