//! Cache Store Module
//!
//! Generic key-value store with per-entry TTL, lazy expiry on read, and a
//! min-heap of deadlines driving the periodic sweep. There is no per-entry
//! timer: overwriting or deleting an entry bumps its generation, which
//! orphans any scheduled expiry slot still sitting in the heap. The sweep
//! skips orphaned slots, so a stale deadline can never remove a newer entry.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};

// == Expiry Slot ==
/// A scheduled deletion: the deadline for one (key, generation) pair.
#[derive(Debug, PartialEq, Eq)]
struct ExpirySlot {
    deadline: Instant,
    generation: u64,
    key: String,
}

impl Ord for ExpirySlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.generation.cmp(&other.generation))
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for ExpirySlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// == TTL Cache ==
/// In-memory key-value cache with optional per-entry TTL.
///
/// Every operation is total: absent keys are not errors, deletes are
/// idempotent, and `set` never fails.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Pending expiry deadlines, earliest first
    expiry: BinaryHeap<Reverse<ExpirySlot>>,
    /// Monotonic counter assigning each stored entry a generation
    next_generation: u64,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            expiry: BinaryHeap::new(),
            next_generation: 0,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a value under `key`, recording the creation time.
    ///
    /// Overwriting an existing key neutralizes that key's previously
    /// scheduled expiry (its heap slot is orphaned by the generation bump).
    /// With a TTL, a deferred deletion is scheduled at `created_at + ttl`.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        self.next_generation += 1;
        let entry = CacheEntry::new(value, ttl, self.next_generation);

        if let Some(deadline) = entry.expires_at() {
            self.expiry.push(Reverse(ExpirySlot {
                deadline,
                generation: entry.generation,
                key: key.clone(),
            }));
        }

        self.entries.insert(key, entry);
        self.stats.set_size(self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` if present and unexpired.
    ///
    /// A present-but-expired entry is removed eagerly and treated as a miss,
    /// so reads self-heal ahead of the periodic sweep.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expiration();
                self.stats.record_miss();
                self.stats.set_size(self.entries.len());
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Equivalent to `get(key).is_some()`, including the lazy-expiry side
    /// effect.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes the entry for `key` if present; no-op otherwise.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.stats.record_invalidation();
            self.stats.set_size(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Delete Pattern ==
    /// Deletes every key literally matching `pattern`, where `*` matches
    /// any substring. Scans all keys; cost is linear in cache size.
    ///
    /// Returns the number of entries removed.
    pub fn delete_pattern(&mut self, pattern: &str) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| wildcard_match(pattern, key))
            .cloned()
            .collect();

        let count = matching.len();
        for key in &matching {
            self.delete(key);
        }
        count
    }

    // == Stats ==
    /// Returns current cache statistics. Introspection only, no side
    /// effects.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Keys ==
    /// Returns all currently stored keys (expired-but-unswept included).
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Clear ==
    /// Drops all entries and all scheduled expiries. Used at process
    /// teardown, never during normal operation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.expiry.clear();
        self.stats.set_size(0);
    }

    // == Sweep Expired ==
    /// Pops every due expiry slot and removes the entries that still belong
    /// to those slots. Slots whose generation no longer matches the stored
    /// entry (overwritten or already deleted) are discarded without effect.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        loop {
            match self.expiry.peek() {
                Some(Reverse(slot)) if slot.deadline <= now => {}
                _ => break,
            }
            if let Some(Reverse(slot)) = self.expiry.pop() {
                let live = matches!(
                    self.entries.get(&slot.key),
                    Some(entry) if entry.generation == slot.generation && entry.is_expired()
                );
                if live {
                    self.entries.remove(&slot.key);
                    self.stats.record_expiration();
                    removed += 1;
                }
            }
        }

        self.stats.set_size(self.entries.len());
        removed
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Wildcard Matching ==
/// Literal match of `key` against `pattern`, where each `*` in the pattern
/// matches any (possibly empty) substring. Greedy left-to-right segment
/// search; no other metacharacters.
pub(crate) fn wildcard_match(pattern: &str, key: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == key;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let first = segments[0];
    let last = segments[segments.len() - 1];

    if !key.starts_with(first) {
        return false;
    }
    let mut rest = &key[first.len()..];

    if !rest.ends_with(last) {
        return false;
    }
    rest = &rest[..rest.len() - last.len()];

    for segment in &segments[1..segments.len() - 1] {
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }
    true
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn cache() -> TtlCache<String> {
        TtlCache::new()
    }

    #[test]
    fn test_store_new() {
        let store = cache();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = cache();

        store.set("key1", "value1".to_string(), None);
        let value = store.get("key1");

        assert_eq!(value.as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_never_set() {
        let mut store = cache();

        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_delete() {
        let mut store = cache();

        store.set("key1", "value1".to_string(), None);
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_absent_is_noop() {
        let mut store = cache();

        assert!(!store.delete("nonexistent"));
        assert!(!store.delete("nonexistent"));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = cache();

        store.set("key1", "value1".to_string(), None);
        store.set("key1", "value2".to_string(), None);

        assert_eq!(store.get("key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration_lazy() {
        let mut store = cache();

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(20)));
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(40));

        // Lazy expiry: the read itself removes the entry
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_sweep_removes_expired() {
        let mut store = cache();

        store.set("soon", "v".to_string(), Some(Duration::from_millis(10)));
        store.set("later", "v".to_string(), Some(Duration::from_secs(60)));
        store.set("never", "v".to_string(), None);

        sleep(Duration::from_millis(30));

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 2);
        assert!(store.has("later"));
        assert!(store.has("never"));
    }

    #[test]
    fn test_delete_prevents_resurrection() {
        let mut store = cache();

        store.set("key1", "v1".to_string(), Some(Duration::from_millis(10)));
        store.delete("key1");

        sleep(Duration::from_millis(30));
        store.sweep_expired();

        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_overwrite_cancels_stale_deadline() {
        let mut store = cache();

        // First write expires quickly, second write has no TTL. The first
        // write's deadline must not remove the second write's entry.
        store.set("key1", "v1".to_string(), Some(Duration::from_millis(10)));
        store.set("key1", "v2".to_string(), None);

        sleep(Duration::from_millis(30));
        let removed = store.sweep_expired();

        assert_eq!(removed, 0);
        assert_eq!(store.get("key1").as_deref(), Some("v2"));
    }

    #[test]
    fn test_has_matches_get() {
        let mut store = cache();

        store.set("key1", "v".to_string(), Some(Duration::from_millis(10)));
        assert!(store.has("key1"));

        sleep(Duration::from_millis(30));
        assert!(!store.has("key1"));
        // has() evicted the expired entry just like get() would
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_delete_pattern_prefix() {
        let mut store = cache();

        store.set("weekly_stats:U1:2024-01-01:2024-01-07", "a".to_string(), None);
        store.set("weekly_stats:U1:2024-01-08:2024-01-14", "b".to_string(), None);
        store.set("weekly_stats:U2:2024-01-01:2024-01-07", "c".to_string(), None);
        store.set("weekly_data:U1:2024-01-01:2024-01-07", "d".to_string(), None);

        let removed = store.delete_pattern("weekly_stats:U1:*");

        assert_eq!(removed, 2);
        assert_eq!(store.get("weekly_stats:U1:2024-01-01:2024-01-07"), None);
        assert_eq!(store.get("weekly_stats:U1:2024-01-08:2024-01-14"), None);
        assert!(store.has("weekly_stats:U2:2024-01-01:2024-01-07"));
        assert!(store.has("weekly_data:U1:2024-01-01:2024-01-07"));
    }

    #[test]
    fn test_delete_pattern_no_match() {
        let mut store = cache();

        store.set("key1", "v".to_string(), None);
        assert_eq!(store.delete_pattern("other:*"), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut store = cache();

        store.set("key1", "v".to_string(), Some(Duration::from_secs(60)));
        store.set("key2", "v".to_string(), None);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.sweep_expired(), 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = cache();

        store.set("key1", "value1".to_string(), None);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss
        store.delete("key1"); // invalidation

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.invalidations, 1);
        assert_eq!(stats.size, 0);
    }

    #[test]
    fn test_keys_introspection() {
        let mut store = cache();

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("weekly_stats:U1:*", "weekly_stats:U1:2024-01-01:2024-01-07"));
        assert!(!wildcard_match("weekly_stats:U1:*", "weekly_stats:U10:2024-01-01:2024-01-07"));
        assert!(wildcard_match("weekly_stats:U1*", "weekly_stats:U10:x"));
        assert!(wildcard_match("a*c", "abc"));
        assert!(wildcard_match("a*c", "ac"));
        assert!(!wildcard_match("a*c", "ab"));
        assert!(wildcard_match("*:U1:*", "weekly_data:U1:2024-01-01:2024-01-07"));
        assert!(wildcard_match("exact", "exact"));
        assert!(!wildcard_match("exact", "exactly"));
    }
}
