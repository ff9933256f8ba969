//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value plus expiry metadata.
///
/// An entry is visible to readers iff it has no TTL or the TTL has not yet
/// elapsed since `created_at`. Once invisible it must be treated exactly
/// like a key that was never set.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation instant (monotonic clock)
    pub created_at: Instant,
    /// Time-to-live, None = no expiration
    pub ttl: Option<Duration>,
    /// Store-assigned generation; ties the entry to its scheduled expiry
    /// slot (see `TtlCache::sweep_expired`)
    pub(crate) generation: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    pub(crate) fn new(value: V, ttl: Option<Duration>, generation: u64) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
            generation,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the full TTL duration
    /// has elapsed (`elapsed >= ttl`), never before.
    pub fn is_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => self.created_at.elapsed() >= ttl,
            None => false,
        }
    }

    // == Deadline ==
    /// Returns the instant at which the entry expires, or None if it never
    /// expires.
    pub fn expires_at(&self) -> Option<Instant> {
        self.ttl.map(|ttl| self.created_at + ttl)
    }
}
