//! Cache Module
//!
//! Generic in-memory key-value caching with per-entry TTL, lazy expiry on
//! read, and a deadline-heap sweep instead of per-entry timers.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;
