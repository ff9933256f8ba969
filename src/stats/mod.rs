//! Stats Module
//!
//! Weekly aggregate computation, cache key derivation, the cached read
//! path, and write-path invalidation.

mod aggregate;
mod invalidation;
pub mod keys;
mod service;
mod window;

// Re-export public types
pub use aggregate::{ActivityTotals, DayBucket, WeeklyAggregate};
pub use invalidation::InvalidationHook;
pub use keys::Namespace;
pub use service::{SharedCache, WeeklyStatsService, DEFAULT_STATS_TTL};
pub use window::{TimeWindow, WINDOW_DAYS};
