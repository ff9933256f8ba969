//! Fitstats - weekly activity statistics with an in-process cache
//!
//! Memoizes 7-day activity aggregates in a TTL cache and keeps them
//! coherent with the underlying records through write-path invalidation.

pub mod activity;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
