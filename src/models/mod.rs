//! Request and Response models for the stats service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ActivityDeleteRequest, ActivityUpsertRequest, RangeQuery};
pub use responses::{
    ActivityListResponse, ActivityResponse, CacheStatsResponse, DeletedResponse, HealthResponse,
    PurgeResponse, WeeklyStatsResponse,
};
