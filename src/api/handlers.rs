//! API Handlers
//!
//! HTTP request handlers for the stats service endpoints. Every mutation of
//! a dated record runs the invalidation hook before reporting success, so a
//! committed write can never be followed by a stale cached aggregate.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tokio::sync::RwLock;

use crate::activity::ActivityStore;
use crate::cache::TtlCache;
use crate::error::{AppError, Result};
use crate::models::{
    ActivityDeleteRequest, ActivityListResponse, ActivityResponse, ActivityUpsertRequest,
    CacheStatsResponse, DeletedResponse, HealthResponse, PurgeResponse, RangeQuery,
    WeeklyStatsResponse,
};
use crate::stats::{InvalidationHook, SharedCache, WeeklyStatsService};

/// Application state shared across all handlers.
///
/// The cache and record store are explicit service instances created at
/// process start and injected here; nothing is a global.
#[derive(Clone)]
pub struct AppState {
    /// Weekly aggregate cache
    pub cache: SharedCache,
    /// Source of record for activity entries
    pub activities: Arc<RwLock<ActivityStore>>,
    /// Cached read path
    pub stats: WeeklyStatsService<ActivityStore>,
    /// Write-path cache invalidation
    pub invalidation: InvalidationHook,
}

impl AppState {
    /// Creates fresh state with the given aggregate TTL.
    pub fn new(stats_ttl: Duration) -> Self {
        let cache: SharedCache = Arc::new(RwLock::new(TtlCache::new()));
        let activities = Arc::new(RwLock::new(ActivityStore::new()));
        let stats =
            WeeklyStatsService::new(Arc::clone(&cache), Arc::clone(&activities), stats_ttl);
        let invalidation = InvalidationHook::new(Arc::clone(&cache));
        Self {
            cache,
            activities,
            stats,
            invalidation,
        }
    }

    /// Creates state from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Duration::from_millis(config.stats_ttl_ms))
    }
}

/// Handler for POST /activities
///
/// Creates a record; 409 if one exists for the (subject, date).
pub async fn create_activity_handler(
    State(state): State<AppState>,
    Json(req): Json<ActivityUpsertRequest>,
) -> Result<Json<ActivityResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let record = req.record();
    state
        .activities
        .write()
        .await
        .insert(&req.user_id, record.clone())?;

    // Invalidate before reporting success to the caller
    state.invalidation.on_mutate(&req.user_id, record.date).await;

    Ok(Json(ActivityResponse::new("Activity created", record)))
}

/// Handler for PUT /activities
///
/// Replaces the record for the (subject, date); 404 if absent.
pub async fn update_activity_handler(
    State(state): State<AppState>,
    Json(req): Json<ActivityUpsertRequest>,
) -> Result<Json<ActivityResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let record = state
        .activities
        .write()
        .await
        .update(&req.user_id, req.record())?;

    state.invalidation.on_mutate(&req.user_id, record.date).await;

    Ok(Json(ActivityResponse::new("Activity updated", record)))
}

/// Handler for DELETE /activities
///
/// Removes one record, addressed by (subject, date) in the body; 404 if
/// absent.
pub async fn delete_activity_handler(
    State(state): State<AppState>,
    Json(req): Json<ActivityDeleteRequest>,
) -> Result<Json<DeletedResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    state.activities.write().await.remove(&req.user_id, req.date)?;

    state.invalidation.on_mutate(&req.user_id, req.date).await;

    Ok(Json(DeletedResponse::new("Activity deleted")))
}

/// Handler for GET /users/:user_id/activities
///
/// Lists a subject's records with optional inclusive from/to bounds.
pub async fn list_activities_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Json<ActivityListResponse> {
    let records = state
        .activities
        .read()
        .await
        .list(&user_id, range.from, range.to);

    Json(ActivityListResponse::new(records))
}

/// Handler for DELETE /users/:user_id/activities
///
/// Drops every record for the subject and purges both cached families.
pub async fn purge_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<PurgeResponse> {
    let removed = state.activities.write().await.remove_subject(&user_id);

    state.invalidation.on_subject_removed(&user_id).await;

    Json(PurgeResponse::new(&user_id, removed))
}

/// Handler for GET /users/:user_id/stats/weekly
///
/// The cached read path: returns the subject's aggregate for the 7-day
/// window ending today (UTC).
pub async fn weekly_stats_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<WeeklyStatsResponse>> {
    let aggregate = state.stats.weekly_stats(&user_id).await?;
    Ok(Json(WeeklyStatsResponse::from(aggregate)))
}

/// Handler for GET /cache/stats
///
/// Cache introspection: counters plus the live key set. No side effects.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let cache = state.cache.read().await;
    Json(CacheStatsResponse::new(cache.stats(), cache.keys()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
