//! API Routes
//!
//! Configures the Axum router with all stats service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, create_activity_handler, delete_activity_handler, health_handler,
    list_activities_handler, purge_user_handler, update_activity_handler, weekly_stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /activities` - Create an activity record
/// - `PUT /activities` - Update an activity record
/// - `DELETE /activities` - Delete one activity record
/// - `GET /users/:user_id/activities` - List a subject's records
/// - `DELETE /users/:user_id/activities` - Drop all records for a subject
/// - `GET /users/:user_id/stats/weekly` - Cached weekly aggregate
/// - `GET /cache/stats` - Cache introspection
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route(
            "/activities",
            post(create_activity_handler)
                .put(update_activity_handler)
                .delete(delete_activity_handler),
        )
        .route(
            "/users/:user_id/activities",
            get(list_activities_handler).delete(purge_user_handler),
        )
        .route("/users/:user_id/stats/weekly", get(weekly_stats_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(Duration::from_secs(3600)))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_activity_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/activities")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"user_id":"U1","date":"2024-01-05","steps":1000,"calories":250,"workout_minutes":30}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_weekly_stats_endpoint_empty_subject() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/U1/stats/weekly")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_missing_activity_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/activities")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"user_id":"U1","date":"2024-01-05"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
