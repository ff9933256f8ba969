//! Error types for the stats service
//!
//! Provides unified error handling using thiserror. Cache misses are not
//! errors anywhere in this crate; only record-store conflicts, bad input,
//! and internal failures surface here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the stats service.
#[derive(Error, Debug)]
pub enum AppError {
    /// No record found for the given subject/date
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record already exists for the given subject/date
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the stats service.
pub type Result<T> = std::result::Result<T, AppError>;
