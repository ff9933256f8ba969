//! API Module
//!
//! HTTP handlers and routing for the stats service REST API.
//!
//! # Endpoints
//! - `POST /activities` - Create an activity record
//! - `PUT /activities` - Update an activity record
//! - `DELETE /activities` - Delete one activity record
//! - `GET /users/:user_id/activities` - List a subject's records
//! - `DELETE /users/:user_id/activities` - Drop all records for a subject
//! - `GET /users/:user_id/stats/weekly` - Cached weekly aggregate
//! - `GET /cache/stats` - Cache introspection
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
