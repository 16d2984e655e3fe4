//! HTTP API routes and handlers.
//!
//! This module contains all HTTP endpoint implementations organized by domain:
//! - `children` - Child profile enrollment and management
//! - `location` - Location ingest, current position, and history
//! - `zones` - Safe-zone geofence management
//! - `notifications` - Safety alerts and activity notifications
//! - `insights` - Interests, preferences, and weekly summaries
//! - `health` - Service health checks
//! - `error` - API error types
//! - `openapi` - OpenAPI specification generation

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub mod children;
pub mod error;
pub mod health;
pub mod insights;
pub mod location;
pub mod notifications;
pub mod openapi;
pub mod zones;

// Re-export commonly used types
#[allow(unused_imports)]
pub use error::{ApiError, ApiResult, ErrorResponse};

// Re-export OpenAPI utilities for the gen-openapi binary
#[allow(unused_imports)]
pub use openapi::get_openapi_json;

/// Reject child ids that would not survive as a directory name.
pub fn require_valid_child_id(id: &str) -> Result<(), ApiError> {
    if nestwatch_core::is_valid_id(id) {
        Ok(())
    } else {
        Err(ApiError::BadRequest {
            error_code: "invalid_child_id".to_string(),
            message: format!("'{id}' is not a valid id (1-64 chars of letters, digits, - or _)"),
        })
    }
}

/// Creates the combined API router with all endpoints.
///
/// # Route Structure
///
/// ```text
/// /health                                  - Health check
/// /api
/// ├── /children                            - Enroll, fetch, update profiles
/// │   └── /{child_id}
/// │       ├── /location                    - Ingest, current, history
/// │       ├── /safezones                   - Safe-zone CRUD
/// │       ├── /notifications               - Notification list
/// │       ├── /interests                   - Detected interests
/// │       ├── /preferences                 - Sentiment preferences
/// │       └── /summary/weekly              - Weekly summary
/// ├── /notifications/{child_id}/{id}/read  - Mark a notification read
/// └── /openapi.json                        - OpenAPI specification
/// ```
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .nest(
            "/api",
            Router::new()
                // OpenAPI spec at /api/openapi.json
                .route("/openapi.json", get(openapi::get_openapi_spec))
                // Profile management
                .nest("/children", children::router())
                // Per-child monitoring surfaces
                .nest("/children/{child_id}/location", location::router())
                .nest("/children/{child_id}/safezones", zones::router())
                .route(
                    "/children/{child_id}/notifications",
                    get(notifications::list_notifications),
                )
                .nest("/children/{child_id}", insights::router())
                // Notification actions
                .nest("/notifications", notifications::router()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_id_validation() {
        assert!(require_valid_child_id("avani_001").is_ok());
        assert!(require_valid_child_id("").is_err());
        assert!(require_valid_child_id("../escape").is_err());
        assert!(require_valid_child_id("has space").is_err());
    }
}
