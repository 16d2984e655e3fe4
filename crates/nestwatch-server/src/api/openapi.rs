//! OpenAPI specification generation for the nestwatch API.
//!
//! The generated document is served at `/api/openapi.json` and can be
//! written to a file with the `gen-openapi` binary for client generation.

use axum::Json;
use utoipa::OpenApi;

use nestwatch_core::models::{
    Child, Interest, LocationSample, Notification, NotificationCategory, NotificationKind,
    Preference, Priority, SafeZone, Trend, WeeklySummary,
};
use nestwatch_core::geo::{AccuracyRating, GeoPoint, MovementStatus};

use super::children::{CreateChildRequest, UpdateChildRequest};
use super::error::ErrorResponse;
use super::health::HealthResponse;
use super::insights::{PreferenceReport, WeeklySummaryResponse};
use super::location::{
    CurrentLocationResponse, IngestLocationRequest, IngestLocationResponse, NearestZoneInfo,
};
use super::zones::{CreateZoneRequest, DeleteZoneResponse, UpdateZoneRequest};

/// Serve the OpenAPI specification as JSON.
pub async fn get_openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Returns the OpenAPI specification as a pretty-printed string.
/// Used by the gen-openapi binary.
#[allow(dead_code)]
pub fn get_openapi_json() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .expect("Failed to serialize OpenAPI spec")
}

/// Main OpenAPI document structure for nestwatch.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "nestwatch API",
        version = "0.1.0",
        description = r#"
# nestwatch API

nestwatch keeps parents informed about where their child is and what they
are curious about.

## Overview

This API provides:

1. **Location Monitoring**: Ingest device location reports and query the
   child's current position and history
2. **Safe Zones**: Circular geofences around expected places (home, school);
   the service raises alerts when the child enters or leaves one
3. **Notifications**: Safety alerts and activity updates for the parent
4. **Insights**: Detected interests, sentiment preferences, and weekly
   summaries

## Conventions

- All timestamps are UTC, RFC 3339
- Coordinates are decimal degrees; distances are meters
- A report at exactly (0, 0) is treated as "no GPS fix" and rejected
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local nestwatch server")
    ),
    tags(
        (
            name = "system",
            description = "Health checks and service status"
        ),
        (
            name = "children",
            description = "Child profile enrollment and management"
        ),
        (
            name = "location",
            description = "Device location ingest, current position, and history"
        ),
        (
            name = "zones",
            description = "Safe-zone geofence management"
        ),
        (
            name = "notifications",
            description = "Safety alerts and activity notifications"
        ),
        (
            name = "insights",
            description = "Detected interests, sentiment preferences, and weekly summaries"
        )
    ),
    paths(
        // Health endpoints
        super::health::health_check,
        // Child endpoints
        super::children::create_child,
        super::children::get_child,
        super::children::update_child,
        // Location endpoints
        super::location::ingest_location,
        super::location::get_current_location,
        super::location::get_location_history,
        // Zone endpoints
        super::zones::list_zones,
        super::zones::create_zone,
        super::zones::update_zone,
        super::zones::delete_zone,
        // Notification endpoints
        super::notifications::list_notifications,
        super::notifications::mark_read,
        // Insight endpoints
        super::insights::get_interests,
        super::insights::get_preferences,
        super::insights::get_weekly_summary,
    ),
    components(
        schemas(
            // Error types
            ErrorResponse,
            // Health types
            HealthResponse,
            // Domain types
            Child,
            SafeZone,
            LocationSample,
            GeoPoint,
            Notification,
            NotificationKind,
            NotificationCategory,
            Priority,
            Interest,
            Preference,
            Trend,
            WeeklySummary,
            AccuracyRating,
            MovementStatus,
            // Child types
            CreateChildRequest,
            UpdateChildRequest,
            // Location types
            IngestLocationRequest,
            IngestLocationResponse,
            NearestZoneInfo,
            CurrentLocationResponse,
            // Zone types
            CreateZoneRequest,
            UpdateZoneRequest,
            DeleteZoneResponse,
            // Insight types
            PreferenceReport,
            WeeklySummaryResponse,
        )
    )
)]
pub struct ApiDoc;
