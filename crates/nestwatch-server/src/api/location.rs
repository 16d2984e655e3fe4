//! Location tracking API endpoints.
//!
//! Ingests device location samples, runs them through the safety monitor,
//! and serves current position and history to the dashboard.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use nestwatch_core::geo::{self, AccuracyRating, MovementStatus};
use nestwatch_core::{timefmt, LocationSample, NestwatchError, SafetyMonitor};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::require_valid_child_id;
use crate::state::SharedState;

/// Creates the location router, nested under a child id.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::post(ingest_location))
        .route("/current", get(get_current_location))
        .route("/history", get(get_location_history))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A device location report.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "latitude": 37.7749,
    "longitude": -122.4194,
    "accuracy": 12.5,
    "speed": 0.4,
    "battery_level": 76
}))]
pub struct IngestLocationRequest {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Horizontal accuracy in meters.
    pub accuracy: f64,
    /// Speed in m/s. Defaults to 0 when the provider has none.
    #[serde(default)]
    pub speed: f64,
    /// Reverse-geocoded address, if the device resolved one.
    pub address: Option<String>,
    /// Fix timestamp. Defaults to the server clock when absent.
    pub timestamp: Option<DateTime<Utc>>,
    /// Battery percentage at report time.
    pub battery_level: Option<u8>,
}

/// Distance and direction to the closest zone when outside all zones.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Home",
    "distance_meters": 1112.0,
    "distance_display": "1.1 km",
    "bearing_degrees": 180.0,
    "direction": "S"
}))]
pub struct NearestZoneInfo {
    /// Zone name.
    pub name: String,
    /// Distance to the zone center in meters.
    pub distance_meters: f64,
    /// Human-readable distance.
    pub distance_display: String,
    /// Initial bearing toward the zone center.
    pub bearing_degrees: f64,
    /// Compass direction toward the zone.
    pub direction: String,
}

/// Response after ingesting a location sample.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestLocationResponse {
    /// The stored sample, stamped with containment state.
    pub sample: LocationSample,
    /// Whether the sample fell inside an active safe zone.
    pub in_safe_zone: bool,
    /// Name of the containing zone, when inside one.
    pub safe_zone_name: Option<String>,
    /// Nearest active zone, populated when outside all zones.
    pub nearest_zone: Option<NearestZoneInfo>,
    /// Number of entry/exit alerts this sample generated.
    pub alerts_created: usize,
}

/// Current location enriched with display quantities.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentLocationResponse {
    /// The most recent sample.
    pub sample: LocationSample,
    /// Qualitative accuracy rating of the fix.
    pub accuracy_rating: AccuracyRating,
    /// Movement classification from reported speed.
    pub movement: MovementStatus,
    /// Speed for display ("1.4 km/h").
    pub speed_display: String,
    /// Relative age of the fix ("5 minutes ago").
    pub reported: String,
}

/// Query parameters for location history.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LocationHistoryQuery {
    /// Restrict history to one calendar day (UTC), `YYYY-MM-DD`.
    #[param(example = "2025-06-01")]
    pub date: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Ingest a location sample for a child.
///
/// Runs the safety monitor: stamps the sample with zone containment,
/// raises entry/exit alerts, and appends the sample to history.
#[utoipa::path(
    post,
    path = "/api/children/{child_id}/location",
    tag = "location",
    operation_id = "ingestLocation",
    summary = "Report a device location",
    description = "Validates the fix, evaluates safe-zone containment, stores \
        the sample, and generates entry/exit alerts when the containment \
        state changed since the previous sample.",
    params(
        ("child_id" = String, Path, description = "Child identifier")
    ),
    request_body = IngestLocationRequest,
    responses(
        (status = 200, description = "Sample stored", body = IngestLocationResponse),
        (status = 404, description = "Child not found"),
        (status = 422, description = "Sample has no usable fix")
    )
)]
pub async fn ingest_location(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
    Json(request): Json<IngestLocationRequest>,
) -> ApiResult<Json<IngestLocationResponse>> {
    require_valid_child_id(&child_id)?;

    let state_guard = state.write().await;
    if state_guard.storage.load_profile(&child_id)?.is_none() {
        return Err(NestwatchError::ChildNotFound(child_id).into());
    }

    let sample = LocationSample {
        id: Uuid::new_v4().to_string(),
        child_id: child_id.clone(),
        latitude: request.latitude,
        longitude: request.longitude,
        accuracy: request.accuracy,
        speed: request.speed,
        address: request.address,
        timestamp: request.timestamp.unwrap_or_else(Utc::now),
        is_in_safe_zone: false,
        safe_zone_name: None,
        battery_level: request.battery_level,
    };

    let zones = state_guard.storage.load_zones(&child_id)?;
    let previous = state_guard.storage.latest_location(&child_id)?;
    let evaluation = SafetyMonitor::evaluate(sample, &zones, previous.as_ref())?;

    let limit = state_guard.config.location_history_limit;
    state_guard
        .storage
        .push_location(&child_id, evaluation.sample.clone(), limit)?;

    let mut alerts_created = 0;
    if state_guard.config.notifications_enabled {
        for alert in evaluation.alerts {
            state_guard.storage.push_notification(&child_id, alert)?;
            alerts_created += 1;
        }
    }

    let nearest_zone = evaluation.nearest.map(|n| NearestZoneInfo {
        distance_display: geo::format_distance(n.distance_meters),
        direction: n.cardinal_direction().to_string(),
        name: n.name,
        distance_meters: n.distance_meters,
        bearing_degrees: n.bearing_degrees,
    });

    Ok(Json(IngestLocationResponse {
        in_safe_zone: evaluation.sample.is_in_safe_zone,
        safe_zone_name: evaluation.sample.safe_zone_name.clone(),
        sample: evaluation.sample,
        nearest_zone,
        alerts_created,
    }))
}

/// Get the child's most recent location.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}/location/current",
    tag = "location",
    operation_id = "getCurrentLocation",
    summary = "Get the latest known location",
    params(
        ("child_id" = String, Path, description = "Child identifier")
    ),
    responses(
        (status = 200, description = "Latest location", body = CurrentLocationResponse),
        (status = 404, description = "No location reported yet")
    )
)]
pub async fn get_current_location(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
) -> ApiResult<Json<CurrentLocationResponse>> {
    let state_guard = state.read().await;
    let sample = state_guard
        .storage
        .latest_location(&child_id)?
        .ok_or_else(|| ApiError::NotFound {
            error_code: "location_not_found".to_string(),
            message: format!("No location has been reported for '{child_id}'"),
        })?;

    Ok(Json(CurrentLocationResponse {
        accuracy_rating: AccuracyRating::from_meters(sample.accuracy),
        movement: MovementStatus::from_speed_mps(sample.speed),
        speed_display: geo::format_speed(sample.speed),
        reported: timefmt::relative_time_from_now(sample.timestamp),
        sample,
    }))
}

/// Get location history, optionally restricted to one day.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}/location/history",
    tag = "location",
    operation_id = "getLocationHistory",
    summary = "Get location history",
    description = "Returns stored samples, most recent first. When `date` is \
        given, only samples from that UTC calendar day are returned.",
    params(
        ("child_id" = String, Path, description = "Child identifier"),
        LocationHistoryQuery
    ),
    responses(
        (status = 200, description = "History retrieved", body = [LocationSample]),
        (status = 400, description = "Invalid date format")
    )
)]
pub async fn get_location_history(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
    Query(query): Query<LocationHistoryQuery>,
) -> ApiResult<Json<Vec<LocationSample>>> {
    let state_guard = state.read().await;
    let mut history = state_guard.storage.load_locations(&child_id)?;

    if let Some(date_str) = query.date {
        let date = date_str
            .parse::<NaiveDate>()
            .map_err(|_| ApiError::BadRequest {
                error_code: "invalid_date_format".to_string(),
                message: "Date must be in YYYY-MM-DD format (e.g., 2025-06-01)".to_string(),
            })?;
        history.retain(|s| s.timestamp.date_naive() == date);
    }

    Ok(Json(history))
}
