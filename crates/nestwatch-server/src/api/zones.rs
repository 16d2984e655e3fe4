//! Safe-zone management API endpoints.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use nestwatch_core::{is_valid_hex_color, NestwatchError, SafeZone};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult};
use crate::api::require_valid_child_id;
use crate::state::SharedState;

/// Creates the safe-zone router, nested under a child id.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_zones).post(create_zone))
        .route("/{zone_id}", axum::routing::put(update_zone).delete(delete_zone))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a safe zone.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Home",
    "latitude": 37.7749,
    "longitude": -122.4194,
    "radius": 100
}))]
pub struct CreateZoneRequest {
    /// Display name (3-30 characters).
    #[schema(example = "Home", min_length = 3, max_length = 30)]
    pub name: String,
    /// Center latitude in degrees.
    pub latitude: f64,
    /// Center longitude in degrees.
    pub longitude: f64,
    /// Radius in meters (25-1000). Uses the configured default when absent.
    pub radius: Option<u32>,
    /// Human-readable address of the center.
    pub address: Option<String>,
    /// Map color as #RRGGBB.
    pub color: Option<String>,
    /// Map icon name.
    pub icon: Option<String>,
    /// Free-form schedule description.
    pub schedule: Option<String>,
}

/// Request body for updating a safe zone. Absent fields are unchanged.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "radius": 250,
    "alerts_enabled": false
}))]
pub struct UpdateZoneRequest {
    /// New display name.
    pub name: Option<String>,
    /// New center latitude.
    pub latitude: Option<f64>,
    /// New center longitude.
    pub longitude: Option<f64>,
    /// New radius in meters.
    pub radius: Option<u32>,
    /// New address.
    pub address: Option<String>,
    /// New map color as #RRGGBB.
    pub color: Option<String>,
    /// New map icon name.
    pub icon: Option<String>,
    /// New schedule description.
    pub schedule: Option<String>,
    /// Activate or deactivate the zone.
    pub is_active: Option<bool>,
    /// Enable or disable entry/exit alerts.
    pub alerts_enabled: Option<bool>,
}

/// Response after deleting a safe zone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteZoneResponse {
    /// Id of the removed zone.
    pub deleted: String,
    /// Zones remaining for the child.
    pub remaining: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// List a child's safe zones.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}/safezones",
    tag = "zones",
    operation_id = "listZones",
    summary = "List safe zones",
    description = "Returns zones in creation order. When a location falls in \
        more than one zone, the first zone in this order wins.",
    params(
        ("child_id" = String, Path, description = "Child identifier")
    ),
    responses(
        (status = 200, description = "Zones retrieved", body = [SafeZone])
    )
)]
pub async fn list_zones(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
) -> ApiResult<Json<Vec<SafeZone>>> {
    let state_guard = state.read().await;
    let zones = state_guard.storage.load_zones(&child_id)?;
    Ok(Json(zones))
}

/// Create a safe zone for a child.
#[utoipa::path(
    post,
    path = "/api/children/{child_id}/safezones",
    tag = "zones",
    operation_id = "createZone",
    summary = "Create a safe zone",
    params(
        ("child_id" = String, Path, description = "Child identifier")
    ),
    request_body = CreateZoneRequest,
    responses(
        (status = 200, description = "Zone created", body = SafeZone),
        (status = 400, description = "Invalid zone fields"),
        (status = 404, description = "Child not found")
    )
)]
pub async fn create_zone(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
    Json(request): Json<CreateZoneRequest>,
) -> ApiResult<Json<SafeZone>> {
    require_valid_child_id(&child_id)?;

    let state_guard = state.write().await;
    if state_guard.storage.load_profile(&child_id)?.is_none() {
        return Err(NestwatchError::ChildNotFound(child_id).into());
    }

    let radius = request
        .radius
        .unwrap_or(state_guard.config.default_zone_radius_meters);
    let mut zone = SafeZone::new(
        &child_id,
        &request.name,
        request.latitude,
        request.longitude,
        radius,
    );
    zone.address = request.address;
    if let Some(color) = request.color {
        validate_color(&color)?;
        zone.color = color;
    }
    if let Some(icon) = request.icon {
        zone.icon = icon;
    }
    if let Some(schedule) = request.schedule {
        zone.schedule = schedule;
    }
    zone.validate()?;

    let mut zones = state_guard.storage.load_zones(&child_id)?;
    zones.push(zone.clone());
    state_guard.storage.save_zones(&child_id, &zones)?;

    tracing::info!(child_id = %child_id, zone = %zone.name, radius = zone.radius, "created safe zone");
    Ok(Json(zone))
}

/// Update a safe zone.
#[utoipa::path(
    put,
    path = "/api/children/{child_id}/safezones/{zone_id}",
    tag = "zones",
    operation_id = "updateZone",
    summary = "Update a safe zone",
    params(
        ("child_id" = String, Path, description = "Child identifier"),
        ("zone_id" = String, Path, description = "Zone identifier")
    ),
    request_body = UpdateZoneRequest,
    responses(
        (status = 200, description = "Zone updated", body = SafeZone),
        (status = 400, description = "Invalid zone fields"),
        (status = 404, description = "Zone not found")
    )
)]
pub async fn update_zone(
    State(state): State<SharedState>,
    Path((child_id, zone_id)): Path<(String, String)>,
    Json(request): Json<UpdateZoneRequest>,
) -> ApiResult<Json<SafeZone>> {
    let state_guard = state.write().await;
    let mut zones = state_guard.storage.load_zones(&child_id)?;
    let zone = zones
        .iter_mut()
        .find(|z| z.id == zone_id)
        .ok_or(NestwatchError::ZoneNotFound(zone_id))?;

    if let Some(name) = request.name {
        zone.name = name;
    }
    if let Some(latitude) = request.latitude {
        zone.latitude = latitude;
    }
    if let Some(longitude) = request.longitude {
        zone.longitude = longitude;
    }
    if let Some(radius) = request.radius {
        zone.radius = radius;
    }
    if let Some(address) = request.address {
        zone.address = Some(address);
    }
    if let Some(color) = request.color {
        validate_color(&color)?;
        zone.color = color;
    }
    if let Some(icon) = request.icon {
        zone.icon = icon;
    }
    if let Some(schedule) = request.schedule {
        zone.schedule = schedule;
    }
    if let Some(is_active) = request.is_active {
        zone.is_active = is_active;
    }
    if let Some(alerts_enabled) = request.alerts_enabled {
        zone.alerts_enabled = alerts_enabled;
    }
    zone.validate()?;

    let updated = zone.clone();
    state_guard.storage.save_zones(&child_id, &zones)?;
    Ok(Json(updated))
}

/// Delete a safe zone.
#[utoipa::path(
    delete,
    path = "/api/children/{child_id}/safezones/{zone_id}",
    tag = "zones",
    operation_id = "deleteZone",
    summary = "Delete a safe zone",
    params(
        ("child_id" = String, Path, description = "Child identifier"),
        ("zone_id" = String, Path, description = "Zone identifier")
    ),
    responses(
        (status = 200, description = "Zone deleted", body = DeleteZoneResponse),
        (status = 404, description = "Zone not found")
    )
)]
pub async fn delete_zone(
    State(state): State<SharedState>,
    Path((child_id, zone_id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteZoneResponse>> {
    let state_guard = state.write().await;
    let mut zones = state_guard.storage.load_zones(&child_id)?;
    let before = zones.len();
    zones.retain(|z| z.id != zone_id);
    if zones.len() == before {
        return Err(NestwatchError::ZoneNotFound(zone_id).into());
    }
    state_guard.storage.save_zones(&child_id, &zones)?;

    tracing::info!(child_id = %child_id, zone_id = %zone_id, "deleted safe zone");
    Ok(Json(DeleteZoneResponse {
        deleted: zone_id,
        remaining: zones.len(),
    }))
}

fn validate_color(color: &str) -> Result<(), ApiError> {
    if is_valid_hex_color(color) {
        Ok(())
    } else {
        Err(ApiError::BadRequest {
            error_code: "invalid_zone_color".to_string(),
            message: format!("'{color}' is not a #RRGGBB hex color"),
        })
    }
}
