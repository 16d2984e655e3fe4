//! Child profile API endpoints.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use nestwatch_core::{Child, NestwatchError};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::require_valid_child_id;
use crate::state::SharedState;

/// Creates the children router.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(create_child))
        .route("/{child_id}", get(get_child).put(update_child))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for enrolling a child.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Avani",
    "age": 8,
    "parent_id": "parent_001"
}))]
pub struct CreateChildRequest {
    /// Optional explicit id; generated when absent.
    pub id: Option<String>,
    /// Display name (2-50 characters).
    #[schema(example = "Avani", min_length = 2, max_length = 50)]
    pub name: String,
    /// Age in years (3-18).
    #[schema(example = 8, minimum = 3, maximum = 18)]
    pub age: u8,
    /// Owning parent account id.
    pub parent_id: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Paired device id.
    pub device_id: Option<String>,
}

/// Request body for updating a child profile. Absent fields are unchanged.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Avani",
    "age": 9
}))]
pub struct UpdateChildRequest {
    /// New display name.
    pub name: Option<String>,
    /// New age.
    pub age: Option<u8>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
    /// New paired device id.
    pub device_id: Option<String>,
    /// Enable or disable monitoring.
    pub is_active: Option<bool>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Enroll a child for monitoring.
#[utoipa::path(
    post,
    path = "/api/children",
    tag = "children",
    operation_id = "createChild",
    summary = "Enroll a child",
    request_body = CreateChildRequest,
    responses(
        (status = 200, description = "Child enrolled", body = Child),
        (status = 400, description = "Invalid profile fields")
    )
)]
pub async fn create_child(
    State(state): State<SharedState>,
    Json(request): Json<CreateChildRequest>,
) -> ApiResult<Json<Child>> {
    let id = request.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    require_valid_child_id(&id)?;

    let now = Utc::now();
    let child = Child {
        id,
        name: request.name,
        age: request.age,
        avatar_url: request.avatar_url,
        parent_id: request.parent_id,
        device_id: request.device_id,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    child.validate()?;

    let state_guard = state.write().await;
    if state_guard.storage.load_profile(&child.id)?.is_some() {
        return Err(ApiError::BadRequest {
            error_code: "child_already_exists".to_string(),
            message: format!("A child with id '{}' is already enrolled", child.id),
        });
    }
    state_guard.storage.save_profile(&child)?;

    tracing::info!(child_id = %child.id, "enrolled child");
    Ok(Json(child))
}

/// Get a child's profile.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}",
    tag = "children",
    operation_id = "getChild",
    summary = "Get a child profile",
    params(
        ("child_id" = String, Path, description = "Child identifier")
    ),
    responses(
        (status = 200, description = "Profile retrieved", body = Child),
        (status = 404, description = "Child not found")
    )
)]
pub async fn get_child(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
) -> ApiResult<Json<Child>> {
    let state_guard = state.read().await;
    let child = state_guard
        .storage
        .load_profile(&child_id)?
        .ok_or(NestwatchError::ChildNotFound(child_id))?;
    Ok(Json(child))
}

/// Update a child's profile.
#[utoipa::path(
    put,
    path = "/api/children/{child_id}",
    tag = "children",
    operation_id = "updateChild",
    summary = "Update a child profile",
    params(
        ("child_id" = String, Path, description = "Child identifier")
    ),
    request_body = UpdateChildRequest,
    responses(
        (status = 200, description = "Profile updated", body = Child),
        (status = 400, description = "Invalid profile fields"),
        (status = 404, description = "Child not found")
    )
)]
pub async fn update_child(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
    Json(request): Json<UpdateChildRequest>,
) -> ApiResult<Json<Child>> {
    let state_guard = state.write().await;
    let mut child = state_guard
        .storage
        .load_profile(&child_id)?
        .ok_or(NestwatchError::ChildNotFound(child_id))?;

    if let Some(name) = request.name {
        child.name = name;
    }
    if let Some(age) = request.age {
        child.age = age;
    }
    if let Some(avatar_url) = request.avatar_url {
        child.avatar_url = Some(avatar_url);
    }
    if let Some(device_id) = request.device_id {
        child.device_id = Some(device_id);
    }
    if let Some(is_active) = request.is_active {
        child.is_active = is_active;
    }
    child.updated_at = Utc::now();
    child.validate()?;

    state_guard.storage.save_profile(&child)?;
    Ok(Json(child))
}
