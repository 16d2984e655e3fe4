//! Notification API endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::put;
use axum::{Json, Router};
use nestwatch_core::Notification;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::ApiResult;
use crate::state::SharedState;

/// Creates the mark-read router, mounted at `/api/notifications`.
///
/// The notification list itself lives under the child
/// (`/api/children/{child_id}/notifications`); see [`list_notifications`].
pub fn router() -> Router<SharedState> {
    Router::new().route("/{child_id}/{notification_id}/read", put(mark_read))
}

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NotificationQuery {
    /// Return only unread notifications.
    #[serde(default)]
    pub unread_only: bool,
}

/// List notifications for a child, newest first.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}/notifications",
    tag = "notifications",
    operation_id = "listNotifications",
    summary = "List notifications",
    params(
        ("child_id" = String, Path, description = "Child identifier"),
        NotificationQuery
    ),
    responses(
        (status = 200, description = "Notifications retrieved", body = [Notification])
    )
)]
pub async fn list_notifications(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let state_guard = state.read().await;
    let mut notes = state_guard.storage.load_notifications(&child_id)?;
    if query.unread_only {
        notes.retain(|n| !n.is_read);
    }
    Ok(Json(notes))
}

/// Mark a notification as read.
#[utoipa::path(
    put,
    path = "/api/notifications/{child_id}/{notification_id}/read",
    tag = "notifications",
    operation_id = "markNotificationRead",
    summary = "Mark a notification read",
    params(
        ("child_id" = String, Path, description = "Child identifier"),
        ("notification_id" = String, Path, description = "Notification identifier")
    ),
    responses(
        (status = 200, description = "Notification updated", body = Notification),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<SharedState>,
    Path((child_id, notification_id)): Path<(String, String)>,
) -> ApiResult<Json<Notification>> {
    let state_guard = state.write().await;
    let updated = state_guard
        .storage
        .mark_notification_read(&child_id, &notification_id)?;
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestwatch_core::{
        NestwatchConfig, NotificationCategory, NotificationKind, Priority, Storage,
    };
    use tempfile::TempDir;

    use crate::api::error::ApiError;
    use crate::state::AppState;

    fn shared_state_with_notes() -> (TempDir, SharedState, String) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());

        let read_note = {
            let mut n = Notification::new(
                "c1",
                "Weekly summary ready".into(),
                "Avani's weekly summary is available".into(),
                NotificationKind::Summary,
                NotificationCategory::Report,
                Priority::Low,
            );
            n.is_read = true;
            n
        };
        let unread = Notification::new(
            "c1",
            "Left Home".into(),
            "Avani left the Home safe zone".into(),
            NotificationKind::Alert,
            NotificationCategory::Safety,
            Priority::High,
        );
        let unread_id = unread.id.clone();
        storage.push_notification("c1", read_note).unwrap();
        storage.push_notification("c1", unread).unwrap();

        let state = AppState::with_parts(NestwatchConfig::default(), storage).into_shared();
        (dir, state, unread_id)
    }

    #[tokio::test]
    async fn test_list_all_and_unread_only() {
        let (_dir, state, _) = shared_state_with_notes();

        let all = list_notifications(
            State(state.clone()),
            Path("c1".into()),
            Query(NotificationQuery { unread_only: false }),
        )
        .await
        .unwrap();
        assert_eq!(all.0.len(), 2);
        assert_eq!(all.0[0].title, "Left Home");

        let unread = list_notifications(
            State(state),
            Path("c1".into()),
            Query(NotificationQuery { unread_only: true }),
        )
        .await
        .unwrap();
        assert_eq!(unread.0.len(), 1);
        assert_eq!(unread.0[0].title, "Left Home");
    }

    #[tokio::test]
    async fn test_mark_read_persists() {
        let (_dir, state, unread_id) = shared_state_with_notes();

        let updated = mark_read(State(state.clone()), Path(("c1".into(), unread_id)))
            .await
            .unwrap();
        assert!(updated.0.is_read);

        let unread = list_notifications(
            State(state),
            Path("c1".into()),
            Query(NotificationQuery { unread_only: true }),
        )
        .await
        .unwrap();
        assert!(unread.0.is_empty());
    }

    #[tokio::test]
    async fn test_mark_read_unknown_is_404() {
        let (_dir, state, _) = shared_state_with_notes();
        let result = mark_read(State(state), Path(("c1".into(), "n404".into()))).await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }
}
