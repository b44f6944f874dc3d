//! Notification handlers.

use axum::extract::{Path, Query, State};
use axum::Json;

use bidhub_core::types::id::NotificationId;
use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::notification::NotificationView;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<NotificationView>>>, ApiError> {
    let notifications = state.notifications.list_notifications(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.notifications.read_notification(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Marked as read" }),
    )))
}
