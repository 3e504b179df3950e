//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::error::ApiError;
use docqflow_core::types::pagination::PageResponse;
use docqflow_entity::notification::Notification;

use crate::dto::response::{CountResponse, MarkAllResponse, MessageResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<Notification>>, ApiError> {
    let page = state
        .notification_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(page))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(CountResponse { count }))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(MessageResponse {
        message: "Marked as read".to_string(),
    }))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MarkAllResponse>, ApiError> {
    let marked = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(MarkAllResponse { marked }))
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notification_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse {
        message: "Deleted".to_string(),
    }))
}
