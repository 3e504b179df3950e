//! Message handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use crate::dto::request::{SendMessageRequest, ThreadQuery, UnreadQuery};
use crate::dto::response::{CountResponse, MessageRecord};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageRecord>), ApiError> {
    let message = state
        .messaging_service
        .send(
            &auth,
            req.document_id,
            req.channel,
            req.recipient_role,
            &req.message,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ThreadQuery>,
) -> Result<Json<Vec<MessageRecord>>, ApiError> {
    let messages = state
        .messaging_service
        .list_messages(&auth, query.document_id, query.channel)
        .await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// GET /api/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UnreadQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state
        .messaging_service
        .unread_count(&auth, query.document_id)
        .await?;
    Ok(Json(CountResponse { count }))
}
