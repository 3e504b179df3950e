//! Reminder handlers, including the sweep trigger.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use uuid::Uuid;

use crate::error::ApiError;
use docqflow_core::error::AppError;
use docqflow_core::types::pagination::PageResponse;
use docqflow_entity::reminder::Reminder;
use docqflow_service::reminder::CreateReminder;

use crate::dto::request::{CreateReminderRequest, SweepParams};
use crate::dto::response::{ReminderCreated, SweepResult};
use crate::extractors::auth::bearer_token;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/reminders
pub async fn create_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<ReminderCreated>), ApiError> {
    let reminder = state
        .reminder_service
        .create(
            &auth,
            CreateReminder {
                recipient_kind: req.recipient_kind,
                recipient_id: req.recipient_id,
                recipient_user_id: req.recipient_user_id,
                title: req.title,
                body: req.body,
                send_option: req.send_option,
                scheduled_at: req.scheduled_at,
                recurrence: req.recurrence,
                recurrence_end_at: req.recurrence_end_at,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ReminderCreated::from(&reminder))))
}

/// GET /api/reminders
pub async fn list_reminders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PageResponse<Reminder>>, ApiError> {
    let page = state
        .reminder_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(page))
}

/// POST /api/reminders/sweep
///
/// Two admission paths: a bearer-authenticated firm/accountant caller
/// sweeps their own firm; an anonymous caller must present the pre-shared
/// secret and sweeps everything.
pub async fn sweep_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SweepParams>,
) -> Result<Json<SweepResult>, ApiError> {
    let scope = authorize_sweep(&state, &headers, &params)?;
    let processed = state.reminder_service.sweep(scope).await?;
    Ok(Json(SweepResult { processed }))
}

/// Resolve the sweep scope, rejecting unauthorized callers.
fn authorize_sweep(
    state: &AppState,
    headers: &HeaderMap,
    params: &SweepParams,
) -> Result<Option<Uuid>, ApiError> {
    if let Some(token) = bearer_token(headers) {
        let claims = state.jwt_decoder.decode(token)?;
        if !claims.role.manages_reminders() {
            return Err(AppError::forbidden(
                "Only firm and accountant callers may trigger a scoped sweep",
            )
            .into());
        }
        let firm_id = claims
            .firm_id
            .ok_or_else(|| AppError::forbidden("Caller has no firm affiliation"))?;
        return Ok(Some(firm_id));
    }

    let expected = state
        .config
        .sweep
        .shared_secret
        .as_deref()
        .ok_or_else(|| AppError::unauthorized("Unscoped sweep is not enabled"))?;
    if params.secret.as_deref() != Some(expected) {
        return Err(AppError::unauthorized("Invalid sweep secret").into());
    }
    Ok(None)
}
