//! Route definitions for the DocqFlow HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(message_routes())
        .merge(reminder_routes())
        .merge(notification_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Message thread endpoints
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(handlers::message::send_message))
        .route("/messages", get(handlers::message::list_messages))
        .route(
            "/messages/unread-count",
            get(handlers::message::unread_count),
        )
}

/// Reminder endpoints, including the sweep trigger
fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/reminders", post(handlers::reminder::create_reminder))
        .route("/reminders", get(handlers::reminder::list_reminders))
        .route(
            "/reminders/sweep",
            post(handlers::reminder::sweep_reminders),
        )
}

/// Notification endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
