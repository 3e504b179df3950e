//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use docqflow_auth::JwtDecoder;
use docqflow_core::config::AppConfig;
use docqflow_service::messaging::MessagingService;
use docqflow_service::notification::NotificationService;
use docqflow_service::reminder::ReminderService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health probe).
    pub db_pool: PgPool,
    /// Bearer-token decoder.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Messaging router.
    pub messaging_service: Arc<MessagingService>,
    /// Reminder scheduler.
    pub reminder_service: Arc<ReminderService>,
    /// Notification read surface.
    pub notification_service: Arc<NotificationService>,
}
