//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-facing alert produced by message fan-out or reminder delivery.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body text (message preview or reminder body).
    pub body: String,
    /// Document the notification links back to, if any.
    pub document_id: Option<Uuid>,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
