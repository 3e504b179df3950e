//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docqflow_entity::message::MessageChannel;
use docqflow_entity::reminder::{RecipientKind, Recurrence, SendOption};
use docqflow_entity::user::Role;

/// Body of `POST /api/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// The document the message is about.
    pub document_id: Uuid,
    /// Chat (default) or clarification thread.
    #[serde(default)]
    pub channel: MessageChannel,
    /// Message text.
    pub message: String,
    /// The role the message is addressed to.
    pub recipient_role: Role,
}

/// Query parameters of `GET /api/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadQuery {
    /// The document whose thread to list.
    pub document_id: Uuid,
    /// Restrict to one channel; both when absent.
    pub channel: Option<MessageChannel>,
}

/// Query parameters of `GET /api/messages/unread-count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadQuery {
    /// The document to count unread messages on.
    pub document_id: Uuid,
}

/// Body of `POST /api/reminders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    /// Recipient entity kind.
    pub recipient_kind: RecipientKind,
    /// Recipient entity id.
    pub recipient_id: Uuid,
    /// Recipient user, denormalized for delivery.
    pub recipient_user_id: Uuid,
    /// Title.
    pub title: String,
    /// Body.
    pub body: String,
    /// Immediate or scheduled delivery.
    pub send_option: SendOption,
    /// Delivery time; required when `send_option = schedule`.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Recurrence rule (defaults to none).
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Recurrence end boundary.
    pub recurrence_end_at: Option<DateTime<Utc>>,
}

/// Query parameters of the sweep trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepParams {
    /// Pre-shared secret for unscoped invocation.
    pub secret: Option<String>,
}
