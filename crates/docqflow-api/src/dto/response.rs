//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docqflow_entity::message::{Message, MessageChannel};
use docqflow_entity::reminder::{Reminder, ReminderStatus};
use docqflow_entity::user::Role;

/// A message echoed back to API callers.
///
/// The body is serialized as `message` to match the frontend contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message id.
    pub id: Uuid,
    /// Document reference.
    pub document_id: Uuid,
    /// Thread channel.
    pub channel: MessageChannel,
    /// Message text.
    pub message: String,
    /// Sending user.
    pub sender_id: Uuid,
    /// Sender role.
    pub sender_role: Role,
    /// Recipient role.
    pub recipient_role: Role,
    /// Read flag.
    pub is_read: bool,
    /// Read timestamp.
    pub read_at: Option<DateTime<Utc>>,
    /// Created timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageRecord {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            document_id: m.document_id,
            channel: m.channel,
            message: m.body,
            sender_id: m.sender_id,
            sender_role: m.sender_role,
            recipient_role: m.recipient_role,
            is_read: m.is_read,
            read_at: m.read_at,
            created_at: m.created_at,
        }
    }
}

/// Response of `POST /api/reminders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderCreated {
    /// Reminder id.
    pub id: Uuid,
    /// Delivery status after creation.
    pub status: ReminderStatus,
    /// Delivery timestamp; null while pending.
    pub sent_at: Option<DateTime<Utc>>,
    /// Scheduled delivery time.
    pub scheduled_at: DateTime<Utc>,
}

impl From<&Reminder> for ReminderCreated {
    fn from(r: &Reminder) -> Self {
        Self {
            id: r.id,
            status: r.status,
            sent_at: r.sent_at,
            scheduled_at: r.scheduled_at,
        }
    }
}

/// Response of the sweep trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    /// Number of reminders delivered by this invocation.
    pub processed: u64,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: i64,
}

/// Response of `PUT /api/notifications/read-all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAllResponse {
    /// Rows marked read.
    pub marked: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database status.
    pub database: String,
}
