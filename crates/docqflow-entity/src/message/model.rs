//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::channel::MessageChannel;
use crate::user::Role;

/// One directed communication about one document.
///
/// The recipient is a role, not a user; resolution to concrete users
/// happens at send/notify time from the document's ownership graph.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// The document this message is about.
    pub document_id: Uuid,
    /// Chat or clarification thread.
    pub channel: MessageChannel,
    /// The sending user.
    pub sender_id: Uuid,
    /// The role the sender acted under.
    pub sender_role: Role,
    /// The role the message is addressed to.
    pub recipient_role: Role,
    /// Message text.
    pub body: String,
    /// Whether the counterpart role has viewed this message.
    pub is_read: bool,
    /// When the message was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}
