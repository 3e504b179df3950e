//! Reminder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::recurrence::Recurrence;

/// A scheduled or already-sent one-way notice to a specific user.
///
/// Each recurring occurrence is an independent row; delivery of one
/// occurrence spawns the next pending sibling if the recurrence rule and
/// end boundary allow it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    /// Unique reminder identifier.
    pub id: Uuid,
    /// The firm this reminder is scoped to.
    pub firm_id: Uuid,
    /// The user who created the reminder.
    pub created_by: Uuid,
    /// Kind of the recipient entity.
    pub recipient_kind: RecipientKind,
    /// The recipient entity (client or accountant record).
    pub recipient_id: Uuid,
    /// The recipient's user, denormalized for delivery.
    pub recipient_user_id: Uuid,
    /// Reminder title.
    pub title: String,
    /// Reminder body.
    pub body: String,
    /// When the reminder should be (or was) delivered.
    pub scheduled_at: DateTime<Utc>,
    /// Delivery status.
    pub status: ReminderStatus,
    /// When the reminder was delivered; null while pending.
    pub sent_at: Option<DateTime<Utc>>,
    /// Recurrence rule.
    pub recurrence: Recurrence,
    /// Boundary past which no further occurrence is spawned.
    pub recurrence_end_at: Option<DateTime<Utc>>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Reminder delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reminder_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    /// Waiting for its scheduled time.
    Pending,
    /// Delivered; `sent_at` is set.
    Sent,
}

/// What kind of entity a reminder is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recipient_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    /// A client record of the firm.
    Client,
    /// An accountant of the firm.
    Accountant,
}

/// Whether a reminder is delivered immediately or at a future time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendOption {
    /// Deliver synchronously at creation.
    Now,
    /// Persist as pending for a future `scheduled_at`.
    Schedule,
}
