//! Participant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::Role;

/// A cached (document, user, role) tuple.
///
/// Created lazily when a message is addressed to a role, so the role is
/// guaranteed at least one resolvable member; consulted to gate thread
/// read access. Unique per (document, user, role).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    /// Unique participant identifier.
    pub id: Uuid,
    /// The document.
    pub document_id: Uuid,
    /// The user who can see the thread.
    pub user_id: Uuid,
    /// The role the user holds on this document.
    pub role: Role,
    /// When the participant row was created.
    pub created_at: DateTime<Utc>,
}
