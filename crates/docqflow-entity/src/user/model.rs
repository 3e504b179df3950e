//! User entity model (read-side).
//!
//! Users are owned by the external auth/firm subsystem; DocqFlow only
//! reads them to resolve roles and notification targets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A user row from the shared relational store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// The user's role.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
