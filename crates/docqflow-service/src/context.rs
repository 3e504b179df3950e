//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docqflow_entity::user::Role;

/// Context for the current authenticated request.
///
/// Extracted from the bearer token and passed into every service method,
/// so each operation knows *who* is acting and under *which* role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: Role,
    /// Firm affiliation (owned firm for `firm`, employing firm for
    /// `accountant`, absent for `client`).
    pub firm_id: Option<Uuid>,
    /// The username (convenience field from the token claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: Role, firm_id: Option<Uuid>, username: String) -> Self {
        Self {
            user_id,
            role,
            firm_id,
            username,
            request_time: Utc::now(),
        }
    }

    /// The firm this identity may scope reminder operations to.
    ///
    /// Errors with `Forbidden` for roles without a firm affiliation.
    pub fn require_firm(&self) -> Result<Uuid, docqflow_core::AppError> {
        self.firm_id.ok_or_else(|| {
            docqflow_core::AppError::forbidden("Caller has no firm affiliation")
        })
    }
}
