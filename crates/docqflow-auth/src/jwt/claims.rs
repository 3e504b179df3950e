//! JWT claims structure issued by the external auth subsystem.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docqflow_entity::user::Role;

/// Claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// The user's role at issuance time.
    pub role: Role,
    /// Firm affiliation: the owned firm for `firm`, the employing firm
    /// for `accountant`, absent for `client`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firm_id: Option<Uuid>,
    /// Username for convenience.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
