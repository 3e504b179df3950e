//! Bearer-token validation configuration.
//!
//! Token issuance lives in the external auth subsystem; DocqFlow only
//! verifies signatures, so the secret is the whole configuration surface.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token-issuing auth subsystem.
    pub jwt_secret: String,
    /// Clock-skew leeway in seconds when validating token expiry.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    5
}
