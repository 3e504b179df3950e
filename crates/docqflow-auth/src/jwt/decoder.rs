//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use docqflow_core::config::auth::AuthConfig;
use docqflow_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens issued by the external auth subsystem.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks signature validity and expiration; the resulting claims are
    /// the trusted identity assertion for the request.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docqflow_entity::user::Role;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            leeway_seconds: 5,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_round_trip() {
        let decoder = JwtDecoder::new(&config());
        let user_id = Uuid::new_v4();
        let firm_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id,
            role: Role::Accountant,
            firm_id: Some(firm_id),
            username: "jordan".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };

        let decoded = decoder.decode(&sign(&claims, "test-secret")).unwrap();
        assert_eq!(decoded.user_id(), user_id);
        assert_eq!(decoded.role, Role::Accountant);
        assert_eq!(decoded.firm_id, Some(firm_id));
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let decoder = JwtDecoder::new(&config());
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Client,
            firm_id: None,
            username: "casey".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };

        assert!(decoder.decode(&sign(&claims, "other-secret")).is_err());
    }

    #[test]
    fn test_decode_rejects_expired() {
        let decoder = JwtDecoder::new(&config());
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Firm,
            firm_id: Some(Uuid::new_v4()),
            username: "dana".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };

        assert!(decoder.decode(&sign(&claims, "test-secret")).is_err());
    }
}
