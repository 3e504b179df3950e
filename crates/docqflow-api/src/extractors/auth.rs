//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::error::ApiError;
use docqflow_core::error::AppError;
use docqflow_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated identity available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pull the bearer token out of request headers, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Missing or malformed Authorization header"))?;

        let claims = state.jwt_decoder.decode(token)?;

        let ctx = RequestContext::new(
            claims.user_id(),
            claims.role,
            claims.firm_id,
            claims.username,
        );

        Ok(AuthUser(ctx))
    }
}
