//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it, and injects the caller's context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bidhub_core::error::AppError;
use bidhub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated caller context available in handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing Authorization header")))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(AppError::unauthorized("Invalid Authorization header format"))
        })?;

        let claims = state.verifier.verify(token)?;
        Ok(AuthUser(RequestContext::new(claims.user_id(), claims.role)))
    }
}
