use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use std::sync::Arc;
use tubely_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Authenticated caller, taken from the `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = HttpAppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized("Missing or malformed bearer token".to_string())
            })?;

        let claims = state.jwt.validate_token(token)?;
        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
