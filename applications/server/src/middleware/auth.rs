/// Authentication extractor
///
/// Routes that require a bearer token take `AuthenticatedUser` as an
/// argument; public routes simply omit it. Extraction reads the
/// `Authorization` header and verifies the access token against the
/// `AuthService` held in application state.
use crate::{error::ApiError, state::AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use openmusic_core::UserId;

/// The verified identity of the requesting user
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Auth("Missing authentication token".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Auth("Missing authentication token".to_string()))?;

        let user_id = state.auth_service.verify_access_token(token).map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            ApiError::Auth("Invalid access token".to_string())
        })?;

        Ok(AuthenticatedUser(user_id))
    }
}
