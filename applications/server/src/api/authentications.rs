/// Authentications API routes - login, token refresh, logout
///
/// A refresh token is honored only while it is present in the
/// authentications table, so logout genuinely revokes it. Unknown or
/// tampered refresh tokens are a 400, not a 401: the client sent a payload
/// referencing a token that does not exist.
use crate::{
    api::{require_non_empty, Validate, ValidatedJson},
    error::{ApiError, Result},
    response,
    state::AppState,
};
use axum::{extract::State, response::Response};
use serde::Deserialize;
use serde_json::json;
use openmusic_storage::{authentications, users};

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

impl Validate for LoginPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.username, "username")?;
        require_non_empty(&self.password, "password")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    pub refresh_token: String,
}

impl Validate for RefreshPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.refresh_token, "refreshToken")?;
        Ok(())
    }
}

/// POST /authentications - login
pub async fn post_authentication(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginPayload>,
) -> Result<Response> {
    let credentials = users::get_credentials(&state.pool, &payload.username)
        .await?
        .ok_or_else(|| ApiError::Auth("The credentials you provided are wrong".to_string()))?;

    if !state
        .auth_service
        .verify_password(&payload.password, &credentials.password_hash)?
    {
        return Err(ApiError::Auth(
            "The credentials you provided are wrong".to_string(),
        ));
    }

    let access_token = state.auth_service.create_access_token(&credentials.id)?;
    let refresh_token = state.auth_service.create_refresh_token(&credentials.id)?;

    authentications::add_token(&state.pool, &refresh_token).await?;

    Ok(response::created(
        "Authentication added successfully",
        json!({
            "accessToken": access_token,
            "refreshToken": refresh_token,
        }),
    ))
}

/// PUT /authentications - refresh the access token
pub async fn put_authentication(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshPayload>,
) -> Result<Response> {
    if !authentications::has_token(&state.pool, &payload.refresh_token).await? {
        return Err(ApiError::Validation("Invalid refresh token".to_string()));
    }

    let user_id = state
        .auth_service
        .verify_refresh_token(&payload.refresh_token)
        .map_err(|_| ApiError::Validation("Invalid refresh token".to_string()))?;

    let access_token = state.auth_service.create_access_token(&user_id)?;

    Ok(response::success_with(
        "Access token renewed successfully",
        json!({ "accessToken": access_token }),
    ))
}

/// DELETE /authentications - logout
pub async fn delete_authentication(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshPayload>,
) -> Result<Response> {
    let deleted = authentications::delete_token(&state.pool, &payload.refresh_token).await?;
    if !deleted {
        return Err(ApiError::Validation("Invalid refresh token".to_string()));
    }

    Ok(response::success_message("Refresh token deleted successfully"))
}
