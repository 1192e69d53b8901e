/// Users API routes
use crate::{
    api::{require_non_empty, Validate, ValidatedJson},
    error::{ApiError, Result},
    response::{self, DataSource},
    services::{cache_keys, DEFAULT_TTL},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
};
use openmusic_core::types::{CreateUser, UserId};
use serde::Deserialize;
use serde_json::json;
use openmusic_storage::users;

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
    pub fullname: String,
}

impl Validate for UserPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.username, "username")?;
        require_non_empty(&self.password, "password")?;
        require_non_empty(&self.fullname, "fullname")?;

        if self.username.len() > 50 {
            return Err(ApiError::Validation(
                "username must not exceed 50 characters".to_string(),
            ));
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ApiError::Validation(
                "username may only contain letters, numbers, and underscores".to_string(),
            ));
        }

        Ok(())
    }
}

/// POST /users
pub async fn post_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> Result<Response> {
    let password_hash = state.auth_service.hash_password(&payload.password)?;

    let user_id = users::create(
        &state.pool,
        &CreateUser {
            username: payload.username,
            password_hash,
            fullname: payload.fullname,
        },
    )
    .await?;

    Ok(response::created(
        "User added successfully",
        json!({ "userId": user_id }),
    ))
}

/// GET /users/:id
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let id = UserId::new(id);
    let cache_key = cache_keys::user(&id);

    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(user) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(response::success_from(
                json!({ "user": user }),
                DataSource::Cache,
            ));
        }
    }

    let user = users::get_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    state
        .cache
        .set(&cache_key, &serde_json::to_string(&user)?, DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({ "user": user }),
        DataSource::Database,
    ))
}
