/// Collaborations API routes - granting and revoking shared playlist access
///
/// Only the playlist owner may manage collaborators.
use crate::{
    api::{require_non_empty, Validate, ValidatedJson},
    error::{ApiError, Result},
    middleware::AuthenticatedUser,
    response,
    services::cache_keys,
    state::AppState,
};
use axum::{extract::State, response::Response};
use openmusic_core::types::{PlaylistId, UserId};
use serde::Deserialize;
use serde_json::json;
use openmusic_storage::{collaborations, playlists, users};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationPayload {
    pub playlist_id: String,
    pub user_id: String,
}

impl Validate for CollaborationPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.playlist_id, "playlistId")?;
        require_non_empty(&self.user_id, "userId")?;
        Ok(())
    }
}

/// POST /collaborations
pub async fn post_collaboration(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(payload): ValidatedJson<CollaborationPayload>,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(payload.playlist_id);
    let collaborator_id = UserId::new(payload.user_id);

    playlists::verify_owner(&state.pool, &playlist_id, auth.user_id()).await?;

    if !users::exists(&state.pool, &collaborator_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let collaboration_id = collaborations::add(&state.pool, &playlist_id, &collaborator_id).await?;

    // The collaborator can now see this playlist in their list
    state
        .cache
        .delete(&cache_keys::playlists(&collaborator_id))
        .await;

    Ok(response::created(
        "Collaboration added successfully",
        json!({ "collaborationId": collaboration_id }),
    ))
}

/// DELETE /collaborations
pub async fn delete_collaboration(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(payload): ValidatedJson<CollaborationPayload>,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(payload.playlist_id);
    let collaborator_id = UserId::new(payload.user_id);

    playlists::verify_owner(&state.pool, &playlist_id, auth.user_id()).await?;

    let removed = collaborations::remove(&state.pool, &playlist_id, &collaborator_id).await?;
    if !removed {
        return Err(ApiError::Validation(
            "Failed to remove collaboration".to_string(),
        ));
    }

    state
        .cache
        .delete(&cache_keys::playlists(&collaborator_id))
        .await;

    Ok(response::success_message("Collaboration deleted successfully"))
}
