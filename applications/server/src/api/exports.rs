/// Exports API routes
///
/// Only the playlist owner may request an export. Success means the
/// request is durably queued; delivery is the export worker's job.
use crate::{
    api::{Validate, ValidatedJson},
    error::{ApiError, Result},
    middleware::AuthenticatedUser,
    response,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
};
use openmusic_core::types::PlaylistId;
use serde::Deserialize;
use openmusic_storage::playlists;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub target_email: String,
}

impl Validate for ExportPayload {
    fn validate(&self) -> Result<()> {
        if !is_valid_email(&self.target_email) {
            return Err(ApiError::Validation(
                "targetEmail must be a valid email address".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// POST /export/playlists/:id
pub async fn post_export_playlist(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ExportPayload>,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(id);

    playlists::verify_owner(&state.pool, &playlist_id, auth.user_id()).await?;

    state
        .exports
        .enqueue(&playlist_id, &payload.target_email)
        .await?;

    Ok(response::created_message("Your request is in the queue"))
}
