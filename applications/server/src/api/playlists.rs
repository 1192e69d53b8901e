/// Playlists API routes
///
/// All routes require a bearer token. Destructive operations go through
/// the owner check; shared operations (song list/add/remove, activities)
/// go through the owner-or-collaborator check. Authorization always runs
/// before the cache is consulted, so a revoked collaborator cannot read a
/// still-warm cache entry.
use crate::{
    api::{require_non_empty, Validate, ValidatedJson},
    error::{ApiError, Result},
    middleware::AuthenticatedUser,
    response::{self, DataSource},
    services::{cache_keys, DEFAULT_TTL},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
};
use openmusic_core::types::{ActivityAction, PlaylistId, PlaylistWithSongs, SongId};
use serde::Deserialize;
use serde_json::json;
use openmusic_storage::playlists::{self, activities};
use openmusic_storage::songs;

#[derive(Debug, Deserialize)]
pub struct PlaylistPayload {
    pub name: String,
}

impl Validate for PlaylistPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongPayload {
    pub song_id: String,
}

impl Validate for PlaylistSongPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.song_id, "songId")?;
        Ok(())
    }
}

/// POST /playlists
pub async fn post_playlist(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ValidatedJson(payload): ValidatedJson<PlaylistPayload>,
) -> Result<Response> {
    let playlist_id = playlists::create(&state.pool, &payload.name, auth.user_id()).await?;

    state
        .cache
        .delete(&cache_keys::playlists(auth.user_id()))
        .await;

    Ok(response::created(
        "Playlist added successfully",
        json!({ "playlistId": playlist_id }),
    ))
}

/// GET /playlists
pub async fn get_playlists(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Response> {
    let cache_key = cache_keys::playlists(auth.user_id());

    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(cached_playlists) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(response::success_from(
                json!({ "playlists": cached_playlists }),
                DataSource::Cache,
            ));
        }
    }

    let results = playlists::list_for_user(&state.pool, auth.user_id()).await?;

    state
        .cache
        .set(&cache_key, &serde_json::to_string(&results)?, DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({ "playlists": results }),
        DataSource::Database,
    ))
}

/// DELETE /playlists/:id
pub async fn delete_playlist(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = PlaylistId::new(id);

    playlists::verify_owner(&state.pool, &id, auth.user_id()).await?;
    playlists::delete(&state.pool, &id).await?;

    state
        .cache
        .delete(&cache_keys::playlists(auth.user_id()))
        .await;
    state.cache.delete(&cache_keys::playlist_songs(&id)).await;
    state
        .cache
        .delete(&cache_keys::playlist_activities(&id))
        .await;

    Ok(response::success_message("Playlist deleted successfully"))
}

/// POST /playlists/:id/songs
pub async fn post_playlist_song(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<PlaylistSongPayload>,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(id);
    let song_id = SongId::new(payload.song_id);

    playlists::verify_access(&state.pool, &playlist_id, auth.user_id()).await?;

    if !songs::exists(&state.pool, &song_id).await? {
        return Err(ApiError::NotFound("Song not found".to_string()));
    }

    playlists::add_song(&state.pool, &playlist_id, &song_id).await?;
    activities::append(
        &state.pool,
        &playlist_id,
        &song_id,
        auth.user_id(),
        ActivityAction::Add,
    )
    .await?;

    state
        .cache
        .delete(&cache_keys::playlist_songs(&playlist_id))
        .await;
    state
        .cache
        .delete(&cache_keys::playlist_activities(&playlist_id))
        .await;

    Ok(response::created_message("Song added to playlist successfully"))
}

/// GET /playlists/:id/songs
pub async fn get_playlist_songs(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(id);

    playlists::verify_access(&state.pool, &playlist_id, auth.user_id()).await?;

    let cache_key = cache_keys::playlist_songs(&playlist_id);
    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(playlist) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(response::success_from(
                json!({ "playlist": playlist }),
                DataSource::Cache,
            ));
        }
    }

    let summary = playlists::get_summary(&state.pool, &playlist_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Playlist not found".to_string()))?;
    let playlist_songs = playlists::list_songs(&state.pool, &playlist_id).await?;

    let playlist = PlaylistWithSongs {
        id: summary.id,
        name: summary.name,
        username: summary.username,
        songs: playlist_songs,
    };

    state
        .cache
        .set(&cache_key, &serde_json::to_string(&playlist)?, DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({ "playlist": playlist }),
        DataSource::Database,
    ))
}

/// DELETE /playlists/:id/songs
pub async fn delete_playlist_song(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<PlaylistSongPayload>,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(id);
    let song_id = SongId::new(payload.song_id);

    playlists::verify_access(&state.pool, &playlist_id, auth.user_id()).await?;

    let removed = playlists::remove_song(&state.pool, &playlist_id, &song_id).await?;
    if !removed {
        return Err(ApiError::Validation(
            "Failed to remove song. Song is not in this playlist".to_string(),
        ));
    }

    activities::append(
        &state.pool,
        &playlist_id,
        &song_id,
        auth.user_id(),
        ActivityAction::Delete,
    )
    .await?;

    state
        .cache
        .delete(&cache_keys::playlist_songs(&playlist_id))
        .await;
    state
        .cache
        .delete(&cache_keys::playlist_activities(&playlist_id))
        .await;

    Ok(response::success_message(
        "Song removed from playlist successfully",
    ))
}

/// GET /playlists/:id/activities
pub async fn get_playlist_activities(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let playlist_id = PlaylistId::new(id);

    playlists::verify_access(&state.pool, &playlist_id, auth.user_id()).await?;

    let cache_key = cache_keys::playlist_activities(&playlist_id);
    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(cached_activities) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(response::success_from(
                json!({
                    "playlistId": playlist_id,
                    "activities": cached_activities,
                }),
                DataSource::Cache,
            ));
        }
    }

    let results = activities::list_for_playlist(&state.pool, &playlist_id).await?;

    state
        .cache
        .set(&cache_key, &serde_json::to_string(&results)?, DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({
            "playlistId": playlist_id,
            "activities": results,
        }),
        DataSource::Database,
    ))
}
