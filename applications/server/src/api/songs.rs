/// Songs API routes
use crate::{
    api::{require_non_empty, require_valid_year, Validate, ValidatedJson},
    error::{ApiError, Result},
    response::{self, DataSource},
    services::{cache_keys, DEFAULT_TTL},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use openmusic_core::types::{AlbumId, CreateSong, SongId};
use serde::Deserialize;
use serde_json::json;
use openmusic_storage::{albums, songs};
use openmusic_storage::songs::SongFilter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    pub duration: Option<i32>,
    pub album_id: Option<String>,
}

impl Validate for SongPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.title, "title")?;
        require_valid_year(self.year, "year")?;
        require_non_empty(&self.genre, "genre")?;
        require_non_empty(&self.performer, "performer")?;

        if let Some(duration) = self.duration {
            if duration <= 0 {
                return Err(ApiError::Validation(
                    "duration must be a positive number".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl SongPayload {
    fn album_id(&self) -> Option<AlbumId> {
        self.album_id.clone().map(AlbumId::new)
    }

    fn into_create(self) -> CreateSong {
        let album_id = self.album_id();
        CreateSong {
            title: self.title,
            year: self.year,
            genre: self.genre,
            performer: self.performer,
            duration: self.duration,
            album_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SongQuery {
    pub title: Option<String>,
    pub performer: Option<String>,
}

impl SongQuery {
    /// `?title=` means "no filter", same as omitting the parameter
    fn normalized(self) -> (Option<String>, Option<String>) {
        (
            self.title.filter(|t| !t.is_empty()),
            self.performer.filter(|p| !p.is_empty()),
        )
    }
}

/// POST /songs
pub async fn post_song(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SongPayload>,
) -> Result<Response> {
    let album_id = payload.album_id();
    if let Some(album_id) = &album_id {
        if !albums::exists(&state.pool, album_id).await? {
            return Err(ApiError::NotFound("Album not found".to_string()));
        }
    }

    let song_id = songs::create(&state.pool, &payload.into_create()).await?;

    state.cache.delete(&cache_keys::songs(None, None)).await;
    if let Some(album_id) = &album_id {
        state.cache.delete(&cache_keys::album(album_id)).await;
    }

    Ok(response::created(
        "Song added successfully",
        json!({ "songId": song_id }),
    ))
}

/// GET /songs?title=&performer=
pub async fn get_songs(
    State(state): State<AppState>,
    Query(query): Query<SongQuery>,
) -> Result<Response> {
    let (title, performer) = query.normalized();
    let cache_key = cache_keys::songs(title.as_deref(), performer.as_deref());

    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(cached_songs) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(response::success_from(
                json!({ "songs": cached_songs }),
                DataSource::Cache,
            ));
        }
    }

    let results = songs::list(&state.pool, &SongFilter { title, performer }).await?;

    state
        .cache
        .set(&cache_key, &serde_json::to_string(&results)?, DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({ "songs": results }),
        DataSource::Database,
    ))
}

/// GET /songs/:id
pub async fn get_song(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let id = SongId::new(id);
    let cache_key = cache_keys::song(&id);

    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(song) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(response::success_from(
                json!({ "song": song }),
                DataSource::Cache,
            ));
        }
    }

    let song = songs::get_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Song not found".to_string()))?;

    state
        .cache
        .set(&cache_key, &serde_json::to_string(&song)?, DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({ "song": song }),
        DataSource::Database,
    ))
}

/// PUT /songs/:id
pub async fn put_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<SongPayload>,
) -> Result<Response> {
    let id = SongId::new(id);

    let existing = songs::get_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Failed to update song. Id not found".to_string()))?;

    let album_id = payload.album_id();
    if let Some(album_id) = &album_id {
        if !albums::exists(&state.pool, album_id).await? {
            return Err(ApiError::NotFound("Album not found".to_string()));
        }
    }

    songs::update(&state.pool, &id, &payload.into_create()).await?;

    state.cache.delete(&cache_keys::song(&id)).await;
    state.cache.delete(&cache_keys::songs(None, None)).await;
    // both the previous and the new album embed this song in their detail
    if let Some(previous) = &existing.album_id {
        state.cache.delete(&cache_keys::album(previous)).await;
    }
    if let Some(new_album) = &album_id {
        if existing.album_id.as_ref() != Some(new_album) {
            state.cache.delete(&cache_keys::album(new_album)).await;
        }
    }

    Ok(response::success_message("Song updated successfully"))
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = SongId::new(id);

    let existing = songs::get_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Failed to delete song. Id not found".to_string()))?;

    songs::delete(&state.pool, &id).await?;

    state.cache.delete(&cache_keys::song(&id)).await;
    state.cache.delete(&cache_keys::songs(None, None)).await;
    if let Some(album_id) = &existing.album_id {
        state.cache.delete(&cache_keys::album(album_id)).await;
    }

    Ok(response::success_message("Song deleted successfully"))
}
