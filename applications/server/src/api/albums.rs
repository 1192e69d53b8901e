/// Albums API routes
use crate::{
    api::{require_non_empty, require_valid_year, Validate, ValidatedJson},
    error::{ApiError, Result},
    middleware::AuthenticatedUser,
    response::{self, DataSource},
    services::{cache_keys, DEFAULT_TTL},
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    response::Response,
};
use openmusic_core::types::{AlbumId, CreateAlbum, SongSummary};
use serde::{Deserialize, Serialize};
use serde_json::json;
use openmusic_storage::{albums, likes, songs};

/// Cover uploads are capped at 500KB
const MAX_COVER_BYTES: usize = 512_000;

const ALLOWED_COVER_TYPES: &[&str] = &[
    "image/apng",
    "image/avif",
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "image/webp",
];

#[derive(Debug, Deserialize)]
pub struct AlbumPayload {
    pub name: String,
    pub year: i32,
}

impl Validate for AlbumPayload {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name")?;
        require_valid_year(self.year, "year")?;
        Ok(())
    }
}

/// The album detail shape: resolved cover URL plus the songs that
/// reference the album
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumDetail {
    id: AlbumId,
    name: String,
    year: i32,
    cover_url: Option<String>,
    songs: Vec<SongSummary>,
}

/// POST /albums
pub async fn post_album(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AlbumPayload>,
) -> Result<Response> {
    let album_id = albums::create(
        &state.pool,
        &CreateAlbum {
            name: payload.name,
            year: payload.year,
        },
    )
    .await?;

    Ok(response::created(
        "Album added successfully",
        json!({ "albumId": album_id }),
    ))
}

/// GET /albums/:id
pub async fn get_album(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let id = AlbumId::new(id);
    let cache_key = cache_keys::album(&id);

    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(album) = serde_json::from_str::<serde_json::Value>(&cached) {
            return Ok(response::success_from(
                json!({ "album": album }),
                DataSource::Cache,
            ));
        }
    }

    let album = albums::get_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Album not found".to_string()))?;
    let album_songs = songs::list_by_album(&state.pool, &id).await?;

    let cover_url = match &album.cover {
        Some(key) => Some(state.file_storage.resolve_url(key).await?),
        None => None,
    };

    let detail = AlbumDetail {
        id: album.id,
        name: album.name,
        year: album.year,
        cover_url,
        songs: album_songs,
    };

    state
        .cache
        .set(&cache_key, &serde_json::to_string(&detail)?, DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({ "album": detail }),
        DataSource::Database,
    ))
}

/// PUT /albums/:id
pub async fn put_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<AlbumPayload>,
) -> Result<Response> {
    let id = AlbumId::new(id);

    let updated = albums::update(
        &state.pool,
        &id,
        &CreateAlbum {
            name: payload.name,
            year: payload.year,
        },
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound(
            "Failed to update album. Id not found".to_string(),
        ));
    }

    state.cache.delete(&cache_keys::album(&id)).await;

    Ok(response::success_message("Album updated successfully"))
}

/// DELETE /albums/:id
pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = AlbumId::new(id);

    // Capture the songs whose album reference is about to be nulled; their
    // cached details would otherwise go stale
    let album_songs = songs::list_by_album(&state.pool, &id).await?;

    let deleted = albums::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Failed to delete album. Id not found".to_string(),
        ));
    }

    state.cache.delete(&cache_keys::album(&id)).await;
    state.cache.delete(&cache_keys::album_likes(&id)).await;
    for song in &album_songs {
        state.cache.delete(&cache_keys::song(&song.id)).await;
    }

    Ok(response::success_message("Album deleted successfully"))
}

/// POST /albums/:id/covers
pub async fn post_album_cover(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response> {
    let id = AlbumId::new(id);

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        if field.name() == Some("cover") {
            let filename = field.file_name().unwrap_or("cover.bin").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(e.to_string()))?;

            upload = Some((data, filename, content_type));
            break;
        }
    }

    let (data, filename, content_type) =
        upload.ok_or_else(|| ApiError::Validation("Cover file is required".to_string()))?;

    if !ALLOWED_COVER_TYPES.contains(&content_type.as_str()) {
        return Err(ApiError::Validation("Cover must be an image".to_string()));
    }
    if data.len() > MAX_COVER_BYTES {
        return Err(ApiError::Validation(
            "Cover size must not exceed 500KB".to_string(),
        ));
    }

    let album = albums::get_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Album not found".to_string()))?;

    let key = state.file_storage.store(&data, &filename, &content_type).await?;
    albums::set_cover(&state.pool, &id, &key).await?;

    // Best effort: a leftover file is waste, not an error
    if let Some(previous) = &album.cover {
        if let Err(e) = state.file_storage.delete(previous).await {
            tracing::warn!("Failed to remove previous cover {previous}: {e}");
        }
    }

    state.cache.delete(&cache_keys::album(&id)).await;

    Ok(response::created_message("Cover uploaded successfully"))
}

/// POST /albums/:id/likes
pub async fn post_album_like(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = AlbumId::new(id);

    if !albums::exists(&state.pool, &id).await? {
        return Err(ApiError::NotFound("Album not found".to_string()));
    }

    likes::add(&state.pool, auth.user_id(), &id).await?;

    state.cache.delete(&cache_keys::album_likes(&id)).await;

    Ok(response::created_message("Album liked successfully"))
}

/// DELETE /albums/:id/likes
pub async fn delete_album_like(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = AlbumId::new(id);

    let removed = likes::remove(&state.pool, auth.user_id(), &id).await?;
    if !removed {
        return Err(ApiError::Validation(
            "Failed to unlike album. Album was not liked".to_string(),
        ));
    }

    state.cache.delete(&cache_keys::album_likes(&id)).await;

    Ok(response::success_message("Album unliked successfully"))
}

/// GET /albums/:id/likes
pub async fn get_album_likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = AlbumId::new(id);
    let cache_key = cache_keys::album_likes(&id);

    if let Some(cached) = state.cache.get(&cache_key).await {
        if let Ok(count) = cached.parse::<i64>() {
            return Ok(response::success_from(
                json!({ "likes": count }),
                DataSource::Cache,
            ));
        }
    }

    if !albums::exists(&state.pool, &id).await? {
        return Err(ApiError::NotFound("Album not found".to_string()));
    }

    let count = likes::count(&state.pool, &id).await?;

    state
        .cache
        .set(&cache_key, &count.to_string(), DEFAULT_TTL)
        .await;

    Ok(response::success_from(
        json!({ "likes": count }),
        DataSource::Database,
    ))
}
