//! Playlist queries and the access guard.
//!
//! Two authorization levels exist: `verify_owner` for destructive
//! operations (delete, export, collaboration management) and
//! `verify_access` for shared read/write operations (song list, song
//! add/remove, activity list), which collaborators may also perform.

pub mod activities;

use crate::collaborations;
use openmusic_core::types::{prefixed_id, PlaylistId, PlaylistSummary, SongId, SongSummary, UserId};
use openmusic_core::{Error, Result};
use sqlx::{PgPool, Row};

/// Create a playlist owned by `owner` and return its generated id
pub async fn create(pool: &PgPool, name: &str, owner: &UserId) -> Result<PlaylistId> {
    let id = PlaylistId::generate();

    sqlx::query("INSERT INTO playlists (id, name, owner) VALUES ($1, $2, $3)")
        .bind(&id)
        .bind(name)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(id)
}

/// List the playlists a user can see: owned plus collaborating
pub async fn list_for_user(pool: &PgPool, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT p.id, p.name, u.username
        FROM playlists p
        JOIN users u ON u.id = p.owner
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.owner = $1 OR c.user_id = $1
        ORDER BY p.name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: row.get("id"),
            name: row.get("name"),
            username: row.get("username"),
        })
        .collect())
}

/// Get a playlist's display shape (owner as username)
pub async fn get_summary(pool: &PgPool, id: &PlaylistId) -> Result<Option<PlaylistSummary>> {
    let row = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        JOIN users u ON u.id = p.owner
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| PlaylistSummary {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
    }))
}

/// Get a playlist's owner, or None if the playlist does not exist
pub async fn owner_of(pool: &PgPool, id: &PlaylistId) -> Result<Option<UserId>> {
    let row = sqlx::query("SELECT owner FROM playlists WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("owner")))
}

/// Delete a playlist; its songs, collaborations, and activity log cascade
pub async fn delete(pool: &PgPool, id: &PlaylistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Add a song to a playlist; the (playlist, song) pair is unique
pub async fn add_song(pool: &PgPool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
    let present = sqlx::query("SELECT 1 AS one FROM playlist_songs WHERE playlist_id = $1 AND song_id = $2")
        .bind(playlist_id)
        .bind(song_id)
        .fetch_optional(pool)
        .await?
        .is_some();

    if present {
        return Err(Error::duplicate("Song is already in the playlist"));
    }

    sqlx::query("INSERT INTO playlist_songs (id, playlist_id, song_id) VALUES ($1, $2, $3)")
        .bind(prefixed_id("playlist_song"))
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove a song from a playlist; returns false if it was not present
pub async fn remove_song(pool: &PgPool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = $1 AND song_id = $2")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List the songs in a playlist
pub async fn list_songs(pool: &PgPool, playlist_id: &PlaylistId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM playlist_songs ps
        JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = $1
        ORDER BY s.title ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SongSummary {
            id: row.get("id"),
            title: row.get("title"),
            performer: row.get("performer"),
        })
        .collect())
}

/// Fail unless `user_id` owns the playlist.
///
/// A missing playlist is NotFound; an existing playlist owned by someone
/// else is PermissionDenied.
pub async fn verify_owner(pool: &PgPool, id: &PlaylistId, user_id: &UserId) -> Result<()> {
    let owner = owner_of(pool, id)
        .await?
        .ok_or_else(|| Error::not_found("Playlist", id.as_str()))?;

    if owner != *user_id {
        return Err(Error::permission_denied(
            "You are not authorized to access this resource",
        ));
    }

    Ok(())
}

/// Fail unless `user_id` owns the playlist or collaborates on it
pub async fn verify_access(pool: &PgPool, id: &PlaylistId, user_id: &UserId) -> Result<()> {
    match verify_owner(pool, id, user_id).await {
        Ok(()) => Ok(()),
        Err(err @ Error::NotFound { .. }) => Err(err),
        Err(Error::PermissionDenied(reason)) => {
            if collaborations::is_collaborator(pool, id, user_id).await? {
                Ok(())
            } else {
                Err(Error::PermissionDenied(reason))
            }
        }
        Err(err) => Err(err),
    }
}
