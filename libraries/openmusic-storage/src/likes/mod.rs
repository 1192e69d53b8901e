use openmusic_core::types::{prefixed_id, AlbumId, UserId};
use openmusic_core::{Error, Result};
use sqlx::{PgPool, Row};

/// Record that a user likes an album; liking twice is a client error
pub async fn add(pool: &PgPool, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
    let liked = sqlx::query("SELECT 1 AS one FROM user_album_likes WHERE user_id = $1 AND album_id = $2")
        .bind(user_id)
        .bind(album_id)
        .fetch_optional(pool)
        .await?
        .is_some();

    if liked {
        return Err(Error::duplicate("You have already liked this album"));
    }

    sqlx::query("INSERT INTO user_album_likes (id, user_id, album_id) VALUES ($1, $2, $3)")
        .bind(prefixed_id("like"))
        .bind(user_id)
        .bind(album_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove a like; returns false if the user had not liked the album
pub async fn remove(pool: &PgPool, user_id: &UserId, album_id: &AlbumId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_album_likes WHERE user_id = $1 AND album_id = $2")
        .bind(user_id)
        .bind(album_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count the distinct users who like an album
pub async fn count(pool: &PgPool, album_id: &AlbumId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(id) AS likes FROM user_album_likes WHERE album_id = $1")
        .bind(album_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get("likes"))
}
