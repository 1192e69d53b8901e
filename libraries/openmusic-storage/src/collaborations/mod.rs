use openmusic_core::types::{CollaborationId, PlaylistId, UserId};
use openmusic_core::{Error, Result};
use sqlx::PgPool;

/// Grant a user collaborator access to a playlist
///
/// The (playlist, user) pair is unique; the schema constraint backstops
/// the pre-check under concurrent requests.
pub async fn add(pool: &PgPool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<CollaborationId> {
    if is_collaborator(pool, playlist_id, user_id).await? {
        return Err(Error::duplicate(
            "User is already a collaborator on this playlist",
        ));
    }

    let id = CollaborationId::generate();

    sqlx::query("INSERT INTO collaborations (id, playlist_id, user_id) VALUES ($1, $2, $3)")
        .bind(&id)
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(id)
}

/// Revoke collaborator access; returns false if no such grant existed
pub async fn remove(pool: &PgPool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = $1 AND user_id = $2")
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Check whether a user is a collaborator on a playlist
pub async fn is_collaborator(
    pool: &PgPool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<bool> {
    let row = sqlx::query("SELECT 1 AS one FROM collaborations WHERE playlist_id = $1 AND user_id = $2")
        .bind(playlist_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
