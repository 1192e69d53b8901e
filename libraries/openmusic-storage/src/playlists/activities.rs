//! Append-only playlist activity log.

use openmusic_core::types::{prefixed_id, Activity, ActivityAction, PlaylistId, SongId, UserId};
use openmusic_core::Result;
use sqlx::{PgPool, Row};

/// Append one activity entry recording who added or removed which song
pub async fn append(
    pool: &PgPool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
    user_id: &UserId,
    action: ActivityAction,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO playlist_song_activities (id, playlist_id, song_id, user_id, action)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(prefixed_id("activity"))
    .bind(playlist_id)
    .bind(song_id)
    .bind(user_id)
    .bind(action.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// List a playlist's activity history, oldest first
pub async fn list_for_playlist(pool: &PgPool, playlist_id: &PlaylistId) -> Result<Vec<Activity>> {
    let rows = sqlx::query(
        r#"
        SELECT u.username, s.title, a.action, a.time
        FROM playlist_song_activities a
        JOIN users u ON u.id = a.user_id
        JOIN songs s ON s.id = a.song_id
        WHERE a.playlist_id = $1
        ORDER BY a.time ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Activity {
            username: row.get("username"),
            title: row.get("title"),
            action: match row.get::<String, _>("action").as_str() {
                "delete" => ActivityAction::Delete,
                _ => ActivityAction::Add,
            },
            time: row.get("time"),
        })
        .collect())
}
