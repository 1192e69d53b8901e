use openmusic_core::types::{AlbumId, CreateSong, Song, SongId, SongSummary};
use openmusic_core::Result;
use sqlx::{PgPool, QueryBuilder, Row};

/// Optional search filters for the song list; absent filters match
/// everything
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    pub title: Option<String>,
    pub performer: Option<String>,
}

/// Insert a new song and return its generated id
pub async fn create(pool: &PgPool, song: &CreateSong) -> Result<SongId> {
    let id = SongId::generate();

    sqlx::query(
        r#"
        INSERT INTO songs (id, title, year, genre, performer, duration, album_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(song.album_id.as_ref())
    .execute(pool)
    .await?;

    Ok(id)
}

/// List songs, optionally filtered by case-insensitive title/performer
/// substrings (ANDed when both are present)
pub async fn list(pool: &PgPool, filter: &SongFilter) -> Result<Vec<SongSummary>> {
    let mut query: QueryBuilder<sqlx::Postgres> =
        QueryBuilder::new("SELECT id, title, performer FROM songs");

    let mut sep = " WHERE ";
    if let Some(title) = &filter.title {
        query.push(sep).push("title ILIKE ");
        query.push_bind(format!("%{title}%"));
        sep = " AND ";
    }
    if let Some(performer) = &filter.performer {
        query.push(sep).push("performer ILIKE ");
        query.push_bind(format!("%{performer}%"));
    }
    query.push(" ORDER BY title ASC");

    let rows = query.build().fetch_all(pool).await?;

    Ok(rows.into_iter().map(summary_from_row).collect())
}

/// List the songs belonging to an album (for the album detail view)
pub async fn list_by_album(pool: &PgPool, album_id: &AlbumId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        "SELECT id, title, performer FROM songs WHERE album_id = $1 ORDER BY title ASC",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(summary_from_row).collect())
}

/// Get a song by id
pub async fn get_by_id(pool: &PgPool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, year, genre, performer, duration, album_id FROM songs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Song {
        id: row.get("id"),
        title: row.get("title"),
        year: row.get("year"),
        genre: row.get("genre"),
        performer: row.get("performer"),
        duration: row.get("duration"),
        album_id: row.get("album_id"),
    }))
}

/// Update a song; returns false if the id is unknown
pub async fn update(pool: &PgPool, id: &SongId, changes: &CreateSong) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = $1, year = $2, genre = $3, performer = $4, duration = $5,
            album_id = $6, updated_at = now()
        WHERE id = $7
        "#,
    )
    .bind(&changes.title)
    .bind(changes.year)
    .bind(&changes.genre)
    .bind(&changes.performer)
    .bind(changes.duration)
    .bind(changes.album_id.as_ref())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a song; returns false if the id is unknown
pub async fn delete(pool: &PgPool, id: &SongId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Check whether a song exists
pub async fn exists(pool: &PgPool, id: &SongId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 AS one FROM songs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

fn summary_from_row(row: sqlx::postgres::PgRow) -> SongSummary {
    SongSummary {
        id: row.get("id"),
        title: row.get("title"),
        performer: row.get("performer"),
    }
}
