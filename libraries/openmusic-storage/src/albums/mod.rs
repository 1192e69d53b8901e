use openmusic_core::types::{Album, AlbumId, CreateAlbum};
use openmusic_core::Result;
use sqlx::{PgPool, Row};

/// Insert a new album and return its generated id
pub async fn create(pool: &PgPool, album: &CreateAlbum) -> Result<AlbumId> {
    let id = AlbumId::generate();

    sqlx::query("INSERT INTO albums (id, name, year) VALUES ($1, $2, $3)")
        .bind(&id)
        .bind(&album.name)
        .bind(album.year)
        .execute(pool)
        .await?;

    Ok(id)
}

/// Get an album by id
pub async fn get_by_id(pool: &PgPool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, year, cover FROM albums WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Album {
        id: row.get("id"),
        name: row.get("name"),
        year: row.get("year"),
        cover: row.get("cover"),
    }))
}

/// Update an album's name and year; returns false if the id is unknown
pub async fn update(pool: &PgPool, id: &AlbumId, changes: &CreateAlbum) -> Result<bool> {
    let result = sqlx::query("UPDATE albums SET name = $1, year = $2, updated_at = now() WHERE id = $3")
        .bind(&changes.name)
        .bind(changes.year)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Record the storage reference of an uploaded cover image
pub async fn set_cover(pool: &PgPool, id: &AlbumId, cover: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE albums SET cover = $1, updated_at = now() WHERE id = $2")
        .bind(cover)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete an album; associated songs survive with their album reference
/// nulled by the schema
pub async fn delete(pool: &PgPool, id: &AlbumId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Check whether an album exists
pub async fn exists(pool: &PgPool, id: &AlbumId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 AS one FROM albums WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
