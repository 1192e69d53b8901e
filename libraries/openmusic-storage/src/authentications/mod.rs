//! Refresh-token persistence.
//!
//! A refresh token is honored only while its row exists; logout removes it.

use openmusic_core::Result;
use sqlx::PgPool;

/// Persist a freshly issued refresh token
pub async fn add_token(pool: &PgPool, token: &str) -> Result<()> {
    sqlx::query("INSERT INTO authentications (token) VALUES ($1)")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Check whether a refresh token is still active
pub async fn has_token(pool: &PgPool, token: &str) -> Result<bool> {
    let row = sqlx::query("SELECT 1 AS one FROM authentications WHERE token = $1")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Revoke a refresh token; returns false if it was not active
pub async fn delete_token(pool: &PgPool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM authentications WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
