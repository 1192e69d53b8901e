use openmusic_core::types::{CreateUser, User, UserId};
use openmusic_core::{Error, Result};
use sqlx::{PgPool, Row};

/// A user's login credentials as stored
#[derive(Debug, Clone)]
pub struct Credentials {
    pub id: UserId,
    pub password_hash: String,
}

/// Register a new user; the username must be unused
pub async fn create(pool: &PgPool, user: &CreateUser) -> Result<UserId> {
    let taken = sqlx::query("SELECT id FROM users WHERE username = $1")
        .bind(&user.username)
        .fetch_optional(pool)
        .await?
        .is_some();

    if taken {
        return Err(Error::duplicate(
            "Failed to add user. Username is already taken",
        ));
    }

    let id = UserId::generate();

    sqlx::query("INSERT INTO users (id, username, password, fullname) VALUES ($1, $2, $3, $4)")
        .bind(&id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.fullname)
        .execute(pool)
        .await?;

    Ok(id)
}

/// Get a user's public profile by id
pub async fn get_by_id(pool: &PgPool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, fullname FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| User {
        id: row.get("id"),
        username: row.get("username"),
        fullname: row.get("fullname"),
    }))
}

/// Look up login credentials by username
pub async fn get_credentials(pool: &PgPool, username: &str) -> Result<Option<Credentials>> {
    let row = sqlx::query("SELECT id, password FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Credentials {
        id: row.get("id"),
        password_hash: row.get("password"),
    }))
}

/// Check whether a user exists
pub async fn exists(pool: &PgPool, id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 AS one FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
