/// Shared fixtures for storage tests
///
/// Tests run against the database named by TEST_DATABASE_URL and skip
/// cleanly when it is unset.
use openmusic_core::types::{CreateAlbum, CreateSong, CreateUser, UserId};
use sqlx::PgPool;
use std::time::{SystemTime, UNIX_EPOCH};

pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping storage test");
        return None;
    };

    let pool = openmusic_storage::create_pool(&url, 5)
        .await
        .expect("failed to connect to test database");
    openmusic_storage::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    Some(pool)
}

pub fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}_{nanos}")
}

pub async fn create_user(pool: &PgPool, prefix: &str) -> UserId {
    openmusic_storage::users::create(
        pool,
        &CreateUser {
            username: unique(prefix),
            password_hash: "hash".to_string(),
            fullname: "Storage Test User".to_string(),
        },
    )
    .await
    .expect("failed to create user")
}

pub fn sample_album() -> CreateAlbum {
    CreateAlbum {
        name: "Fixture Album".to_string(),
        year: 2015,
    }
}

pub fn sample_song(album_id: Option<openmusic_core::types::AlbumId>) -> CreateSong {
    CreateSong {
        title: "Fixture Song".to_string(),
        year: 2015,
        genre: "Rock".to_string(),
        performer: "Fixture Band".to_string(),
        duration: Some(240),
        album_id,
    }
}
