//! OpenMusic Storage
//!
//! PostgreSQL data-access layer for the OpenMusic API.
//!
//! The relational store is the single source of truth: every cross-entity
//! invariant (pair uniqueness, foreign keys, cascades) lives here, enforced
//! by the schema in `migrations/`. The cache layer above is purely derived
//! and never consulted for correctness.
//!
//! # Architecture
//!
//! - **Vertical slicing**: each entity owns its own queries and logic
//! - **Access guard**: playlist ownership/membership checks live next to
//!   the playlist queries they protect
//! - **No in-process locks**: statement-level atomicity from PostgreSQL is
//!   the only coordination the data model needs
//!
//! # Example
//!
//! ```rust,no_run
//! use openmusic_core::types::CreateAlbum;
//! use openmusic_storage::{albums, create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("postgres://localhost/openmusic", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let id = albums::create(
//!     &pool,
//!     &CreateAlbum { name: "Viva la Vida".into(), year: 2008 },
//! )
//! .await?;
//! println!("created {id}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Vertical slices
pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod likes;
pub mod playlists;
pub mod songs;
pub mod users;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at startup (or via the `migrate` CLI subcommand) to bring
/// the schema up to date.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
