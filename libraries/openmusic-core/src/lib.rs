//! OpenMusic Core
//!
//! Domain types, typed identifiers, and error handling shared by the
//! OpenMusic API storage layer and HTTP server.
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `Song`, `User`, `Playlist`, `Activity`, etc.
//! - **Identifiers**: prefixed opaque string ids (`album-…`, `song-…`)
//! - **Error Handling**: unified `Error` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use openmusic_core::types::{AlbumId, CreateAlbum};
//!
//! let id = AlbumId::generate();
//! assert!(id.as_str().starts_with("album-"));
//!
//! let album = CreateAlbum {
//!     name: "Evolve".to_string(),
//!     year: 2018,
//! };
//! assert_eq!(album.year, 2018);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};

pub use types::{
    // Identifiers
    AlbumId, CollaborationId, PlaylistId, SongId, UserId,
    // Albums and songs
    Album, CreateAlbum, CreateSong, Song, SongSummary,
    // Users
    CreateUser, User,
    // Playlists
    Activity, ActivityAction, Playlist, PlaylistSummary, PlaylistWithSongs,
};
