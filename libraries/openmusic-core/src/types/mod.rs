//! Domain types for the OpenMusic API

mod album;
mod ids;
mod playlist;
mod song;
mod user;

pub use album::{Album, CreateAlbum};
pub use ids::{prefixed_id, AlbumId, CollaborationId, PlaylistId, SongId, UserId};
pub use playlist::{Activity, ActivityAction, Playlist, PlaylistSummary, PlaylistWithSongs};
pub use song::{CreateSong, Song, SongSummary};
pub use user::{CreateUser, User};
