//! Album types

use super::AlbumId;
use serde::{Deserialize, Serialize};

/// An album as persisted
///
/// `cover` holds the raw storage reference (file key); resolving it to a
/// client-facing URL is the server's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
    pub cover: Option<String>,
}

/// Data for creating or updating an album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub name: String,
    pub year: i32,
}
