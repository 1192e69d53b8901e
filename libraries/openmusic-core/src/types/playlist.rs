//! Playlist types

use super::{PlaylistId, SongSummary, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playlist as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub owner: UserId,
}

/// The playlist shape returned by list endpoints: the owner is shown by
/// username, not id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
}

/// A playlist together with its songs, as returned by the song-list
/// endpoint and stored in the cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistWithSongs {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}

/// What happened to a playlist song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Add,
    Delete,
}

impl ActivityAction {
    /// The value stored in the `action` column
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }
}

/// One append-only activity log entry, denormalized for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    pub time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ActivityAction::Add).unwrap(),
            "\"add\""
        );
        assert_eq!(ActivityAction::Delete.as_str(), "delete");
    }
}
