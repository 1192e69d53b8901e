/// Cache key derivation
///
/// Keys are derived from the resource type plus every parameter that
/// affects the result, with an explicit `all` placeholder for absent
/// search filters. All invalidation sites go through these helpers so a
/// key can never drift between its read and write paths.
use openmusic_core::{AlbumId, PlaylistId, SongId, UserId};

pub fn album(id: &AlbumId) -> String {
    format!("album:{id}")
}

pub fn album_likes(id: &AlbumId) -> String {
    format!("album_likes:{id}")
}

pub fn song(id: &SongId) -> String {
    format!("song:{id}")
}

pub fn songs(title: Option<&str>, performer: Option<&str>) -> String {
    format!(
        "songs:{}:{}",
        title.unwrap_or("all"),
        performer.unwrap_or("all")
    )
}

pub fn user(id: &UserId) -> String {
    format!("user:{id}")
}

pub fn playlists(user_id: &UserId) -> String {
    format!("playlists:{user_id}")
}

pub fn playlist_songs(id: &PlaylistId) -> String {
    format!("playlist_songs:{id}")
}

pub fn playlist_activities(id: &PlaylistId) -> String {
    format!("playlist_activities:{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_search_keys_use_all_placeholders() {
        assert_eq!(songs(None, None), "songs:all:all");
        assert_eq!(songs(Some("life"), None), "songs:life:all");
        assert_eq!(songs(None, Some("coldplay")), "songs:all:coldplay");
        assert_eq!(songs(Some("life"), Some("coldplay")), "songs:life:coldplay");
    }

    #[test]
    fn keys_embed_the_resource_id() {
        let id = AlbumId::new("album-abc");
        assert_eq!(album(&id), "album:album-abc");
        assert_eq!(album_likes(&id), "album_likes:album-abc");

        let user_id = UserId::new("user-u1");
        assert_eq!(playlists(&user_id), "playlists:user-u1");
    }
}
