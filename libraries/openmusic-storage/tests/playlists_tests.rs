/// Access-guard behavior: ownership and collaborator membership
mod common;

use common::{create_user, sample_song, test_pool};
use openmusic_core::types::PlaylistId;
use openmusic_core::Error;
use openmusic_storage::{collaborations, playlists, songs};

#[tokio::test]
async fn owner_check_distinguishes_missing_from_forbidden() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let owner = create_user(&pool, "own").await;
    let other = create_user(&pool, "oth").await;
    let playlist = playlists::create(&pool, "Mine", &owner).await.unwrap();

    // Owner passes
    playlists::verify_owner(&pool, &playlist, &owner).await.unwrap();

    // Someone else is forbidden, not "not found"
    let err = playlists::verify_owner(&pool, &playlist, &other)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied(_)));

    // A missing playlist is "not found" for everyone
    let missing = PlaylistId::new("playlist-missing");
    let err = playlists::verify_owner(&pool, &missing, &owner)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn collaborators_gain_access_but_not_ownership() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let owner = create_user(&pool, "own").await;
    let collaborator = create_user(&pool, "col").await;
    let stranger = create_user(&pool, "str").await;
    let playlist = playlists::create(&pool, "Shared", &owner).await.unwrap();

    // Before the grant: no access
    assert!(playlists::verify_access(&pool, &playlist, &collaborator)
        .await
        .is_err());

    collaborations::add(&pool, &playlist, &collaborator)
        .await
        .unwrap();

    // After the grant: access yes, ownership no
    playlists::verify_access(&pool, &playlist, &collaborator)
        .await
        .unwrap();
    assert!(playlists::verify_owner(&pool, &playlist, &collaborator)
        .await
        .is_err());

    // Strangers still have neither
    assert!(playlists::verify_access(&pool, &playlist, &stranger)
        .await
        .is_err());

    // Granting the same collaboration twice is a duplicate
    let err = collaborations::add(&pool, &playlist, &collaborator)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Duplicate(_)));

    // Revoking removes access again
    assert!(collaborations::remove(&pool, &playlist, &collaborator)
        .await
        .unwrap());
    assert!(playlists::verify_access(&pool, &playlist, &collaborator)
        .await
        .is_err());
}

#[tokio::test]
async fn playlist_songs_are_pair_unique() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let owner = create_user(&pool, "own").await;
    let playlist = playlists::create(&pool, "Uniques", &owner).await.unwrap();
    let song = songs::create(&pool, &sample_song(None)).await.unwrap();

    playlists::add_song(&pool, &playlist, &song).await.unwrap();

    let err = playlists::add_song(&pool, &playlist, &song)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Duplicate(_)));

    assert!(playlists::remove_song(&pool, &playlist, &song)
        .await
        .unwrap());
    // Removing a song that is not there reports false, not an error
    assert!(!playlists::remove_song(&pool, &playlist, &song)
        .await
        .unwrap());
}

#[tokio::test]
async fn owned_and_collaborating_playlists_are_listed() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let owner = create_user(&pool, "own").await;
    let viewer = create_user(&pool, "vwr").await;

    let own_playlist = playlists::create(&pool, "A Own", &viewer).await.unwrap();
    let shared_playlist = playlists::create(&pool, "B Shared", &owner).await.unwrap();
    collaborations::add(&pool, &shared_playlist, &viewer)
        .await
        .unwrap();

    let listed = playlists::list_for_user(&pool, &viewer).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|p| p.id.as_str().to_string()).collect();

    assert!(ids.contains(&own_playlist.as_str().to_string()));
    assert!(ids.contains(&shared_playlist.as_str().to_string()));
}
