/// API integration tests
/// Complete HTTP request/response cycles against a real database; each
/// test skips when TEST_DATABASE_URL is unset.
mod common;

use common::{body_json, create_test_app, register_and_login, send_get, send_json, unique_username};
use serde_json::json;

#[tokio::test]
async fn album_crud_roundtrip() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;

    // Create
    let response = send_json(
        app,
        "POST",
        "/albums",
        None,
        json!({ "name": "Viva la Vida", "year": 2008 }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    let album_id = body["data"]["albumId"].as_str().unwrap().to_string();
    assert!(album_id.starts_with("album-"));

    // Read: POST then GET returns the same name/year
    let response = send_get(app, &format!("/albums/{album_id}"), None).await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["data"]["album"]["name"], "Viva la Vida");
    assert_eq!(body["data"]["album"]["year"], 2008);
    assert!(body["data"]["album"]["songs"].is_array());

    // Update, then the immediately following GET must reflect new data
    let response = send_json(
        app,
        "PUT",
        &format!("/albums/{album_id}"),
        None,
        json!({ "name": "Viva la Vida (Deluxe)", "year": 2009 }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = send_get(app, &format!("/albums/{album_id}"), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["album"]["name"], "Viva la Vida (Deluxe)");

    // Delete
    let response = send_json(app, "DELETE", &format!("/albums/{album_id}"), None, json!({})).await;
    assert_eq!(response.status(), 200);

    let response = send_get(app, &format!("/albums/{album_id}"), None).await;
    assert_eq!(response.status(), 404);
    let body = body_json(response).await;
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn invalid_album_payload_is_a_400() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;

    // Missing year
    let response = send_json(app, "POST", "/albums", None, json!({ "name": "No Year" })).await;
    assert_eq!(response.status(), 400);

    // Year out of range
    let response = send_json(
        app,
        "POST",
        "/albums",
        None,
        json!({ "name": "Too Old", "year": 1800 }),
    )
    .await;
    assert_eq!(response.status(), 400);
    let body = body_json(response).await;
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn deleting_an_album_keeps_its_songs() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;

    let response = send_json(
        app,
        "POST",
        "/albums",
        None,
        json!({ "name": "X", "year": 2020 }),
    )
    .await;
    let album_id = body_json(response).await["data"]["albumId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send_json(
        app,
        "POST",
        "/songs",
        None,
        json!({
            "title": "Orphaned",
            "year": 2020,
            "genre": "Indie",
            "performer": "Nobody",
            "albumId": album_id,
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let song_id = body_json(response).await["data"]["songId"]
        .as_str()
        .unwrap()
        .to_string();

    // The album lists its song
    let response = send_get(app, &format!("/albums/{album_id}"), None).await;
    let body = body_json(response).await;
    let songs = body["data"]["album"]["songs"].as_array().unwrap();
    assert!(songs.iter().any(|s| s["id"] == song_id.as_str()));

    // Deleting the album nulls the song's reference instead of deleting it
    let response = send_json(app, "DELETE", &format!("/albums/{album_id}"), None, json!({})).await;
    assert_eq!(response.status(), 200);

    let response = send_get(app, &format!("/songs/{song_id}"), None).await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert!(body["data"]["song"]["albumId"].is_null());
}

#[tokio::test]
async fn song_search_filters_by_title_and_performer() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;

    let marker = unique_username("srch");
    for (title, performer) in [("Alpha", "First"), ("Beta", "Second")] {
        let response = send_json(
            app,
            "POST",
            "/songs",
            None,
            json!({
                "title": format!("{title} {marker}"),
                "year": 2021,
                "genre": "Pop",
                "performer": format!("{performer} {marker}"),
            }),
        )
        .await;
        assert_eq!(response.status(), 201);
    }

    let response = send_get(app, &format!("/songs?title=alpha%20{marker}"), None).await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    let songs = body["data"]["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert!(songs[0]["title"].as_str().unwrap().starts_with("Alpha"));
}

#[tokio::test]
async fn authentication_lifecycle() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;
    let username = unique_username("auth");

    let (_, _) = register_and_login(app, &username).await;

    // Duplicate registration fails
    let response = send_json(
        app,
        "POST",
        "/users",
        None,
        json!({
            "username": username,
            "password": "password123",
            "fullname": "Again",
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Wrong password is a 401
    let response = send_json(
        app,
        "POST",
        "/authentications",
        None,
        json!({ "username": username, "password": "wrongpassword" }),
    )
    .await;
    assert_eq!(response.status(), 401);

    // Fresh login to exercise refresh + logout
    let response = send_json(
        app,
        "POST",
        "/authentications",
        None,
        json!({ "username": username, "password": "password123" }),
    )
    .await;
    let body = body_json(response).await;
    let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let response = send_json(
        app,
        "PUT",
        "/authentications",
        None,
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert!(body["data"]["accessToken"].is_string());

    // Unknown refresh token is a 400
    let response = send_json(
        app,
        "PUT",
        "/authentications",
        None,
        json!({ "refreshToken": "not-a-real-token" }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Logout revokes the refresh token
    let response = send_json(
        app,
        "DELETE",
        "/authentications",
        None,
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = send_json(
        app,
        "PUT",
        "/authentications",
        None,
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn playlist_access_control() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;

    let (_, owner_token) = register_and_login(app, &unique_username("owner")).await;
    let (collab_id, collab_token) = register_and_login(app, &unique_username("collab")).await;
    let (_, stranger_token) = register_and_login(app, &unique_username("stranger")).await;

    // Owner creates a playlist and a song
    let response = send_json(
        app,
        "POST",
        "/playlists",
        Some(&owner_token),
        json!({ "name": "Shared Mix" }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let playlist_id = body_json(response).await["data"]["playlistId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send_json(
        app,
        "POST",
        "/songs",
        None,
        json!({ "title": "Track", "year": 2022, "genre": "Rock", "performer": "Band" }),
    )
    .await;
    let song_id = body_json(response).await["data"]["songId"]
        .as_str()
        .unwrap()
        .to_string();

    // No token at all is a 401
    let response = send_get(app, &format!("/playlists/{playlist_id}/songs"), None).await;
    assert_eq!(response.status(), 401);

    // A stranger gets 403 on read and write
    let response = send_get(
        app,
        &format!("/playlists/{playlist_id}/songs"),
        Some(&stranger_token),
    )
    .await;
    assert_eq!(response.status(), 403);

    let response = send_json(
        app,
        "POST",
        &format!("/playlists/{playlist_id}/songs"),
        Some(&stranger_token),
        json!({ "songId": song_id }),
    )
    .await;
    assert_eq!(response.status(), 403);

    // The owner can add the song
    let response = send_json(
        app,
        "POST",
        &format!("/playlists/{playlist_id}/songs"),
        Some(&owner_token),
        json!({ "songId": song_id }),
    )
    .await;
    assert_eq!(response.status(), 201);

    // Adding the same song twice violates pair uniqueness
    let response = send_json(
        app,
        "POST",
        &format!("/playlists/{playlist_id}/songs"),
        Some(&owner_token),
        json!({ "songId": song_id }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Only the owner may manage collaborators
    let response = send_json(
        app,
        "POST",
        "/collaborations",
        Some(&stranger_token),
        json!({ "playlistId": playlist_id, "userId": collab_id }),
    )
    .await;
    assert_eq!(response.status(), 403);

    let response = send_json(
        app,
        "POST",
        "/collaborations",
        Some(&owner_token),
        json!({ "playlistId": playlist_id, "userId": collab_id }),
    )
    .await;
    assert_eq!(response.status(), 201);

    // The collaborator can now read the playlist and sees the song
    let response = send_get(
        app,
        &format!("/playlists/{playlist_id}/songs"),
        Some(&collab_token),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    let songs = body["data"]["playlist"]["songs"].as_array().unwrap();
    assert!(songs.iter().any(|s| s["id"] == song_id.as_str()));

    // But a collaborator may not delete the playlist
    let response = send_json(
        app,
        "DELETE",
        &format!("/playlists/{playlist_id}"),
        Some(&collab_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 403);

    // Activities recorded the add, visible to the collaborator
    let response = send_get(
        app,
        &format!("/playlists/{playlist_id}/activities"),
        Some(&collab_token),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    let activities = body["data"]["activities"].as_array().unwrap();
    assert!(activities.iter().any(|a| a["action"] == "add"));

    // The owner deletes the playlist; it disappears for everyone
    let response = send_json(
        app,
        "DELETE",
        &format!("/playlists/{playlist_id}"),
        Some(&owner_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = send_get(
        app,
        &format!("/playlists/{playlist_id}/songs"),
        Some(&owner_token),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn album_likes_enforce_pair_uniqueness() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;

    let (_, first_token) = register_and_login(app, &unique_username("liker1")).await;
    let (_, second_token) = register_and_login(app, &unique_username("liker2")).await;

    let response = send_json(
        app,
        "POST",
        "/albums",
        None,
        json!({ "name": "Likeable", "year": 2019 }),
    )
    .await;
    let album_id = body_json(response).await["data"]["albumId"]
        .as_str()
        .unwrap()
        .to_string();

    // Liking requires authentication
    let response = send_json(
        app,
        "POST",
        &format!("/albums/{album_id}/likes"),
        None,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 401);

    // Two distinct users like the album; the second like of one user fails
    for token in [&first_token, &second_token] {
        let response = send_json(
            app,
            "POST",
            &format!("/albums/{album_id}/likes"),
            Some(token),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), 201);
    }

    let response = send_json(
        app,
        "POST",
        &format!("/albums/{album_id}/likes"),
        Some(&first_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Like count equals the number of distinct likers
    let response = send_get(app, &format!("/albums/{album_id}/likes"), None).await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["data"]["likes"], 2);

    // Unlike, then unliking again fails
    let response = send_json(
        app,
        "DELETE",
        &format!("/albums/{album_id}/likes"),
        Some(&first_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = send_json(
        app,
        "DELETE",
        &format!("/albums/{album_id}/likes"),
        Some(&first_token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 400);

    let response = send_get(app, &format!("/albums/{album_id}/likes"), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["likes"], 1);
}

#[tokio::test]
async fn export_requires_ownership() {
    let Some(app) = create_test_app().await else {
        return;
    };
    let app = &app.router;

    let (_, owner_token) = register_and_login(app, &unique_username("exp_owner")).await;
    let (_, other_token) = register_and_login(app, &unique_username("exp_other")).await;

    let response = send_json(
        app,
        "POST",
        "/playlists",
        Some(&owner_token),
        json!({ "name": "To Export" }),
    )
    .await;
    let playlist_id = body_json(response).await["data"]["playlistId"]
        .as_str()
        .unwrap()
        .to_string();

    // Invalid email is rejected before any ownership check
    let response = send_json(
        app,
        "POST",
        &format!("/export/playlists/{playlist_id}"),
        Some(&owner_token),
        json!({ "targetEmail": "invalid-email" }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // A non-owner may not export
    let response = send_json(
        app,
        "POST",
        &format!("/export/playlists/{playlist_id}"),
        Some(&other_token),
        json!({ "targetEmail": "listener@example.com" }),
    )
    .await;
    assert_eq!(response.status(), 403);

    // Exporting a missing playlist is a 404
    let response = send_json(
        app,
        "POST",
        "/export/playlists/playlist-does-not-exist",
        Some(&owner_token),
        json!({ "targetEmail": "listener@example.com" }),
    )
    .await;
    assert_eq!(response.status(), 404);
}
