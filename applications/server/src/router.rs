/// Router assembly
///
/// Lives in the library (not `main`) so integration tests exercise the
/// exact route table the binary serves.
use crate::{api, state::AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(api::index))
        // Albums
        .route("/albums", post(api::albums::post_album))
        .route(
            "/albums/:id",
            get(api::albums::get_album)
                .put(api::albums::put_album)
                .delete(api::albums::delete_album),
        )
        .route("/albums/:id/covers", post(api::albums::post_album_cover))
        .route(
            "/albums/:id/likes",
            post(api::albums::post_album_like)
                .delete(api::albums::delete_album_like)
                .get(api::albums::get_album_likes),
        )
        // Songs
        .route("/songs", post(api::songs::post_song).get(api::songs::get_songs))
        .route(
            "/songs/:id",
            get(api::songs::get_song)
                .put(api::songs::put_song)
                .delete(api::songs::delete_song),
        )
        // Users
        .route("/users", post(api::users::post_user))
        .route("/users/:id", get(api::users::get_user))
        // Authentications
        .route(
            "/authentications",
            post(api::authentications::post_authentication)
                .put(api::authentications::put_authentication)
                .delete(api::authentications::delete_authentication),
        )
        // Playlists
        .route(
            "/playlists",
            post(api::playlists::post_playlist).get(api::playlists::get_playlists),
        )
        .route("/playlists/:id", delete(api::playlists::delete_playlist))
        .route(
            "/playlists/:id/songs",
            post(api::playlists::post_playlist_song)
                .get(api::playlists::get_playlist_songs)
                .delete(api::playlists::delete_playlist_song),
        )
        .route(
            "/playlists/:id/activities",
            get(api::playlists::get_playlist_activities),
        )
        // Collaborations
        .route(
            "/collaborations",
            post(api::collaborations::post_collaboration)
                .delete(api::collaborations::delete_collaboration),
        )
        // Exports
        .route(
            "/export/playlists/:id",
            post(api::exports::post_export_playlist),
        );

    // Only the local file store serves covers itself; object-store covers
    // resolve to presigned URLs
    if let Some(dir) = state.file_storage.local_uploads_dir() {
        app = app.nest_service("/uploads", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
