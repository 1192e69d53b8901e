/// Common test utilities and fixtures
///
/// Integration tests need a real PostgreSQL database; they are gated on
/// `TEST_DATABASE_URL` and skip cleanly when it is unset. Set
/// `TEST_REDIS_URL` as well to exercise the cache path against a live
/// Redis; without it the cache runs disabled (every read is a miss).
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use openmusic_server::{
    router,
    services::{AuthService, CacheService, ExportService, FileStorage},
    state::AppState,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub struct TestApp {
    pub router: Router,
    // Held so the uploads directory outlives the test
    _uploads: TempDir,
}

/// Build the full application against the test database, or None when no
/// test database is configured
pub async fn create_test_app() -> Option<TestApp> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping integration test");
        return None;
    };

    let pool = openmusic_storage::create_pool(&database_url, 5)
        .await
        .expect("failed to connect to test database");
    openmusic_storage::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let cache = match std::env::var("TEST_REDIS_URL") {
        Ok(url) => CacheService::connect(&url).await,
        Err(_) => CacheService::disabled(),
    };

    let uploads = TempDir::new().expect("failed to create uploads dir");
    let file_storage = FileStorage::from_config(&openmusic_server::config::StorageSettings {
        kind: openmusic_server::config::StorageKind::Local,
        upload_dir: uploads.path().to_path_buf(),
        s3: s3_defaults(),
    })
    .await
    .expect("failed to initialize file storage");

    let auth_service = Arc::new(AuthService::new(
        "test-access-key".to_string(),
        "test-refresh-key".to_string(),
        1800,
        86400,
    ));

    let exports = Arc::new(ExportService::new("amqp://127.0.0.1:5672/%2f"));

    let state = AppState::new(pool, cache, auth_service, Arc::new(file_storage), exports);

    Some(TestApp {
        router: router(state),
        _uploads: uploads,
    })
}

fn s3_defaults() -> openmusic_server::config::S3Settings {
    openmusic_server::config::S3Settings {
        bucket: String::new(),
        region: "us-east-1".to_string(),
        endpoint: None,
        access_key: None,
        secret_key: None,
        url_expiry_secs: 3600,
    }
}

/// A username unique to this test run
pub fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}_{nanos}")
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    app.clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn send_get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().method("GET").uri(uri);

    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and log in, returning (userId, accessToken)
pub async fn register_and_login(app: &Router, username: &str) -> (String, String) {
    let response = send_json(
        app,
        "POST",
        "/users",
        None,
        serde_json::json!({
            "username": username,
            "password": "password123",
            "fullname": "Test User",
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "registration should succeed");
    let body = body_json(response).await;
    let user_id = body["data"]["userId"].as_str().unwrap().to_string();

    let response = send_json(
        app,
        "POST",
        "/authentications",
        None,
        serde_json::json!({
            "username": username,
            "password": "password123",
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "login should succeed");
    let body = body_json(response).await;
    let token = body["data"]["accessToken"].as_str().unwrap().to_string();

    (user_id, token)
}
