/// Server error types
///
/// Every error response shares the success envelope shape: client-caused
/// failures use `status: "fail"` with the real message, server-caused
/// failures use `status: "error"` with a fixed generic message (the detail
/// is logged, never exposed).
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

const INTERNAL_MESSAGE: &str = "Sorry, something went wrong on our side.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid request payload (and violated uniqueness
    /// invariants, which the API reports as 400)
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credential
    #[error("{0}")]
    Auth(String),

    /// Authenticated but not permitted
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// File store error
    #[error("storage error: {0}")]
    Storage(String),

    /// Message queue error
    #[error("queue error: {0}")]
    Queue(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JWT signing error (verification failures are mapped at the call
    /// site: 401 for access tokens, 400 for refresh tokens)
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Password hashing error
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<openmusic_core::Error> for ApiError {
    fn from(err: openmusic_core::Error) -> Self {
        use openmusic_core::Error;

        match err {
            Error::NotFound { .. } => ApiError::NotFound(err.to_string()),
            Error::PermissionDenied(msg) => ApiError::Forbidden(msg),
            Error::Duplicate(msg) | Error::InvalidInput(msg) => ApiError::Validation(msg),
            Error::Database(msg) => ApiError::Database(msg),
            Error::Serialization(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ApiError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ApiError::Queue(ref msg) => {
                tracing::error!("Queue error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ApiError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ApiError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ApiError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ApiError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ApiError::Json(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        let body = Json(json!({
            "status": if status.is_server_error() { "error" } else { "fail" },
            "message": message,
        }));

        (status, body).into_response()
    }
}
