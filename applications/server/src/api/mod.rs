//! API route handlers, one module per resource.
//!
//! Payload validation happens at the boundary: handlers receive
//! `ValidatedJson<T>` where `T: Validate`, so a malformed body or an
//! invalid field never reaches a service call.

pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod exports;
pub mod playlists;
pub mod songs;
pub mod users;

use crate::{error::ApiError, response};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::Response,
    Json,
};
use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde_json::json;

/// A request payload that knows how to validate itself
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// JSON extractor that maps body rejections and field validation failures
/// to the API's 400 envelope
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::Validation(e.body_text()))?;

        payload.validate()?;

        Ok(Self(payload))
    }
}

/// GET / - service banner
pub async fn index() -> Response {
    response::success_with(
        concat!("OpenMusic API v", env!("CARGO_PKG_VERSION")),
        json!({
            "name": "OpenMusic API",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn require_valid_year(year: i32, field: &str) -> Result<(), ApiError> {
    let current_year = chrono::Utc::now().year();
    if year < 1900 || year > current_year {
        return Err(ApiError::Validation(format!(
            "{field} must be between 1900 and {current_year}"
        )));
    }
    Ok(())
}
