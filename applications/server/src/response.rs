/// Success-response envelope
///
/// Every response body is `{"status", "message"?, "data"?}`. Cacheable
/// reads additionally carry an `X-Data-Source` header naming where the
/// payload came from (diagnostic only, not a client contract).
use axum::{
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Header distinguishing cache-sourced from database-sourced reads
pub const DATA_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-data-source");

/// Where a cacheable read was answered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Database,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Cache => "cache",
            DataSource::Database => "database",
        }
    }
}

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn envelope<T: Serialize>(
    status: StatusCode,
    message: Option<&str>,
    data: Option<T>,
    source: Option<DataSource>,
) -> Response {
    let body = Envelope {
        status: "success",
        message: message.map(str::to_string),
        data,
    };

    let mut response = (status, Json(body)).into_response();
    if let Some(source) = source {
        response.headers_mut().insert(
            DATA_SOURCE_HEADER,
            HeaderValue::from_static(source.as_str()),
        );
    }
    response
}

/// 200 with data
pub fn success<T: Serialize>(data: T) -> Response {
    envelope(StatusCode::OK, None, Some(data), None)
}

/// 200 with data, tagged with its origin
pub fn success_from<T: Serialize>(data: T, source: DataSource) -> Response {
    envelope(StatusCode::OK, None, Some(data), Some(source))
}

/// 200 with a message and no data
pub fn success_message(message: &str) -> Response {
    envelope::<()>(StatusCode::OK, Some(message), None, None)
}

/// 200 with both a message and data
pub fn success_with<T: Serialize>(message: &str, data: T) -> Response {
    envelope(StatusCode::OK, Some(message), Some(data), None)
}

/// 201 with a message and the created resource's id payload
pub fn created<T: Serialize>(message: &str, data: T) -> Response {
    envelope(StatusCode::CREATED, Some(message), Some(data), None)
}

/// 201 with only a message
pub fn created_message(message: &str) -> Response {
    envelope::<()>(StatusCode::CREATED, Some(message), None, None)
}
