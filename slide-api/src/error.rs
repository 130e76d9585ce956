use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use slide_core::{DecodeError, MoveError};

/// Errors returned to API callers.
///
/// Every variant is caused by caller input and maps to `400 Bad Request`
/// with the `Display` text as a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Move(#[from] MoveError),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("invalid state encoding: {0}")]
    InvalidEncoding(#[from] DecodeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} {value:?}: {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },
}
