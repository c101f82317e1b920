//! Base client types and errors

use serde::Deserialize;
use thiserror::Error;

/// Message body the API returns alongside error statuses.
///
/// Extracted opportunistically: bodies that are not this shape fall back
/// to a generic status error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// Errors surfaced by the base API client.
#[derive(Debug, Error)]
pub enum Error {
    /// No access token was provided
    #[error("Mapbox API token not found")]
    MissingToken,

    /// The API rate limit was exceeded (HTTP 429)
    #[error("Mapbox API rate limit exceeded")]
    RateLimitExceeded,

    /// The access token was rejected (HTTP 401)
    #[error("Mapbox API token unauthorized")]
    Unauthorized,

    /// Error message extracted from the API response body
    #[error("api error: {0}")]
    Api(String),

    /// Non-success status with no extractable message
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to decode a JSON response body
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file I/O failure (upload sources, recipes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
