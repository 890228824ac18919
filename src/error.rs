//! Error types for the feed cache core and companion service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Internal error type for cache tier operations.
///
/// These never escape the cache layer: a failed read surfaces as a miss and
/// a failed write as a no-op, so callers keep their primary result either way.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Disk tier I/O failure
    #[error("cache I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Payload codec failure on either tier
    #[error("cache codec failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Fetch Error Enum ==
/// Error type surfaced to callers of the paginated fetch path.
///
/// Only produced after every fallback option is exhausted; cache-layer
/// failures are never converted into a `FetchError`.
#[derive(Error, Debug)]
pub enum FetchError {
    /// A source threw or returned a transport-level error
    #[error("source unavailable: {0}")]
    Source(String),

    /// The secondary source payload could not be normalized
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No resolvable bearer token for the secondary source
    #[error("authentication failure: {0}")]
    Auth(String),
}

impl FetchError {
    /// True for failures that warrant trying the next source in order.
    ///
    /// Malformed payloads count as a source failure here; an unresolvable
    /// token does not, since retrying another endpoint cannot fix it.
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, FetchError::Source(_) | FetchError::MalformedResponse(_))
    }
}

// == API Error Enum ==
/// Error type for the companion posts service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for cache tier operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Convenience Result type for companion service handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
