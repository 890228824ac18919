//! Response DTOs for the posts service API
//!
//! Defines the structure of outgoing HTTP response bodies. The client module
//! deserializes these same shapes, so every type derives both directions.

use serde::{Deserialize, Serialize};

// == API Page ==
/// Wire envelope for a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPage<T> {
    /// Page size the request asked for
    pub limit: usize,
    /// Best-effort total count at fetch time
    pub total_items: usize,
    /// True when the page came back full
    pub has_next_page: bool,
    /// Id of this page's last item, absent on a short page
    pub next_cursor: Option<String>,
    /// The page items
    pub data: Vec<T>,
}

impl<T> ApiPage<T> {
    /// Builds the envelope from a page of items.
    pub fn new(data: Vec<T>, limit: usize, total_items: usize, next_cursor: Option<String>) -> Self {
        Self {
            limit,
            total_items,
            has_next_page: limit > 0 && data.len() == limit,
            next_cursor,
            data,
        }
    }
}

// == Create Post Response ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub id: String,
}

// == Delete Response ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

// == User ==
/// User profile as served by GET /users/:userId.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

// == Error Response ==
/// Error body shape produced by the service's error type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// == Health Response ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
