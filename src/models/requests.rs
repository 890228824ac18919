//! Request DTOs for the posts service API
//!
//! Defines the structure of incoming HTTP request bodies and queries.

use serde::Deserialize;

/// Request body for creating a post (POST /posts)
///
/// All fields are optional at the serde layer so a missing field surfaces
/// as a 400 with a message, not a bare deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<String>,
}

impl CreatePostRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if a required field is missing or empty,
    /// None if valid.
    pub fn validate(&self) -> Option<String> {
        for (name, value) in [
            ("title", &self.title),
            ("content", &self.content),
            ("userId", &self.user_id),
        ] {
            match value {
                Some(v) if !v.is_empty() => {}
                _ => return Some(format!("Missing required field: {name}")),
            }
        }
        None
    }
}

/// Query parameters for the paginated posts listing (GET /posts)
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// Page size (default: 10)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Id of the last item of the previous page
    #[serde(default)]
    pub cursor: Option<String>,
}

impl PageQuery {
    pub fn limit_or_default(&self) -> usize {
        self.limit.unwrap_or(10)
    }
}
