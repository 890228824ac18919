//! Pagination Envelope Module
//!
//! The uniform paginated result shape plus cache key derivation for pages.

use serde::{Deserialize, Serialize};

use crate::feed::Post;

/// Cursor sentinel for the first page of a feed.
pub const FIRST_PAGE: &str = "first_page";

// == Paginated Response ==
/// One page of results in source order (typically reverse-chronological).
///
/// `next_cursor` is present iff the page is full, signaling that more data
/// may exist; no lookahead fetch is performed to confirm. `total_items` is a
/// best-effort count from the source at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<String>,
    pub total_items: usize,
}

impl PaginatedResponse<Post> {
    /// Wraps a source-ordered page of posts.
    ///
    /// The cursor is the id of the page's last item in source order, so a
    /// follow-up start-after query resumes where this page ended.
    pub fn from_page(data: Vec<Post>, limit: usize, total_items: usize) -> Self {
        let next_cursor = if limit > 0 && data.len() == limit {
            data.last().map(|post| post.id.clone())
        } else {
            None
        };
        Self {
            data,
            next_cursor,
            total_items,
        }
    }
}

// == Cache Key Derivation ==
/// Derives the cache key for a `(limit, cursor)` page request.
///
/// The limit is part of the key, so requests for the same cursor with
/// different page sizes never collide on one entry.
pub fn page_cache_key(limit: usize, cursor: Option<&str>) -> String {
    format!("paginated_{}_{}", limit, cursor.unwrap_or(FIRST_PAGE))
}
