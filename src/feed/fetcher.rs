//! Feed Fetcher Module
//!
//! The paginated fetch orchestrator: cache first, then the live query
//! source, then the HTTP fallback, with write-through on every successful
//! fetch.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use crate::cache::TieredCache;
use crate::config::SortingHandle;
use crate::error::FetchResult;
use crate::feed::sorting::prepare_feed;
use crate::feed::{page_cache_key, PaginatedResponse, Post};

/// Cache key for the most recent first page, kept for realtime-update
/// consumers outside the pagination path.
pub const LATEST_POSTS_KEY: &str = "latest_posts";

/// Page size used when refreshing the latest-posts entry.
const LATEST_POSTS_LIMIT: usize = 10;

// == Source Contracts ==
/// Primary feed source: a live query capability returning posts ordered by
/// creation time descending, resuming after `cursor` when one is given.
///
/// Returning fewer than `limit` posts signals end of data; empty is a valid
/// result, not a failure.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self, limit: usize, cursor: Option<&str>) -> FetchResult<Vec<Post>>;
}

/// Secondary feed source: an HTTP API with the same `(limit, cursor)`
/// contract, returning a ready-made pagination envelope.
#[async_trait]
pub trait FallbackSource: Send + Sync {
    async fn fetch_page(
        &self,
        limit: usize,
        cursor: Option<&str>,
    ) -> FetchResult<PaginatedResponse<Post>>;
}

// == Feed Fetcher ==
/// Produces a page of posts for a `(limit, cursor)` request.
///
/// Read path: cache, then primary source, then fallback source. Successful
/// fetches are written through to the cache; cache failures never surface.
/// Construct one per composition root and share it via `Arc` - there is no
/// ambient global instance.
pub struct FeedFetcher {
    cache: Arc<TieredCache>,
    primary: Arc<dyn PostSource>,
    fallback: Arc<dyn FallbackSource>,
    sorting: SortingHandle,
}

impl FeedFetcher {
    // == Constructor ==
    pub fn new(
        cache: Arc<TieredCache>,
        primary: Arc<dyn PostSource>,
        fallback: Arc<dyn FallbackSource>,
        sorting: SortingHandle,
    ) -> Self {
        Self {
            cache,
            primary,
            fallback,
            sorting,
        }
    }

    // == Execute ==
    /// Fetches one page of the feed.
    ///
    /// 1. Return the cached page if one is unexpired - no source is touched.
    /// 2. Query the primary source. Empty is a legitimate "no more pages"
    ///    result; only an error triggers fallback.
    /// 3. On primary failure, query the fallback API and normalize its page.
    /// 4. Dedup by id, order by the currently configured strategy, cache the
    ///    envelope, return it.
    /// 5. If both sources fail, the fallback's error propagates and the
    ///    cache entry for this key is left untouched.
    pub async fn execute(
        &self,
        limit: usize,
        cursor: Option<&str>,
    ) -> FetchResult<PaginatedResponse<Post>> {
        let cache_key = page_cache_key(limit, cursor);

        if let Some(cached) = self.cache.get::<PaginatedResponse<Post>>(&cache_key).await {
            debug!(key = %cache_key, "serving page from cache");
            return Ok(cached);
        }

        // Sorting parameters are read fresh on every fetch
        let sorting = self.sorting.current();

        let page = match self.primary.fetch_posts(limit, cursor).await {
            Ok(posts) => {
                let total_items = posts.len();
                let next_cursor = source_cursor(&posts, limit);
                let data = prepare_feed(posts, &sorting, Utc::now());
                PaginatedResponse {
                    data,
                    next_cursor,
                    total_items,
                }
            }
            Err(err) if err.triggers_fallback() => {
                warn!(key = %cache_key, "primary source failed, trying fallback: {err}");
                let raw = self.fallback.fetch_page(limit, cursor).await?;
                let next_cursor = if raw.data.len() == limit {
                    raw.next_cursor
                } else {
                    None
                };
                let data = prepare_feed(raw.data, &sorting, Utc::now());
                PaginatedResponse {
                    data,
                    next_cursor,
                    total_items: raw.total_items,
                }
            }
            Err(err) => return Err(err),
        };

        self.cache.set(&cache_key, &page).await;
        Ok(page)
    }

    // == Latest Posts ==
    /// Refreshes the first page and caches the bare post list under
    /// [`LATEST_POSTS_KEY`] for realtime-update consumers.
    pub async fn latest_posts(&self) -> FetchResult<Vec<Post>> {
        let page = self.execute(LATEST_POSTS_LIMIT, None).await?;
        self.cache.set(LATEST_POSTS_KEY, &page.data).await;
        Ok(page.data)
    }

    /// Returns the cached latest-posts list without touching any source.
    pub async fn cached_latest_posts(&self) -> Option<Vec<Post>> {
        self.cache.get(LATEST_POSTS_KEY).await
    }
}

/// Cursor for resuming after `posts`, in source order: the last item's id
/// when the page is full, absent otherwise.
fn source_cursor(posts: &[Post], limit: usize) -> Option<String> {
    if limit > 0 && posts.len() == limit {
        posts.last().map(|post| post.id.clone())
    } else {
        None
    }
}
