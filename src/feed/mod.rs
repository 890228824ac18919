//! Feed Module
//!
//! The paginated fetch orchestrator and its supporting types: the post
//! model, the pagination envelope, and the selectable sorting strategies.

mod fetcher;
mod page;
mod post;
mod sorting;

// Re-export public types
pub use fetcher::{FallbackSource, FeedFetcher, PostSource, LATEST_POSTS_KEY};
pub use page::{page_cache_key, PaginatedResponse, FIRST_PAGE};
pub use post::Post;
pub use sorting::{prepare_feed, SortStrategy};
