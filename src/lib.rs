//! Feedcache - an offline-first feed fetching core
//!
//! Provides a two-tier (memory + disk) cache with TTL expiration and a
//! paginated fetch orchestrator with primary/secondary source fallback.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::TieredCache;
pub use config::{Config, SortingConfig, SortingHandle};
pub use feed::FeedFetcher;
pub use tasks::spawn_purge_task;
