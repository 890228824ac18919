//! End-to-End Fetch Tests
//!
//! Drives the full offline-first path: feed fetcher over a real tiered
//! cache, with the API client talking HTTP to a live posts service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use feedcache::api::create_router;
use feedcache::client::{ApiClient, NewPost, StaticTokenProvider};
use feedcache::error::{FetchError, FetchResult};
use feedcache::feed::{page_cache_key, FallbackSource, PaginatedResponse, Post, PostSource};
use feedcache::{AppState, FeedFetcher, SortingHandle, TieredCache};
use tempfile::TempDir;

// == Helper Functions ==

fn seeded_post(id: &str, hours_ago: i64, likes: u32) -> Post {
    Post {
        id: id.to_string(),
        user_id: "author".to_string(),
        content: format!("content of {id}"),
        likes,
        title: None,
        image_url: None,
        description: None,
        created_at: Some(Utc::now() - Duration::hours(hours_ago)),
    }
}

/// Serves the posts API on an ephemeral port, returning its base URL.
async fn spawn_service(state: AppState) -> String {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Arc::new(StaticTokenProvider::new("test-token")))
}

/// Primary source that always fails, forcing the HTTP fallback.
struct DownPrimary;

#[async_trait]
impl PostSource for DownPrimary {
    async fn fetch_posts(&self, _limit: usize, _cursor: Option<&str>) -> FetchResult<Vec<Post>> {
        Err(FetchError::Source("primary offline".to_string()))
    }
}

/// Fallback source that always fails, for offline scenarios.
struct DownFallback;

#[async_trait]
impl FallbackSource for DownFallback {
    async fn fetch_page(
        &self,
        _limit: usize,
        _cursor: Option<&str>,
    ) -> FetchResult<PaginatedResponse<Post>> {
        Err(FetchError::Source("fallback offline".to_string()))
    }
}

// == API Client Tests ==

#[tokio::test]
async fn test_client_fetches_paginated_posts() {
    let state = AppState::new();
    state.insert_post(seeded_post("a", 3, 1)).await;
    state.insert_post(seeded_post("b", 2, 2)).await;
    state.insert_post(seeded_post("c", 1, 3)).await;
    let base_url = spawn_service(state).await;

    let client = api_client(&base_url);

    let first = client.fetch_posts_page(2, None).await.unwrap();
    let ids: Vec<&str> = first.data.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b"]);
    assert_eq!(first.total_items, 3);
    assert_eq!(first.next_cursor.as_deref(), Some("b"));

    let second = client
        .fetch_posts_page(2, first.next_cursor.as_deref())
        .await
        .unwrap();
    let ids: Vec<&str> = second.data.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
    assert!(second.next_cursor.is_none());
}

#[tokio::test]
async fn test_client_create_then_delete_post() {
    let base_url = spawn_service(AppState::new()).await;
    let client = api_client(&base_url);

    let created = client
        .create_post(&NewPost {
            title: "hello".to_string(),
            content: "world".to_string(),
            user_id: "u1".to_string(),
        })
        .await
        .unwrap();
    assert!(!created.id.is_empty());

    let page = client.fetch_posts_page(10, None).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, created.id);

    client.delete_post(&created.id).await.unwrap();

    let page = client.fetch_posts_page(10, None).await.unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_client_missing_field_is_source_error() {
    let base_url = spawn_service(AppState::new()).await;
    let client = api_client(&base_url);

    let err = client
        .create_post(&NewPost {
            title: String::new(),
            content: "c".to_string(),
            user_id: "u".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Source(_)));
}

#[tokio::test]
async fn test_client_fetch_user() {
    let state = AppState::new();
    state
        .insert_user(feedcache::models::User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            picture: None,
        })
        .await;
    let base_url = spawn_service(state).await;
    let client = api_client(&base_url);

    let user = client.fetch_user("u1").await.unwrap().unwrap();
    assert_eq!(user.name, "Ada");

    assert!(client.fetch_user("unknown").await.unwrap().is_none());
}

// == Fetcher End-to-End Tests ==

#[tokio::test]
async fn test_fetcher_falls_back_to_live_api_and_caches() {
    let state = AppState::new();
    state.insert_post(seeded_post("a", 2, 0)).await;
    state.insert_post(seeded_post("b", 1, 0)).await;
    let base_url = spawn_service(state.clone()).await;

    let dir = TempDir::new().unwrap();
    let cache = Arc::new(TieredCache::open(dir.path(), 100, 300).await.unwrap());
    let fetcher = FeedFetcher::new(
        Arc::clone(&cache),
        Arc::new(DownPrimary),
        Arc::new(api_client(&base_url)),
        SortingHandle::default(),
    );

    let page = fetcher.execute(10, None).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, "b");

    // The fallback result landed in the cache under the page key
    let cached: Option<PaginatedResponse<Post>> = cache.get(&page_cache_key(10, None)).await;
    assert_eq!(cached.unwrap().data.len(), 2);

    // Wipe the service; the fetcher still answers from cache
    state.posts.write().await.clear();
    let again = fetcher.execute(10, None).await.unwrap();
    assert_eq!(again.data.len(), 2);
}

#[tokio::test]
async fn test_cached_pages_survive_restart_with_all_sources_down() {
    let state = AppState::new();
    state.insert_post(seeded_post("a", 1, 0)).await;
    let base_url = spawn_service(state).await;

    let dir = TempDir::new().unwrap();

    // Warm run: populate the cache from the live API
    {
        let cache = Arc::new(TieredCache::open(dir.path(), 100, 300).await.unwrap());
        let fetcher = FeedFetcher::new(
            Arc::clone(&cache),
            Arc::new(DownPrimary),
            Arc::new(api_client(&base_url)),
            SortingHandle::default(),
        );
        let page = fetcher.execute(10, None).await.unwrap();
        assert_eq!(page.data.len(), 1);

        // Wait for the async write-through to land on disk
        let mut landed = false;
        for _ in 0..50 {
            let probe = TieredCache::open(dir.path(), 100, 300).await.unwrap();
            let cached: Option<PaginatedResponse<Post>> =
                probe.get(&page_cache_key(10, None)).await;
            if cached.is_some() {
                landed = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(landed, "page never reached the disk tier");
    }

    // Cold run: fresh process, every source offline, disk tier answers
    let cache = Arc::new(TieredCache::open(dir.path(), 100, 300).await.unwrap());
    let fetcher = FeedFetcher::new(
        Arc::clone(&cache),
        Arc::new(DownPrimary),
        Arc::new(DownFallback),
        SortingHandle::default(),
    );

    let page = fetcher.execute(10, None).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "a");
    assert_eq!(cache.stats().await.disk_hits, 1);
}

#[tokio::test]
async fn test_fetcher_error_when_everything_is_down() {
    let dir = TempDir::new().unwrap();
    let cache = Arc::new(TieredCache::open(dir.path(), 100, 300).await.unwrap());
    let fetcher = FeedFetcher::new(
        cache,
        Arc::new(DownPrimary),
        Arc::new(DownFallback),
        SortingHandle::default(),
    );

    let err = fetcher.execute(10, None).await.unwrap_err();
    assert!(matches!(err, FetchError::Source(_)));
}
