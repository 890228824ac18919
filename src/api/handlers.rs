//! API Handlers
//!
//! HTTP request handlers for the posts service. Post and user storage is an
//! in-process map; pagination is cursor-based over creation time descending,
//! matching the contract the API client consumes.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::feed::Post;
use crate::models::{
    ApiPage, CreatePostRequest, CreatePostResponse, DeleteResponse, HealthResponse, PageQuery,
    User,
};

/// Application state shared across all handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Stored posts, unordered; listings sort on demand
    pub posts: Arc<RwLock<Vec<Post>>>,
    /// User profiles by id
    pub users: Arc<RwLock<HashMap<String, User>>>,
}

impl AppState {
    /// Creates empty service state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a post.
    pub async fn insert_post(&self, post: Post) {
        let mut posts = self.posts.write().await;
        posts.retain(|existing| existing.id != post.id);
        posts.push(post);
    }

    /// Inserts or replaces a user profile.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }
}

/// Handler for GET /posts
///
/// Returns one page ordered by creation time descending. An unknown cursor
/// is ignored and the listing restarts from the top.
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<ApiPage<Post>> {
    let limit = query.limit_or_default();

    let mut posts = state.posts.read().await.clone();
    let total_items = posts.len();

    // Creation time descending, undated posts last; id as a deterministic tie-break
    posts.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(ta), Some(tb)) => tb.cmp(&ta).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });

    let start = match query.cursor.as_deref() {
        Some(cursor) => posts
            .iter()
            .position(|post| post.id == cursor)
            .map(|idx| idx + 1)
            .unwrap_or(0),
        None => 0,
    };

    let page: Vec<Post> = posts.into_iter().skip(start).take(limit).collect();
    let next_cursor = if limit > 0 && page.len() == limit {
        page.last().map(|post| post.id.clone())
    } else {
        None
    };

    Json(ApiPage::new(page, limit, total_items, next_cursor))
}

/// Handler for POST /posts
///
/// Creates a post with a fresh id; missing required fields yield a 400.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<CreatePostResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let id = Uuid::new_v4().to_string();
    let post = Post {
        id: id.clone(),
        user_id: req.user_id.unwrap_or_default(),
        content: req.content.unwrap_or_default(),
        likes: 0,
        title: req.title,
        image_url: Some(format!("https://picsum.photos/200?random={id}")),
        description: Some("No description available".to_string()),
        created_at: Some(Utc::now()),
    };
    state.insert_post(post).await;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created successfully".to_string(),
            id,
        }),
    ))
}

/// Handler for DELETE /posts/:id
///
/// Idempotent: deleting an unknown id still reports success.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeleteResponse> {
    let mut posts = state.posts.write().await;
    posts.retain(|post| post.id != id);

    Json(DeleteResponse {
        message: "Post deleted successfully".to_string(),
    })
}

/// Handler for GET /users/:user_id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<User>> {
    let users = state.users.read().await;
    users
        .get(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
