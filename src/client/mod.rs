//! API Client Module
//!
//! HTTP client for the companion posts service, used as the fallback feed
//! source. Requests carry a bearer token resolved through a pluggable
//! provider; wire items are normalized into the domain [`Post`] shape.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{FetchError, FetchResult};
use crate::feed::{FallbackSource, PaginatedResponse, Post};
use crate::models::{ApiPage, CreatePostResponse, DeleteResponse, User};

// == Token Provider ==
/// Resolves the bearer token attached to every API request.
///
/// An unresolvable token is a request-level failure; the fetch path reports
/// it as [`FetchError::Auth`] without consulting the cache.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn bearer_token(&self) -> FetchResult<String>;
}

/// Token provider holding a fixed token, for composition roots that obtain
/// one out-of-band (and for tests).
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> FetchResult<String> {
        Ok(self.token.clone())
    }
}

// == Wire DTO ==
/// Post representation on the API wire; `id` may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    #[serde(default)]
    pub id: Option<String>,
    pub content: String,
    pub user_id: String,
    pub likes: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PostDto {
    /// Normalizes into the domain shape; a missing id gets a fresh UUID.
    pub fn into_post(self) -> Post {
        Post {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: self.user_id,
            content: self.content,
            likes: self.likes,
            title: self.title,
            image_url: self.image_url,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// Body for creating a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: String,
}

// == API Client ==
/// Thin typed client over the posts API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    // == Constructor ==
    /// # Arguments
    /// * `base_url` - Service root, e.g. `http://127.0.0.1:3000/api`
    /// * `tokens` - Bearer token provider for request authentication
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Issues an authenticated request and checks the status code.
    async fn send(&self, request: reqwest::RequestBuilder) -> FetchResult<reqwest::Response> {
        let token = self.tokens.bearer_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| FetchError::Source(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Source(format!(
                "unexpected status {} from {}",
                response.status(),
                response.url()
            )));
        }
        Ok(response)
    }

    // == Fetch Posts Page ==
    /// `GET /posts?limit=<n>&cursor=<opaque>`, normalized into the domain
    /// envelope.
    pub async fn fetch_posts_page(
        &self,
        limit: usize,
        cursor: Option<&str>,
    ) -> FetchResult<PaginatedResponse<Post>> {
        let mut url = format!("{}/posts?limit={}", self.base_url, limit);
        if let Some(cursor) = cursor {
            url.push_str("&cursor=");
            url.push_str(cursor);
        }
        debug!(%url, "fetching posts page from API");

        let response = self.send(self.http.get(&url)).await?;
        let page: ApiPage<PostDto> = response
            .json()
            .await
            .map_err(|err| FetchError::MalformedResponse(err.to_string()))?;

        Ok(PaginatedResponse {
            data: page.data.into_iter().map(PostDto::into_post).collect(),
            next_cursor: page.next_cursor,
            total_items: page.total_items,
        })
    }

    // == Create Post ==
    /// `POST /posts` returning the new post's id.
    pub async fn create_post(&self, post: &NewPost) -> FetchResult<CreatePostResponse> {
        let url = format!("{}/posts", self.base_url);
        let response = self.send(self.http.post(&url).json(post)).await?;
        response
            .json()
            .await
            .map_err(|err| FetchError::MalformedResponse(err.to_string()))
    }

    // == Delete Post ==
    /// `DELETE /posts/:id`.
    pub async fn delete_post(&self, post_id: &str) -> FetchResult<DeleteResponse> {
        let url = format!("{}/posts/{}", self.base_url, post_id);
        let response = self.send(self.http.delete(&url)).await?;
        response
            .json()
            .await
            .map_err(|err| FetchError::MalformedResponse(err.to_string()))
    }

    // == Fetch User ==
    /// `GET /users/:userId`; `None` when the user does not exist.
    pub async fn fetch_user(&self, user_id: &str) -> FetchResult<Option<User>> {
        let token = self.tokens.bearer_token().await?;
        let url = format!("{}/users/{}", self.base_url, user_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| FetchError::Source(err.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(FetchError::Source(format!(
                "unexpected status {} from {}",
                response.status(),
                url
            )));
        }

        let user = response
            .json()
            .await
            .map_err(|err| FetchError::MalformedResponse(err.to_string()))?;
        Ok(Some(user))
    }
}

#[async_trait]
impl FallbackSource for ApiClient {
    async fn fetch_page(
        &self,
        limit: usize,
        cursor: Option<&str>,
    ) -> FetchResult<PaginatedResponse<Post>> {
        self.fetch_posts_page(limit, cursor).await
    }
}
