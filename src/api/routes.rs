//! API Routes
//!
//! Configures the Axum router for the posts service.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_post_handler, delete_post_handler, get_user_handler, health_handler,
    list_posts_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /posts` - Paginated posts listing
/// - `POST /posts` - Create a post
/// - `DELETE /posts/:id` - Delete a post
/// - `GET /users/:user_id` - Fetch a user profile
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/posts", get(list_posts_handler).post(create_post_handler))
        .route("/posts/:id", delete(delete_post_handler))
        .route("/users/:user_id", get(get_user_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
