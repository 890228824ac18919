//! API Module
//!
//! HTTP handlers and routing for the companion posts service, the live
//! counterpart of the fallback source contract.
//!
//! # Endpoints
//! - `GET /posts?limit&cursor` - Paginated posts listing
//! - `POST /posts` - Create a post
//! - `DELETE /posts/:id` - Delete a post
//! - `GET /users/:user_id` - Fetch a user profile
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
