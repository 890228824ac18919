//! Request and Response models for the posts service API
//!
//! Wire DTOs shared by the companion service handlers and the API client.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreatePostRequest, PageQuery};
pub use responses::{
    ApiPage, CreatePostResponse, DeleteResponse, ErrorResponse, HealthResponse, User,
};
