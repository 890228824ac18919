//! Post Model
//!
//! The feed item shared by both sources, the cache, and the companion
//! service wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Post ==
/// A single feed item.
///
/// `id` is unique and stable. `created_at` is optional; posts lacking it sort
/// last chronologically and score on likes alone. The cache never mutates a
/// stored post, it only replaces whole pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub likes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Hours elapsed since this post was created, if it carries a timestamp.
    pub fn hours_since_created(&self, now: DateTime<Utc>) -> Option<f64> {
        self.created_at
            .map(|created| (now - created).num_seconds() as f64 / 3600.0)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_post_wire_roundtrip() {
        let json = r#"{
            "id": "p1",
            "userId": "u1",
            "content": "hello",
            "likes": 3,
            "title": "greeting",
            "createdAt": "2026-01-15T12:00:00Z"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.user_id, "u1");
        assert_eq!(post.likes, 3);
        assert_eq!(post.title.as_deref(), Some("greeting"));
        assert!(post.image_url.is_none());
        assert!(post.created_at.is_some());

        let encoded = serde_json::to_value(&post).unwrap();
        assert_eq!(encoded["userId"], "u1");
        // Absent optionals stay off the wire
        assert!(encoded.get("imageUrl").is_none());
    }

    #[test]
    fn test_post_without_timestamp() {
        let json = r#"{"id": "p2", "userId": "u1", "content": "no date", "likes": 0}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert!(post.created_at.is_none());
        assert!(post.hours_since_created(Utc::now()).is_none());
    }

    #[test]
    fn test_hours_since_created() {
        let now = Utc::now();
        let post = Post {
            id: "p".to_string(),
            user_id: "u".to_string(),
            content: String::new(),
            likes: 0,
            title: None,
            image_url: None,
            description: None,
            created_at: Some(now - Duration::hours(2)),
        };

        let hours = post.hours_since_created(now).unwrap();
        assert!((hours - 2.0).abs() < 0.01);
    }
}
