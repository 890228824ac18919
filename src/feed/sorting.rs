//! Feed Sorting Module
//!
//! Selectable ordering strategies for fetched pages: source-chronological,
//! engagement, or a weighted score blending likes with recency. Items are
//! always deduplicated by id before any comparison-based sort runs, since
//! dedup would otherwise destroy the order the sort just produced.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::config::SortingConfig;
use crate::feed::Post;

// == Sort Strategy ==
/// The active ordering for a fetched feed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Source order: `created_at` descending, undated posts last
    Chronological,
    /// `likes` descending
    Engagement,
    /// Weighted blend of likes and recency, weights from remote config
    Scored,
}

impl SortStrategy {
    /// Maps the remote-config flag to a strategy.
    ///
    /// Unrecognized or empty flags fall back to chronological.
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "engagement" => SortStrategy::Engagement,
            "ai" => SortStrategy::Scored,
            _ => SortStrategy::Chronological,
        }
    }
}

// == Feed Preparation ==
/// Deduplicates by id, then orders by the configured strategy.
///
/// The strategy flag is parsed fresh from `config` on every call; the
/// orchestrator never caches it.
pub fn prepare_feed(posts: Vec<Post>, config: &SortingConfig, now: DateTime<Utc>) -> Vec<Post> {
    let mut posts = dedup_by_id(posts);

    let strategy = SortStrategy::from_flag(&config.feed_sorting_type);
    trace!(?strategy, count = posts.len(), "ordering fetched page");

    match strategy {
        SortStrategy::Chronological => {
            posts.sort_by(|a, b| compare_created_desc(a, b));
        }
        SortStrategy::Engagement => {
            posts.sort_by(|a, b| b.likes.cmp(&a.likes));
        }
        SortStrategy::Scored => {
            posts.sort_by(|a, b| {
                let score_a = ai_score(a, config, now);
                let score_b = ai_score(b, config, now);
                score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal)
            });
        }
    }

    posts
}

/// Removes duplicate ids, keeping each id's first occurrence.
fn dedup_by_id(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::with_capacity(posts.len());
    posts
        .into_iter()
        .filter(|post| seen.insert(post.id.clone()))
        .collect()
}

/// Newest first; posts without a timestamp sort last.
fn compare_created_desc(a: &Post, b: &Post) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Weighted feed score.
///
/// `engagement_weight * likes + recency_weight * 1/(hours_since + 1)`;
/// a post without a timestamp contributes its raw like count only.
fn ai_score(post: &Post, config: &SortingConfig, now: DateTime<Utc>) -> f64 {
    let Some(hours_since) = post.hours_since_created(now) else {
        return f64::from(post.likes);
    };

    let likes_score = config.ai_engagement_weight * f64::from(post.likes);
    let recency_score = config.ai_sorting_weight * (1.0 / (hours_since + 1.0));
    likes_score + recency_score
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(id: &str, likes: u32, hours_ago: Option<i64>) -> Post {
        let now = Utc::now();
        Post {
            id: id.to_string(),
            user_id: "u".to_string(),
            content: String::new(),
            likes,
            title: None,
            image_url: None,
            description: None,
            created_at: hours_ago.map(|h| now - Duration::hours(h)),
        }
    }

    fn config(flag: &str, engagement: f64, recency: f64) -> SortingConfig {
        SortingConfig {
            feed_sorting_type: flag.to_string(),
            ai_engagement_weight: engagement,
            ai_sorting_weight: recency,
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_strategy_from_flag() {
        assert_eq!(SortStrategy::from_flag("engagement"), SortStrategy::Engagement);
        assert_eq!(SortStrategy::from_flag("ai"), SortStrategy::Scored);
        assert_eq!(SortStrategy::from_flag(""), SortStrategy::Chronological);
        assert_eq!(SortStrategy::from_flag("whatever"), SortStrategy::Chronological);
    }

    #[test]
    fn test_dedup_then_engagement_sort() {
        let input = vec![
            post("a", 5, None),
            post("a", 5, None),
            post("b", 1, None),
        ];

        let out = prepare_feed(input, &config("engagement", 1.0, 1.0), Utc::now());
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn test_chronological_newest_first_undated_last() {
        let input = vec![
            post("old", 0, Some(48)),
            post("undated", 0, None),
            post("new", 0, Some(1)),
        ];

        let out = prepare_feed(input, &config("", 1.0, 1.0), Utc::now());
        assert_eq!(ids(&out), vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_scored_recency_breaks_like_ties() {
        let input = vec![post("stale", 10, Some(100)), post("fresh", 10, Some(1))];

        let out = prepare_feed(input, &config("ai", 1.0, 1.0), Utc::now());
        assert_eq!(ids(&out), vec!["fresh", "stale"]);
    }

    #[test]
    fn test_scored_engagement_weight_dominates() {
        // Heavy engagement weight: 20 likes beats any recency edge
        let input = vec![post("fresh", 1, Some(0)), post("liked", 20, Some(100))];

        let out = prepare_feed(input, &config("ai", 10.0, 1.0), Utc::now());
        assert_eq!(ids(&out), vec!["liked", "fresh"]);
    }

    #[test]
    fn test_scored_undated_scores_on_likes_alone() {
        let now = Utc::now();
        // Undated post with raw likes 5; dated post scores 0.1*2 + ~1.0
        let input = vec![post("dated", 2, Some(0)), post("undated", 5, None)];

        let out = prepare_feed(input, &config("ai", 0.1, 1.0), now);
        assert_eq!(ids(&out), vec!["undated", "dated"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut first = post("a", 1, None);
        first.content = "first".to_string();
        let mut second = post("a", 9, None);
        second.content = "second".to_string();

        let out = prepare_feed(
            vec![first, second],
            &config("", 1.0, 1.0),
            Utc::now(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, "first");
    }
}
