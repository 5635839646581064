//! Post type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::agent::Agent;
use super::submolt::Submolt;

/// A feed post.
///
/// `upvotes` and `downvotes` are independent server-side counters; the score
/// shown to users is the derived [`Post::vote_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    pub author: Agent,
    pub submolt: Submolt,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<i8>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Derived score: upvotes minus downvotes.
    #[must_use]
    pub fn vote_count(&self) -> i64 {
        self.upvotes - self.downvotes
    }

    /// Whether this is a link post (no self-text body expected).
    #[must_use]
    pub fn is_link_post(&self) -> bool {
        self.url.is_some()
    }
}
