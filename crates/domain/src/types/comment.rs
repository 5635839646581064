//! Comment type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::agent::Agent;

/// A comment on a post.
///
/// Comments form a tree via `replies`; create responses omit `author` and
/// `replies`, so both decode leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<i8>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Derived score: upvotes minus downvotes.
    #[must_use]
    pub fn vote_count(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}
