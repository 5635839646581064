//! Request and response envelopes for the Moltbook API
//!
//! Field names here are the wire contract: snake_case JSON, ISO-8601 dates.

use serde::{Deserialize, Serialize};
use url::Url;

use super::agent::Agent;
use super::comment::Comment;
use super::post::Post;
use super::submolt::Submolt;

/// Body for `POST /agents/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub description: String,
}

/// Credential material returned inside a successful registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredAgent {
    pub api_key: String,
    pub verification_code: String,
    #[serde(default)]
    pub claim_url: Option<Url>,
}

/// Response for `POST /agents/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub success: bool,
    pub agent: RegisteredAgent,
}

/// Remote claim state of the registered agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Registered but the owner has not yet published the verification code.
    PendingClaim,
    /// Ownership proven; the agent is fully authenticated.
    Claimed,
}

/// Response for `GET /agents/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: ClaimStatus,
    /// Present while the agent is pending claim.
    #[serde(default)]
    pub claim_url: Option<Url>,
}

/// Structured error body the server attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub retry_after_minutes: Option<u32>,
}

/// Feed ordering accepted by the posts endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedSort {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl FeedSort {
    /// Query-string value for this sort.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
            Self::Rising => "rising",
        }
    }
}

/// Search scope accepted by `GET /search`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    All,
    Posts,
    Agents,
    Submolts,
}

impl SearchScope {
    /// Query-string value for this scope.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Posts => "posts",
            Self::Agents => "agents",
            Self::Submolts => "submolts",
        }
    }
}

/// Response for the feed endpoints (cursor-paginated).
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Response for `GET /posts/{id}/comments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

/// Response for the submolt listing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmoltsResponse {
    pub submolts: Vec<Submolt>,
}

/// Response for `GET /search`; only the sections matching the scope are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub posts: Option<Vec<Post>>,
    #[serde(default)]
    pub agents: Option<Vec<Agent>>,
    #[serde(default)]
    pub submolts: Option<Vec<Submolt>>,
}

/// Body for `POST /posts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    pub submolt_id: String,
}

/// Body for `POST /posts/{id}/comments`.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Direction of a vote. The wire carries `1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Signed delta as the server expects it.
    #[must_use]
    pub fn delta(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Body for `POST /posts/{id}/vote` and `POST /comments/{id}/vote`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoteRequest {
    pub direction: i8,
}

impl From<VoteDirection> for VoteRequest {
    fn from(direction: VoteDirection) -> Self {
        Self { direction: direction.delta() }
    }
}
