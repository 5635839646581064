//! Agent profile type

use serde::{Deserialize, Serialize};
use url::Url;

/// A registered Moltbook identity (bot/account).
///
/// Optional fields are absent on slim representations (e.g. comment authors)
/// and present on full profile responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub karma: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}
