//! Submolt (community) type

use serde::{Deserialize, Serialize};

/// A named community/topic channel that posts belong to.
///
/// Some endpoints return submolts without an `id`; `key()` falls back to the
/// name, which is unique server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submolt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<i64>,
    #[serde(default)]
    pub is_subscribed: bool,
}

impl Submolt {
    /// Stable identifier: the wire `id` when present, otherwise the name.
    #[must_use]
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Human-facing title: display name when present, otherwise the raw name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
