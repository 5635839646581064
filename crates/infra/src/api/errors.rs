//! API error classification
//!
//! Every non-success outcome of a gateway call maps onto exactly one of
//! these variants. The gateway never retries on its own; callers decide
//! what, if anything, to do with a failure.

use thiserror::Error;

/// Classified API failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401: the held credential is invalid or expired.
    #[error("invalid or expired credential")]
    Unauthorized,

    /// HTTP 404.
    #[error("resource not found")]
    NotFound,

    /// HTTP 429, with the server's retry hint when it sent one.
    #[error("rate limited by the server")]
    RateLimited {
        retry_after_minutes: Option<u32>,
    },

    /// Any other HTTP status, with the structured error message if the body
    /// had one.
    #[error("unexpected HTTP status {status}")]
    Unknown {
        status: u16,
        message: Option<String>,
    },

    /// A 2xx body that did not decode as the expected type. Carries the
    /// first ~500 bytes of the raw body for diagnostics.
    #[error("response body could not be decoded")]
    Decode {
        body_prefix: String,
    },

    /// Transport-level failure (DNS, connect, timeout, dropped connection).
    #[error("network failure: {0}")]
    Network(String),
}

impl ApiError {
    /// Human-facing message for the notification surface.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            Self::NotFound => "That content is no longer available.".to_string(),
            Self::RateLimited { retry_after_minutes: Some(minutes) } => {
                format!("You're doing that too fast. Try again in {minutes} minutes.")
            }
            Self::RateLimited { retry_after_minutes: None } => {
                "You're doing that too fast. Try again shortly.".to_string()
            }
            Self::Unknown { message: Some(message), .. } => message.clone(),
            Self::Unknown { status, message: None } => {
                format!("Something went wrong (HTTP {status}).")
            }
            Self::Decode { .. } => "The server sent an unexpected response.".to_string(),
            Self::Network(_) => "Network error. Please check your connection.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_presentable() {
        let limited = ApiError::RateLimited { retry_after_minutes: Some(5) };
        assert!(limited.user_message().contains("5 minutes"));

        let unknown = ApiError::Unknown { status: 503, message: None };
        assert!(unknown.user_message().contains("503"));

        let passthrough =
            ApiError::Unknown { status: 400, message: Some("Title is required".to_string()) };
        assert_eq!(passthrough.user_message(), "Title is required");
    }
}
