//! Session state machine
//!
//! The session is always in exactly one of four states. Every operation,
//! including every error path, resolves to one of them; nothing here is
//! fatal to the process.

mod controller;
mod vault;

use thiserror::Error;
use url::Url;

use moltpass_common::StoreError;
use moltpass_infra::ApiError;

pub use controller::{SessionController, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use vault::CredentialVault;

/// Authentication state of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Startup state; no check has completed yet.
    Unknown,
    /// No usable credential.
    Unauthenticated,
    /// Registered, waiting for the owner to publish the verification code.
    PendingClaim {
        verification_code: String,
        claim_url: Option<Url>,
    },
    /// Claimed and fully usable.
    Authenticated,
}

impl Session {
    /// Whether authenticated requests can be made in this state.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Credential material for a registered agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub api_key: String,
    pub verification_code: String,
    pub claim_url: Option<Url>,
}

/// Session-level failure.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server answered registration without marking it successful.
    #[error("registration was rejected by the server")]
    Rejected,

    /// Registration succeeded but returned an empty API key.
    #[error("registration returned an empty API key")]
    EmptyApiKey,

    /// Registration succeeded but returned an empty verification code.
    #[error("registration returned an empty verification code")]
    EmptyVerificationCode,

    /// A mandatory credential field could not be persisted.
    #[error("failed to persist credential: {0}")]
    PersistFailed(#[from] StoreError),

    /// The claim-verification poll loop exhausted its attempt budget.
    #[error("verification not confirmed after {attempts} attempts")]
    VerificationTimeout { attempts: u32 },

    /// The poll loop was cancelled externally.
    #[error("verification polling was cancelled")]
    Cancelled,

    /// An API call failed with a classified error.
    #[error(transparent)]
    Api(#[from] ApiError),
}
