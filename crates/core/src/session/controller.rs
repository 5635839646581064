//! Session controller
//!
//! Owns the session state and drives every transition: startup status
//! checks, registration, the claim-verification poll loop, and sign-out.
//! All state mutation goes through this type; callers only read.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use moltpass_common::{CredentialStore, NotificationSurface};
use moltpass_domain::ClaimStatus;
use moltpass_infra::MoltbookClient;

use super::vault::CredentialVault;
use super::{Credential, Session, SessionError};

/// Spacing between claim-status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Poll attempt budget (~120 s at the default interval).
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 40;

/// Drives the session state machine.
pub struct SessionController {
    api: Arc<MoltbookClient>,
    vault: CredentialVault,
    notifications: NotificationSurface,
    session: RwLock<Session>,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl SessionController {
    #[must_use]
    pub fn new(
        api: Arc<MoltbookClient>,
        store: Arc<CredentialStore>,
        notifications: NotificationSurface,
    ) -> Self {
        Self {
            api,
            vault: CredentialVault::new(store),
            notifications,
            session: RwLock::new(Session::Unknown),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }

    /// Override the poll cadence. Intended for tests.
    #[must_use]
    pub fn with_poll_settings(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = interval;
        self.max_poll_attempts = max_attempts;
        self
    }

    /// Current session state.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Resolve the session from stored credentials and the remote status.
    ///
    /// Without a stored API key this resolves to `Unauthenticated` with no
    /// network call. With one, the remote claim status decides; on a failed
    /// call a cached verification code re-enters `PendingClaim` from cache
    /// rather than dropping to `Unauthenticated`.
    pub async fn check_status(&self) -> Session {
        let Some(api_key) = self.vault.api_key() else {
            debug!("No stored API key; skipping status check");
            return self.transition(Session::Unauthenticated).await;
        };

        self.api.set_api_key(api_key);

        match self.api.check_status().await {
            Ok(status) if status.status == ClaimStatus::Claimed => {
                info!("Agent is claimed");
                self.transition(Session::Authenticated).await
            }
            Ok(status) => match self.vault.verification_code() {
                Some(verification_code) => {
                    // Prefer the server's claim URL over the cached one
                    let claim_url = match status.claim_url {
                        Some(url) => {
                            self.vault.persist_claim_url(&url);
                            Some(url)
                        }
                        None => self.vault.claim_url(),
                    };
                    self.transition(Session::PendingClaim { verification_code, claim_url }).await
                }
                None => {
                    warn!("Stored key is pending claim but no verification code is cached");
                    self.notifications
                        .show("Your session data is incomplete. Please sign in again.");
                    self.transition(Session::Unauthenticated).await
                }
            },
            Err(e) => {
                warn!(error = %e, "Status check failed");
                self.notifications.show(e.user_message());
                match self.vault.verification_code() {
                    // Availability over correctness: keep the cached pending
                    // session rather than signing the user out on a flake
                    Some(verification_code) => {
                        let claim_url = self.vault.claim_url();
                        self.transition(Session::PendingClaim { verification_code, claim_url })
                            .await
                    }
                    None => self.transition(Session::Unauthenticated).await,
                }
            }
        }
    }

    /// Register a new agent and enter `PendingClaim`.
    ///
    /// # Errors
    /// - [`SessionError::Rejected`] when the server does not mark the
    ///   registration successful
    /// - [`SessionError::EmptyApiKey`] / [`SessionError::EmptyVerificationCode`]
    ///   when mandatory credential material is missing; nothing is persisted
    /// - [`SessionError::PersistFailed`] when the credential cannot be stored
    /// - [`SessionError::Api`] on a classified API failure
    pub async fn register(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Credential, SessionError> {
        let response = self.api.register(name, description).await?;

        if !response.success {
            return Err(SessionError::Rejected);
        }
        if response.agent.api_key.is_empty() {
            return Err(SessionError::EmptyApiKey);
        }
        if response.agent.verification_code.is_empty() {
            return Err(SessionError::EmptyVerificationCode);
        }

        let credential = Credential {
            api_key: response.agent.api_key,
            verification_code: response.agent.verification_code,
            claim_url: response.agent.claim_url,
        };

        self.vault.store_credential(&credential)?;
        self.api.set_api_key(&credential.api_key);

        info!(agent = %name, "Agent registered; awaiting claim");
        self.transition(Session::PendingClaim {
            verification_code: credential.verification_code.clone(),
            claim_url: credential.claim_url.clone(),
        })
        .await;

        Ok(credential)
    }

    /// Poll the claim status until `claimed`, the attempt budget runs out,
    /// or `cancel` fires.
    ///
    /// Individual poll failures are swallowed and counted; a cancelled loop
    /// performs no further state mutation.
    ///
    /// # Errors
    /// [`SessionError::VerificationTimeout`] after the budget,
    /// [`SessionError::Cancelled`] on external cancellation.
    pub async fn poll_verification(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), SessionError> {
        for attempt in 1..=self.max_poll_attempts {
            if cancel.is_cancelled() {
                debug!(attempt, "Verification polling cancelled");
                return Err(SessionError::Cancelled);
            }

            match self.api.check_status().await {
                Ok(status) if status.status == ClaimStatus::Claimed => {
                    info!(attempt, "Claim confirmed");
                    self.transition(Session::Authenticated).await;
                    return Ok(());
                }
                Ok(_) => {
                    debug!(attempt, "Still pending claim");
                }
                Err(e) => {
                    debug!(attempt, error = %e, "Poll attempt failed");
                }
            }

            if attempt < self.max_poll_attempts {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!(attempt, "Verification polling cancelled");
                        return Err(SessionError::Cancelled);
                    }
                    () = tokio::time::sleep(self.poll_interval) => {}
                }
            }
        }

        warn!(attempts = self.max_poll_attempts, "Verification polling timed out");
        Err(SessionError::VerificationTimeout { attempts: self.max_poll_attempts })
    }

    /// Drop all credential material and return to `Unauthenticated`.
    pub async fn sign_out(&self) {
        self.vault.clear();
        self.api.clear_api_key();
        self.transition(Session::Unauthenticated).await;
        info!("Signed out");
    }

    async fn transition(&self, next: Session) -> Session {
        let mut session = self.session.write().await;
        if *session != next {
            debug!(from = ?*session, to = ?next, "Session transition");
        }
        *session = next.clone();
        next
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("poll_interval", &self.poll_interval)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .finish_non_exhaustive()
    }
}
