//! Typed credential persistence
//!
//! Thin layer over the generic [`CredentialStore`] that knows the three
//! logical entries a session needs. The API key and verification code are
//! mandatory; the claim URL is convenience data and is persisted
//! best-effort only.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use moltpass_common::{CredentialStore, StoreError};

use super::Credential;

const KEY_API_KEY: &str = "api_key";
const KEY_VERIFICATION_CODE: &str = "verification_code";
const KEY_CLAIM_URL: &str = "claim_url";

/// Session credential accessor over a shared [`CredentialStore`].
#[derive(Debug, Clone)]
pub struct CredentialVault {
    store: Arc<CredentialStore>,
}

impl CredentialVault {
    #[must_use]
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    /// Persist a full credential.
    ///
    /// The claim URL is written after the mandatory fields and never fails
    /// the operation. A failed verification-code write deletes the API key
    /// written just before it, so the store never holds a key without its
    /// code.
    ///
    /// # Errors
    /// Returns the store error when the API key or verification code cannot
    /// be written.
    pub fn store_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        self.store.save(KEY_API_KEY, &credential.api_key)?;

        if let Err(e) = self.store.save(KEY_VERIFICATION_CODE, &credential.verification_code) {
            warn!(error = %e, "Verification code save failed; removing orphaned API key");
            self.store.delete(KEY_API_KEY);
            return Err(e);
        }

        if let Some(url) = &credential.claim_url {
            self.persist_claim_url(url);
        }
        debug!("Credential persisted");
        Ok(())
    }

    /// Best-effort claim URL update (e.g. a fresher value from the server).
    pub fn persist_claim_url(&self, url: &Url) {
        if let Err(e) = self.store.save(KEY_CLAIM_URL, url.as_str()) {
            warn!(error = %e, "Failed to persist claim URL");
        }
    }

    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.store.retrieve(KEY_API_KEY)
    }

    #[must_use]
    pub fn verification_code(&self) -> Option<String> {
        self.store.retrieve(KEY_VERIFICATION_CODE)
    }

    /// The cached claim URL. An unparsable stored value is treated as absent.
    #[must_use]
    pub fn claim_url(&self) -> Option<Url> {
        self.store.retrieve(KEY_CLAIM_URL).and_then(|raw| Url::parse(&raw).ok())
    }

    /// Delete all three entries. Individual delete failures are logged by
    /// the store; the vault treats the session as signed out regardless.
    pub fn clear(&self) {
        self.store.delete(KEY_API_KEY);
        self.store.delete(KEY_VERIFICATION_CODE);
        self.store.delete(KEY_CLAIM_URL);
        debug!("Credential cleared");
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the credential vault.
    use moltpass_common::{MemoryBackend, SecretBackend};

    use super::*;

    fn memory_vault() -> CredentialVault {
        CredentialVault::new(Arc::new(CredentialStore::new(vec![Box::new(
            MemoryBackend::new(),
        )])))
    }

    /// Backend that rejects writes to one key and serves the rest normally.
    struct KeyRejectingBackend {
        inner: MemoryBackend,
        rejected: &'static str,
    }

    impl KeyRejectingBackend {
        fn new(rejected: &'static str) -> Self {
            Self { inner: MemoryBackend::new(), rejected }
        }
    }

    impl SecretBackend for KeyRejectingBackend {
        fn name(&self) -> &'static str {
            "key-rejecting"
        }

        fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.rejected {
                return Err(StoreError::AccessFailed(format!("{key} rejected")));
            }
            self.inner.save(key, value)
        }

        fn retrieve(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.retrieve(key)
        }

        fn delete(&self, key: &str) -> Result<(), StoreError> {
            self.inner.delete(key)
        }
    }

    fn rejecting_vault(rejected: &'static str) -> CredentialVault {
        CredentialVault::new(Arc::new(CredentialStore::new(vec![Box::new(
            KeyRejectingBackend::new(rejected),
        )])))
    }

    #[test]
    fn roundtrips_a_full_credential() {
        let vault = memory_vault();
        let credential = Credential {
            api_key: "k1".to_string(),
            verification_code: "V1".to_string(),
            claim_url: Url::parse("https://moltbook.test/claim/1").ok(),
        };

        vault.store_credential(&credential).unwrap();
        assert_eq!(vault.api_key().as_deref(), Some("k1"));
        assert_eq!(vault.verification_code().as_deref(), Some("V1"));
        assert_eq!(vault.claim_url(), credential.claim_url);
    }

    #[test]
    fn clear_removes_everything() {
        let vault = memory_vault();
        vault
            .store_credential(&Credential {
                api_key: "k1".to_string(),
                verification_code: "V1".to_string(),
                claim_url: None,
            })
            .unwrap();

        vault.clear();
        assert_eq!(vault.api_key(), None);
        assert_eq!(vault.verification_code(), None);
        assert_eq!(vault.claim_url(), None);
    }

    #[test]
    fn claim_url_save_failure_does_not_fail_the_credential() {
        let vault = rejecting_vault("claim_url");

        vault
            .store_credential(&Credential {
                api_key: "k1".to_string(),
                verification_code: "V1".to_string(),
                claim_url: Url::parse("https://moltbook.test/claim/1").ok(),
            })
            .unwrap();

        assert_eq!(vault.api_key().as_deref(), Some("k1"));
        assert_eq!(vault.verification_code().as_deref(), Some("V1"));
        assert_eq!(vault.claim_url(), None);
    }

    #[test]
    fn verification_code_save_failure_rolls_back_the_api_key() {
        let vault = rejecting_vault("verification_code");

        let result = vault.store_credential(&Credential {
            api_key: "k1".to_string(),
            verification_code: "V1".to_string(),
            claim_url: None,
        });

        assert!(matches!(result, Err(StoreError::AccessFailed(_))));
        // No lone api_key left behind to corrupt the next status check
        assert_eq!(vault.api_key(), None);
        assert_eq!(vault.verification_code(), None);
    }

    #[test]
    fn unparsable_claim_url_reads_as_absent() {
        let vault = memory_vault();
        vault.store.save("claim_url", "not a url").unwrap();
        assert_eq!(vault.claim_url(), None);
    }
}
