//! Platform keychain backend
//!
//! Thin wrapper over the platform keychain (macOS Keychain, Windows
//! Credential Manager, Linux Secret Service) via the `keyring` crate.

use keyring::Entry;
use tracing::debug;

use super::backend::SecretBackend;
use super::StoreError;

/// Keychain-backed secret storage, namespaced by service name.
pub struct KeychainBackend {
    service_name: String,
}

impl KeychainBackend {
    /// Create a backend for a specific service namespace
    /// (e.g. `"Moltpass"`).
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Entry::new(&self.service_name, key).map_err(|e| {
            StoreError::AccessFailed(format!("failed to create keychain entry: {e}"))
        })
    }
}

impl SecretBackend for KeychainBackend {
    fn name(&self) -> &'static str {
        "keychain"
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        self.entry(key)?.set_password(value).map_err(|e| {
            StoreError::AccessFailed(format!("failed to store secret for {key}: {e}"))
        })
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::AccessFailed(format!(
                "failed to retrieve secret for {key}: {e}"
            ))),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::AccessFailed(format!(
                "failed to delete secret for {key}: {e}"
            ))),
        }
    }
}
