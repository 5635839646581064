//! Credential storage with capability-ranked backends
//!
//! The store holds small string secrets (API key, verification code, claim
//! URL) under logical keys. Backends are tried in capability order — platform
//! keychain first, then a plain-file fallback, then memory — and the first
//! backend that works becomes the active one for the rest of the run. The
//! chosen rank is in-memory state only; it is never persisted, so a run that
//! regains keychain access starts at the top again.
//!
//! Degradation preserves the contract: `save`/`retrieve`/`delete` behave the
//! same regardless of which backend ends up serving them.

mod backend;
mod file;
mod keychain;
mod memory;

use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

pub use backend::SecretBackend;
pub use file::FileBackend;
pub use keychain::KeychainBackend;
pub use memory::MemoryBackend;

/// Credential storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend access failed (permission denied, locked keychain, etc.)
    #[error("credential backend access failed: {0}")]
    AccessFailed(String),

    /// Fallback file could not be read or written
    #[error("credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Fallback file contents could not be parsed
    #[error("credential serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every configured backend rejected the operation
    #[error("no credential backend available")]
    NoBackendAvailable,
}

/// Capability-ranked secret store.
///
/// Owns an ordered list of [`SecretBackend`]s. Writes land in the
/// highest-ranked backend that accepts them; reads walk the chain from the
/// active backend down so values written before a degradation stay readable.
pub struct CredentialStore {
    backends: Vec<Box<dyn SecretBackend>>,
    active: AtomicUsize,
}

impl CredentialStore {
    /// Build a store over an explicit backend chain, ranked best-first.
    #[must_use]
    pub fn new(backends: Vec<Box<dyn SecretBackend>>) -> Self {
        Self { backends, active: AtomicUsize::new(0) }
    }

    /// The standard production chain: keychain, plain-file fallback, memory.
    ///
    /// `service` namespaces the keychain entries; `fallback_path` is where
    /// the file backend persists when the keychain is unavailable.
    #[must_use]
    pub fn with_default_backends(service: &str, fallback_path: std::path::PathBuf) -> Self {
        Self::new(vec![
            Box::new(KeychainBackend::new(service)),
            Box::new(FileBackend::new(fallback_path)),
            Box::new(MemoryBackend::new()),
        ])
    }

    /// Persist `value` under `key` in the best backend that will take it.
    ///
    /// # Errors
    /// Returns the last backend's error if every backend rejects the write.
    pub fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let start = self.active.load(Ordering::Acquire);
        let mut last_error = StoreError::NoBackendAvailable;

        for (rank, backend) in self.backends.iter().enumerate().skip(start) {
            match backend.save(key, value) {
                Ok(()) => {
                    self.record_rank(start, rank, backend.name());
                    debug!(backend = backend.name(), key = %key, "Credential saved");
                    return Ok(());
                }
                Err(e) => {
                    warn!(backend = backend.name(), key = %key, error = %e, "Backend rejected save");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Look up `key`, walking the chain from the active backend down.
    #[must_use]
    pub fn retrieve(&self, key: &str) -> Option<String> {
        let start = self.active.load(Ordering::Acquire);

        for (rank, backend) in self.backends.iter().enumerate().skip(start) {
            match backend.retrieve(key) {
                Ok(Some(value)) => {
                    self.record_rank(start, rank, backend.name());
                    return Some(value);
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(backend = backend.name(), key = %key, error = %e, "Backend retrieve failed");
                }
            }
        }
        None
    }

    /// Remove `key` from every backend that might hold it.
    ///
    /// Returns `true` when no backend reported an error (absence is not an
    /// error; deletes are idempotent).
    pub fn delete(&self, key: &str) -> bool {
        let mut clean = true;
        for backend in &self.backends {
            if let Err(e) = backend.delete(key) {
                debug!(backend = backend.name(), key = %key, error = %e, "Backend delete failed");
                clean = false;
            }
        }
        clean
    }

    /// Name of the backend currently serving operations (test/diagnostics).
    #[must_use]
    pub fn active_backend(&self) -> Option<&'static str> {
        self.backends.get(self.active.load(Ordering::Acquire)).map(|b| b.name())
    }

    fn record_rank(&self, previous: usize, rank: usize, name: &'static str) {
        if rank != previous {
            warn!(backend = name, "Credential store degraded to lower-ranked backend");
            self.active.store(rank, Ordering::Release);
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("backends", &self.backends.iter().map(|b| b.name()).collect::<Vec<_>>())
            .field("active", &self.active.load(Ordering::Acquire))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the credential store chain.
    use super::*;

    /// Backend that fails every operation, standing in for a locked keychain.
    struct RejectingBackend;

    impl SecretBackend for RejectingBackend {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::AccessFailed("backend locked".to_string()))
        }

        fn retrieve(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::AccessFailed("backend locked".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::AccessFailed("backend locked".to_string()))
        }
    }

    #[test]
    fn save_and_retrieve_roundtrip() {
        let store = CredentialStore::new(vec![Box::new(MemoryBackend::new())]);

        store.save("api_key", "k1").unwrap();
        assert_eq!(store.retrieve("api_key").as_deref(), Some("k1"));
        assert_eq!(store.retrieve("missing"), None);
    }

    #[test]
    fn degrades_past_failing_backend() {
        let store = CredentialStore::new(vec![
            Box::new(RejectingBackend),
            Box::new(MemoryBackend::new()),
        ]);
        assert_eq!(store.active_backend(), Some("rejecting"));

        store.save("api_key", "k1").unwrap();
        assert_eq!(store.active_backend(), Some("memory"));
        assert_eq!(store.retrieve("api_key").as_deref(), Some("k1"));
    }

    #[test]
    fn degradation_is_not_persisted_across_stores() {
        // A fresh store starts at the top of the chain again
        let first = CredentialStore::new(vec![
            Box::new(RejectingBackend),
            Box::new(MemoryBackend::new()),
        ]);
        first.save("k", "v").unwrap();
        assert_eq!(first.active_backend(), Some("memory"));

        let second = CredentialStore::new(vec![
            Box::new(RejectingBackend),
            Box::new(MemoryBackend::new()),
        ]);
        assert_eq!(second.active_backend(), Some("rejecting"));
    }

    #[test]
    fn all_backends_failing_surfaces_error() {
        let store = CredentialStore::new(vec![Box::new(RejectingBackend)]);
        let result = store.save("api_key", "k1");
        assert!(matches!(result, Err(StoreError::AccessFailed(_))));
    }

    #[test]
    fn delete_is_idempotent() {
        let store = CredentialStore::new(vec![Box::new(MemoryBackend::new())]);

        assert!(store.delete("absent"));
        store.save("api_key", "k1").unwrap();
        assert!(store.delete("api_key"));
        assert!(store.delete("api_key"));
        assert_eq!(store.retrieve("api_key"), None);
    }

    #[test]
    fn retrieve_walks_chain_on_miss() {
        // Value written directly to the lower rung is still found
        let memory = MemoryBackend::new();
        memory.save("api_key", "fallback-value").unwrap();

        let store =
            CredentialStore::new(vec![Box::new(MemoryBackend::new()), Box::new(memory)]);
        assert_eq!(store.retrieve("api_key").as_deref(), Some("fallback-value"));
    }
}
