//! Secret backend contract

use super::StoreError;

/// A single rung in the credential store's capability chain.
///
/// Implementations must treat `delete` of an absent key as success, and
/// `retrieve` of an absent key as `Ok(None)` — only real access failures are
/// errors, so the chain can tell "not here" from "cannot look".
pub trait SecretBackend: Send + Sync {
    /// Short stable name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Persist `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend cannot take the write.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Look up `key`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend cannot be consulted at all.
    fn retrieve(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove `key` if present.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend failed to perform the delete.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
