//! Plain-file fallback backend
//!
//! Persists secrets as a single JSON object on disk. Less secure than the
//! keychain; only used when the keychain rung is unavailable. The file is
//! created lazily on first save.

use std::collections::BTreeMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use tracing::debug;

use super::backend::SecretBackend;
use super::StoreError;

/// File-backed secret storage.
pub struct FileBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl FileBackend {
    /// Create a backend persisting to `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path, guard: Mutex::new(()) }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(entries)?)?;
        Ok(())
    }
}

impl SecretBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _held = self.guard.lock();
        debug!(path = %self.path.display(), key = %key, "Storing secret in fallback file");

        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _held = self.guard.lock();
        Ok(self.load()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _held = self.guard.lock();

        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
