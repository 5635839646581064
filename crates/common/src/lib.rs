//! # Moltpass Common
//!
//! Shared infrastructure for the Moltpass client core.
//!
//! This crate contains:
//! - Credential storage with capability-ranked backends (keychain first,
//!   degrading to a plain-file fallback, then memory)
//! - The transient error notification surface
//! - A cancellable scheduled-task primitive used by timers and poll loops
//!
//! ## Architecture
//! - No dependencies on other Moltpass crates
//! - All "impure" pieces here are local (timers, keychain, files) — no network

pub mod credentials;
pub mod notify;
pub mod schedule;

// Re-export commonly used items
pub use credentials::{
    CredentialStore, FileBackend, KeychainBackend, MemoryBackend, SecretBackend, StoreError,
};
pub use notify::{ErrorNotification, NotificationSurface};
pub use schedule::ScheduledTask;
