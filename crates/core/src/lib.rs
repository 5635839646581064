//! # Moltpass Core
//!
//! Session and mutation logic for the Moltpass client.
//!
//! This crate contains:
//! - The session controller: registration, claim-status checks, the
//!   claim-verification poll loop, and sign-out over a four-state session
//!   machine
//! - The mutation coordinator: optimistic vote application with snapshot
//!   rollback and per-target serialization
//! - The application context wiring these together with the gateway and
//!   notification surface
//!
//! ## Architecture
//! - Depends on `moltpass-infra` for the API gateway and `moltpass-common`
//!   for credential storage and notifications
//! - Session state lives behind an async `RwLock`, mutated only by
//!   controller methods

pub mod context;
pub mod mutation;
pub mod session;

// Re-export commonly used items
pub use context::AppContext;
pub use mutation::{MutationCoordinator, MutationSnapshot, VoteState, VoteTarget};
pub use session::{Credential, Session, SessionController, SessionError};
