//! Optimistic mutation coordination
//!
//! Votes apply locally before the network round-trip and roll back from a
//! snapshot when the remote call fails. Mutations against the same target
//! are serialized through a per-target async gate so a second vote never
//! observes (or rolls back over) a partially applied first one.

mod coordinator;
mod state;

pub use coordinator::MutationCoordinator;
pub use state::{MutationSnapshot, VoteState};

/// A votable entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    Post(String),
    Comment(String),
}

impl VoteTarget {
    /// Identifier of the underlying entity.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Post(id) | Self::Comment(id) => id,
        }
    }

    /// Key for the per-target serialization gate. Posts and comments live
    /// in separate namespaces even if ids collide.
    #[must_use]
    pub fn gate_key(&self) -> String {
        match self {
            Self::Post(id) => format!("post:{id}"),
            Self::Comment(id) => format!("comment:{id}"),
        }
    }
}
