//! Shared vote counters and rollback snapshots

use std::sync::Arc;

use parking_lot::Mutex;

use moltpass_domain::{Post, VoteDirection};

#[derive(Debug, Clone, Copy)]
struct Counters {
    upvotes: i64,
    downvotes: i64,
}

/// Pre-mutation counter values, held for rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationSnapshot {
    upvotes: i64,
    downvotes: i64,
}

/// Vote counters shared between the view of an entity and the coordinator.
///
/// Cheap to clone; all clones observe the same counters. Upvotes and
/// downvotes are independent, an up vote never decrements downvotes.
#[derive(Debug, Clone)]
pub struct VoteState {
    counters: Arc<Mutex<Counters>>,
}

impl VoteState {
    #[must_use]
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self { counters: Arc::new(Mutex::new(Counters { upvotes, downvotes })) }
    }

    /// Seed from a post's authoritative counters.
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self::new(post.upvotes, post.downvotes)
    }

    #[must_use]
    pub fn upvotes(&self) -> i64 {
        self.counters.lock().upvotes
    }

    #[must_use]
    pub fn downvotes(&self) -> i64 {
        self.counters.lock().downvotes
    }

    /// Derived score: upvotes minus downvotes.
    #[must_use]
    pub fn score(&self) -> i64 {
        let counters = self.counters.lock();
        counters.upvotes - counters.downvotes
    }

    /// Capture the current counters for a later [`VoteState::restore`].
    #[must_use]
    pub fn snapshot(&self) -> MutationSnapshot {
        let counters = self.counters.lock();
        MutationSnapshot { upvotes: counters.upvotes, downvotes: counters.downvotes }
    }

    /// Apply the local delta for `direction`.
    pub fn apply(&self, direction: VoteDirection) {
        let mut counters = self.counters.lock();
        match direction {
            VoteDirection::Up => counters.upvotes += 1,
            VoteDirection::Down => counters.downvotes += 1,
        }
    }

    /// Roll back to a previously captured snapshot.
    pub fn restore(&self, snapshot: MutationSnapshot) {
        let mut counters = self.counters.lock();
        counters.upvotes = snapshot.upvotes;
        counters.downvotes = snapshot.downvotes;
    }
}
