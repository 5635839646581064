//! Mutation coordinator

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use moltpass_domain::VoteDirection;
use moltpass_infra::{ApiError, MoltbookClient};

use super::state::VoteState;
use super::VoteTarget;

/// Applies optimistic votes and rolls them back on remote failure.
///
/// One gate per target id; the gate map is retained for the coordinator's
/// lifetime (targets are bounded by what the user has on screen).
pub struct MutationCoordinator {
    api: Arc<MoltbookClient>,
    gates: DashMap<String, Arc<Mutex<()>>>,
}

impl MutationCoordinator {
    #[must_use]
    pub fn new(api: Arc<MoltbookClient>) -> Self {
        Self { api, gates: DashMap::new() }
    }

    /// Vote on `target`, updating `state` optimistically.
    ///
    /// The local delta is applied before the network call. On success the
    /// optimistic value stands until the next authoritative refresh; on
    /// failure the counters are restored from the pre-call snapshot and the
    /// error propagates to the caller.
    ///
    /// # Errors
    /// The classified API error from the vote call, after rollback.
    pub async fn apply_optimistic_vote(
        &self,
        target: &VoteTarget,
        state: &VoteState,
        direction: VoteDirection,
    ) -> Result<(), ApiError> {
        let gate = self.gate_for(target);
        let _serialized = gate.lock().await;

        let snapshot = state.snapshot();
        state.apply(direction);
        debug!(target = %target.gate_key(), direction = direction.delta(), "Optimistic vote applied");

        let result = match target {
            VoteTarget::Post(id) => self.api.vote_post(id, direction).await,
            VoteTarget::Comment(id) => self.api.vote_comment(id, direction).await,
        };

        if let Err(e) = result {
            warn!(target = %target.gate_key(), error = %e, "Vote rejected; rolling back");
            state.restore(snapshot);
            return Err(e);
        }

        Ok(())
    }

    fn gate_for(&self, target: &VoteTarget) -> Arc<Mutex<()>> {
        self.gates.entry(target.gate_key()).or_default().clone()
    }
}

impl std::fmt::Debug for MutationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationCoordinator").field("gates", &self.gates.len()).finish_non_exhaustive()
    }
}
