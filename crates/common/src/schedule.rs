//! Cancellable delayed actions
//!
//! A [`ScheduledTask`] parks a tokio task on a cancellation token until its
//! delay elapses. Cancelling (or dropping) the handle guarantees the action
//! never runs — there is no window in which a stale timer can still fire
//! after its owner moved on.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Handle to a delayed one-shot action.
///
/// The action runs at most once, after `delay`, unless the handle is
/// cancelled or dropped first.
#[derive(Debug)]
pub struct ScheduledTask {
    token: CancellationToken,
}

impl ScheduledTask {
    /// Schedule `action` to run after `delay` on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime (same contract as
    /// `tokio::spawn`).
    #[must_use]
    pub fn spawn_after<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let parked = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = parked.cancelled() => {}
                () = tokio::time::sleep(delay) => action(),
            }
        });
        Self { token }
    }

    /// Prevent the action from running. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether this task has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
