//! Transient error notification surface
//!
//! Holds a single user-visible error message with automatic timed dismissal.
//! A newer message always replaces an older one and restarts the dismissal
//! timer; a stale timer firing after a newer `show` is a no-op (each shown
//! message bumps a generation counter that the timer re-checks).

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::schedule::ScheduledTask;

/// How long a notification stays visible before auto-dismissal.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(4);

/// A transient, user-visible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotification {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    current: Option<ErrorNotification>,
    timer: Option<ScheduledTask>,
    generation: u64,
}

struct Inner {
    dismiss_after: Duration,
    state: Mutex<State>,
}

/// Single-slot notification holder with timed dismissal.
///
/// Cheap to clone; all clones share the same slot.
#[derive(Clone)]
pub struct NotificationSurface {
    inner: Arc<Inner>,
}

impl NotificationSurface {
    /// Create a surface with the default 4-second dismissal window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dismiss_after(DEFAULT_DISMISS_AFTER)
    }

    /// Create a surface with a custom dismissal window.
    #[must_use]
    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self { inner: Arc::new(Inner { dismiss_after, state: Mutex::new(State::default()) }) }
    }

    /// Show a message, cancelling any pending dismissal of an earlier one.
    ///
    /// Must be called from within a tokio runtime (the dismissal timer is a
    /// spawned task).
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(message = %message, "Showing transient notification");

        let ttl = chrono::Duration::from_std(self.inner.dismiss_after)
            .unwrap_or_else(|_| chrono::Duration::seconds(i64::MAX / 1_000));
        let expires_at =
            Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut state = self.inner.state.lock();
        state.generation += 1;
        let generation = state.generation;
        // Dropping the old handle cancels its timer
        state.timer = None;
        state.current = Some(ErrorNotification { message, expires_at });

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        state.timer = Some(ScheduledTask::spawn_after(self.inner.dismiss_after, move || {
            if let Some(inner) = weak.upgrade() {
                let mut state = inner.state.lock();
                if state.generation == generation {
                    state.current = None;
                    state.timer = None;
                }
            }
        }));
    }

    /// Dismiss the current message immediately.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        state.timer = None;
        state.current = None;
    }

    /// The currently visible notification, if any.
    #[must_use]
    pub fn current(&self) -> Option<ErrorNotification> {
        self.inner.state.lock().current.clone()
    }

    /// Convenience accessor for the visible message text.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.inner.state.lock().current.as_ref().map(|n| n.message.clone())
    }
}

impl Default for NotificationSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSurface")
            .field("dismiss_after", &self.inner.dismiss_after)
            .finish_non_exhaustive()
    }
}
