//! # Change Scheduler
//!
//! Trailing-edge debounce of buffer change notifications. Every
//! notification pushes the deadline out to `now + quiet_interval`; the
//! trigger fires once the deadline passes without another notification.
//!
//! The scheduler never reads the clock on its own in the `_at` methods, so
//! drivers (an async timer loop, a UI frame callback, tests) supply the time.

use std::time::{Duration, Instant};
use tracing::debug;

/// Quiet interval used when none is configured
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(250);

/// A due recompute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Buffer named by the last notification of the burst
    pub buffer_id: String,

    /// Number of notifications coalesced into this trigger
    pub notifications: usize,
}

#[derive(Debug)]
struct Pending {
    buffer_id: String,
    deadline: Instant,
    notifications: usize,
}

/// Debounces change notifications into single recompute triggers
#[derive(Debug)]
pub struct ChangeScheduler {
    quiet_interval: Duration,

    /// At most one pending trigger
    pending: Option<Pending>,
}

impl Default for ChangeScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_INTERVAL)
    }
}

impl ChangeScheduler {
    pub fn new(quiet_interval: Duration) -> Self {
        Self {
            quiet_interval,
            pending: None,
        }
    }

    pub fn quiet_interval(&self) -> Duration {
        self.quiet_interval
    }

    /// Record a change at `now`, replacing any pending trigger
    pub fn notify_at(&mut self, buffer_id: &str, now: Instant) {
        let notifications = self.pending.as_ref().map_or(0, |p| p.notifications) + 1;
        let deadline = now + self.quiet_interval;

        debug!(buffer_id, notifications, "Rescheduling recompute");
        self.pending = Some(Pending {
            buffer_id: buffer_id.to_string(),
            deadline,
            notifications,
        });
    }

    pub fn notify(&mut self, buffer_id: &str) {
        self.notify_at(buffer_id, Instant::now())
    }

    /// When the pending trigger is due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending trigger if it is due at `now`
    pub fn poll_at(&mut self, now: Instant) -> Option<Trigger> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {}
            _ => return None,
        }

        self.pending.take().map(|p| Trigger {
            buffer_id: p.buffer_id,
            notifications: p.notifications,
        })
    }

    pub fn poll(&mut self) -> Option<Trigger> {
        self.poll_at(Instant::now())
    }

    /// Discard the pending trigger without firing it
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
