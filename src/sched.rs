//! One-shot deferred actions
//!
//! The launcher schedules work to run after a delay on the same cooperative
//! event loop that handles input (e.g. navigate away from the splash after
//! five seconds). Actions run on the loop thread, never in parallel.

use crate::Result;
use std::time::{Duration, Instant};

/// A deferred action run with mutable access to its owner
pub type Action<C> = Box<dyn FnOnce(&mut C) -> Result<()>>;

/// Holder of pending one-shot actions
///
/// Owned by the component whose lifecycle bounds the actions; clearing the
/// scheduler on teardown is how a late-firing action becomes a no-op.
pub struct Scheduler<C> {
    pending: Vec<(Instant, Action<C>)>,
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule a function to run after a delay
    pub fn schedule<F>(&mut self, delay: Duration, func: F)
    where
        F: FnOnce(&mut C) -> Result<()> + 'static,
    {
        let when = Instant::now() + delay;
        self.pending.push((when, Box::new(func)));
    }

    /// Remove and return all actions due at `now`
    ///
    /// Actions are detached before the caller runs them, so an action may
    /// freely schedule or clear without touching entries being executed.
    pub fn take_due(&mut self, now: Instant) -> Vec<Action<C>> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if now >= self.pending[i].0 {
                due.push(self.pending.remove(i).1);
            } else {
                i += 1;
            }
        }
        due
    }

    /// Drop all pending actions
    ///
    /// Called from teardown so nothing fires against a dead owner.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Get time until the next pending action
    ///
    /// Returns None if nothing is scheduled. Used to set the poll timeout.
    pub fn time_until_next(&self) -> Option<Duration> {
        if self.pending.is_empty() {
            return None;
        }

        let now = Instant::now();
        let next = self.pending.iter().map(|(when, _)| *when).min()?;

        Some(next.saturating_duration_since(now))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
