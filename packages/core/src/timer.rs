//! Single-shot maximum-duration timer
//!
//! The timer is a deadline owned by the button and consulted by the host's
//! event loop. Clearing the deadline is the cancellation: once invalidated,
//! [`MaxDurationTimer::fire_if_due`] can never report it again.

use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct MaxDurationTimer {
    deadline: Option<Instant>,
}

impl MaxDurationTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer `duration` after `now`, replacing any pending deadline.
    ///
    /// Returns false and leaves the timer idle when the deadline does not fit
    /// in an `Instant`.
    pub fn schedule(&mut self, duration: Duration, now: Instant) -> bool {
        self.deadline = now.checked_add(duration);
        self.deadline.is_some()
    }

    /// Cancel the pending deadline. Safe to call when nothing is scheduled.
    pub fn invalidate(&mut self) {
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Clear the timer and return true if its deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
