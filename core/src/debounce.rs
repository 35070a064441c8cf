//! Trailing-edge debouncer driven by caller-supplied time.
//!
//! A triggered value is held as pending until `interval` passes without
//! another trigger. Every trigger replaces the pending value and restarts
//! the timer, so only the last value in a burst is ever released.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replace any pending value and restart the timer from `now`.
    pub fn trigger(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.interval));
    }

    /// Release the pending value once `now` has reached its deadline.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// When the pending value becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
