//! Pure debouncer
//!
//! Holds the latest pushed value and the instant it becomes ready. Time is
//! passed in, so the type has no timer of its own; the pipeline drives it
//! with `tokio::time::sleep_until(deadline)`.

use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debouncer
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Debouncer releasing after `quiet` without new pushes
    #[inline]
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replace the pending value and restart the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// When the pending value becomes ready, if any
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Take the pending value if its quiet period has elapsed
    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if *at <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Whether nothing is waiting
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Quiet period
    #[inline]
    #[must_use]
    pub fn quiet(&self) -> Duration {
        self.quiet
    }
}
