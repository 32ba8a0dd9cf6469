//! Elapsed-time accumulator with pause/resume semantics.

use super::clock::{Clock, MonotonicClock};
use std::time::{Duration, Instant};

/// Tracks cumulative running time across start/stop cycles.
///
/// `current_elapsed() == accumulated + (now - start_reference)` while running,
/// and `accumulated` alone while stopped. Every operation is total.
#[derive(Debug, Clone)]
pub struct ElapsedTimeAccumulator<C: Clock = MonotonicClock> {
    /// Time source.
    clock: C,
    /// Sampled on every stopped -> running transition.
    start_reference: Instant,
    /// Sum of all completed running intervals.
    accumulated: Duration,
    /// True between `start` and the next `stop`.
    running: bool,
}

impl ElapsedTimeAccumulator<MonotonicClock> {
    /// Create a stopped accumulator backed by the system monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for ElapsedTimeAccumulator<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ElapsedTimeAccumulator<C> {
    /// Create a stopped accumulator reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        let start_reference = clock.now();
        Self {
            clock,
            start_reference,
            accumulated: Duration::ZERO,
            running: false,
        }
    }

    /// Start (or resume) accumulating. No-op while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.start_reference = self.clock.now();
        self.running = true;
    }

    /// Fold the current interval into the total and stop. No-op while stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.accumulated += self.interval();
        self.running = false;
    }

    /// Zero the total.
    ///
    /// While running the start reference is re-armed, so the timer keeps
    /// going from zero instead of jumping back to the old interval.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        if self.running {
            self.start_reference = self.clock.now();
        }
    }

    /// Total elapsed running time as of now.
    pub fn current_elapsed(&self) -> Duration {
        if self.running {
            self.accumulated + self.interval()
        } else {
            self.accumulated
        }
    }

    /// Whether an interval is currently open.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Sum of completed intervals, excluding the open one.
    #[inline]
    pub const fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Borrow the time source.
    #[inline]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Length of the open interval.
    fn interval(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start_reference)
    }
}
