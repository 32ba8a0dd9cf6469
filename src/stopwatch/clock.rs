//! Clock: Monotonic time sources for the accumulator.
//!
//! The accumulator never calls `Instant::now()` directly. It reads time
//! through the [`Clock`] trait so tests can drive it with a
//! [`ManualClock`] and check elapsed values exactly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Sample the current instant. Successive samples never go backwards.
    fn now(&self) -> Instant;
}

/// The system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and hand
/// another to the stopwatch.
///
/// ```
/// use stopwatch::stopwatch::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let t0 = clock.now();
/// clock.advance(Duration::from_secs(5));
/// assert_eq!(clock.now() - t0, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a manual clock positioned at t = 0.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Move the clock forward by fractional seconds.
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    /// Jump to an absolute offset from t = 0.
    ///
    /// Targets earlier than the current position are ignored, the clock
    /// stays monotonic.
    pub fn set_secs(&self, secs: f64) {
        let target = Duration::from_secs_f64(secs);
        if target > self.offset.get() {
            self.offset.set(target);
        }
    }

    /// Time since t = 0.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let a = ManualClock::new();
        let b = a.clone();
        let start = b.now();

        a.advance(Duration::from_millis(250));
        assert_eq!(b.now() - start, Duration::from_millis(250));
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new();
        clock.set_secs(10.0);
        clock.set_secs(3.0);
        assert_eq!(clock.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn test_monotonic_clock_non_decreasing() {
        let clock = MonotonicClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
