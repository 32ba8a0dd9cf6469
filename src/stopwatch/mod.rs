//! Stopwatch core: elapsed-time bookkeeping and its command surface.
//!
//! - [`ElapsedTimeAccumulator`]: running total across start/stop cycles
//! - [`TimerControlSurface`]: Stopped/Running state machine over the accumulator
//! - [`format_elapsed`]: `HH:MM:SS.ss` rendering of a duration
//! - [`Clock`]: monotonic time source, swappable for tests

mod accumulator;
mod clock;
mod control;
mod format;

pub use accumulator::ElapsedTimeAccumulator;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use control::{Command, Outcome, RunningChanged, TimerControlSurface, TimerState};
pub use format::{format_duration, format_elapsed};
