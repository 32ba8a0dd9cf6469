//! Control surface: translates start/stop/reset commands into accumulator
//! transitions and reports when the running state changes.

use super::accumulator::ElapsedTimeAccumulator;
use super::clock::{Clock, MonotonicClock};
use std::time::Duration;

/// A discrete stopwatch command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Start or resume timing.
    Start,
    /// Pause timing.
    Stop,
    /// Zero the elapsed time.
    Reset,
}

/// Control surface state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Not timing. Initial state.
    #[default]
    Stopped,
    /// Timing.
    Running,
}

impl TimerState {
    /// Whether this is [`TimerState::Running`].
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Signal emitted on every state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningChanged {
    /// The running flag after the transition.
    pub running: bool,
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The state machine moved; the UI should restyle.
    Transition(RunningChanged),
    /// Elapsed time was zeroed while stopped.
    Cleared,
    /// Nothing happened (double start, double stop, reset while running).
    Ignored,
}

impl Outcome {
    /// The running-changed signal, if this outcome carries one.
    pub const fn signal(self) -> Option<RunningChanged> {
        match self {
            Self::Transition(signal) => Some(signal),
            Self::Cleared | Self::Ignored => None,
        }
    }

    /// Whether the displayed time may have changed.
    pub const fn changed_display(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Owns one accumulator and gates commands by state.
///
/// Reset is only accepted while stopped, as on a physical stopwatch.
#[derive(Debug, Clone)]
pub struct TimerControlSurface<C: Clock = MonotonicClock> {
    accumulator: ElapsedTimeAccumulator<C>,
    state: TimerState,
}

impl TimerControlSurface<MonotonicClock> {
    /// Create a stopped control surface on the system clock.
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for TimerControlSurface<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerControlSurface<C> {
    /// Create a stopped control surface reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            accumulator: ElapsedTimeAccumulator::with_clock(clock),
            state: TimerState::Stopped,
        }
    }

    /// Dispatch a command.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
        }
    }

    /// `Stopped -> Running`.
    pub fn start(&mut self) -> Outcome {
        if self.state.is_running() {
            return Outcome::Ignored;
        }
        self.accumulator.start();
        self.transition(TimerState::Running)
    }

    /// `Running -> Stopped`.
    pub fn stop(&mut self) -> Outcome {
        if !self.state.is_running() {
            return Outcome::Ignored;
        }
        self.accumulator.stop();
        self.transition(TimerState::Stopped)
    }

    /// Zero the elapsed time. Ignored while running.
    pub fn reset(&mut self) -> Outcome {
        if self.state.is_running() {
            log::debug!("reset ignored while running");
            return Outcome::Ignored;
        }
        self.accumulator.reset();
        log::info!("stopwatch reset");
        Outcome::Cleared
    }

    /// Whether `command` would do anything in the current state.
    pub const fn is_enabled(&self, command: Command) -> bool {
        match (command, self.state) {
            (Command::Start | Command::Reset, TimerState::Stopped)
            | (Command::Stop, TimerState::Running) => true,
            (Command::Start | Command::Reset, TimerState::Running)
            | (Command::Stop, TimerState::Stopped) => false,
        }
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Presentation flag for the host UI.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Total elapsed running time as of now.
    pub fn current_elapsed(&self) -> Duration {
        self.accumulator.current_elapsed()
    }

    /// Borrow the underlying accumulator.
    pub const fn accumulator(&self) -> &ElapsedTimeAccumulator<C> {
        &self.accumulator
    }

    fn transition(&mut self, to: TimerState) -> Outcome {
        self.state = to;
        let running = to.is_running();
        log::info!(
            "stopwatch {} at {:?}",
            if running { "started" } else { "stopped" },
            self.accumulator.current_elapsed()
        );
        Outcome::Transition(RunningChanged { running })
    }
}
