//! # Stopwatch
//!
//! A terminal stopwatch with start, stop and reset controls.
//!
//! The crate splits into a pure core and a terminal host:
//!
//! - [`stopwatch`]: the elapsed-time accumulator, the Stopped/Running
//!   control surface and the `HH:MM:SS.ss` formatter. No I/O, no threads.
//! - [`app`]: the stopwatch screen, mapping input to commands and
//!   composing frames.
//! - [`buffer`], [`layout`], [`widget`], [`theme`]: the cell grid, geometry,
//!   components and palette the screen is drawn with.
//! - [`actor`]: input, render and ticker threads plus the terminal session.
//!
//! ## Example
//!
//! ```rust
//! use stopwatch::{ManualClock, TimerControlSurface, format_duration};
//!
//! let clock = ManualClock::new();
//! let mut timer = TimerControlSurface::with_clock(clock.clone());
//!
//! timer.start();
//! clock.advance_secs(3725.5);
//! timer.stop();
//!
//! assert_eq!(format_duration(timer.current_elapsed()), "01:02:05.50");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod layout;
pub mod actor;
pub mod widget;
pub mod stopwatch;
pub mod theme;
pub mod app;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, Modifiers, Rgb};
pub use layout::{Rect, StopwatchLayout};
pub use actor::{Engine, EngineConfig, InputEvent, KeyCode, KeyModifiers, RenderCommand, TickerActor};
pub use widget::{Button, ButtonVariant, StatusBar, TimeDisplay, Widget};
pub use stopwatch::{
    format_duration, format_elapsed, Clock, Command, ElapsedTimeAccumulator, ManualClock,
    MonotonicClock, Outcome, RunningChanged, TimerControlSurface, TimerState,
};
pub use theme::{Theme, ThemeName};
pub use app::{AppAction, AppConfig, StopwatchApp};
