//! Actor Model: Message-passing concurrency for the terminal session.
//!
//! - **Input Actor**: Polls terminal events, forwards to main loop
//! - **Render Actor**: Receives frames, diffs and flushes
//! - **Ticker Actor**: Paces display refreshes while the stopwatch runs
//! - **Main Loop**: Owns the stopwatch, selects over input and ticks
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ──────────────────▶ │              │
//! └──────────────┘                     │              │
//! ┌──────────────┐        Tick         │  Main Loop   │
//! │Ticker Thread │ ──────────────────▶ │              │
//! └──────────────┘                     │              │
//! ┌──────────────┐    RenderCommand    │              │
//! │Render Thread │ ◀────────────────── │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod messages;
mod input;
mod renderer;
mod ticker;
mod engine;

pub use messages::{InputEvent, RenderCommand, KeyCode, KeyModifiers, MouseEvent};
pub use input::{convert_event, InputActor};
pub use renderer::{Renderer, RendererActor, RenderStats};
pub use ticker::{Tick, TickerActor};
pub use engine::{Engine, EngineConfig};
