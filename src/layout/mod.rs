//! Layout module: Pre-computed static regions for efficient rendering.
//!
//! Layouts are computed at startup, on terminal resize and when the
//! header/footer are toggled. Rendering just reads the stored rectangles.

mod rect;
mod stopwatch;

pub use rect::Rect;
pub use stopwatch::{StopwatchLayout, BUTTON_WIDTH, PANEL_HEIGHT, PANEL_WIDTH};
