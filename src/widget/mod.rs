//! Widgets: the stopwatch screen's components.
//!
//! Each widget owns its bounds and a dirty flag, renders into a
//! [`Buffer`](crate::buffer::Buffer) with a [`Theme`](crate::theme::Theme),
//! and may consume input events.
//!
//! - [`TimeDisplay`]: elapsed time in large digits
//! - [`Button`]: Start, Stop and Reset
//! - [`StatusBar`]: header and footer chrome

mod traits;
mod status_bar;
mod button;
mod time_display;

pub use traits::Widget;
pub use status_bar::StatusBar;
pub use button::{Button, ButtonVariant};
pub use time_display::{large_width, TimeDisplay, GLYPH_HEIGHT};
