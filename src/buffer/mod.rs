//! Buffer module: Double-buffer rendering primitives.
//!
//! - [`Cell`]: one styled character
//! - [`Buffer`]: a grid of cells representing the terminal screen
//! - [`Rgb`]: true-color representation
//! - [`Modifiers`]: text style bitflags
//! - [`diff`]: minimal ANSI output from buffer changes

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, Modifiers, Rgb};
pub use buffer::{text_width, Buffer, Style};
