//! Message types for actor communication.

use crate::buffer::Buffer;

/// Key codes for keyboard input.
///
/// The subset of crossterm's `KeyCode` that the stopwatch binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Only Control held.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// Mouse event details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Left mouse button pressed.
    MouseDown(MouseEvent),

    /// Left mouse button released.
    MouseUp(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// A key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key { code, modifiers: KeyModifiers::NONE }
    }

    /// A left click at (x, y).
    pub const fn click(x: u16, y: u16) -> Self {
        Self::MouseDown(MouseEvent { x, y })
    }
}

/// Commands sent to the render thread.
#[derive(Debug)]
pub enum RenderCommand {
    /// Repaint the whole screen from this frame.
    FullRedraw(Box<Buffer>),

    /// Diff this frame against the screen.
    Update(Box<Buffer>),

    /// Resize the buffers.
    Resize {
        /// New width.
        width: u16,
        /// New height.
        height: u16,
    },

    /// Shutdown the render thread.
    Shutdown,
}
