//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! Compares the buffer currently on screen with the next frame and emits
//! escape sequences for the changed cells only. Cursor position and SGR
//! state are tracked so adjacent cells and repeated colors cost nothing.
//! The stopwatch repaints ~60 times a second while running but only the
//! digits change, so most frames are a handful of bytes.

use super::{Buffer, Cell, Modifiers, Rgb};
use std::io::Write;

/// Terminal state as last emitted.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl DiffState {
    /// State with nothing known about the terminal.
    pub const fn new() -> Self {
        Self { cursor: None, fg: None, bg: None, modifiers: None }
    }

    /// Forget everything (after a clear or raw write).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Counters from one diff pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Cells that differed.
    pub cells_changed: usize,
    /// Cursor move sequences emitted.
    pub cursor_moves: usize,
    /// SGR sequences emitted (colors and modifiers).
    pub style_changes: usize,
}

/// Emit the ANSI needed to turn `current` into `next`.
pub fn render_diff(current: &Buffer, next: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let width = usize::from(next.width());

    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new || new.is_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);

        result.cells_changed += 1;
        if state.cursor != Some((x, y)) {
            emit_cursor_move(output, x, y);
            result.cursor_moves += 1;
        }
        result.style_changes += emit_style(output, new, state);
        emit_char(output, new);
        state.cursor = Some((x + u16::from(new.width()), y));
    }

    result
}

/// Repaint every cell, ignoring what is on screen.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) {
    state.reset();
    output.extend_from_slice(b"\x1b[0m\x1b[2J");

    for y in 0..buffer.height() {
        emit_cursor_move(output, 0, y);
        for x in 0..buffer.width() {
            let Some(cell) = buffer.get(x, y) else { continue };
            if cell.is_continuation() {
                continue;
            }
            emit_style(output, cell, state);
            emit_char(output, cell);
        }
    }
    // Line wrap behaviour at the last column varies by terminal.
    state.cursor = None;
}

/// Emit a cursor move sequence (ANSI is 1-indexed).
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let row = y + 1;
    let col = x + 1;
    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Bring the terminal's SGR state in line with `cell`, returning the number
/// of sequences written.
fn emit_style(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState) -> usize {
    let mut emitted = 0;
    let mods = cell.modifiers();

    // Turning a modifier off needs a full reset, which also drops colors.
    let current = state.modifiers.unwrap_or_else(Modifiers::empty);
    if !current.difference(mods).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
        emitted += 1;
    }

    if state.fg != Some(cell.fg()) {
        let c = cell.fg();
        let _ = write!(output, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
        state.fg = Some(c);
        emitted += 1;
    }
    if state.bg != Some(cell.bg()) {
        let c = cell.bg();
        let _ = write!(output, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b);
        state.bg = Some(c);
        emitted += 1;
    }
    if state.modifiers != Some(mods) {
        let added = mods.difference(state.modifiers.unwrap_or_else(Modifiers::empty));
        emit_modifier_set(output, added);
        state.modifiers = Some(mods);
        emitted += 1;
    }

    emitted
}

fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    for (flag, code) in [
        (Modifiers::BOLD, b'1'),
        (Modifiers::DIM, b'2'),
        (Modifiers::ITALIC, b'3'),
        (Modifiers::UNDERLINE, b'4'),
        (Modifiers::REVERSED, b'7'),
    ] {
        if modifiers.contains(flag) {
            output.extend_from_slice(&[0x1b, b'[', code, b'm']);
        }
    }
}

#[inline]
fn emit_char(output: &mut Vec<u8>, cell: &Cell) {
    let mut utf8 = [0u8; 4];
    output.extend_from_slice(cell.ch().encode_utf8(&mut utf8).as_bytes());
}
