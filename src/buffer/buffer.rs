//! Buffer: A grid of cells representing the terminal screen.
//!
//! Cells are stored contiguously in row-major order.

use super::cell::{Cell, Modifiers, Rgb};
use crate::layout::Rect;

/// Style applied by the text drawing helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// Plain style with the given colors.
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self { fg, bg, modifiers: Modifiers::empty() }
    }

    /// Add modifiers (builder pattern).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// A styled cell holding `ch`.
    pub fn cell(self, ch: char) -> Cell {
        Cell::new(ch)
            .with_fg(self.fg)
            .with_bg(self.bg)
            .with_modifiers(self.modifiers)
    }
}

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// Create a new buffer filled with empty cells.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        Self {
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// The underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at (x, y), or `None` out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y). Wide characters also write a continuation
    /// cell at (x + 1, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        let Some(idx) = self.index_of(x, y) else {
            return false;
        };
        self.cells[idx] = cell;
        if cell.width() == 2 {
            if let Some(next) = self.index_of(x + 1, y) {
                self.cells[next] = Cell::continuation().with_bg(cell.bg());
            }
        }
        true
    }

    /// Fill a rectangle with a cell, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let rect = rect.intersection(&self.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Draw `text` starting at (x, y), stopping at `max_x` (exclusive).
    ///
    /// Returns the number of columns used.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let limit = max_x.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let cell = style.cell(ch);
            let w = u16::from(cell.width());
            if col + w > limit {
                break;
            }
            self.set(col, y, cell);
            col += w;
        }
        col - x
    }

    /// Draw `text` horizontally centered inside `rect` on row `y`.
    pub fn draw_text_centered(&mut self, rect: Rect, y: u16, text: &str, style: Style) -> u16 {
        let width = text_width(text).min(rect.width);
        let x = rect.x + (rect.width - width) / 2;
        self.draw_text(x, y, text, style, rect.right())
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, preserving the top-left content.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }
        let mut cells = vec![Cell::EMPTY; usize::from(new_width) * usize::from(new_height)];
        let copy_width = usize::from(self.width.min(new_width));
        for y in 0..usize::from(self.height.min(new_height)) {
            let old = y * usize::from(self.width);
            let new = y * usize::from(new_width);
            cells[new..new + copy_width].copy_from_slice(&self.cells[old..old + copy_width]);
        }
        self.cells = cells;
        self.width = new_width;
        self.height = new_height;
    }

    /// Copy content from a buffer of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Characters of row `y` as a string, skipping continuation cells.
    ///
    /// Mostly useful for assertions.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.width);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .filter(|c| !c.is_continuation())
            .map(Cell::ch)
            .collect()
    }
}

/// Display width of `text` in columns.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(unicode_width::UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_buffer_zero_width() {
        Buffer::new(0, 24);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(!buffer.set(0, 24, Cell::new('X')));
    }

    #[test]
    fn test_wide_char_writes_continuation() {
        let mut buffer = Buffer::new(10, 1);
        buffer.set(2, 0, Cell::new('日'));
        assert!(buffer.get(3, 0).is_some_and(Cell::is_continuation));
        // The continuation cell is skipped, so the row still spans 10 columns.
        assert_eq!(buffer.row_text(0), format!("  日{}", " ".repeat(6)));
        assert_eq!(text_width(&buffer.row_text(0)), 10);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buffer = Buffer::new(10, 5);
        buffer.fill_rect(Rect::new(8, 3, 5, 5), Cell::new('#'));
        assert_eq!(buffer.row_text(3), "        ##");
        assert_eq!(buffer.row_text(4), "        ##");
        assert_eq!(buffer.row_text(2), "          ");
    }

    #[test]
    fn test_fill_rect_outside_is_noop() {
        let mut buffer = Buffer::new(4, 2);
        buffer.fill_rect(Rect::new(10, 10, 3, 3), Cell::new('#'));
        assert_eq!(buffer, Buffer::new(4, 2));
    }

    #[test]
    fn test_draw_text_truncates() {
        let mut buffer = Buffer::new(10, 1);
        let used = buffer.draw_text(0, 0, "Stopwatch!!", Style::default(), 6);
        assert_eq!(used, 6);
        assert_eq!(buffer.row_text(0), "Stopwa    ");
    }

    #[test]
    fn test_draw_text_centered() {
        let mut buffer = Buffer::new(10, 1);
        buffer.draw_text_centered(Rect::new(0, 0, 10, 1), 0, "ab", Style::default());
        assert_eq!(buffer.row_text(0), "    ab    ");
    }

    #[test]
    fn test_buffer_resize_preserves_content() {
        let mut buffer = Buffer::new(80, 24);
        buffer.set(5, 5, Cell::new('X'));

        buffer.resize(100, 30);
        assert_eq!(buffer.get(5, 5).map(Cell::ch), Some('X'));

        buffer.resize(10, 10);
        assert_eq!(buffer.get(5, 5).map(Cell::ch), Some('X'));
        assert!(buffer.get(15, 15).is_none());
    }

    #[test]
    fn test_clear() {
        let mut buffer = Buffer::new(4, 1);
        buffer.draw_text(0, 0, "abcd", Style::default(), 4);
        buffer.clear();
        assert_eq!(buffer.row_text(0), "    ");
    }
}
