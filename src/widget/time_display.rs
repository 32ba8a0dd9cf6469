//! Time Display Widget: elapsed time in large box-drawing digits.
//!
//! The widget stores the formatted string rather than the duration. A
//! refresh that formats to the same text leaves it clean, so the renderer
//! only sees changes when a visible digit changes.

use crate::actor::InputEvent;
use crate::buffer::{text_width, Buffer, Modifiers, Style};
use crate::layout::Rect;
use crate::stopwatch::format_duration;
use crate::theme::Theme;
use super::traits::Widget;
use std::time::Duration;

/// Rows per large glyph.
pub const GLYPH_HEIGHT: u16 = 3;

/// Three-row glyph for `ch`, or `None` if there is no large form.
fn glyph(ch: char) -> Option<[&'static str; 3]> {
    Some(match ch {
        '0' => ["╭─╮", "│ │", "╰─╯"],
        '1' => ["╶╮ ", " │ ", "╶┴╴"],
        '2' => ["╶─╮", "┌─┘", "╰─╴"],
        '3' => ["╶─╮", " ─┤", "╶─╯"],
        '4' => ["╷ ╷", "╰─┤", "  ╵"],
        '5' => ["╭─╴", "╰─╮", "╶─╯"],
        '6' => ["╭─╴", "├─╮", "╰─╯"],
        '7' => ["╶─┐", "  │", "  ╵"],
        '8' => ["╭─╮", "├─┤", "╰─╯"],
        '9' => ["╭─╮", "╰─┤", "╶─╯"],
        ':' => [" ", "•", "•"],
        '.' => [" ", " ", "•"],
        ',' => [" ", " ", ","],
        _ => return None,
    })
}

/// Column width of `text` when drawn with large glyphs.
pub fn large_width(text: &str) -> Option<u16> {
    text.chars()
        .map(|c| glyph(c).map(|g| text_width(g[0])))
        .sum()
}

/// Displays the formatted elapsed time.
#[derive(Debug)]
pub struct TimeDisplay {
    text: String,
    /// Running styling (brighter digits on the success background).
    active: bool,
    bounds: Rect,
    dirty: bool,
}

impl TimeDisplay {
    /// Create a display showing zero.
    pub fn new() -> Self {
        Self {
            text: format_duration(Duration::ZERO),
            active: false,
            bounds: Rect::ZERO,
            dirty: true,
        }
    }

    /// Show `elapsed`. Returns `true` if the visible text changed.
    pub fn set_elapsed(&mut self, elapsed: Duration) -> bool {
        let text = format_duration(elapsed);
        if text == self.text {
            return false;
        }
        self.text = text;
        self.dirty = true;
        true
    }

    /// Switch running styling on or off.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.dirty = true;
        }
    }

    /// The text currently shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether running styling is on.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the current text fits as large digits.
    pub fn uses_large_digits(&self) -> bool {
        self.bounds.height >= GLYPH_HEIGHT
            && large_width(&self.text).is_some_and(|w| w <= self.bounds.width)
    }

    fn style(&self, theme: &Theme) -> Style {
        if self.active {
            Style::new(theme.foreground, theme.success_muted).with_modifiers(Modifiers::BOLD)
        } else {
            Style::new(theme.foreground_muted, theme.surface)
        }
    }
}

impl Default for TimeDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TimeDisplay {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer, theme: &Theme) {
        if self.bounds.is_empty() {
            return;
        }
        let style = self.style(theme);
        buffer.fill_rect(self.bounds, style.cell(' '));

        if !self.uses_large_digits() {
            let y = self.bounds.y + self.bounds.height / 2;
            buffer.draw_text_centered(self.bounds, y, &self.text, style);
            return;
        }

        let width = large_width(&self.text).unwrap_or(0);
        let mut x = self.bounds.x + (self.bounds.width - width) / 2;
        let y = self.bounds.y + (self.bounds.height - GLYPH_HEIGHT) / 2;
        for rows in self.text.chars().filter_map(glyph) {
            let mut advance = 0;
            for (dy, row) in (0..).zip(rows) {
                advance = buffer.draw_text(x, y + dy, row, style, self.bounds.right());
            }
            x += advance;
        }
    }

    fn handle_input(&mut self, _event: &InputEvent) -> bool {
        false
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_have_uniform_width() {
        for ch in "0123456789:.,".chars() {
            let rows = glyph(ch).unwrap();
            let w = text_width(rows[0]);
            assert!(rows.iter().all(|r| text_width(r) == w), "glyph {ch:?}");
        }
    }

    #[test]
    fn test_large_width() {
        assert_eq!(large_width("00:00:00.00"), Some(8 * 3 + 3));
        assert_eq!(large_width("1a"), None);
    }

    #[test]
    fn test_set_elapsed_only_dirty_on_visible_change() {
        let mut display = TimeDisplay::new();
        display.clear_redraw();

        assert!(!display.set_elapsed(Duration::from_millis(4)));
        assert!(!display.needs_redraw());

        assert!(display.set_elapsed(Duration::from_millis(3_725_500)));
        assert_eq!(display.text(), "01:02:05.50");
        assert!(display.needs_redraw());
    }

    #[test]
    fn test_large_digits_render() {
        let mut display = TimeDisplay::new();
        display.set_bounds(Rect::new(0, 0, 40, 3));
        assert!(display.uses_large_digits());

        let mut buffer = Buffer::new(40, 3);
        display.render(&mut buffer, &Theme::default());
        // 27 columns centered in 40: starts at column 6
        assert!(buffer.row_text(0).starts_with("      ╭─╮╭─╮ ╭─╮"));
        assert!(buffer.row_text(2).contains('•'));
    }

    #[test]
    fn test_small_area_falls_back_to_text() {
        let mut display = TimeDisplay::new();
        display.set_bounds(Rect::new(0, 0, 20, 1));
        assert!(!display.uses_large_digits());

        let mut buffer = Buffer::new(20, 1);
        display.render(&mut buffer, &Theme::default());
        assert_eq!(buffer.row_text(0).trim(), "00:00:00.00");
    }
}
