//! Stopwatch screen layout.
//!
//! ```text
//! ┌──────────────────────── header (optional) ───────────────────────┐
//! │                                                                  │
//! │        ┌──────────────────── panel ────────────────────┐         │
//! │        │                  time display                 │         │
//! │        │                                               │         │
//! │        │ [ Start/Stop ]                     [ Reset ]  │         │
//! │        └───────────────────────────────────────────────┘         │
//! │                                                                  │
//! └──────────────────────── footer (optional) ───────────────────────┘
//! ```
//!
//! Computed once per resize or chrome toggle; rendering just reads rects.

use super::rect::Rect;

/// Preferred panel width.
pub const PANEL_WIDTH: u16 = 60;
/// Panel height with 3-row digits and 3-row buttons.
pub const PANEL_HEIGHT: u16 = 9;
/// Preferred button width.
pub const BUTTON_WIDTH: u16 = 16;

/// Pre-computed rectangles for one frame geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopwatchLayout {
    /// Header row, when chrome is visible.
    pub header: Option<Rect>,
    /// Footer row, when chrome is visible.
    pub footer: Option<Rect>,
    /// Area between header and footer.
    pub body: Rect,
    /// The stopwatch panel, centered in the body.
    pub panel: Rect,
    /// Elapsed-time display.
    pub display: Rect,
    /// Start and Stop share this slot; only one is visible at a time.
    pub toggle_button: Rect,
    /// Reset button.
    pub reset_button: Rect,
    /// True when the terminal is too short for 3-row digits and buttons.
    pub compact: bool,
}

impl StopwatchLayout {
    /// Lay out a `width` x `height` screen.
    pub fn compute(width: u16, height: u16, chrome_visible: bool) -> Self {
        let screen = Rect::from_size(width, height);

        let (header, footer, body) = if chrome_visible && height >= 3 {
            let header = screen.top(1);
            let footer = screen.bottom_rows(1);
            let body = Rect::new(0, 1, width, height - 2);
            (Some(header), Some(footer), body)
        } else {
            (None, None, screen)
        };

        let compact = body.height < PANEL_HEIGHT;
        let panel_height = if compact { body.height.min(5) } else { PANEL_HEIGHT };
        let panel_width = PANEL_WIDTH.min(body.width.saturating_sub(2).max(body.width.min(20)));
        let panel = body.centered(panel_width, panel_height);

        let inner = if compact { panel.inset(1, u16::from(panel.height >= 5)) } else { panel.inset(2, 1) };
        let (digits_h, button_h) = if compact { (1, 1) } else { (3, 3) };

        let display = inner.top(digits_h);
        let buttons = inner.bottom_rows(button_h);
        let button_w = BUTTON_WIDTH.min(inner.width.saturating_sub(1) / 2);
        let toggle_button = Rect::new(buttons.x, buttons.y, button_w, buttons.height);
        let reset_button = Rect::new(buttons.right().saturating_sub(button_w), buttons.y, button_w, buttons.height);

        Self {
            header,
            footer,
            body,
            panel,
            display,
            toggle_button,
            reset_button,
            compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_terminal_without_chrome() {
        let layout = StopwatchLayout::compute(80, 24, false);

        assert!(layout.header.is_none());
        assert!(layout.footer.is_none());
        assert!(!layout.compact);
        assert_eq!(layout.panel, Rect::new(10, 7, 60, 9));
        assert_eq!(layout.display, Rect::new(12, 8, 56, 3));
        assert_eq!(layout.toggle_button, Rect::new(12, 12, 16, 3));
        assert_eq!(layout.reset_button, Rect::new(52, 12, 16, 3));
    }

    #[test]
    fn test_chrome_reserves_rows() {
        let layout = StopwatchLayout::compute(80, 24, true);

        assert_eq!(layout.header, Some(Rect::new(0, 0, 80, 1)));
        assert_eq!(layout.footer, Some(Rect::new(0, 23, 80, 1)));
        assert_eq!(layout.body, Rect::new(0, 1, 80, 22));
        assert!(layout.panel.y >= 1 && layout.panel.bottom() <= 23);
    }

    #[test]
    fn test_buttons_do_not_overlap_on_narrow_screens() {
        let layout = StopwatchLayout::compute(24, 24, false);
        assert!(layout.toggle_button.right() <= layout.reset_button.x);
        assert!(layout.panel.right() <= 24);
    }

    #[test]
    fn test_short_terminal_goes_compact() {
        let layout = StopwatchLayout::compute(80, 6, false);
        assert!(layout.compact);
        assert_eq!(layout.display.height, 1);
        assert_eq!(layout.toggle_button.height, 1);
        assert!(layout.display.y < layout.toggle_button.y);
    }
}
