//! Status Bar Widget: one-row header/footer chrome.
//!
//! The header shows the title and the running state; the footer lists key
//! bindings. Both hide and show together, so a hidden bar draws nothing.

use crate::actor::InputEvent;
use crate::buffer::{text_width, Buffer, Modifiers, Style};
use crate::layout::Rect;
use crate::theme::Theme;
use super::traits::Widget;

/// A one-row bar with left, center and right sections plus key hints.
#[derive(Debug)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    /// `(key, description)` pairs drawn after the left section.
    hints: Vec<(String, String)>,
    visible: bool,
    bounds: Rect,
    dirty: bool,
}

impl StatusBar {
    /// Create a visible, empty status bar.
    pub const fn new(bounds: Rect) -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            hints: Vec::new(),
            visible: true,
            bounds,
            dirty: true,
        }
    }

    /// Set the left section content.
    pub fn set_left(&mut self, text: impl Into<String>) {
        self.update(|bar| &mut bar.left, text.into());
    }

    /// Set the center section content.
    pub fn set_center(&mut self, text: impl Into<String>) {
        self.update(|bar| &mut bar.center, text.into());
    }

    /// Set the right section content.
    pub fn set_right(&mut self, text: impl Into<String>) {
        self.update(|bar| &mut bar.right, text.into());
    }

    /// Replace the key hints.
    pub fn set_hints<K, D>(&mut self, hints: impl IntoIterator<Item = (K, D)>)
    where
        K: Into<String>,
        D: Into<String>,
    {
        self.hints = hints.into_iter().map(|(k, d)| (k.into(), d.into())).collect();
        self.dirty = true;
    }

    /// Show or hide the bar.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.dirty = true;
        }
    }

    /// Whether the bar is shown.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Left section content.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Center section content.
    pub fn center(&self) -> &str {
        &self.center
    }

    /// Right section content.
    pub fn right(&self) -> &str {
        &self.right
    }

    fn update(&mut self, field: impl FnOnce(&mut Self) -> &mut String, text: String) {
        let slot = field(self);
        if *slot != text {
            *slot = text;
            self.dirty = true;
        }
    }
}

impl Widget for StatusBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer, theme: &Theme) {
        if !self.visible || self.bounds.is_empty() {
            return;
        }
        let Rect { x, y, .. } = self.bounds;
        let end = self.bounds.right();
        let base = Style::new(theme.foreground, theme.panel);

        buffer.fill_rect(self.bounds, base.cell(' '));

        // Left: text, then key hints.
        let mut col = x + 1;
        col += buffer.draw_text(col, y, &self.left, base.with_modifiers(Modifiers::BOLD), end);
        if !self.left.is_empty() && !self.hints.is_empty() {
            col += 2;
        }
        let key_style = Style::new(theme.primary, theme.panel).with_modifiers(Modifiers::BOLD);
        let desc_style = Style::new(theme.foreground_muted, theme.panel);
        for (key, desc) in &self.hints {
            if col >= end {
                break;
            }
            col += buffer.draw_text(col, y, key, key_style, end);
            col += buffer.draw_text(col + 1, y, desc, desc_style, end) + 1;
            col += 2;
        }

        // Center, unless it would collide with the left content.
        let center_w = text_width(&self.center);
        let center_x = x + self.bounds.width.saturating_sub(center_w) / 2;
        if !self.center.is_empty() && center_x >= col {
            buffer.draw_text(center_x, y, &self.center, base, end);
        }

        // Right-aligned, one column of padding.
        let right_w = text_width(&self.right);
        if !self.right.is_empty() && right_w + 1 < self.bounds.width {
            let right_x = end - right_w - 1;
            buffer.draw_text(right_x, y, &self.right, Style::new(theme.foreground_muted, theme.panel), end);
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
