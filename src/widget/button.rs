//! Button Widget: a clickable, focusable label.
//!
//! Three rows tall when there is room (top edge, label, bottom edge), one
//! row in compact layouts. A click inside the bounds, or Enter/Space while
//! focused, latches a press that the owner collects with
//! [`Button::take_pressed`].

use crate::actor::{InputEvent, KeyCode};
use crate::buffer::{Buffer, Modifiers, Rgb, Style};
use crate::layout::Rect;
use crate::theme::Theme;
use super::traits::Widget;

/// Color role of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Neutral.
    #[default]
    Default,
    /// Positive action (green).
    Success,
    /// Destructive or stopping action (red).
    Error,
}

/// A push button.
#[derive(Debug)]
pub struct Button {
    label: String,
    variant: ButtonVariant,
    bounds: Rect,
    /// `display: none`: not drawn, not clickable.
    visible: bool,
    /// Drawn dimmed, presses ignored.
    enabled: bool,
    focused: bool,
    pressed: bool,
    dirty: bool,
}

impl Button {
    /// Create a visible, enabled button.
    pub fn new(label: impl Into<String>, variant: ButtonVariant) -> Self {
        Self {
            label: label.into(),
            variant,
            bounds: Rect::ZERO,
            visible: true,
            enabled: true,
            focused: false,
            pressed: false,
            dirty: true,
        }
    }

    /// Button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Show or hide.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.dirty = true;
        }
    }

    /// Whether the button is drawn.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Enable or disable.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.dirty = true;
        }
    }

    /// Whether presses are accepted.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Give or take keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.dirty = true;
        }
    }

    /// Whether the button has keyboard focus.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the button can take focus or presses.
    pub const fn is_interactive(&self) -> bool {
        self.visible && self.enabled
    }

    /// Return and clear the press latch.
    pub fn take_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }

    fn colors(&self, theme: &Theme) -> (Rgb, Rgb) {
        let bg = match self.variant {
            ButtonVariant::Default => theme.button,
            ButtonVariant::Success => theme.success,
            ButtonVariant::Error => theme.error,
        };
        let fg = match self.variant {
            ButtonVariant::Default => theme.foreground,
            ButtonVariant::Success | ButtonVariant::Error => theme.background,
        };
        if self.enabled {
            (fg, bg)
        } else {
            (fg.blend(bg, 0.6), bg.blend(theme.surface, 0.5))
        }
    }
}

impl Widget for Button {
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
        let (fg, bg) = self.colors(theme);
        let face = Style::new(fg, bg);
        buffer.fill_rect(self.bounds, face.cell(' '));

        let label_y = self.bounds.y + self.bounds.height / 2;
        let mut label = face.with_modifiers(Modifiers::BOLD);
        if self.focused {
            label = label.with_modifiers(Modifiers::BOLD | Modifiers::UNDERLINE);
        }
        buffer.draw_text_centered(self.bounds, label_y, &self.label, label);

        // Bevel edges like a raised key.
        if self.bounds.height >= 3 {
            let top = if self.focused { theme.primary } else { bg.blend(Rgb::WHITE, 0.25) };
            let bottom = bg.blend(Rgb::BLACK, 0.35);
            for x in self.bounds.x..self.bounds.right() {
                buffer.set(x, self.bounds.y, Style::new(top, bg).cell('▔'));
                buffer.set(x, self.bounds.bottom() - 1, Style::new(bottom, bg).cell('▁'));
            }
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        if !self.is_interactive() {
            return false;
        }
        let hit = match event {
            InputEvent::MouseDown(m) => self.bounds.contains(m.x, m.y),
            InputEvent::Key { code: KeyCode::Enter | KeyCode::Char(' '), .. } => self.focused,
            _ => false,
        };
        if hit {
            self.pressed = true;
        }
        hit
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
