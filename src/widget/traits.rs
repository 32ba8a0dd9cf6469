//! Widget trait shared by every on-screen component.

use crate::actor::InputEvent;
use crate::buffer::Buffer;
use crate::layout::Rect;
use crate::theme::Theme;

/// A UI component that can be rendered to a buffer and handle input.
pub trait Widget {
    /// Current bounds.
    fn bounds(&self) -> Rect;

    /// Move or resize the widget (terminal resize, chrome toggle).
    fn set_bounds(&mut self, bounds: Rect);

    /// Draw into `buffer`, staying within bounds.
    fn render(&self, buffer: &mut Buffer, theme: &Theme);

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed by this widget,
    /// `false` if it should propagate to other widgets.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Whether the widget changed since the last frame.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after rendering.
    fn clear_redraw(&mut self);
}
