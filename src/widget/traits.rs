//! Widget trait: invalidation, buffered rendering, compositing, input.
//!
//! The `Widget` trait is the core abstraction for all visual elements.
//! Every widget has fixed bounds, owns an offscreen [`Buffer`] matching
//! those bounds, and tracks a needs-redraw flag. The compositor only
//! ever calls [`Widget::composite`], which regenerates the buffer
//! lazily and blits it into the target frame.

use std::any::Any;

use crate::event::InputEvent;
use crate::geometry::Region;
use crate::surface::Buffer;

/// Core trait implemented by all widgets.
///
/// Object-safe: widgets live in the compositor's ordered list as
/// `Box<dyn Widget>`. The `as_any` methods allow the compositor to
/// reach a concrete widget (the designated input/result labels)
/// without holding a second owning reference.
pub trait Widget {
    /// The widget's fixed bounds in window coordinates.
    ///
    /// Set at construction and never changed afterwards.
    fn region(&self) -> Region;

    /// Mark the offscreen buffer stale.
    ///
    /// Idempotent, no immediate side effect; the buffer is repainted
    /// on the next composite.
    fn invalidate(&mut self);

    /// Whether the offscreen buffer needs regeneration.
    fn needs_redraw(&self) -> bool;

    /// Repaint the offscreen buffer from current state.
    ///
    /// Called only while [`needs_redraw`](Widget::needs_redraw) is
    /// true; implementations clear the flag on completion. When the
    /// buffer cannot be (re)allocated the widget must leave itself
    /// bufferless rather than fail; one broken widget never takes
    /// the frame down.
    fn render_to_buffer(&mut self);

    /// The offscreen buffer, or `None` when allocation failed.
    fn buffer(&self) -> Option<&Buffer>;

    /// Offer an input event to the widget.
    ///
    /// Events are delivered in absolute window coordinates; widgets
    /// translate to local space and bounds-check before reacting, so
    /// fanning every event to every widget causes no cross-talk.
    fn handle_input(&mut self, event: &InputEvent);

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Blit this widget into `target` at its fixed position.
    ///
    /// Regenerates the offscreen buffer first if it is stale. A widget
    /// without a buffer skips its own paint; the composite proceeds
    /// for the others.
    fn composite(&mut self, target: &mut Buffer) {
        if self.needs_redraw() {
            self.render_to_buffer();
        }
        let region = self.region();
        if let Some(buffer) = self.buffer() {
            target.copy_from(buffer, region.x, region.y);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
