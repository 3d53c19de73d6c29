//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`](crate::app::App) in headless mode and
//! provides methods to simulate user input (key presses, typed text,
//! mouse gestures, resize), compose frames, and read the composed
//! screen back as text for snapshot testing.

use crate::app::{App, AppConfig};
use crate::error::Result;
use crate::event::{
    InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent,
};
use crate::geometry::Region;
use crate::script::{RhaiEngine, ScriptBridge};
use crate::widgets::Label;

use super::snapshot::buffer_to_string;

/// A headless app driver for testing.
///
/// By default the pilot runs the real rhai engine so end-to-end
/// scenarios exercise actual script evaluation; a canned bridge can be
/// substituted with [`Pilot::with_script`].
///
/// # Examples
///
/// ```
/// use evalpad::testing::Pilot;
/// use evalpad::event::Key;
///
/// let mut pilot = Pilot::new(40, 10).unwrap();
/// pilot.add_default_labels().unwrap();
/// pilot.type_text("1+1");
/// pilot.press_key(Key::Enter);
/// pilot.frame().unwrap();
/// assert_eq!(pilot.app().result_text(), "2");
/// ```
pub struct Pilot {
    app: App,
}

impl Pilot {
    /// Create a headless app of the given size with a rhai bridge.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_script(width, height, Box::new(RhaiEngine::new()))
    }

    /// Create a headless app with a custom script bridge.
    pub fn with_script(width: i32, height: i32, script: Box<dyn ScriptBridge>) -> Result<Self> {
        let app = App::new_headless(width, height, AppConfig::default(), script)?;
        Ok(Self { app })
    }

    /// Install the standard input/result labels.
    ///
    /// Input on row 1, result on row 3, both one cell in from the left
    /// edge and spanning the remaining width.
    pub fn add_default_labels(&mut self) -> Result<()> {
        let tracker = self.app.tracker();
        let width = (self.app.size().width - 2).max(1);
        let input =
            Label::new("input", Region::new(1, 1, width, 1), "", "white", tracker.clone())?;
        let result = Label::new("result", Region::new(1, 3, width, 1), "", "green", tracker)?;
        self.app.set_input_label(input);
        self.app.set_result_label(result);
        Ok(())
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.app
            .handle_event(&InputEvent::Key(KeyEvent::new(key, Modifiers::NONE)));
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.app
            .handle_event(&InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Simulate typing each character of `text` as individual key presses.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    /// Simulate a left-button press at (x, y).
    pub fn press(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Down(MouseBtn::Left), x, y);
    }

    /// Simulate a left-button drag to (x, y).
    pub fn drag_to(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Drag(MouseBtn::Left), x, y);
    }

    /// Simulate a left-button release at (x, y).
    pub fn release(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Up(MouseBtn::Left), x, y);
    }

    /// Simulate a terminal resize.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.app.handle_event(&InputEvent::Resize { width, height });
    }

    /// Simulate a repaint request with the given batch counter.
    pub fn repaint(&mut self, remaining: u32) {
        self.app.handle_event(&InputEvent::Repaint { remaining });
    }

    fn mouse(&mut self, kind: MouseAction, x: i32, y: i32) {
        self.app.handle_event(&InputEvent::Mouse(MouseEvent {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }));
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Compose a frame into the back-buffer.
    pub fn frame(&mut self) -> Result<()> {
        self.app.compose_frame()
    }

    /// The composed back-buffer as plain text.
    pub fn screen(&self) -> String {
        buffer_to_string(self.app.back_buffer())
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying app immutably.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Borrow the underlying app mutably.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Whether the app is still running (has not quit).
    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pilot_types_into_input() {
        let mut pilot = Pilot::new(40, 10).unwrap();
        pilot.type_text("abc");
        assert_eq!(pilot.app().input_text(), "abc");
    }

    #[test]
    fn pilot_quit() {
        let mut pilot = Pilot::new(40, 10).unwrap();
        pilot.press_key_with(Key::Char('c'), Modifiers::CTRL);
        assert!(!pilot.is_running());
    }

    #[test]
    fn pilot_screen_shows_typed_text() {
        let mut pilot = Pilot::new(40, 10).unwrap();
        pilot.add_default_labels().unwrap();
        pilot.type_text("hi");
        pilot.frame().unwrap();
        assert!(pilot.screen().contains("hi"));
    }

    #[test]
    fn pilot_runs_real_scripts() {
        let mut pilot = Pilot::new(40, 10).unwrap();
        pilot.add_default_labels().unwrap();
        pilot.type_text("6 * 7");
        pilot.press_key(Key::Enter);
        assert_eq!(pilot.app().result_text(), "42");
    }
}
