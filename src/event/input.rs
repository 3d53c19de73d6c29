//! Input event types wrapping crossterm for decoupling.
//!
//! Defines [`InputEvent`], [`KeyEvent`], [`MouseEvent`] and supporting
//! types. Crossterm events are converted via `From` impls so the rest
//! of the crate never depends on crossterm's event types directly.
//!
//! Terminal focus-gained maps to [`InputEvent::Repaint`] with a
//! remaining count of zero, the closest analog of a windowing
//! system's expose notification.

use std::ops::{BitAnd, BitOr};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    F(u8),
    /// Any key this crate has no use for.
    Unknown,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// The character this event would append to a text buffer, if any.
    ///
    /// Control sequences (Ctrl/Alt chords, control chars) yield `None`;
    /// Shift is fine; uppercase letters arrive as shifted chars.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            Key::Char(c)
                if !c.is_control()
                    && !self.modifiers.contains(Modifiers::CTRL)
                    && !self.modifiers.contains(Modifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MouseBtn / MouseAction / MouseEvent
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
}

/// A mouse event with action and absolute cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event delivered by the windowing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: i32, height: i32 },
    /// Repaint request. `remaining` counts further requests still in
    /// the same batch; only a count of zero should trigger a paint.
    Repaint { remaining: u32 },
    Paste(String),
    Other,
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        let code = match ct.code {
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::Backspace => Key::Backspace,
            crossterm::event::KeyCode::Delete => Key::Delete,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            crossterm::event::KeyCode::Home => Key::Home,
            crossterm::event::KeyCode::End => Key::End,
            crossterm::event::KeyCode::F(n) => Key::F(n),
            _ => Key::Unknown,
        };
        let modifiers = convert_modifiers(ct.modifiers);
        KeyEvent { code, modifiers }
    }
}

/// Convert a crossterm mouse button to our `MouseBtn`.
fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseBtn {
    match b {
        crossterm::event::MouseButton::Left => MouseBtn::Left,
        crossterm::event::MouseButton::Right => MouseBtn::Right,
        crossterm::event::MouseButton::Middle => MouseBtn::Middle,
    }
}

impl From<crossterm::event::MouseEvent> for MouseEvent {
    fn from(ct: crossterm::event::MouseEvent) -> Self {
        let kind = match ct.kind {
            crossterm::event::MouseEventKind::Down(b) => MouseAction::Down(convert_mouse_button(b)),
            crossterm::event::MouseEventKind::Up(b) => MouseAction::Up(convert_mouse_button(b)),
            crossterm::event::MouseEventKind::Drag(b) => MouseAction::Drag(convert_mouse_button(b)),
            _ => MouseAction::Moved,
        };
        MouseEvent {
            kind,
            x: i32::from(ct.column),
            y: i32::from(ct.row),
            modifiers: convert_modifiers(ct.modifiers),
        }
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(ct: crossterm::event::Event) -> Self {
        match ct {
            crossterm::event::Event::Key(ke) => InputEvent::Key(ke.into()),
            crossterm::event::Event::Mouse(me) => InputEvent::Mouse(me.into()),
            crossterm::event::Event::Resize(w, h) => InputEvent::Resize {
                width: i32::from(w),
                height: i32::from(h),
            },
            crossterm::event::Event::FocusGained => InputEvent::Repaint { remaining: 0 },
            crossterm::event::Event::Paste(text) => InputEvent::Paste(text),
            _ => InputEvent::Other,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Modifiers
    // -----------------------------------------------------------------------

    #[test]
    fn modifiers_contains() {
        let m = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(m.contains(Modifiers::CTRL));
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::ALT));
    }

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::CTRL.is_empty());
    }

    // -----------------------------------------------------------------------
    // printable
    // -----------------------------------------------------------------------

    #[test]
    fn printable_plain_char() {
        let ev = KeyEvent::new(Key::Char('a'), Modifiers::NONE);
        assert_eq!(ev.printable(), Some('a'));
    }

    #[test]
    fn printable_shifted_char() {
        let ev = KeyEvent::new(Key::Char('A'), Modifiers::SHIFT);
        assert_eq!(ev.printable(), Some('A'));
    }

    #[test]
    fn printable_rejects_ctrl_chord() {
        let ev = KeyEvent::new(Key::Char('c'), Modifiers::CTRL);
        assert_eq!(ev.printable(), None);
    }

    #[test]
    fn printable_rejects_non_char() {
        let ev = KeyEvent::new(Key::Enter, Modifiers::NONE);
        assert_eq!(ev.printable(), None);
    }

    // -----------------------------------------------------------------------
    // crossterm conversions
    // -----------------------------------------------------------------------

    #[test]
    fn convert_key_event() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('x'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        let ev = KeyEvent::from(ct);
        assert_eq!(ev.code, Key::Char('x'));
        assert!(ev.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn convert_resize_event() {
        let ev = InputEvent::from(crossterm::event::Event::Resize(100, 30));
        assert_eq!(ev, InputEvent::Resize { width: 100, height: 30 });
    }

    #[test]
    fn focus_gained_becomes_repaint() {
        let ev = InputEvent::from(crossterm::event::Event::FocusGained);
        assert_eq!(ev, InputEvent::Repaint { remaining: 0 });
    }

    #[test]
    fn focus_lost_becomes_other() {
        let ev = InputEvent::from(crossterm::event::Event::FocusLost);
        assert_eq!(ev, InputEvent::Other);
    }
}
