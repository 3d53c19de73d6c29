//! Input events, key bindings, and blocking event sources.

pub mod binding;
pub mod input;
pub mod source;

pub use binding::{BindingAction, KeyBindingRegistry};
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
pub use source::{EventSource, ScriptedEvents, TerminalEvents};
