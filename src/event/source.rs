//! Event sources: where the loop blocks.
//!
//! [`EventSource::next_event`] is the single suspension point of the
//! application; there is no polling and no timer. [`TerminalEvents`]
//! reads from crossterm; [`ScriptedEvents`] replays a canned sequence
//! for headless tests.

use std::collections::VecDeque;
use std::io;

use super::input::InputEvent;

/// A blocking stream of input events.
pub trait EventSource {
    /// Block until the next event arrives.
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

// ---------------------------------------------------------------------------
// TerminalEvents
// ---------------------------------------------------------------------------

/// The real event stream: blocking reads from the terminal.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl TerminalEvents {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        crossterm::event::read().map(InputEvent::from)
    }
}

// ---------------------------------------------------------------------------
// ScriptedEvents
// ---------------------------------------------------------------------------

/// A canned event sequence for tests.
///
/// Yields the queued events in order; when exhausted it reports
/// `UnexpectedEof`, which ends a run loop that failed to quit earlier.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    /// Create a source that will replay `events` in order.
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self { queue: events.into_iter().collect() }
    }

    /// Append another event to the tail of the script.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Number of events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        self.queue.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted event queue exhausted")
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
