//! Shared selection tracking across widgets.
//!
//! [`SelectionTracker`] records which component currently owns a
//! pointer-drag selection gesture and the half-open column range being
//! selected. It is keyed by component id strings rather than widget
//! objects, so selection state survives widget buffer reallocation and
//! can be queried without knowing which widget is active. One shared
//! instance is injected into every selectable widget at construction.

use std::collections::HashMap;

/// A stored selection for one component.
///
/// `start`/`end` are unnormalized: `end` may be less than `start`
/// when the drag went leftwards; consumers take `min`/`max`. `text`
/// is a snapshot of the component's content at gesture start, so
/// [`SelectionTracker::selected_text`] stays stable even if the live
/// widget content changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Selection {
    start: i32,
    end: i32,
    text: String,
}

/// Tracks at most one active selection gesture across any number of
/// named components.
///
/// Entries for inactive components are retained and stay queryable;
/// only the active id answers [`selected_text`](Self::selected_text)
/// and [`selection_range`](Self::selection_range).
#[derive(Debug, Default)]
pub struct SelectionTracker {
    selections: HashMap<String, Selection>,
    active: Option<String>,
    selecting: bool,
}

impl SelectionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a selection gesture for `id` at `position`.
    ///
    /// Makes `id` the active component and overwrites any previous
    /// entry for it, so restarting on the same id discards its prior
    /// selection. Entries for other ids are left untouched.
    pub fn start_selection(&mut self, id: &str, position: i32) {
        self.active = Some(id.to_owned());
        self.selections.insert(
            id.to_owned(),
            Selection { start: position, end: position, text: String::new() },
        );
        self.selecting = true;
    }

    /// Extend the active gesture to `position`.
    ///
    /// No-op unless a gesture is in progress. The position is not
    /// validated; negative or oversized values are legal and clamped
    /// by consumers.
    pub fn update_selection(&mut self, position: i32) {
        if !self.selecting {
            return;
        }
        let Some(id) = &self.active else { return };
        if let Some(selection) = self.selections.get_mut(id) {
            selection.end = position;
        }
    }

    /// End the gesture.
    ///
    /// The active id is retained so `selected_text` and
    /// `has_selection` remain answerable after release.
    pub fn end_selection(&mut self) {
        self.selecting = false;
    }

    /// Whether a gesture is currently in progress.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Store the text snapshot backing `id`'s selection.
    ///
    /// Only meaningful for ids that already have an entry; called by
    /// widgets at gesture start.
    pub fn set_component_text(&mut self, id: &str, text: &str) {
        if let Some(selection) = self.selections.get_mut(id) {
            selection.text = text.to_owned();
        }
    }

    /// The selected substring of the active component's snapshot.
    ///
    /// The range is interpreted in character positions, normalized
    /// with `min`/`max`, and clamped to the snapshot length. Empty
    /// string when nothing is active or no snapshot was stored.
    pub fn selected_text(&self) -> String {
        let Some(selection) = self.active_selection() else {
            return String::new();
        };
        let (start, end) = ordered(selection.start, selection.end);
        let start = start.max(0) as usize;
        let end = end.max(0) as usize;
        selection
            .text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Whether `id` has a stored, non-degenerate selection.
    pub fn has_selection(&self, id: &str) -> bool {
        self.selections
            .get(id)
            .is_some_and(|s| s.start != s.end)
    }

    /// The active component's normalized `(min, max)` range, or
    /// `(0, 0)` when nothing is active.
    pub fn selection_range(&self) -> (i32, i32) {
        match self.active_selection() {
            Some(selection) => ordered(selection.start, selection.end),
            None => (0, 0),
        }
    }

    fn active_selection(&self) -> Option<&Selection> {
        self.selections.get(self.active.as_deref()?)
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    (a.min(b), a.max(b))
}

// ===========================================================================
// Tests
// ===========================================================================
