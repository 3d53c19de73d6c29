//! Label widget: a single line of selectable text.
//!
//! A `Label` owns its color resource (validated at construction), its
//! offscreen buffer, and an optional selection span in local column
//! coordinates. Pointer gestures inside the label's bounds drive a
//! small Idle/Selecting state machine; the resulting range is mirrored
//! into the shared [`SelectionTracker`] under the label's component id.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use log::warn;

use crate::error::Error;
use crate::event::{InputEvent, MouseAction, MouseBtn};
use crate::geometry::Region;
use crate::selection::SelectionTracker;
use crate::surface::{Buffer, CellStyle};
use crate::widget::Widget;

/// Default background color behind selected cells.
const DEFAULT_HIGHLIGHT: &str = "dark_grey";

/// A fixed-position, single-line text widget with mouse selection.
pub struct Label {
    id: String,
    region: Region,
    text: String,
    style: CellStyle,
    highlight: String,
    buffer: Option<Buffer>,
    needs_redraw: bool,
    selecting: bool,
    /// Unnormalized local column span; kept after release so a
    /// completed selection stays visible.
    selection: Option<(i32, i32)>,
    tracker: Rc<RefCell<SelectionTracker>>,
}

impl Label {
    /// Create a label with the given component id, bounds, initial
    /// text, and foreground color.
    ///
    /// The color is validated here; an unknown name is a construction
    /// error. The offscreen buffer is allocated up front; if the
    /// bounds are degenerate the label stays bufferless and will skip
    /// its own paint.
    pub fn new(
        id: impl Into<String>,
        region: Region,
        text: impl Into<String>,
        color: &str,
        tracker: Rc<RefCell<SelectionTracker>>,
    ) -> Result<Self, Error> {
        let id = id.into();
        let style = CellStyle::validated(Some(color), None)?;
        let buffer = match Buffer::new(region.size()) {
            Ok(buffer) => Some(buffer),
            Err(err) => {
                warn!("label {id:?}: no offscreen buffer: {err}");
                None
            }
        };
        Ok(Self {
            id,
            region,
            text: text.into(),
            style,
            highlight: DEFAULT_HIGHLIGHT.to_owned(),
            buffer,
            needs_redraw: true,
            selecting: false,
            selection: None,
            tracker,
        })
    }

    /// Override the selection highlight background (builder).
    pub fn with_highlight(mut self, color: &str) -> Result<Self, Error> {
        CellStyle::validated(None, Some(color))?;
        self.highlight = color.to_owned();
        Ok(self)
    }

    /// The label's component id used in the selection tracker.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text content.
    ///
    /// A no-op when the content is unchanged, so pushing the same
    /// string every frame never causes a needless repaint.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_owned();
            self.invalidate();
        }
    }

    /// The current selection span, unnormalized, if any.
    pub fn selection_span(&self) -> Option<(i32, i32)> {
        self.selection
    }

    /// Whether a drag gesture is currently in progress.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// The selection span normalized and clamped to the label width,
    /// or `None` when empty after clamping.
    fn visible_selection(&self) -> Option<(i32, i32)> {
        let (a, b) = self.selection?;
        let start = a.min(b).clamp(0, self.region.width);
        let end = a.max(b).clamp(0, self.region.width);
        (start < end).then_some((start, end))
    }
}

impl Widget for Label {
    fn region(&self) -> Region {
        self.region
    }

    fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    fn render_to_buffer(&mut self) {
        self.needs_redraw = false;

        if self.buffer.is_none() {
            // Retry the allocation; sizes are fixed, so this only
            // recovers after a transient failure.
            match Buffer::new(self.region.size()) {
                Ok(buffer) => self.buffer = Some(buffer),
                Err(_) => return,
            }
        }
        let selection = self.visible_selection();
        let row = self.region.height / 2;
        let highlight_style = self.style.on_background(&self.highlight);
        let Some(buffer) = &mut self.buffer else { return };

        // Background, then highlight, then glyphs.
        buffer.fill(&self.style);
        if let Some((start, end)) = selection {
            buffer.fill_rect(Region::new(start, row, end - start, 1), &highlight_style);
        }
        for (column, ch) in self.text.chars().enumerate() {
            let column = column as i32;
            let selected = selection.is_some_and(|(start, end)| column >= start && column < end);
            let style = if selected { &highlight_style } else { &self.style };
            buffer.draw_text(column, row, ch.encode_utf8(&mut [0; 4]), style);
        }
    }

    fn buffer(&self) -> Option<&Buffer> {
        self.buffer.as_ref()
    }

    fn handle_input(&mut self, event: &InputEvent) {
        let InputEvent::Mouse(mouse) = event else { return };
        match mouse.kind {
            MouseAction::Down(MouseBtn::Left) if self.region.contains(mouse.x, mouse.y) => {
                let column = self.region.to_local(mouse.x, mouse.y).x.max(0);
                self.selecting = true;
                self.selection = Some((column, column));
                let mut tracker = self.tracker.borrow_mut();
                tracker.start_selection(&self.id, column);
                tracker.set_component_text(&self.id, &self.text);
                drop(tracker);
                self.invalidate();
            }
            MouseAction::Drag(MouseBtn::Left) | MouseAction::Moved if self.selecting => {
                // The drag may leave the bounds; the end column is
                // clamped at render time, not here.
                let column = self.region.to_local(mouse.x, mouse.y).x.max(0);
                if let Some((_, end)) = &mut self.selection {
                    *end = column;
                }
                self.tracker.borrow_mut().update_selection(column);
                self.invalidate();
            }
            MouseAction::Up(MouseBtn::Left) if self.selecting => {
                self.selecting = false;
                self.tracker.borrow_mut().end_selection();
                self.invalidate();
            }
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
