//! Snapshot rendering helpers.
//!
//! Converts composed [`Buffer`]s into plain-text strings suitable for
//! snapshot testing and assertions.

use crate::surface::Buffer;

/// Convert a buffer to a plain text string.
///
/// Each row becomes one line with trailing spaces trimmed; rows are
/// joined with `'\n'` and the final line has no trailing newline.
/// Styles are discarded; only glyphs survive.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let size = buffer.size();
    let mut lines = Vec::with_capacity(size.height.max(0) as usize);
    for y in 0..size.height {
        let mut line = String::with_capacity(size.width.max(0) as usize);
        for x in 0..size.width {
            if let Some(cell) = buffer.cell(x, y) {
                line.push(cell.ch);
            }
        }
        lines.push(line.trim_end().to_owned());
    }
    lines.join("\n")
}

/// Extract a single row of a buffer as a trimmed string.
pub fn row_to_string(buffer: &Buffer, y: i32) -> String {
    let size = buffer.size();
    let mut line = String::new();
    for x in 0..size.width {
        if let Some(cell) = buffer.cell(x, y) {
            line.push(cell.ch);
        }
    }
    line.trim_end().to_owned()
}

// ===========================================================================
// Tests
// ===========================================================================
