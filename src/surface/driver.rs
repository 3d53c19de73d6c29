//! Crossterm terminal output backend.
//!
//! The `Driver` wraps a buffered stdout writer and owns the terminal
//! session: raw mode, alternate screen, mouse capture, cursor
//! visibility, and the window title. `present` keeps the previously
//! shown frame and emits escape sequences only for cells that changed,
//! so a full back-buffer blit costs little when nothing moved.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};

use crate::surface::buffer::Buffer;
use crate::surface::style::{parse_color, CellStyle};

/// Terminal output backend using crossterm.
///
/// Wraps a `BufWriter<Stdout>` for batched writes. The driver does not
/// take over the terminal on creation; call [`Driver::enter`]
/// explicitly, and [`Driver::leave`] (or drop the driver) to restore
/// the caller's shell.
pub struct Driver {
    writer: BufWriter<Stdout>,
    previous: Option<Buffer>,
    entered: bool,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
            previous: None,
            entered: false,
        })
    }

    /// Enter the alternate screen, enable raw mode and mouse capture,
    /// hide the cursor, and set the window title.
    pub fn enter(&mut self, title: &str) -> io::Result<()> {
        execute!(
            self.writer,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetTitle(title)
        )?;
        terminal::enable_raw_mode()?;
        self.entered = true;
        Ok(())
    }

    /// Restore the terminal: leave the alternate screen, disable raw
    /// mode and mouse capture, show the cursor.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.writer,
            DisableMouseCapture,
            cursor::Show,
            LeaveAlternateScreen
        )?;
        Ok(())
    }

    /// Blit a composed frame to the terminal.
    ///
    /// Diffs against the previously presented frame and emits only the
    /// changed cells; a size change (or the first frame) falls back to
    /// a full redraw. Flushes before returning.
    pub fn present(&mut self, frame: &Buffer) -> io::Result<()> {
        let full = match &self.previous {
            Some(prev) => prev.size() != frame.size(),
            None => true,
        };

        for (x, y, cell) in frame.iter_cells() {
            let changed = full
                || self
                    .previous
                    .as_ref()
                    .and_then(|prev| prev.cell(x, y))
                    .map_or(true, |prev_cell| prev_cell != cell);
            if !changed {
                continue;
            }
            queue!(self.writer, cursor::MoveTo(x as u16, y as u16))?;
            self.apply_cell_style(&cell.style)?;
            queue!(self.writer, Print(cell.ch), ResetColor)?;
            if cell.style.bold || cell.style.dim || cell.style.italic
                || cell.style.underline || cell.style.reverse
            {
                queue!(self.writer, SetAttribute(Attribute::Reset))?;
            }
        }

        self.previous = Some(frame.clone());
        self.writer.flush()
    }

    /// Get the terminal size (columns, rows) via crossterm.
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Queue crossterm style commands for a given `CellStyle`.
    fn apply_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(ref fg) = style.fg {
            if let Some(color) = parse_color(fg) {
                queue!(self.writer, SetForegroundColor(color))?;
            }
        }
        if let Some(ref bg) = style.bg {
            if let Some(color) = parse_color(bg) {
                queue!(self.writer, SetBackgroundColor(color))?;
            }
        }
        if style.bold {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.writer, SetAttribute(Attribute::Dim))?;
        }
        if style.italic {
            queue!(self.writer, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.writer, SetAttribute(Attribute::Underlined))?;
        }
        if style.reverse {
            queue!(self.writer, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        // Restoring the caller's terminal matters more than reporting
        // a failed restore.
        let _ = self.leave();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
