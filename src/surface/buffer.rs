//! Offscreen cell buffers.
//!
//! A [`Buffer`] is a row-major grid of [`StyledCell`]s. Every widget
//! owns one sized to its bounds; the compositor owns a window-sized
//! back-buffer. Drawing primitives clip silently, so callers never
//! need to pre-clamp coordinates.

use crate::error::Error;
use crate::geometry::{Region, Size};

use super::style::{CellStyle, StyledCell};

/// A fixed-size grid of styled cells.
///
/// Once allocated, a buffer always matches its declared size; growing
/// or shrinking means allocating a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    size: Size,
    cells: Vec<StyledCell>,
}

impl Buffer {
    /// Allocate a blank buffer of the given size.
    ///
    /// Fails when either dimension is not strictly positive. Callers
    /// that can tolerate a missing buffer (widgets) downgrade this to
    /// a skipped paint; for the back-buffer it is fatal.
    pub fn new(size: Size) -> Result<Self, Error> {
        if !size.is_positive() {
            return Err(Error::BufferSize { width: size.width, height: size.height });
        }
        Ok(Self {
            size,
            cells: vec![StyledCell::blank(); size.area() as usize],
        })
    }

    /// The buffer's dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The cell at (x, y), or `None` when out of bounds.
    pub fn cell(&self, x: i32, y: i32) -> Option<&StyledCell> {
        if !self.size.contains(x, y) {
            return None;
        }
        self.cells.get((y * self.size.width + x) as usize)
    }

    /// Overwrite every cell with a blank carrying the given style.
    pub fn fill(&mut self, style: &CellStyle) {
        for cell in &mut self.cells {
            *cell = StyledCell::blank_styled(style.clone());
        }
    }

    /// Fill a rectangular region with blanks of the given style.
    ///
    /// The region is clipped to the buffer; a fully out-of-bounds
    /// region is a no-op.
    pub fn fill_rect(&mut self, region: Region, style: &CellStyle) {
        let clip = region.intersection(self.size.to_region());
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.put(x, y, StyledCell::blank_styled(style.clone()));
            }
        }
    }

    /// Draw a line of text starting at (x, y), one cell per char.
    ///
    /// Characters landing outside the buffer are dropped; the row `y`
    /// itself may be out of bounds, in which case nothing is drawn.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, style: &CellStyle) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, StyledCell::new(ch, style.clone()));
        }
    }

    /// Blit another buffer onto this one with its origin at (x, y).
    ///
    /// Source cells falling outside this buffer are clipped. This is
    /// the composite primitive: a widget's offscreen buffer is copied
    /// into the back-buffer at the widget's fixed position.
    pub fn copy_from(&mut self, src: &Buffer, x: i32, y: i32) {
        for sy in 0..src.size.height {
            for sx in 0..src.size.width {
                if let Some(cell) = src.cell(sx, sy) {
                    self.put(x + sx, y + sy, cell.clone());
                }
            }
        }
    }

    /// Iterate all cells with their coordinates, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (i32, i32, &StyledCell)> {
        let width = self.size.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i as i32 % width, i as i32 / width, cell))
    }

    fn put(&mut self, x: i32, y: i32, cell: StyledCell) {
        if self.size.contains(x, y) {
            self.cells[(y * self.size.width + x) as usize] = cell;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn style(bg: &str) -> CellStyle {
        CellStyle { bg: Some(bg.to_owned()), ..CellStyle::default() }
    }

    // -----------------------------------------------------------------------
    // Allocation
    // -----------------------------------------------------------------------

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(Size::new(4, 2)).unwrap();
        assert_eq!(buf.size(), Size::new(4, 2));
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(buf.cell(x, y).unwrap().ch, ' ');
            }
        }
    }

    #[test]
    fn new_rejects_non_positive_dimensions() {
        assert!(matches!(
            Buffer::new(Size::new(0, 5)),
            Err(Error::BufferSize { width: 0, height: 5 })
        ));
        assert!(Buffer::new(Size::new(5, -1)).is_err());
    }

    #[test]
    fn cell_out_of_bounds_is_none() {
        let buf = Buffer::new(Size::new(4, 2)).unwrap();
        assert!(buf.cell(4, 0).is_none());
        assert!(buf.cell(0, 2).is_none());
        assert!(buf.cell(-1, 0).is_none());
    }

    // -----------------------------------------------------------------------
    // fill / fill_rect
    // -----------------------------------------------------------------------

    #[test]
    fn fill_styles_every_cell() {
        let mut buf = Buffer::new(Size::new(3, 2)).unwrap();
        buf.fill(&style("blue"));
        for (_, _, cell) in buf.iter_cells() {
            assert_eq!(cell.ch, ' ');
            assert_eq!(cell.style.bg.as_deref(), Some("blue"));
        }
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut buf = Buffer::new(Size::new(4, 2)).unwrap();
        buf.fill_rect(Region::new(2, 0, 10, 10), &style("red"));
        assert_eq!(buf.cell(1, 0).unwrap().style, CellStyle::default());
        assert_eq!(buf.cell(2, 0).unwrap().style.bg.as_deref(), Some("red"));
        assert_eq!(buf.cell(3, 1).unwrap().style.bg.as_deref(), Some("red"));
    }

    #[test]
    fn fill_rect_outside_is_noop() {
        let mut buf = Buffer::new(Size::new(4, 2)).unwrap();
        buf.fill_rect(Region::new(-10, -10, 5, 5), &style("red"));
        for (_, _, cell) in buf.iter_cells() {
            assert_eq!(cell.style, CellStyle::default());
        }
    }

    // -----------------------------------------------------------------------
    // draw_text
    // -----------------------------------------------------------------------

    #[test]
    fn draw_text_places_chars() {
        let mut buf = Buffer::new(Size::new(6, 1)).unwrap();
        buf.draw_text(1, 0, "Hi", &CellStyle::default());
        assert_eq!(buf.cell(1, 0).unwrap().ch, 'H');
        assert_eq!(buf.cell(2, 0).unwrap().ch, 'i');
        assert_eq!(buf.cell(3, 0).unwrap().ch, ' ');
    }

    #[test]
    fn draw_text_clips_past_right_edge() {
        let mut buf = Buffer::new(Size::new(4, 1)).unwrap();
        buf.draw_text(2, 0, "long", &CellStyle::default());
        assert_eq!(buf.cell(2, 0).unwrap().ch, 'l');
        assert_eq!(buf.cell(3, 0).unwrap().ch, 'o');
        // 'n' and 'g' fell off the edge; no panic.
    }

    #[test]
    fn draw_text_off_row_is_noop() {
        let mut buf = Buffer::new(Size::new(4, 1)).unwrap();
        buf.draw_text(0, 3, "x", &CellStyle::default());
        assert_eq!(buf.cell(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn draw_text_negative_start_clips_left() {
        let mut buf = Buffer::new(Size::new(4, 1)).unwrap();
        buf.draw_text(-1, 0, "abc", &CellStyle::default());
        assert_eq!(buf.cell(0, 0).unwrap().ch, 'b');
        assert_eq!(buf.cell(1, 0).unwrap().ch, 'c');
    }

    // -----------------------------------------------------------------------
    // copy_from
    // -----------------------------------------------------------------------

    #[test]
    fn copy_from_places_at_offset() {
        let mut src = Buffer::new(Size::new(2, 1)).unwrap();
        src.draw_text(0, 0, "AB", &CellStyle::default());

        let mut dst = Buffer::new(Size::new(6, 3)).unwrap();
        dst.copy_from(&src, 3, 1);

        assert_eq!(dst.cell(3, 1).unwrap().ch, 'A');
        assert_eq!(dst.cell(4, 1).unwrap().ch, 'B');
        assert_eq!(dst.cell(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn copy_from_clips_at_edges() {
        let mut src = Buffer::new(Size::new(3, 1)).unwrap();
        src.draw_text(0, 0, "xyz", &CellStyle::default());

        let mut dst = Buffer::new(Size::new(4, 1)).unwrap();
        dst.copy_from(&src, 2, 0);

        assert_eq!(dst.cell(2, 0).unwrap().ch, 'x');
        assert_eq!(dst.cell(3, 0).unwrap().ch, 'y');
    }

    #[test]
    fn copy_from_overwrites_destination() {
        // Later copies win: the compositor relies on this for paint order.
        let mut first = Buffer::new(Size::new(2, 1)).unwrap();
        first.draw_text(0, 0, "aa", &CellStyle::default());
        let mut second = Buffer::new(Size::new(2, 1)).unwrap();
        second.draw_text(0, 0, "bb", &CellStyle::default());

        let mut dst = Buffer::new(Size::new(3, 1)).unwrap();
        dst.copy_from(&first, 0, 0);
        dst.copy_from(&second, 1, 0);

        assert_eq!(dst.cell(0, 0).unwrap().ch, 'a');
        assert_eq!(dst.cell(1, 0).unwrap().ch, 'b');
        assert_eq!(dst.cell(2, 0).unwrap().ch, 'b');
    }
}
