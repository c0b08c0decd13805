#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s representing the terminal
//! display. Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation

use crate::cell::Cell;
use pietui_core::geometry::Rect;

/// A 2D grid of terminal cells.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to the default (blank, white on
    /// transparent).
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0, "buffer width must be > 0");
        assert!(height > 0, "buffer height must be > 0");

        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Set the cell at (x, y). Out-of-bounds writes are silently clipped.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Count the cells that differ from the default blank cell.
    ///
    /// Useful in tests to assert "nothing was drawn".
    pub fn non_blank_count(&self) -> usize {
        let blank = Cell::default();
        self.cells.iter().filter(|c| **c != blank).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(8, 4);
        assert_eq!(buf.width(), 8);
        assert_eq!(buf.height(), 4);
        assert_eq!(buf.bounds(), Rect::from_size(8, 4));
        assert_eq!(buf.non_blank_count(), 0);
    }

    #[test]
    #[should_panic(expected = "buffer width must be > 0")]
    fn zero_width_panics() {
        let _ = Buffer::new(0, 4);
    }

    #[test]
    #[should_panic(expected = "buffer height must be > 0")]
    fn zero_height_panics() {
        let _ = Buffer::new(4, 0);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut buf = Buffer::new(4, 4);
        let cell = Cell::from_char('x').with_fg(PackedRgba::CYAN);
        buf.set(3, 2, cell);
        assert_eq!(buf.get(3, 2), Some(&cell));
        assert_eq!(buf.non_blank_count(), 1);
    }

    #[test]
    fn out_of_bounds_is_clipped() {
        let mut buf = Buffer::new(4, 4);
        buf.set(4, 0, Cell::from_char('x'));
        buf.set(0, 4, Cell::from_char('x'));
        assert_eq!(buf.get(4, 0), None);
        assert_eq!(buf.non_blank_count(), 0);
    }

    #[test]
    fn clear_resets_cells() {
        let mut buf = Buffer::new(3, 3);
        buf.set(1, 1, Cell::from_char('#'));
        buf.clear();
        assert_eq!(buf.non_blank_count(), 0);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut buf = Buffer::new(2, 2);
        if let Some(cell) = buf.get_mut(0, 1) {
            cell.ch = '@';
        }
        assert_eq!(buf.get(0, 1).map(|c| c.ch), Some('@'));
    }
}
