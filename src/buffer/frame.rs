//! Frame: one complete grid of cells, the unit handed to a display sink.
//!
//! Cells are stored contiguously in row-major order.

use super::cell::Cell;

/// A `height x width` grid of cells representing one animation frame.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Frame {
    /// Create a new frame with every cell blank.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Frame dimensions must be non-zero");
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::BLANK; size],
            width,
            height,
        }
    }

    /// Get the frame width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the frame height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the frame is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width))
    }

    /// Get a mutable iterator over rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Cell]> {
        self.cells.chunks_mut(usize::from(self.width))
    }

    /// The symbols of row `y` as a string, `None` when out of bounds.
    pub fn row_text(&self, y: u16) -> Option<String> {
        self.rows()
            .nth(usize::from(y))
            .map(|row| row.iter().map(Cell::symbol).collect())
    }

    /// The symbols of every row, top to bottom.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(Cell::symbol).collect())
            .collect()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("lines", &self.to_lines())
            .finish()
    }
}
