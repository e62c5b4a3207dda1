//! Frame compositor: turns column state into a complete grid of cells.
//!
//! Every cell of the output is written on every compose. A cell whose column
//! is inactive at that row is set to [`Cell::BLANK`] no matter what it held
//! before, which keeps stale glyphs from lingering on screen.

use super::field::ColumnField;
use super::glyphs::CharacterSource;
use crate::buffer::{Cell, Frame, Modifiers, Rgb};
use rand::Rng;

/// Colors used to paint trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Leading (lowest) glyph of each trail.
    pub head: Rgb,
    /// The rest of the trail.
    pub trail: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            head: Rgb::new(200, 255, 200),
            trail: Rgb::new(0, 200, 70),
        }
    }
}

/// Builds frames from a [`ColumnField`] and a [`CharacterSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCompositor {
    palette: Palette,
}

impl FrameCompositor {
    /// Compositor using `palette`.
    pub const fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// The palette trails are painted with.
    pub const fn palette(&self) -> Palette {
        self.palette
    }

    /// Compose the next frame into a fresh grid sized to the field.
    pub fn compose<F: Rng, S: Rng>(
        &self,
        field: &ColumnField<F>,
        source: &mut CharacterSource<S>,
    ) -> Frame {
        let mut frame = Frame::new(field.width(), field.height());
        self.compose_into(field, source, &mut frame);
        frame
    }

    /// Compose the next frame into `frame`, reallocating it only when its
    /// dimensions no longer match the field.
    pub fn compose_into<F: Rng, S: Rng>(
        &self,
        field: &ColumnField<F>,
        source: &mut CharacterSource<S>,
        frame: &mut Frame,
    ) {
        if frame.width() != field.width() || frame.height() != field.height() {
            *frame = Frame::new(field.width(), field.height());
        }

        for (row, cells) in (0i32..).zip(frame.rows_mut()) {
            for (column, cell) in field.columns().iter().zip(cells.iter_mut()) {
                *cell = if column.is_active(row) {
                    self.paint(source.next_symbol(), row == column.head())
                } else {
                    Cell::BLANK
                };
            }
        }
    }

    fn paint(&self, symbol: char, is_head: bool) -> Cell {
        if symbol == ' ' {
            Cell::BLANK
        } else if is_head {
            Cell::new(symbol)
                .with_fg(self.palette.head)
                .with_modifiers(Modifiers::BOLD)
        } else {
            Cell::new(symbol).with_fg(self.palette.trail)
        }
    }
}
