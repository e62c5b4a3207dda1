//! `OutputBuffer`: a whole frame serialized into one block of ANSI text.

use crate::buffer::{Frame, Modifiers, Rgb};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A frame is accumulated here, then flushed in a single `write()` call
/// so the terminal never shows a half-drawn screen.
#[derive(Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a symbol as UTF-8.
    #[inline]
    pub fn push_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.data
            .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    /// Move cursor to position (0-indexed).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1);
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Enable the given modifiers.
    #[inline]
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        if modifiers.contains(Modifiers::BOLD) {
            self.data.extend_from_slice(b"\x1b[1m");
        }
        if modifiers.contains(Modifiers::DIM) {
            self.data.extend_from_slice(b"\x1b[2m");
        }
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Replace the contents with a full-screen rendering of `frame`.
    ///
    /// Every row starts with an absolute cursor move, so the encoded frame
    /// holds no newline bytes: a line-buffered writer cannot split it, and
    /// drawing the last row never scrolls the screen. The pen is only
    /// re-emitted when it changes between visible glyphs.
    pub fn encode_frame(&mut self, frame: &Frame, clear_first: bool) {
        self.clear();
        if clear_first {
            self.clear_screen();
        }

        let mut pen: Option<(Rgb, Modifiers)> = None;
        for (y, row) in (0u16..).zip(frame.rows()) {
            self.cursor_move(0, y);
            for cell in row {
                if cell.is_blank() {
                    self.data.push(b' ');
                    continue;
                }
                let wanted = (cell.fg(), cell.modifiers());
                if pen != Some(wanted) {
                    self.reset_attrs();
                    self.set_modifiers(wanted.1);
                    self.set_fg(wanted.0);
                    pen = Some(wanted);
                }
                self.push_char(cell.symbol());
            }
        }
        self.reset_attrs();
    }

    /// Flush to a writer in a single call.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("len", &self.data.len())
            .field("capacity", &self.data.capacity())
            .finish()
    }
}
