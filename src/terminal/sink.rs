//! Display sink: presents finished frames with double buffering.
//!
//! [`TerminalSink`] owns two [`OutputBuffer`]s. A frame is serialized into
//! the back buffer, the buffers are swapped, and the front buffer is written
//! out with a single `write_all` followed by a flush. Only the swap changes
//! what the front buffer holds.

use super::output::OutputBuffer;
use crate::buffer::Frame;
use crate::error::{RainError, Result};
use std::io::{self, Stdout, Write};
use std::time::Instant;

/// Something that can show a completed frame.
pub trait DisplaySink {
    /// Present `frame`, replacing whatever was shown before.
    fn present(&mut self, frame: Frame) -> Result<()>;

    /// Forget what is on screen; the next frame starts from a cleared screen.
    fn invalidate(&mut self) {}
}

/// Front (last presented) and back (being assembled) output buffers.
#[derive(Debug, Default)]
pub struct DoubleBuffer {
    front: OutputBuffer,
    back: OutputBuffer,
}

impl DoubleBuffer {
    /// Create both buffers with `capacity` bytes reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            front: OutputBuffer::with_capacity(capacity),
            back: OutputBuffer::with_capacity(capacity),
        }
    }

    /// The buffer holding the last presented frame.
    #[inline]
    pub const fn front(&self) -> &OutputBuffer {
        &self.front
    }

    /// The buffer the next frame is assembled in.
    #[inline]
    pub fn back_mut(&mut self) -> &mut OutputBuffer {
        &mut self.back
    }

    /// Exchange front and back.
    ///
    /// This is O(1) - just pointer swaps.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }
}

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Total frames presented.
    pub frames: u64,
    /// Total bytes written to the terminal.
    pub bytes_written: u64,
    /// Average present time in microseconds.
    pub avg_render_us: u64,
    /// Last present time in microseconds.
    pub last_render_us: u64,
}

/// Double-buffered sink writing ANSI frames to `W`.
pub struct TerminalSink<W: Write = Stdout> {
    buffers: DoubleBuffer,
    writer: W,
    stats: RenderStats,
    /// Clear the screen ahead of the next frame.
    needs_clear: bool,
}

impl TerminalSink<Stdout> {
    /// Sink writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink writing to `writer`. The first frame clears the screen.
    pub fn new(writer: W) -> Self {
        Self {
            buffers: DoubleBuffer::with_capacity(64 * 1024),
            writer,
            stats: RenderStats::default(),
            needs_clear: true,
        }
    }

    /// Both output buffers.
    pub const fn buffers(&self) -> &DoubleBuffer {
        &self.buffers
    }

    /// Render statistics so far.
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the sink, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn present(&mut self, frame: Frame) -> Result<()> {
        let start = Instant::now();

        self.buffers.back_mut().encode_frame(&frame, self.needs_clear);
        self.buffers.swap();

        // Flush to terminal in a single write
        self.buffers
            .front()
            .flush_to(&mut self.writer)
            .map_err(RainError::Presentation)?;
        self.needs_clear = false;

        let elapsed = start.elapsed();
        self.stats.frames += 1;
        self.stats.bytes_written += self.buffers.front().len() as u64;
        self.stats.last_render_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        // Smoothed average
        if self.stats.avg_render_us == 0 {
            self.stats.avg_render_us = self.stats.last_render_us;
        } else {
            self.stats.avg_render_us =
                (self.stats.avg_render_us * 15 + self.stats.last_render_us) / 16;
        }

        Ok(())
    }

    fn invalidate(&mut self) {
        self.needs_clear = true;
    }
}

impl<W: Write> std::fmt::Debug for TerminalSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSink")
            .field("buffers", &self.buffers)
            .field("stats", &self.stats)
            .field("needs_clear", &self.needs_clear)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Cell, Rgb};
    use crate::testing::RecordingWriter;
    use std::io::LineWriter;

    fn frame_with(symbol: char) -> Frame {
        let mut frame = Frame::new(4, 2);
        frame.set(1, 1, Cell::new(symbol).with_fg(Rgb::new(0, 255, 0)));
        frame
    }

    #[test]
    fn test_one_write_per_frame() {
        let mut sink = TerminalSink::new(RecordingWriter::default());
        for symbol in ['1', '2', '3'] {
            sink.present(frame_with(symbol)).unwrap();
        }
        let writer = sink.writer();
        assert_eq!(writer.writes.len(), 3);
        assert_eq!(writer.flushes, 3);
        assert_eq!(sink.stats().frames, 3);
    }

    #[test]
    fn test_line_buffered_writer_gets_one_write_per_frame() {
        // Stdout is a LineWriter; a newline in the frame would split it
        let mut sink = TerminalSink::new(LineWriter::new(RecordingWriter::default()));
        sink.present(frame_with('7')).unwrap();

        let mut large = Frame::new(80, 24);
        large.fill(Cell::new('8').with_fg(Rgb::new(0, 255, 0)));
        sink.present(large).unwrap();

        let writes = &sink.writer().get_ref().writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1], sink.buffers().front().as_bytes());
        assert!(writes[1].len() > 1024);
    }

    #[test]
    fn test_write_is_the_whole_front_buffer() {
        let mut sink = TerminalSink::new(RecordingWriter::default());
        sink.present(frame_with('7')).unwrap();

        let mut expected = OutputBuffer::new();
        expected.encode_frame(&frame_with('7'), true);
        assert_eq!(sink.writer().writes[0], expected.as_bytes());
        assert_eq!(sink.buffers().front().as_bytes(), expected.as_bytes());
        assert_eq!(sink.stats().bytes_written, expected.len() as u64);
    }

    #[test]
    fn test_swap_keeps_previous_frame_in_back() {
        let mut sink = TerminalSink::new(RecordingWriter::default());
        sink.present(frame_with('a')).unwrap();
        let first = sink.buffers().front().as_bytes().to_vec();

        sink.present(frame_with('b')).unwrap();
        // Back now holds the frame that was on screen before the swap
        assert_eq!(sink.buffers.back.as_bytes(), first.as_slice());
        assert_ne!(sink.buffers().front().as_bytes(), first.as_slice());
    }

    #[test]
    fn test_only_first_frame_clears() {
        let mut sink = TerminalSink::new(RecordingWriter::default());
        sink.present(frame_with('a')).unwrap();
        sink.present(frame_with('b')).unwrap();
        sink.invalidate();
        sink.present(frame_with('c')).unwrap();

        let writes = &sink.writer().writes;
        assert!(writes[0].starts_with(b"\x1b[2J"));
        assert!(writes[1].starts_with(b"\x1b[1;1H"));
        assert!(writes[2].starts_with(b"\x1b[2J"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut sink = TerminalSink::new(RecordingWriter::failing(io::ErrorKind::BrokenPipe));
        let err = sink.present(frame_with('x')).unwrap_err();
        assert!(matches!(
            err,
            RainError::Presentation(ref e) if e.kind() == io::ErrorKind::BrokenPipe
        ));
        assert_eq!(sink.stats().frames, 0);
    }

    #[test]
    fn test_screen_after_presents() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.present(frame_with('a')).unwrap();
        sink.present(frame_with('b')).unwrap();

        let mut parser = vt100::Parser::new(2, 4, 0);
        parser.process(&sink.into_writer());
        let screen = parser.screen();
        assert_eq!(screen.cell(1, 1).unwrap().contents(), "b");
        assert_eq!(screen.contents().trim(), "b");
    }
}
