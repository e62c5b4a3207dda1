//! Test doubles shared by the unit tests.

use crate::animation::{Clock, StopSignal};
use crate::buffer::Frame;
use crate::error::{RainError, Result};
use crate::terminal::DisplaySink;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Writer that records every `write` call separately.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
    fail: Option<io::ErrorKind>,
}

impl RecordingWriter {
    /// A writer whose every write fails with `kind`.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            fail: Some(kind),
            ..Self::default()
        }
    }
}

impl Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.fail {
            return Err(io::Error::new(kind, "recording writer failure"));
        }
        self.writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Handle for advancing a [`ManualClock`] from elsewhere (e.g. a sink
/// simulating render work).
#[derive(Debug, Clone)]
pub struct ClockHandle(Rc<std::cell::Cell<Duration>>);

impl ClockHandle {
    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

/// Clock that only moves when slept on or advanced through a handle.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: ClockHandle,
    pub sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: ClockHandle(Rc::new(std::cell::Cell::new(Duration::ZERO))),
            sleeps: Vec::new(),
        }
    }

    pub fn handle(&self) -> ClockHandle {
        self.elapsed.clone()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.0.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.elapsed.advance(duration);
    }
}

/// Sink that keeps every presented frame.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
    pub calls: usize,
    pub invalidations: usize,
    work: Option<(ClockHandle, Duration)>,
    stop_after: Option<(usize, StopSignal)>,
    fail_on: Option<usize>,
}

impl RecordingSink {
    /// Each present takes `work` on the given clock.
    pub fn with_work(mut self, clock: ClockHandle, work: Duration) -> Self {
        self.work = Some((clock, work));
        self
    }

    /// Raise `stop` once `frames` frames have been recorded.
    pub fn stop_after(mut self, frames: usize, stop: StopSignal) -> Self {
        self.stop_after = Some((frames, stop));
        self
    }

    /// Fail the `call`-th present (1-based).
    pub fn fail_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }
}

impl DisplaySink for RecordingSink {
    fn present(&mut self, frame: Frame) -> Result<()> {
        self.calls += 1;
        if self.fail_on == Some(self.calls) {
            return Err(RainError::Presentation(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "sink closed",
            )));
        }
        if let Some((clock, work)) = &self.work {
            clock.advance(*work);
        }
        self.frames.push(frame);
        if let Some((after, stop)) = &self.stop_after {
            if self.frames.len() >= *after {
                stop.stop();
            }
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}
