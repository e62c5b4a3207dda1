//! Time source for frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Reads the time and suspends the calling thread.
///
/// The animation loop only touches time through this trait, so pacing can
/// be driven by a manual clock in tests.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time and `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
