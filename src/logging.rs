//! Log output that stays off the screen while the animation owns it.
//!
//! The binary logs to stderr, which is usually the same terminal the frames
//! are drawn on. [`DeferredLog`] is a `tracing_subscriber` writer that holds
//! formatted records in memory while a [`LogHold`] is alive and writes them
//! out, in order, once the hold is dropped.
//!
//! ```no_run
//! use digital_rain::logging::DeferredLog;
//! use tracing_subscriber::prelude::*;
//!
//! let log = DeferredLog::stderr();
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer().with_writer(log.clone()))
//!     .init();
//!
//! let hold = log.hold();
//! tracing::warn!("kept until the hold is dropped");
//! drop(hold);
//! ```

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

struct LogState {
    held: bool,
    pending: Vec<u8>,
    target: Box<dyn Write + Send>,
}

impl LogState {
    /// Write whatever was held back, then pass writes through again.
    fn release(&mut self) {
        self.held = false;
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            let _ = self.target.write_all(&pending);
            let _ = self.target.flush();
        }
    }
}

/// Shared log destination that can be held back while the screen is busy.
#[derive(Clone)]
pub struct DeferredLog {
    state: Arc<Mutex<LogState>>,
}

impl DeferredLog {
    /// Log destination writing to `target`, initially passing writes through.
    pub fn new(target: impl Write + Send + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(LogState {
                held: false,
                pending: Vec::new(),
                target: Box::new(target),
            })),
        }
    }

    /// Log destination writing to stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Buffer all writes until the returned guard is dropped.
    #[must_use = "records are released as soon as the hold is dropped"]
    pub fn hold(&self) -> LogHold {
        self.lock().held = true;
        LogHold { log: self.clone() }
    }

    /// Whether writes are currently being held back.
    pub fn is_held(&self) -> bool {
        self.lock().held
    }

    /// Bytes waiting for the hold to end.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    // A panic while logging must not silence every later record.
    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DeferredLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredLog")
            .field("held", &self.is_held())
            .field("pending", &self.pending_len())
            .finish_non_exhaustive()
    }
}

impl<'a> MakeWriter<'a> for DeferredLog {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter { log: self.clone() }
    }
}

/// Writer handed out per record by [`DeferredLog`].
#[derive(Debug)]
pub struct LogWriter {
    log: DeferredLog,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.log.lock();
        if state.held {
            state.pending.extend_from_slice(buf);
            Ok(buf.len())
        } else {
            state.target.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.log.lock();
        if state.held {
            Ok(())
        } else {
            state.target.flush()
        }
    }
}

/// Guard returned by [`DeferredLog::hold`]; dropping it releases held records.
#[derive(Debug)]
pub struct LogHold {
    log: DeferredLog,
}

impl Drop for LogHold {
    fn drop(&mut self) {
        self.log.lock().release();
    }
}
