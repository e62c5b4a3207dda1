//! Terminal module: everything that touches the real terminal.
//!
//! - [`OutputBuffer`]: a frame serialized to ANSI text
//! - [`DisplaySink`] / [`TerminalSink`]: double-buffered, single-write presentation
//! - [`TerminalSession`]: raw mode, alternate screen and cursor, restored on drop

mod output;
mod session;
mod sink;

pub use output::OutputBuffer;
pub use session::TerminalSession;
pub use sink::{DisplaySink, DoubleBuffer, RenderStats, TerminalSink};
