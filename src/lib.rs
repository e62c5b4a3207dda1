//! # Digital Rain
//!
//! A flicker-free "digital rain" animation for the terminal.
//!
//! Columns of random glyphs fall down the screen at independent speeds.
//! Each tick advances every column, composes one complete frame and
//! presents it with a single write.
//!
//! ## Core Concepts
//!
//! - **Column field**: one falling trail per screen column, respawned above
//!   the top edge once it leaves the bottom
//! - **Whole-frame composition**: every cell is written every frame, so
//!   nothing from earlier frames survives
//! - **Double-buffered output**: frames are serialized off-screen and
//!   flushed in one write
//! - **Fixed timestep**: the loop sleeps out the rest of each frame interval
//!
//! ## Example
//!
//! ```rust
//! use digital_rain::{CharacterSource, ColumnField, FrameCompositor};
//!
//! let mut field = ColumnField::seeded(80, 24, 7).unwrap();
//! let mut glyphs = CharacterSource::seeded(7);
//! let compositor = FrameCompositor::default();
//!
//! field.advance_all();
//! let frame = compositor.compose(&field, &mut glyphs);
//! assert_eq!(frame.width(), 80);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod animation;
pub mod buffer;
pub mod error;
pub mod logging;
pub mod rain;
pub mod terminal;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use actor::{ControlEvent, InputActor};
pub use animation::{AnimationConfig, AnimationLoop, Clock, LoopState, StopSignal, SystemClock};
pub use buffer::{Cell, Frame, Modifiers, Rgb};
pub use error::{RainError, Result};
pub use rain::{CharacterSource, Column, ColumnField, FrameCompositor, Palette, ResetPolicy, GLYPHS};
pub use terminal::{DisplaySink, DoubleBuffer, OutputBuffer, RenderStats, TerminalSession, TerminalSink};
