//! Animation module: the fixed-timestep loop and what it needs to pace and stop.
//!
//! ```text
//!   ┌──────────────┐ advance_all ┌─────────────┐
//!   │AnimationLoop │ ──────────▶ │ ColumnField │
//!   │              │             └─────────────┘
//!   │              │   compose   ┌─────────────────┐
//!   │              │ ──────────▶ │ FrameCompositor │
//!   │              │             └─────────────────┘
//!   │              │   present   ┌─────────────┐
//!   │              │ ──────────▶ │ DisplaySink │
//!   └──────────────┘             └─────────────┘
//!          │ sleep(remaining)
//!          ▼
//!       Clock
//! ```

mod clock;
mod runner;
mod signal;

pub use clock::{Clock, SystemClock};
pub use runner::{AnimationConfig, AnimationLoop, LoopState};
pub use signal::StopSignal;
