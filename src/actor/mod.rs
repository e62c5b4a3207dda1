//! Actor Model: the input thread and the messages it sends.
//!
//! ```text
//! ┌──────────────┐   ControlEvent    ┌───────────────┐
//! │ Input Thread │ ────────────────▶ │ AnimationLoop │
//! └──────────────┘                   └───────────────┘
//!        │ quit key                          ▲
//!        └────────── StopSignal ─────────────┘
//! ```

mod input;
mod messages;

pub use input::InputActor;
pub use messages::ControlEvent;
