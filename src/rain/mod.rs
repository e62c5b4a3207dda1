//! Rain module: the animation state and how it becomes a frame.
//!
//! - [`CharacterSource`]: random glyphs from a fixed alphabet
//! - [`Column`] / [`ResetPolicy`]: one falling trail and its respawn ranges
//! - [`ColumnField`]: all columns, advanced once per tick
//! - [`FrameCompositor`]: field + glyphs -> [`Frame`](crate::Frame)

mod column;
mod compositor;
mod field;
mod glyphs;

pub use column::{Column, ResetPolicy};
pub use compositor::{FrameCompositor, Palette};
pub use field::ColumnField;
pub use glyphs::{CharacterSource, GLYPHS};
