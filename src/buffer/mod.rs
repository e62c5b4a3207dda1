//! Buffer module: the grid data structures handed from composition to display.
//!
//! This module contains:
//! - [`Cell`]: one symbol and its pen
//! - [`Frame`]: a complete grid of cells
//! - [`Rgb`]: True-color representation
//! - [`Modifiers`]: Text style bitflags

mod cell;
mod frame;

pub use cell::{Cell, Modifiers, Rgb};
pub use frame::Frame;
