//! Message types sent from the input actor to the animation loop.

/// Control events drained by the animation loop between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// The user asked to quit.
    Quit,
}
