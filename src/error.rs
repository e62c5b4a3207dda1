//! Error types shared by the animation core and the terminal glue.

use std::io;
use thiserror::Error;

/// Errors produced while setting up or running the animation.
#[derive(Debug, Error)]
pub enum RainError {
    /// The terminal could not be acquired or configured.
    ///
    /// Fatal at startup: the environment will not change mid-run.
    #[error("terminal initialization failed: {0}")]
    Initialization(#[source] io::Error),

    /// Writing or flushing a frame to the terminal failed.
    #[error("failed to present frame: {0}")]
    Presentation(#[source] io::Error),

    /// A grid was requested with a zero dimension.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    Dimensions {
        /// Requested width in columns.
        width: u16,
        /// Requested height in rows.
        height: u16,
    },

    /// A custom glyph alphabet was rejected.
    #[error("invalid glyph alphabet: {0}")]
    Alphabet(String),

    /// A column reset policy was rejected.
    #[error("invalid reset policy: {0}")]
    Policy(String),
}

impl RainError {
    /// Build an initialization error from a plain message.
    pub(crate) fn init(message: &str) -> Self {
        Self::Initialization(io::Error::other(message.to_string()))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = RainError> = std::result::Result<T, E>;
