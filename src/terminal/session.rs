//! Terminal session: puts the terminal into animation mode and back.

use crate::error::{RainError, Result};
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use std::io;
use tracing::debug;

/// Guard owning the terminal's animation mode.
///
/// Entering switches to raw mode and the alternate screen and hides the
/// cursor. Dropping the guard undoes all of it, including after a failed
/// [`TerminalSession::enter`].
#[derive(Debug)]
pub struct TerminalSession {
    width: u16,
    height: u16,
}

impl TerminalSession {
    /// Acquire the terminal attached to stdout.
    ///
    /// Fails with [`RainError::Initialization`] when stdout is not a
    /// terminal, its size cannot be read or is zero, or a mode switch fails.
    pub fn enter() -> Result<Self> {
        if !io::stdout().is_tty() {
            return Err(RainError::init("stdout is not attached to a terminal"));
        }

        let (width, height) = terminal::size().map_err(RainError::Initialization)?;
        if width == 0 || height == 0 {
            return Err(RainError::init("terminal reports a zero size"));
        }

        terminal::enable_raw_mode().map_err(RainError::Initialization)?;
        // From here on, Drop restores whatever was switched.
        let session = Self { width, height };

        execute!(
            io::stdout(),
            EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
        .map_err(RainError::Initialization)?;

        debug!(width, height, "terminal session entered");
        Ok(session)
    }

    /// Terminal width in columns at entry.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height in rows at entry.
    pub const fn height(&self) -> u16 {
        self.height
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Restore terminal state
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
