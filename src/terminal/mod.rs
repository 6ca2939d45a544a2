//! Terminal: Raw-mode lifecycle and ANSI output.

mod output;

pub use output::{OutputBuffer, Rgb};

use crossterm::{cursor, execute, terminal};
use std::io;

/// Puts the terminal in raw mode with a hidden cursor and restores it on drop.
///
/// Raw mode delivers keys one at a time without echo. Restoring happens in
/// `Drop`, so the terminal is usable again even when the game ends early.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enter raw mode and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched to raw mode.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };

        let mut stdout = io::stdout();
        execute!(stdout, terminal::Clear(terminal::ClearType::All), cursor::Hide)?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
