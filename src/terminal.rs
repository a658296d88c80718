use crate::logger;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Raw mode plus the alternate screen, undone when dropped. Restoring is
/// best-effort: every step runs even if an earlier one fails.
pub struct TerminalGuard<W: Write> {
    writer: W,
    active: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(writer: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            writer,
            active: true,
        };
        // On failure the guard is dropped here and raw mode is undone.
        execute!(guard.writer, EnterAlternateScreen)?;
        Ok(guard)
    }

    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Err(e) = disable_raw_mode() {
            logger::log(&format!("Failed to disable raw mode: {}", e));
        }
        if let Err(e) = execute!(self.writer, LeaveAlternateScreen, Show) {
            logger::log(&format!("Failed to leave alternate screen: {}", e));
        }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        self.restore();
    }
}
