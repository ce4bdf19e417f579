use std::io::{self, IsTerminal};

/// Raw-mode control for the controlling terminal.
///
/// `enter_raw_mode` saves the current mode; `restore_mode` puts the saved
/// mode back. Both may be called from the interrupt handler thread.
pub trait Terminal: Send + Sync {
    fn enter_raw_mode(&self) -> io::Result<()>;
    fn restore_mode(&self) -> io::Result<()>;
}

/// [`Terminal`] backed by crossterm.
///
/// crossterm keeps the original termios internally and applies
/// `cfmakeraw`, which also clears `ISIG`: Ctrl+C arrives as byte `0x03`
/// rather than raising `SIGINT`. Keys are read from stdin, so raw mode is
/// refused when stdin is not a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl Terminal for CrosstermTerminal {
    fn enter_raw_mode(&self) -> io::Result<()> {
        if !io::stdin().is_terminal() {
            return Err(io::Error::other("stdin is not a terminal"));
        }
        crossterm::terminal::enable_raw_mode()
    }

    fn restore_mode(&self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }
}
