use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Enter the alternate screen in raw mode; a partial setup is undone on error.
pub fn init() -> io::Result<Tui> {
    restore_on_error(
        || {
            execute!(io::stdout(), EnterAlternateScreen)?;
            enable_raw_mode()?;
            Terminal::new(CrosstermBackend::new(io::stdout()))
        },
        restore,
    )
}

fn restore_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    setup().inspect_err(|_| {
        let _ = undo();
    })
}

pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restores the terminal when dropped, including on early returns and panics.
pub struct RestoreGuard;

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}
