//! Raw-mode terminal session for the interactive quiz.

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::panic;
use std::sync::Once;

use crossterm::{
    cursor::Show,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type QuizTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_RESTORE: Once = Once::new();

/// The terminal in raw mode on the alternate screen. Dropping the session
/// hands the terminal back, including on early returns.
pub struct TerminalSession {
    terminal: QuizTerminal,
    restored: bool,
}

impl TerminalSession {
    pub fn start() -> io::Result<Self> {
        PANIC_RESTORE.call_once(install_panic_restore);
        enable_raw_mode()?;
        if let Err(err) = io::stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave();
                return Err(err);
            }
        };
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Restore the terminal now and report failures, which `Drop` cannot.
    pub fn finish(mut self) -> io::Result<()> {
        self.restored = true;
        leave()
    }
}

impl Deref for TerminalSession {
    type Target = QuizTerminal;

    fn deref(&self) -> &QuizTerminal {
        &self.terminal
    }
}

impl DerefMut for TerminalSession {
    fn deref_mut(&mut self) -> &mut QuizTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if !self.restored {
            let _ = leave();
        }
    }
}

fn leave() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(Show)?;
    Ok(())
}

/// Leave raw mode before the default hook prints, so panics stay readable.
fn install_panic_restore() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave();
        previous(info);
    }));
}
