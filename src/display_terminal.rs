//! Stdout-backed displays
//!
//! `TerminalDisplay` talks to an interactive terminal and uses crossterm for
//! screen clearing. `PlainDisplay` is used when stdout is a pipe or a file,
//! where escape sequences would only corrupt the transcript.

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use log::debug;
use std::io::{self, Stdout, Write};

use crate::display_trait::{AdventureDisplay, DisplayError};

/// Interactive terminal display
pub struct TerminalDisplay {
    stdout: Stdout,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        TerminalDisplay {
            stdout: io::stdout(),
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl AdventureDisplay for TerminalDisplay {
    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        self.stdout.write_all(text.as_bytes())?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        debug!("Terminal: clear_screen");
        execute!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.stdout.flush()?;
        Ok(())
    }
}

/// Display for redirected output
pub struct PlainDisplay {
    stdout: Stdout,
}

impl PlainDisplay {
    pub fn new() -> Self {
        PlainDisplay {
            stdout: io::stdout(),
        }
    }
}

impl Default for PlainDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl AdventureDisplay for PlainDisplay {
    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        self.stdout.write_all(text.as_bytes())?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.stdout.flush()?;
        Ok(())
    }
}
