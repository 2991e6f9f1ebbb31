//! Core display trait for adventure output
//!
//! Every piece of game text goes through this trait, whether it ends up on a
//! terminal, a plain pipe, or an in-memory transcript for tests.

use std::fmt;

/// Output operations the interpreter needs
pub trait AdventureDisplay {
    /// Print text without a trailing newline
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Print text followed by a newline
    fn print_line(&mut self, text: &str) -> Result<(), DisplayError> {
        self.print(text)?;
        self.print("\n")
    }

    /// Clear the entire screen (CLS opcode and intro banner)
    fn clear_screen(&mut self) -> Result<(), DisplayError>;

    /// Push buffered output to the device before blocking on input
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Display error type
#[derive(Debug, Clone)]
pub struct DisplayError {
    pub message: String,
}

impl DisplayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Display error: {}", self.message)
    }
}

impl std::error::Error for DisplayError {}

impl From<std::io::Error> for DisplayError {
    fn from(error: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", error))
    }
}
