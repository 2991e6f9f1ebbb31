//! Headless display implementation for testing and scripted runs
//!
//! Collects all output in memory. The transcript handle can be cloned before
//! the display is boxed and handed to the interpreter, so tests can inspect
//! what the player would have seen.

use crate::display_trait::{AdventureDisplay, DisplayError};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared view of everything a headless display has printed
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    text: Rc<RefCell<String>>,
}

impl Transcript {
    /// All output so far
    pub fn contents(&self) -> String {
        self.text.borrow().clone()
    }

    /// Output split into lines
    pub fn lines(&self) -> Vec<String> {
        self.text.borrow().lines().map(str::to_string).collect()
    }

    /// Take all output so far and reset the transcript
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.text.borrow_mut())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text.borrow().contains(needle)
    }
}

#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    transcript: Transcript,
    clears: usize,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto this display's output
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }

    /// Number of times the screen was cleared
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl AdventureDisplay for HeadlessDisplay {
    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        self.transcript.text.borrow_mut().push_str(text);
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        // Keep the transcript so tests can still see earlier output
        debug!("Headless: clear_screen");
        self.clears += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_transcript_sees_printed_text() {
        let mut display = HeadlessDisplay::new();
        let transcript = display.transcript();
        display.print("I'm in a forest").unwrap();
        display.print_line(".").unwrap();
        display.print_line("Tell me what to do").unwrap();
        assert_eq!(
            transcript.lines(),
            vec!["I'm in a forest.", "Tell me what to do"]
        );
    }

    #[test]
    fn test_clear_screen_keeps_transcript() {
        let mut display = HeadlessDisplay::new();
        let transcript = display.transcript();
        display.print_line("Welcome").unwrap();
        display.clear_screen().unwrap();
        assert_eq!(display.clear_count(), 1);
        assert!(transcript.contains("Welcome"));
        assert_eq!(transcript.take(), "Welcome\n");
        assert!(transcript.contents().is_empty());
    }
}
