//! Line-based player input
//!
//! The interpreter only ever reads whole lines: commands at the prompt, the
//! save file name for SAVE and LOAD GAME, and the keypress after the intro.

use crate::error::Result;
use log::debug;
use std::collections::VecDeque;
use std::io;

/// Source of player input lines
pub trait CommandInput {
    /// Read one line without its line terminator. `None` means the input is
    /// exhausted and the game should end.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Reads lines from standard input
pub struct StdinInput {
    buffer: String,
}

impl StdinInput {
    pub fn new() -> Self {
        StdinInput {
            buffer: String::new(),
        }
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInput for StdinInput {
    fn read_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = io::stdin().read_line(&mut self.buffer)?;

        // A closed pipe must end the game rather than feed empty commands forever
        if bytes_read == 0 {
            debug!("Input: EOF detected (stdin closed)");
            return Ok(None);
        }

        Ok(Some(strip_line_ending(&self.buffer).to_string()))
    }
}

/// Replays a fixed list of lines
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }
}

impl CommandInput for ScriptedInput {
    fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.lines.pop_front();
        debug!("Scripted input: {:?}", line);
        Ok(line)
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
