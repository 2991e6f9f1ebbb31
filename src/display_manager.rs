//! Display manager that creates the appropriate display implementation
//!
//! Chooses between the crossterm terminal display and the plain stdout
//! display based on the configured mode and what the environment supports.

use crate::display_terminal::{PlainDisplay, TerminalDisplay};
use crate::display_trait::AdventureDisplay;
use log::debug;
use serde::{Deserialize, Serialize};

/// Display mode selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Terminal display when stdout is a tty, plain otherwise
    #[default]
    Auto,
    /// Force the crossterm terminal display
    Terminal,
    /// Plain text, no escape sequences
    Plain,
}

impl DisplayMode {
    /// Parse the `DISPLAY_MODE` environment value
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(DisplayMode::Auto),
            "terminal" => Some(DisplayMode::Terminal),
            "plain" | "headless" => Some(DisplayMode::Plain),
            _ => None,
        }
    }
}

/// Display environment capabilities
#[derive(Debug)]
pub struct DisplayCapabilities {
    pub has_terminal: bool,
}

impl DisplayCapabilities {
    /// Detect current environment capabilities
    pub fn detect() -> Self {
        Self {
            has_terminal: atty::is(atty::Stream::Stdout),
        }
    }
}

/// Create a display implementation for the given mode
pub fn create_display(mode: DisplayMode) -> Box<dyn AdventureDisplay> {
    let caps = DisplayCapabilities::detect();
    debug!("Display capabilities: {:?}, mode {:?}", caps, mode);

    match mode {
        DisplayMode::Terminal => Box::new(TerminalDisplay::new()),
        DisplayMode::Plain => Box::new(PlainDisplay::new()),
        DisplayMode::Auto if caps.has_terminal => Box::new(TerminalDisplay::new()),
        DisplayMode::Auto => Box::new(PlainDisplay::new()),
    }
}
