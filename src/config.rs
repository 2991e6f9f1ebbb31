//! Interpreter configuration
//!
//! Settings come from a TOML file named by `SAGA_CONFIG`. Every field has a
//! default, so a missing file or a partial one is fine:
//!
//! ```toml
//! orig_condition = "original-location"
//! show_intro = false
//! delay_ms = 0
//! seed = 1234
//! display = "plain"
//! ```

use std::env;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::condition::OrigMode;
use crate::display_manager::DisplayMode;
use crate::error::{AdventureError, Result};

pub const CONFIG_ENV: &str = "SAGA_CONFIG";
pub const DISPLAY_MODE_ENV: &str = "DISPLAY_MODE";

const DEFAULT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// How ORIG and -ORIG are evaluated
    pub orig_condition: OrigMode,
    /// Show the welcome banner and wait for enter before the first room
    pub show_intro: bool,
    /// Let CLS and the banner clear the screen
    pub clear_screen: bool,
    /// Pause length for the DELAY command
    pub delay_ms: u64,
    /// Fixed seed for automatic actions, clock seeded when absent
    pub seed: Option<u64>,
    pub display: DisplayMode,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            orig_condition: OrigMode::default(),
            show_intro: true,
            clear_screen: true,
            delay_ms: DEFAULT_DELAY_MS,
            seed: None,
            display: DisplayMode::default(),
        }
    }
}

impl InterpreterConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| AdventureError::Config(format!("failed to parse config TOML: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AdventureError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Configuration for this process: the `SAGA_CONFIG` file if set, with
    /// `DISPLAY_MODE` taking precedence for the display
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => {
                debug!("Reading configuration from {:?}", path);
                Self::load(Path::new(&path))?
            }
            None => Self::default(),
        };

        if let Ok(value) = env::var(DISPLAY_MODE_ENV) {
            match DisplayMode::from_env_value(&value) {
                Some(mode) => config.display = mode,
                None => warn!("Ignoring unknown {} '{}'", DISPLAY_MODE_ENV, value),
            }
        }
        Ok(config)
    }

    /// Quiet, deterministic settings for scripted runs
    pub fn scripted(seed: u64) -> Self {
        InterpreterConfig {
            show_intro: false,
            clear_screen: false,
            delay_ms: 0,
            seed: Some(seed),
            display: DisplayMode::Plain,
            ..Self::default()
        }
    }
}
