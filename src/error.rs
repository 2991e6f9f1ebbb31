//! Error types for the adventure interpreter
//!
//! Loader problems are fatal. Everything raised while a game is running is
//! either reported to the player and recovered from by the interpreter, or
//! signals a broken invariant that load-time validation should have caught.

use std::io;

use thiserror::Error;

use crate::display_trait::DisplayError;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AdventureError>;

#[derive(Debug, Error)]
pub enum AdventureError {
    /// The database text does not follow the packed format
    #[error("data format error at line {line}: {message}")]
    DataFormat { line: usize, message: String },

    /// The database parsed but refers to things that do not exist
    #[error("invalid database: {0}")]
    InvalidDatabase(String),

    /// A table lookup fell outside the loaded tables
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A command asked for more parameters than the condition slots hold
    #[error("action {action} ran out of command parameters")]
    ParameterExhausted { action: usize },

    /// Save file written by a different database version
    #[error("save file version {found} does not match database version {expected}")]
    SaveVersionMismatch { expected: i32, found: i64 },

    /// Save file written for a different adventure
    #[error("save file adventure {found} does not match database adventure {expected}")]
    SaveAdventureMismatch { expected: i32, found: i64 },

    /// Save file is truncated or contains something other than integers
    #[error("invalid save file: {0}")]
    InvalidSave(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AdventureError {
    /// Build a data format error for the given database line
    pub fn data_format(line: usize, message: impl Into<String>) -> Self {
        AdventureError::DataFormat {
            line,
            message: message.into(),
        }
    }

    /// Build an invalid database error
    pub fn invalid_database(message: impl Into<String>) -> Self {
        AdventureError::InvalidDatabase(message.into())
    }

    /// True for errors raised while reading or validating a database
    pub fn is_data_format(&self) -> bool {
        matches!(
            self,
            AdventureError::DataFormat { .. } | AdventureError::InvalidDatabase(_)
        )
    }

    /// Build an invalid reference error
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        AdventureError::InvalidReference(message.into())
    }
}
