pub mod action;
pub mod command;
pub mod condition;
pub mod config;
pub mod database;
pub mod display_headless;
pub mod display_manager;
pub mod display_terminal;
pub mod display_trait;
pub mod error;
pub mod executor;
pub mod header;
pub mod input;
pub mod interpreter;
pub mod lexer;
pub mod prng;
pub mod save;
pub mod state;
pub mod vocabulary;

#[cfg(test)]
pub mod test_utils;

pub use config::InterpreterConfig;
pub use database::Database;
pub use error::{AdventureError, Result};
pub use interpreter::{GameOutcome, Interpreter};
