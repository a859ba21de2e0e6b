//! CLI support for conditional
//!
//! Provides programmatic access to the `check` command and the interactive
//! read-eval-print loop, so they can be embedded in other tools.

mod check;
mod repl;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use repl::{PROMPT, start};

use std::io;

use thiserror::Error;

use crate::convert::ConvertError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// One or more syntax errors
    #[error("Parse error: {}", .0.join("; "))]
    Parse(Vec<String>),

    /// The condition evaluated to an error value
    #[error("Evaluation error: {0}")]
    Eval(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scope: {0}")]
    Convert(#[from] ConvertError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
