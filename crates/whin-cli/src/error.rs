//! CLI error types.

use std::io;

use thiserror::Error;

/// Reasons no message could be read.
#[derive(Debug, Error)]
pub enum InputError {
    /// No flag, no environment variable and an interactive stdin.
    #[error("No input provided")]
    NoInput,

    /// `MESSAGE_JSON` is set but is not valid UTF-8.
    #[error("MESSAGE_JSON is not valid UTF-8")]
    InvalidEnv,

    /// Stdin was piped but held only whitespace.
    #[error("Empty input from stdin")]
    EmptyStdin,

    /// Stdin could not be read.
    #[error("Error reading stdin: {0}")]
    Io(#[from] io::Error),
}

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
