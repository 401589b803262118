//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while resolving an address to a symbol
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to run symbol resolver `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Symbol resolver exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Symbol resolver returned no output for offset {offset:#x}")]
    EmptyOutput { offset: u64 },
}

/// Errors that can occur during trace parsing
///
/// Any of these aborts the parse of the current file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unknown symbol format on line {line}: {text}")]
    Format { line: usize, text: String },

    #[error("Unknown micro op format on line {line}: {text}")]
    MicroOpFormat { line: usize, text: String },

    #[error("Invalid {field} on line {line}: {value}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Symbol lookup failed: {0}")]
    Symbol(#[from] ResolveError),
}

/// Errors that can occur while aggregating runs
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Cannot aggregate zero runs")]
    NoRuns,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
