//! Error types for record loading.

use thiserror::Error;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading a record file
#[derive(Debug, Error)]
pub enum DataError {
    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// No `name = {...}` assignment in the file
    #[error("Could not find dictionary assignment in {0}")]
    MissingAssignment(String),

    /// The literal could not be evaluated
    #[error("Invalid literal at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The literal evaluated to something other than a mapping
    #[error("Expected a mapping, found {0}")]
    NotAMapping(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
