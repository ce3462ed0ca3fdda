//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Input file with an unrecognised extension.
    #[error("Unsupported input file: {0}. Use .json or .csv.")]
    UnsupportedInput(String),

    /// Input file that could not be read as the expected records.
    #[error("Cannot read {path}: {message}")]
    InvalidInput {
        /// File that failed.
        path: String,
        /// Parser message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
