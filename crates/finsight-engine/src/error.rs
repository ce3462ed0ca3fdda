//! Error types for the calculators.
//!
//! Only malformed input is an error. Degenerate input (a zero interest rate,
//! zero assets) and short history are handled by explicit branches and never
//! reach this type.

use finsight_core::CoreError;
use thiserror::Error;

/// A specialized Result type for calculator operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the calculators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An input failed validation before any computation ran.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An intermediate value left the representable decimal range.
    #[error("arithmetic overflow in {operation}")]
    Arithmetic {
        /// The operation that overflowed.
        operation: String,
    },

    /// A core value could not be constructed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an arithmetic overflow error.
    #[must_use]
    pub fn arithmetic(operation: impl Into<String>) -> Self {
        Self::Arithmetic {
            operation: operation.into(),
        }
    }

    /// Returns the offending field for input errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}
