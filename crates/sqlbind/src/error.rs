//! Error types for sqlbind

use thiserror::Error;

/// Result type alias for sqlbind operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for SQL construction and row decoding
#[derive(Debug, Error)]
pub enum SqlError {
    /// A value kind that cannot be serialized into SQL or converted to text
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Row decode/conversion error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Builder misuse (empty table name, no SET columns, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error propagated from the execution capability
    #[error("Execution error: {0}")]
    Execution(String),
}

impl SqlError {
    /// Create an unsupported-value error
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::UnsupportedValue(what.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is an unsupported-value error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedValue(_))
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
