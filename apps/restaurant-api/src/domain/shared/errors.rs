//! Domain errors for the restaurant API.

use std::fmt;

use thiserror::Error;

/// Domain-level errors raised while validating input.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was absent from the input.
    MissingField {
        /// Field name as seen by clients.
        field: String,
    },

    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// A partial update carried no fields.
    EmptyPatch,
}

impl DomainError {
    /// Shorthand for [`DomainError::MissingField`].
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Shorthand for [`DomainError::InvalidValue`].
    #[must_use]
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// The offending field, if the error concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::InvalidValue { field, .. } => Some(field),
            Self::EmptyPatch => None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field '{field}'"),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::EmptyPatch => write!(f, "no fields to update"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Errors surfaced by repository ports.
///
/// Adapters classify their driver errors into these variants so the
/// application layer can map them without knowing the driver.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (pool timeout, closed pool, I/O).
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Query error: {0}")]
    Query(String),

    /// A foreign-key, unique, not-null or check constraint rejected a write.
    #[error("Data integrity error: {0}")]
    Integrity(String),

    /// A stored value could not be decoded into its domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing column in a result row.
    #[error("Missing field: {0}")]
    MissingField(String),
}
