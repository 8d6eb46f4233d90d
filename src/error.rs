//! Error types for input parsing, validation and session persistence

use thiserror::Error;

/// Errors raised while validating inputs or assembling a projection
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Field '{field}' is not a number: {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("Field '{field}' is invalid: {reason}")]
    Degenerate { field: &'static str, reason: String },

    #[error("Derived value '{field}' is not finite")]
    NonFinite { field: &'static str },
}

impl ProjectionError {
    pub fn degenerate(field: &'static str, reason: impl Into<String>) -> Self {
        ProjectionError::Degenerate {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ProjectionError::Parse { field, .. }
            | ProjectionError::Degenerate { field, .. }
            | ProjectionError::NonFinite { field } => field,
        }
    }
}

/// Errors reading or writing a saved session file
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported session version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
