//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid hierarchy input.
/// Flattening itself is total and never produces one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("hierarchy node at {path} is not an object")]
    NotAnObject { path: String },

    #[error("hierarchy node at {path} has no name")]
    MissingName { path: String },

    #[error("hierarchy node at {path} has non-list children")]
    InvalidChildren { path: String },

    #[error("invalid field '{field}' at {path}: {message}")]
    InvalidField {
        path: String,
        field: &'static str,
        message: String,
    },

    #[error("malformed CSV cell: {0}")]
    MalformedCell(String),
}
