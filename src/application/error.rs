//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no hierarchy found in document")]
    HierarchyNotFound,

    #[error("hierarchy generation not finished (status: {status})")]
    HierarchyNotReady { status: String },

    #[error("hierarchy generation returned unparsed output")]
    UnparsedHierarchy,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
