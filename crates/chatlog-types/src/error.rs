use thiserror::Error;

/// Errors surfaced by chat, message, and attachment operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Malformed identifier or empty required text. Never retried.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    /// A stored payload could not be decoded.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors from repository operations (used by trait definitions in chatlog-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
