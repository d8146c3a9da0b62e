//! Error types shared by the store adapters and the book service.

use thiserror::Error;

/// Result type for service and store operations.
pub type BookResult<T> = Result<T, BookError>;

#[derive(Debug, Error)]
pub enum BookError {
    /// The database refused the statement (constraint or type violation).
    /// Carries the driver's message verbatim so it can be shown to the client.
    #[error("{0}")]
    Rejected(String),

    /// Connectivity, pool or protocol failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The request body could not be decoded into a book.
    #[error("{0}")]
    InvalidPayload(String),

    #[error("unsupported database url: {0}")]
    UnsupportedDatabase(String),
}

impl From<sqlx::Error> for BookError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => BookError::Rejected(db.message().to_string()),
            other => BookError::Database(other),
        }
    }
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        BookError::InvalidPayload(err.to_string())
    }
}
