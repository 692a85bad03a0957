//! Error types for string keyspace operations.

use keyspace::KeyspaceError;

/// Error type for string keyspace operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Get on an absent key.
    NotFound,

    /// Errors from the underlying keyspace backend.
    Storage(String),

    /// Stored bytes that are not valid UTF-8.
    Encoding(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound => write!(f, "key not found"),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
            Error::Encoding(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl Error {
    /// True when the error is the `NotFound` sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

impl From<KeyspaceError> for Error {
    fn from(err: KeyspaceError) -> Self {
        match err {
            KeyspaceError::NotFound => Error::NotFound,
            other => Error::Storage(other.to_string()),
        }
    }
}

/// Result type alias for string keyspace operations.
pub type Result<T> = std::result::Result<T, Error>;
