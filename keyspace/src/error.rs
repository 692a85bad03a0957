//! Error types for keyspace operations.

/// Error type for keyspace operations.
///
/// Every variant except [`NotFound`](KeyspaceError::NotFound) is
/// backend-opaque: callers may display or propagate it, but only the
/// `NotFound` sentinel is guaranteed to mean the same thing across
/// backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyspaceError {
    /// Get on an absent key. Expected and recoverable.
    NotFound,

    /// A batch could not be committed. The keyspace is left unchanged.
    Batch(String),

    /// A backend error encountered mid-iteration. Latched on the cursor
    /// that produced it.
    Iterator(String),

    /// Any other I/O or resource error from the backend.
    Backend(String),

    /// Internal errors indicating bugs or invariant violations.
    Internal(String),
}

impl std::error::Error for KeyspaceError {}

impl std::fmt::Display for KeyspaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyspaceError::NotFound => write!(f, "key not found"),
            KeyspaceError::Batch(msg) => write!(f, "Batch error: {}", msg),
            KeyspaceError::Iterator(msg) => write!(f, "Iterator error: {}", msg),
            KeyspaceError::Backend(msg) => write!(f, "Backend error: {}", msg),
            KeyspaceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl KeyspaceError {
    /// True when the error is the `NotFound` sentinel, so callers can
    /// branch on "absent" without inspecting backend detail.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KeyspaceError::NotFound)
    }

    /// Converts a backend error into `KeyspaceError::Backend`.
    pub fn from_backend(e: impl std::fmt::Display) -> Self {
        KeyspaceError::Backend(e.to_string())
    }
}

/// Result type alias for keyspace operations.
pub type KeyspaceResult<T> = std::result::Result<T, KeyspaceError>;
