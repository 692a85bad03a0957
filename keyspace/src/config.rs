//! Backend selection configuration.

use serde::{Deserialize, Serialize};

/// Selects the backend a keyspace is created with.
///
/// Passed to [`create_keyspace`](crate::factory::create_keyspace).
/// Additional variants (persistent, remote) plug in here without touching
/// callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyspaceConfig {
    /// Volatile in-memory backend; data is lost when the keyspace is
    /// dropped.
    #[default]
    InMemory,
}
