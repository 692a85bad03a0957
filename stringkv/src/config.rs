//! Configuration options for string keyspace access.

use keyspace::KeyspaceConfig;

/// Configuration for opening a [`StringDb`](crate::StringDb).
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backend configuration for the underlying keyspace.
    pub keyspace: KeyspaceConfig,
}
