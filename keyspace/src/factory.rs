//! Factory for creating keyspace instances from configuration.

use std::sync::Arc;

use crate::config::KeyspaceConfig;
use crate::error::KeyspaceResult;
use crate::keyspace::Keyspace;
use crate::memory::InMemoryKeyspace;

/// Creates a keyspace instance for the given configuration.
///
/// Returns the backend behind the uniform [`Keyspace`] trait so callers
/// stay independent of the concrete engine.
pub async fn create_keyspace(config: &KeyspaceConfig) -> KeyspaceResult<Arc<dyn Keyspace>> {
    match config {
        KeyspaceConfig::InMemory => Ok(Arc::new(InMemoryKeyspace::new())),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::keyspace::KeyspaceRead;

    #[tokio::test]
    async fn should_create_usable_in_memory_keyspace() {
        // given
        let config = KeyspaceConfig::InMemory;

        // when
        let ks = create_keyspace(&config).await.unwrap();
        ks.put(Bytes::from("k"), Bytes::from("v")).await.unwrap();

        // then
        assert_eq!(ks.get(Bytes::from("k")).await.unwrap(), Bytes::from("v"));
    }
}
