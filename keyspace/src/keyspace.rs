//! The capability traits backends implement.
//!
//! The contract is a capability set, not a base class: every backend
//! (in-memory, persistent, remote) independently implements the same pair
//! of traits, and callers compose against `Arc<dyn Keyspace>` or the
//! narrower `Arc<dyn KeyspaceRead>`.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::KeyspaceResult;
use crate::iter::RangeIterator;
use crate::model::{Operation, RangeOptions};

/// Read operations shared by full keyspaces and read-only views.
///
/// Extracting the read half lets code that should never write be handed
/// a narrower capability.
#[async_trait]
pub trait KeyspaceRead: Send + Sync {
    /// Returns the value stored under `key`.
    ///
    /// Fails with [`KeyspaceError::NotFound`](crate::KeyspaceError::NotFound)
    /// when the key is absent. Side-effect free.
    async fn get(&self, key: Bytes) -> KeyspaceResult<Bytes>;

    /// Opens a cursor over the entries selected by `options`.
    ///
    /// The produced sequence reflects a view of the keyspace no older
    /// than the moment this call returns; whether later writes become
    /// visible to the cursor is backend-defined, but the cursor itself
    /// never duplicates or skips keys.
    async fn read_range(&self, options: RangeOptions) -> KeyspaceResult<RangeIterator>;
}

/// An ordered byte-keyed keyspace: the full capability set
/// {get, put, delete, batch, read_range}.
///
/// Implementations must be safe to share across concurrent callers.
/// Point operations and batch application are linearizable with respect
/// to each other: a reader observes either the complete pre-batch or the
/// complete post-batch state, never an interleaving.
#[async_trait]
pub trait Keyspace: KeyspaceRead {
    /// Inserts or overwrites the value for `key`.
    ///
    /// Accepts any byte sequence for key and value; repeating an
    /// identical put has no additional effect.
    async fn put(&self, key: Bytes, value: Bytes) -> KeyspaceResult<()>;

    /// Removes `key` if present. Deleting an absent key is a no-op, not
    /// a failure.
    async fn delete(&self, key: Bytes) -> KeyspaceResult<()>;

    /// Applies `ops` in sequence order as one atomic unit.
    ///
    /// Later operations override earlier ones targeting the same key.
    /// On failure the keyspace is left as if the batch was never
    /// submitted. An empty batch succeeds without effect.
    async fn batch(&self, ops: Vec<Operation>) -> KeyspaceResult<()>;

    /// Closes the keyspace, releasing backend resources.
    async fn close(&self) -> KeyspaceResult<()>;
}
