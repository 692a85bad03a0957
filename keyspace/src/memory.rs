//! In-memory reference backend.

use std::collections::BTreeMap;
use std::ops::RangeBounds;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::batch::coalesce;
use crate::error::{KeyspaceError, KeyspaceResult};
use crate::iter::{EntryIterator, RangeIterator};
use crate::keyspace::{Keyspace, KeyspaceRead};
use crate::model::{Direction, Entry, Operation, RangeOptions};

/// In-memory implementation of the [`Keyspace`] trait using a `BTreeMap`.
///
/// All data lives in process memory and is lost when the keyspace is
/// dropped; useful for tests and for callers that need no durability.
/// Writes take the write lock once per call, which makes point operations
/// and batches linearizable and batches atomic. Range reads materialize
/// their entries under the read lock and release it before returning, so
/// live cursors never block writers.
pub struct InMemoryKeyspace {
    data: RwLock<BTreeMap<Bytes, Bytes>>,
}

impl InMemoryKeyspace {
    /// Creates an empty in-memory keyspace.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryKeyspace {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyspaceRead for InMemoryKeyspace {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn get(&self, key: Bytes) -> KeyspaceResult<Bytes> {
        let data = self
            .data
            .read()
            .map_err(|e| KeyspaceError::Internal(format!("failed to acquire read lock: {}", e)))?;

        match data.get(&key) {
            Some(value) => Ok(value.clone()),
            None => Err(KeyspaceError::NotFound),
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn read_range(&self, options: RangeOptions) -> KeyspaceResult<RangeIterator> {
        let bounds = options.bounds();
        let entries: Vec<Entry> = if bounds.is_empty() {
            // BTreeMap::range panics on inverted bounds, and nothing can
            // match anyway
            Vec::new()
        } else {
            let data = self.data.read().map_err(|e| {
                KeyspaceError::Internal(format!("failed to acquire read lock: {}", e))
            })?;

            let selected = data
                .range((bounds.start_bound().cloned(), bounds.end_bound().cloned()))
                .map(|(k, v)| Entry::new(k.clone(), v.clone()));
            match options.direction() {
                Direction::Forward => selected.collect(),
                Direction::Reverse => selected.rev().collect(),
            }
        };

        Ok(RangeIterator::new(Box::new(MemoryIterator { entries, index: 0 }), options.limit).await)
    }
}

struct MemoryIterator {
    entries: Vec<Entry>,
    index: usize,
}

#[async_trait]
impl EntryIterator for MemoryIterator {
    async fn next(&mut self) -> KeyspaceResult<Option<Entry>> {
        if self.index >= self.entries.len() {
            Ok(None)
        } else {
            let entry = self.entries[self.index].clone();
            self.index += 1;
            Ok(Some(entry))
        }
    }
}

#[async_trait]
impl Keyspace for InMemoryKeyspace {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn put(&self, key: Bytes, value: Bytes) -> KeyspaceResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| KeyspaceError::Internal(format!("failed to acquire write lock: {}", e)))?;

        data.insert(key, value);
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn delete(&self, key: Bytes) -> KeyspaceResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| KeyspaceError::Internal(format!("failed to acquire write lock: {}", e)))?;

        data.remove(&key);
        Ok(())
    }

    /// Applies the batch under a single write lock acquisition, so the
    /// net effect becomes visible as one indivisible change.
    #[tracing::instrument(level = "trace", skip_all)]
    async fn batch(&self, ops: Vec<Operation>) -> KeyspaceResult<()> {
        if ops.is_empty() {
            return Ok(());
        }

        let resolved = coalesce(ops);

        let mut data = self
            .data
            .write()
            .map_err(|e| KeyspaceError::Batch(format!("failed to acquire write lock: {}", e)))?;

        for (key, slot) in resolved {
            match slot {
                Some(value) => {
                    data.insert(key, value);
                }
                None => {
                    data.remove(&key);
                }
            }
        }

        Ok(())
    }

    async fn close(&self) -> KeyspaceResult<()> {
        // Nothing to release for the in-memory backend
        Ok(())
    }
}

/// Injected failure that fires either once or on every call.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Clone)]
enum Failure {
    /// Error is returned once, then automatically cleared.
    Once(KeyspaceError),
    /// Error is returned on every subsequent call until the slot is
    /// overwritten.
    Persistent(KeyspaceError),
}

#[cfg(any(test, feature = "test-utils"))]
type FailSlot = arc_swap::ArcSwap<Option<Failure>>;

/// Checks a [`FailSlot`] and returns an error if one is set.
///
/// For [`Failure::Once`] the slot is atomically swapped to `None` so the
/// error fires exactly once. For [`Failure::Persistent`] the slot is left
/// unchanged.
#[cfg(any(test, feature = "test-utils"))]
fn check_failure(slot: &FailSlot) -> KeyspaceResult<()> {
    let guard = slot.load();
    match guard.as_ref() {
        None => Ok(()),
        Some(Failure::Persistent(err)) => Err(err.clone()),
        Some(Failure::Once(_)) => {
            // Swap to None; if another thread raced us, one of them gets
            // the error and the others pass through
            let prev = slot.swap(std::sync::Arc::new(None));
            match prev.as_ref() {
                Some(Failure::Once(err)) => Err(err.clone()),
                _ => Ok(()),
            }
        }
    }
}

/// A keyspace wrapper that delegates to an inner [`Keyspace`] but can
/// inject failures into any operation on demand.
///
/// Each failure slot is controlled by a lock-free
/// [`ArcSwap`](arc_swap::ArcSwap), so the wrapper introduces no
/// synchronisation that could mask concurrency bugs in the code under
/// test. Failures can be *persistent* (returned on every call) or *once*
/// (returned on the next call, then automatically cleared).
///
/// Gated behind the `test-utils` feature.
///
/// # Example
///
/// ```ignore
/// let inner = Arc::new(InMemoryKeyspace::new());
/// let ks = FailingKeyspace::wrap(inner);
/// ks.fail_batch(KeyspaceError::Batch("disk full".into()));
/// // every batch call now returns Err(...), leaving the inner keyspace
/// // untouched
/// ```
#[cfg(any(test, feature = "test-utils"))]
pub struct FailingKeyspace {
    inner: std::sync::Arc<dyn Keyspace>,
    fail_get: FailSlot,
    fail_put: FailSlot,
    fail_delete: FailSlot,
    fail_batch: FailSlot,
    fail_read_range: FailSlot,
}

#[cfg(any(test, feature = "test-utils"))]
impl FailingKeyspace {
    /// Wraps an existing keyspace, with all failure injections initially
    /// `None`.
    pub fn wrap(inner: std::sync::Arc<dyn Keyspace>) -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self {
            inner,
            fail_get: arc_swap::ArcSwap::from_pointee(None),
            fail_put: arc_swap::ArcSwap::from_pointee(None),
            fail_delete: arc_swap::ArcSwap::from_pointee(None),
            fail_batch: arc_swap::ArcSwap::from_pointee(None),
            fail_read_range: arc_swap::ArcSwap::from_pointee(None),
        })
    }

    /// Makes `get` return the given error on every subsequent call.
    pub fn fail_get(&self, err: KeyspaceError) {
        self.fail_get.store(std::sync::Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `get` return the given error on the next call only.
    pub fn fail_get_once(&self, err: KeyspaceError) {
        self.fail_get.store(std::sync::Arc::new(Some(Failure::Once(err))));
    }

    /// Makes `put` return the given error on every subsequent call.
    pub fn fail_put(&self, err: KeyspaceError) {
        self.fail_put.store(std::sync::Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `put` return the given error on the next call only.
    pub fn fail_put_once(&self, err: KeyspaceError) {
        self.fail_put.store(std::sync::Arc::new(Some(Failure::Once(err))));
    }

    /// Makes `delete` return the given error on every subsequent call.
    pub fn fail_delete(&self, err: KeyspaceError) {
        self.fail_delete.store(std::sync::Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `delete` return the given error on the next call only.
    pub fn fail_delete_once(&self, err: KeyspaceError) {
        self.fail_delete.store(std::sync::Arc::new(Some(Failure::Once(err))));
    }

    /// Makes `batch` return the given error on every subsequent call.
    pub fn fail_batch(&self, err: KeyspaceError) {
        self.fail_batch.store(std::sync::Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `batch` return the given error on the next call only.
    pub fn fail_batch_once(&self, err: KeyspaceError) {
        self.fail_batch.store(std::sync::Arc::new(Some(Failure::Once(err))));
    }

    /// Makes `read_range` return the given error on every subsequent call.
    pub fn fail_read_range(&self, err: KeyspaceError) {
        self.fail_read_range.store(std::sync::Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `read_range` return the given error on the next call only.
    pub fn fail_read_range_once(&self, err: KeyspaceError) {
        self.fail_read_range.store(std::sync::Arc::new(Some(Failure::Once(err))));
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl KeyspaceRead for FailingKeyspace {
    async fn get(&self, key: Bytes) -> KeyspaceResult<Bytes> {
        check_failure(&self.fail_get)?;
        self.inner.get(key).await
    }

    async fn read_range(&self, options: RangeOptions) -> KeyspaceResult<RangeIterator> {
        check_failure(&self.fail_read_range)?;
        self.inner.read_range(options).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Keyspace for FailingKeyspace {
    async fn put(&self, key: Bytes, value: Bytes) -> KeyspaceResult<()> {
        check_failure(&self.fail_put)?;
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: Bytes) -> KeyspaceResult<()> {
        check_failure(&self.fail_delete)?;
        self.inner.delete(key).await
    }

    async fn batch(&self, ops: Vec<Operation>) -> KeyspaceResult<()> {
        check_failure(&self.fail_batch)?;
        self.inner.batch(ops).await
    }

    async fn close(&self) -> KeyspaceResult<()> {
        self.inner.close().await
    }
}
