//! Batch coalescing.
//!
//! A batch is an ordered sequence of operations with last-write-wins
//! conflict resolution by position: the operation appearing later in the
//! sequence determines the final state for its key. Folding the sequence
//! into a per-key final-state map up front decouples what wins from how
//! many physical writes a backend issues.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::model::Operation;

/// Folds an ordered operation sequence into the per-key final state.
///
/// A `Some(value)` slot means the key ends up present with `value`, a
/// `None` slot means it ends up deleted. Later operations override
/// earlier ones targeting the same key.
pub fn coalesce(ops: impl IntoIterator<Item = Operation>) -> BTreeMap<Bytes, Option<Bytes>> {
    let mut state = BTreeMap::new();
    for op in ops {
        match op {
            Operation::Put(entry) => {
                state.insert(entry.key, Some(entry.value));
            }
            Operation::Delete(key) => {
                state.insert(key, None);
            }
        }
    }
    state
}
