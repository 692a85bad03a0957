//! Data types for keyspace operations.

use std::ops::Bound::{Excluded, Included, Unbounded};

use bytes::Bytes;

use crate::bytes::{BytesRange, lex_increment};

/// A key-value entry returned by iteration.
///
/// An entry is an immutable snapshot of a single keyspace slot at read
/// time; later writes to the same key do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The key.
    pub key: Bytes,
    /// The value stored under the key.
    pub value: Bytes,
}

impl Entry {
    pub fn new(key: Bytes, value: Bytes) -> Self {
        Self { key, value }
    }
}

/// A single write operation within a batch.
///
/// Operations carry no result until applied; submitting them through
/// [`Keyspace::batch`](crate::Keyspace::batch) applies the whole sequence
/// as one atomic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert or overwrite the value for a key.
    Put(Entry),
    /// Remove a key. Deleting an absent key is a no-op.
    Delete(Bytes),
}

impl Operation {
    /// A put of `value` under `key`.
    pub fn put(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Operation::Put(Entry::new(key.into(), value.into()))
    }

    /// A delete of `key`.
    pub fn delete(key: impl Into<Bytes>) -> Self {
        Operation::Delete(key.into())
    }

    /// The key this operation targets.
    pub fn key(&self) -> &Bytes {
        match self {
            Operation::Put(entry) => &entry.key,
            Operation::Delete(key) => key,
        }
    }
}

impl From<Entry> for Operation {
    fn from(entry: Entry) -> Self {
        Operation::Put(entry)
    }
}

/// Direction of range traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ascending lexicographic key order.
    #[default]
    Forward,
    /// Descending lexicographic key order.
    Reverse,
}

/// Parameters bounding and directing a range read.
///
/// `start` and `end` are always interpreted in ascending-key terms:
/// `start` is the inclusive lower bound and `end` the exclusive upper
/// bound, whatever the traversal direction. Setting `reverse` flips only
/// the order entries are produced in, not which entries are selected.
///
/// A `limit` of zero is equivalent to no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeOptions {
    /// Inclusive lower bound, or `None` for the lowest key.
    pub start: Option<Bytes>,
    /// Exclusive upper bound, or `None` for past the highest key.
    pub end: Option<Bytes>,
    /// Maximum number of entries to produce, counted after bound
    /// filtering and direction. Zero or `None` applies no truncation.
    pub limit: Option<usize>,
    /// Produce entries in descending key order.
    pub reverse: bool,
}

impl RangeOptions {
    /// Selects the entire keyspace in ascending order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Selects all keys starting with `prefix`.
    ///
    /// The upper bound is the lexicographic successor of the prefix, or
    /// unbounded when no successor exists (all `0xFF` bytes).
    pub fn prefix(prefix: Bytes) -> Self {
        if prefix.is_empty() {
            return Self::all();
        }
        let end = lex_increment(&prefix);
        Self {
            start: Some(prefix),
            end,
            ..Self::default()
        }
    }

    /// Resolves the bounds to a [`BytesRange`] in ascending-key terms.
    pub fn bounds(&self) -> BytesRange {
        let start = match &self.start {
            Some(key) => Included(key.clone()),
            None => Unbounded,
        };
        let end = match &self.end {
            Some(key) => Excluded(key.clone()),
            None => Unbounded,
        };
        BytesRange::new(start, end)
    }

    /// Resolves the traversal direction.
    pub fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }
}
