//! Range iteration.
//!
//! Iteration is split in two halves. Backends implement [`EntryIterator`],
//! a plain stream of entries already bound-filtered and ordered in the
//! requested direction. The public [`RangeIterator`] cursor wraps such a
//! stream and owns everything every backend must agree on: limit
//! truncation, the sticky error latch, and release of backend resources.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{KeyspaceError, KeyspaceResult};
use crate::model::Entry;

/// Iterator over backend entries.
///
/// Implementations surface mid-iteration failures as
/// [`KeyspaceError::Iterator`].
#[async_trait]
pub trait EntryIterator: Send {
    /// Returns the next entry, or `None` once the sequence is exhausted.
    async fn next(&mut self) -> KeyspaceResult<Option<Entry>>;
}

/// Cursor state. Transitions only move forward; there is no resurrection
/// from `Errored` or `Released`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Exhausted,
    Errored,
    Released,
}

/// Cursor over a resolved range read.
///
/// The cursor is primed at creation: when the range selects at least one
/// entry, [`valid`](RangeIterator::valid) is true and
/// [`key`](RangeIterator::key)/[`value`](RangeIterator::value) expose the
/// first entry before any call to [`next`](RangeIterator::next). The
/// expected loop shape is:
///
/// ```ignore
/// let mut iter = ks.read_range(options).await?;
/// while iter.valid() {
///     use_entry(iter.key(), iter.value());
///     iter.next().await;
/// }
/// if let Some(err) = iter.error() {
///     return Err(err.clone());
/// }
/// iter.release();
/// ```
///
/// A cursor is not rewindable; restart by creating a new one. Backend
/// resources are freed by [`release`](RangeIterator::release), on
/// exhaustion, on error, and on drop, whichever comes first.
pub struct RangeIterator {
    stream: Option<Box<dyn EntryIterator>>,
    state: State,
    current: Option<Entry>,
    error: Option<KeyspaceError>,
    remaining: Option<usize>,
}

impl RangeIterator {
    /// Creates a cursor over `stream`, primed on the first entry.
    ///
    /// A `limit` of `None` or `Some(0)` applies no truncation; any other
    /// value caps the number of entries the cursor will produce.
    pub async fn new(stream: Box<dyn EntryIterator>, limit: Option<usize>) -> Self {
        let mut iter = Self {
            stream: Some(stream),
            state: State::Active,
            current: None,
            error: None,
            remaining: limit.filter(|l| *l > 0),
        };
        iter.pull().await;
        iter
    }

    /// True while the cursor is positioned on an entry.
    pub fn valid(&self) -> bool {
        self.state == State::Active
    }

    /// Advances one position. No-op once the cursor is invalid.
    pub async fn next(&mut self) {
        if self.state != State::Active {
            return;
        }
        self.pull().await;
    }

    /// The entry at the current position.
    pub fn entry(&self) -> Option<&Entry> {
        if self.state == State::Active {
            self.current.as_ref()
        } else {
            None
        }
    }

    /// The key at the current position.
    pub fn key(&self) -> Option<&Bytes> {
        self.entry().map(|e| &e.key)
    }

    /// The value at the current position.
    pub fn value(&self) -> Option<&Bytes> {
        self.entry().map(|e| &e.value)
    }

    /// The latched error, if any.
    ///
    /// Sticky: once set it remains set for the lifetime of the cursor,
    /// including across [`release`](RangeIterator::release).
    pub fn error(&self) -> Option<&KeyspaceError> {
        self.error.as_ref()
    }

    /// Releases backend resources held by the cursor.
    ///
    /// Idempotent: safe to call multiple times and safe to call before
    /// exhaustion. Also invoked on drop.
    pub fn release(&mut self) {
        self.settle(State::Released);
    }

    async fn pull(&mut self) {
        if self.remaining == Some(0) {
            self.settle(State::Exhausted);
            return;
        }
        let Some(stream) = self.stream.as_mut() else {
            self.settle(State::Exhausted);
            return;
        };
        match stream.next().await {
            Ok(Some(entry)) => {
                self.current = Some(entry);
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
            }
            Ok(None) => self.settle(State::Exhausted),
            Err(err) => {
                self.error = Some(err);
                self.settle(State::Errored);
            }
        }
    }

    /// Moves to a terminal-ish state, dropping the stream and current
    /// entry. The latched error is left untouched.
    fn settle(&mut self, state: State) {
        self.state = state;
        self.current = None;
        self.stream = None;
    }
}

impl Drop for RangeIterator {
    fn drop(&mut self) {
        self.release();
    }
}
