//! Keyspace - a backend-agnostic ordered key-value storage contract.
//!
//! Keyspace defines a uniform contract any storage engine can implement:
//! point reads and writes, atomic multi-operation batches, and ordered
//! range iteration over an ordered byte keyspace. Callers program against
//! the contract; backends (in-memory, persistent, remote) satisfy it
//! independently.
//!
//! # Architecture
//!
//! The capability set {get, put, delete, batch, read_range} is split into
//! the [`KeyspaceRead`] and [`Keyspace`] traits. Keys and values are
//! opaque byte sequences ordered lexicographically by byte value. Range
//! reads hand back a [`RangeIterator`] cursor whose limit truncation and
//! sticky error latch are owned by this crate, so every backend inherits
//! identical cursor semantics; a backend only supplies the underlying
//! [`EntryIterator`] stream.
//!
//! Batches resolve conflicts last-write-wins by position: the operation
//! appearing later in the sequence determines the final state for its
//! key, and the whole batch lands as one atomic change.
//!
//! # Key Concepts
//!
//! - **[`Keyspace`]**: the full contract backends implement.
//! - **[`KeyspaceRead`]**: the read half, for consumers that should not
//!   have write access.
//! - **[`RangeOptions`]**: bounds (inclusive start, exclusive end),
//!   direction, and result limit of a range read.
//! - **[`RangeIterator`]**: transient cursor over a resolved range;
//!   released explicitly or on drop.
//!
//! # Example
//!
//! ```ignore
//! use bytes::Bytes;
//! use keyspace::{KeyspaceConfig, Operation, RangeOptions, factory};
//!
//! let ks = factory::create_keyspace(&KeyspaceConfig::InMemory).await?;
//!
//! // Write data
//! ks.put(Bytes::from("user:123"), Bytes::from("alice")).await?;
//! ks.batch(vec![
//!     Operation::put(Bytes::from("user:456"), Bytes::from("bob")),
//!     Operation::delete(Bytes::from("user:123")),
//! ])
//! .await?;
//!
//! // Scan a range
//! let mut iter = ks.read_range(RangeOptions::prefix(Bytes::from("user:"))).await?;
//! while iter.valid() {
//!     println!("{:?}: {:?}", iter.key(), iter.value());
//!     iter.next().await;
//! }
//! iter.release();
//! ```

pub mod batch;
pub mod bytes;
pub mod config;
pub mod error;
pub mod factory;
pub mod iter;
pub mod keyspace;
pub mod memory;
pub mod model;

pub use bytes::BytesRange;
pub use config::KeyspaceConfig;
pub use error::{KeyspaceError, KeyspaceResult};
pub use iter::{EntryIterator, RangeIterator};
pub use keyspace::{Keyspace, KeyspaceRead};
pub use model::{Direction, Entry, Operation, RangeOptions};
