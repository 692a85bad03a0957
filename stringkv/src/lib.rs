//! StringKV - a string-typed adapter over the byte keyspace contract.
//!
//! StringKV maps `String` keys and values onto the byte-sequence
//! [`Keyspace`](keyspace::Keyspace) contract and back. The adapter adds
//! no storage semantics of its own: lexicographic ordering, batch
//! atomicity, and cursor behavior all come from the wrapped backend.
//! Because UTF-8 string order matches byte order, range bounds expressed
//! as strings select exactly what the equivalent byte bounds would.
//!
//! # Key Concepts
//!
//! - **[`StringDb`]**: the string-typed entry point; wraps any
//!   `Arc<dyn Keyspace>`.
//! - **[`ops`]**: batch operation constructors over `&str`.
//! - **[`StringRangeIterator`]**: cursor decoding entries on the fly;
//!   invalid UTF-8 latches as an [`Error::Encoding`].
//!
//! # Example
//!
//! ```ignore
//! use stringkv::{Config, RangeOptions, StringDb, ops};
//!
//! let db = StringDb::open(Config::default()).await?;
//!
//! db.batch(vec![
//!     ops::put("letter:a", "a"),
//!     ops::put("letter:b", "b"),
//! ])
//! .await?;
//!
//! let mut iter = db
//!     .read_range(RangeOptions {
//!         start: Some("letter:".into()),
//!         ..RangeOptions::default()
//!     })
//!     .await?;
//! while iter.valid() {
//!     println!("{}: {}", iter.key().unwrap(), iter.value().unwrap());
//!     iter.next().await;
//! }
//! iter.release();
//! ```

mod codec;
mod config;
mod db;
mod error;
pub mod ops;

pub use config::Config;
pub use db::{RangeOptions, StringDb, StringRangeIterator};
pub use error::{Error, Result};
