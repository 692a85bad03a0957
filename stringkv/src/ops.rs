//! Batch operation constructors over string keys and values.

use keyspace::Operation;

use crate::codec::encode;

/// A put of `value` under `key`.
pub fn put(key: impl Into<String>, value: impl Into<String>) -> Operation {
    Operation::put(encode(key), encode(value))
}

/// A delete of `key`.
pub fn del(key: impl Into<String>) -> Operation {
    Operation::delete(encode(key))
}
