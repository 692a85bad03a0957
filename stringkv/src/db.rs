//! String-typed access to a byte keyspace.

use std::sync::Arc;

use keyspace::factory::create_keyspace;
use keyspace::{Keyspace, KeyspaceRead, Operation, RangeIterator};

use crate::codec::{decode, encode};
use crate::config::Config;
use crate::error::{Error, Result};

/// Parameters bounding and directing a string range read.
///
/// Same semantics as the byte-level options: `start` is the inclusive
/// lower bound and `end` the exclusive upper bound in ascending key
/// terms; `reverse` flips traversal only; a `limit` of zero or `None`
/// applies no truncation.
#[derive(Debug, Clone, Default)]
pub struct RangeOptions {
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<usize>,
    pub reverse: bool,
}

impl RangeOptions {
    fn into_bytes(self) -> keyspace::RangeOptions {
        keyspace::RangeOptions {
            start: self.start.map(encode),
            end: self.end.map(encode),
            limit: self.limit,
            reverse: self.reverse,
        }
    }
}

/// String-keyed view over a byte keyspace.
///
/// `StringDb` wraps any [`Keyspace`] backend and converts keys and values
/// between `String` and raw bytes at the boundary. It adds no semantics
/// of its own: ordering, batch atomicity, and cursor behavior are the
/// wrapped backend's.
///
/// # Example
///
/// ```ignore
/// use stringkv::{Config, StringDb, ops};
///
/// let db = StringDb::open(Config::default()).await?;
///
/// db.put("user:123", "alice").await?;
/// db.batch(vec![ops::put("user:456", "bob"), ops::del("user:123")])
///     .await?;
///
/// assert_eq!(db.get("user:456").await?, "bob");
/// ```
pub struct StringDb {
    keyspace: Arc<dyn Keyspace>,
}

impl StringDb {
    /// Opens a string view over a freshly created keyspace.
    pub async fn open(config: Config) -> Result<Self> {
        let keyspace = create_keyspace(&config.keyspace).await?;
        Ok(Self::new(keyspace))
    }

    /// Wraps an existing keyspace.
    ///
    /// The keyspace may be shared with byte-level callers; values they
    /// store are only readable through this view when they are valid
    /// UTF-8.
    pub fn new(keyspace: Arc<dyn Keyspace>) -> Self {
        Self { keyspace }
    }

    /// Returns the value stored under `key`.
    ///
    /// Fails with [`Error::NotFound`] when the key is absent.
    pub async fn get(&self, key: impl Into<String>) -> Result<String> {
        let value = self.keyspace.get(encode(key)).await?;
        decode(&value)
    }

    /// Inserts or overwrites the value for `key`.
    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.keyspace.put(encode(key), encode(value)).await?;
        Ok(())
    }

    /// Removes `key`. No-op if the key does not exist.
    pub async fn del(&self, key: impl Into<String>) -> Result<()> {
        self.keyspace.delete(encode(key)).await?;
        Ok(())
    }

    /// Applies `ops` in order as one atomic unit.
    ///
    /// Build the operations with [`ops::put`](crate::ops::put) and
    /// [`ops::del`](crate::ops::del).
    pub async fn batch(&self, ops: Vec<Operation>) -> Result<()> {
        self.keyspace.batch(ops).await?;
        Ok(())
    }

    /// Opens a cursor over the entries selected by `options`.
    pub async fn read_range(&self, options: RangeOptions) -> Result<StringRangeIterator> {
        let inner = self.keyspace.read_range(options.into_bytes()).await?;
        Ok(StringRangeIterator::new(inner))
    }

    /// Closes the underlying keyspace.
    pub async fn close(&self) -> Result<()> {
        self.keyspace.close().await?;
        Ok(())
    }
}

/// Cursor over string entries.
///
/// Delegates positioning to the byte-level cursor and decodes the
/// current entry at each step. A decoding failure latches like any other
/// iteration error: the cursor becomes permanently invalid and
/// [`error`](StringRangeIterator::error) keeps reporting it.
pub struct StringRangeIterator {
    inner: RangeIterator,
    current: Option<(String, String)>,
    encoding_error: Option<Error>,
}

impl StringRangeIterator {
    pub(crate) fn new(inner: RangeIterator) -> Self {
        let mut iter = Self {
            inner,
            current: None,
            encoding_error: None,
        };
        iter.decode_current();
        iter
    }

    /// True while the cursor is positioned on an entry.
    pub fn valid(&self) -> bool {
        self.current.is_some()
    }

    /// Advances one position. No-op once the cursor is invalid.
    pub async fn next(&mut self) {
        if !self.valid() {
            return;
        }
        self.inner.next().await;
        self.decode_current();
    }

    /// The key at the current position.
    pub fn key(&self) -> Option<&str> {
        self.current.as_ref().map(|(k, _)| k.as_str())
    }

    /// The value at the current position.
    pub fn value(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, v)| v.as_str())
    }

    /// The latched error, if any. Sticky for the cursor's lifetime.
    pub fn error(&self) -> Option<Error> {
        if let Some(err) = &self.encoding_error {
            return Some(err.clone());
        }
        self.inner.error().map(|e| Error::from(e.clone()))
    }

    /// Releases the underlying cursor. Idempotent.
    pub fn release(&mut self) {
        self.current = None;
        self.inner.release();
    }

    fn decode_current(&mut self) {
        self.current = None;
        let Some(entry) = self.inner.entry() else {
            return;
        };
        match (decode(&entry.key), decode(&entry.value)) {
            (Ok(key), Ok(value)) => self.current = Some((key, value)),
            (Err(err), _) | (_, Err(err)) => {
                self.encoding_error = Some(err);
                self.inner.release();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use keyspace::memory::InMemoryKeyspace;

    use super::*;
    use crate::ops;

    async fn drain(iter: &mut StringRangeIterator) -> Vec<(String, String)> {
        let mut entries = vec![];
        while iter.valid() {
            assert!(iter.error().is_none());
            entries.push((
                iter.key().unwrap().to_owned(),
                iter.value().unwrap().to_owned(),
            ));
            iter.next().await;
        }
        entries
    }

    #[tokio::test]
    async fn should_open_with_default_config() {
        // given
        let config = Config::default();

        // when
        let result = StringDb::open(config).await;

        // then
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_put_and_get_single_key() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();

        // when
        db.put("user:123", "alice").await.unwrap();

        // then
        assert_eq!(db.get("user:123").await.unwrap(), "alice");
    }

    #[tokio::test]
    async fn should_fail_with_not_found_for_missing_key() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();

        // when
        let result = db.get("missing").await;

        // then
        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn should_delete_key_and_tolerate_absent_key() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();
        db.put("key-x", "some value").await.unwrap();

        // when
        db.del("key-x").await.unwrap();

        // then
        assert!(db.get("key-x").await.unwrap_err().is_not_found());
        assert!(db.del("key-x").await.is_ok());
    }

    #[tokio::test]
    async fn should_overwrite_existing_key() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();
        db.put("key", "old").await.unwrap();

        // when
        db.put("key", "new").await.unwrap();

        // then
        assert_eq!(db.get("key").await.unwrap(), "new");
    }

    #[tokio::test]
    async fn should_apply_batch_with_last_write_wins() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();

        // when
        db.batch(vec![
            ops::del("number:2"),
            ops::put("number:3", "33"),
            ops::del("number:3"),
            ops::put("number:3", "333"),
            ops::del("letter:d"),
            ops::put("letter:d", "dd"),
        ])
        .await
        .unwrap();

        // then
        assert_eq!(db.get("number:3").await.unwrap(), "333");
        assert_eq!(db.get("letter:d").await.unwrap(), "dd");
        assert!(db.get("number:2").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn should_scan_all_entries() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();
        db.put("a", "1").await.unwrap();
        db.put("b", "2").await.unwrap();
        db.put("c", "3").await.unwrap();

        // when
        let mut iter = db.read_range(RangeOptions::default()).await.unwrap();
        let entries = drain(&mut iter).await;
        iter.release();

        // then
        assert_eq!(
            entries,
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "2".to_owned()),
                ("c".to_owned(), "3".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn should_scan_bounded_range() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();
        for key in ["a", "b", "c", "d"] {
            db.put(key, key).await.unwrap();
        }

        // when - start inclusive, end exclusive
        let mut iter = db
            .read_range(RangeOptions {
                start: Some("b".to_owned()),
                end: Some("d".to_owned()),
                ..RangeOptions::default()
            })
            .await
            .unwrap();
        let entries = drain(&mut iter).await;

        // then
        assert_eq!(
            entries,
            vec![
                ("b".to_owned(), "b".to_owned()),
                ("c".to_owned(), "c".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn should_scan_in_reverse_with_limit() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();
        for key in ["a", "b", "c", "d"] {
            db.put(key, key).await.unwrap();
        }

        // when
        let mut iter = db
            .read_range(RangeOptions {
                reverse: true,
                limit: Some(2),
                ..RangeOptions::default()
            })
            .await
            .unwrap();
        let entries = drain(&mut iter).await;

        // then
        assert_eq!(
            entries,
            vec![
                ("d".to_owned(), "d".to_owned()),
                ("c".to_owned(), "c".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn should_surface_encoding_error_on_get() {
        // given - a byte-level writer sharing the keyspace
        let keyspace = Arc::new(InMemoryKeyspace::new());
        keyspace
            .put(Bytes::from("k"), Bytes::from_static(&[0xFF, 0xFE]))
            .await
            .unwrap();
        let db = StringDb::new(keyspace);

        // when
        let result = db.get("k").await;

        // then
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[tokio::test]
    async fn should_latch_encoding_error_during_iteration() {
        // given - the second value is not valid UTF-8
        let keyspace = Arc::new(InMemoryKeyspace::new());
        keyspace
            .put(Bytes::from("a"), Bytes::from("fine"))
            .await
            .unwrap();
        keyspace
            .put(Bytes::from("b"), Bytes::from_static(&[0xC0]))
            .await
            .unwrap();
        let db = StringDb::new(keyspace);

        // when
        let mut iter = db.read_range(RangeOptions::default()).await.unwrap();
        assert!(iter.valid());
        assert_eq!(iter.value(), Some("fine"));
        iter.next().await;

        // then - the cursor latches and stays invalid
        assert!(!iter.valid());
        assert!(matches!(iter.error(), Some(Error::Encoding(_))));
        iter.next().await;
        iter.release();
        assert!(matches!(iter.error(), Some(Error::Encoding(_))));
    }

    #[tokio::test]
    async fn should_tolerate_repeated_release() {
        // given
        let db = StringDb::open(Config::default()).await.unwrap();
        db.put("a", "1").await.unwrap();

        // when
        let mut iter = db.read_range(RangeOptions::default()).await.unwrap();
        iter.release();
        iter.release();

        // then
        assert!(!iter.valid());
        assert!(iter.error().is_none());
    }

    #[keyspace_macros::keyspace_test]
    async fn should_share_backend_with_byte_level_callers() {
        // given - bytes written below the string view
        keyspace
            .put(Bytes::from("k"), Bytes::from("v"))
            .await
            .unwrap();

        // when
        let db = StringDb::new(keyspace.clone());

        // then
        assert_eq!(db.get("k").await.unwrap(), "v");
    }
}
