//! Byte utilities for key ordering and range queries.

use bytes::{Bytes, BytesMut};
use std::ops::Bound::{Excluded, Included, Unbounded};
use std::ops::{Bound, RangeBounds};

/// Computes the lexicographic successor of a byte sequence.
///
/// Returns the smallest byte sequence strictly greater than the input, or
/// `None` when no such sequence exists (empty input or all `0xFF` bytes).
/// Useful for turning a prefix into an exclusive upper bound.
///
/// Works backwards from the rightmost byte: a byte below `0xFF` is
/// incremented and the result returned; a `0xFF` byte is dropped and the
/// previous byte tried instead.
pub(crate) fn lex_increment(data: &[u8]) -> Option<Bytes> {
    if data.is_empty() {
        return None;
    }

    let mut result = BytesMut::from(data);

    while let Some(last) = result.last_mut() {
        if *last < 0xFF {
            *last += 1;
            return Some(result.freeze());
        }
        result.truncate(result.len() - 1);
    }

    None
}

/// A range over byte-sequence keys, used for range reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BytesRange {
    pub start: Bound<Bytes>,
    pub end: Bound<Bytes>,
}

impl BytesRange {
    pub fn new(start: Bound<Bytes>, end: Bound<Bytes>) -> Self {
        Self { start, end }
    }

    /// Creates a range that selects every key.
    pub fn unbounded() -> Self {
        Self {
            start: Unbounded,
            end: Unbounded,
        }
    }

    /// Creates a range that includes all keys with the given prefix.
    pub fn prefix(prefix: Bytes) -> Self {
        if prefix.is_empty() {
            Self::unbounded()
        } else {
            match lex_increment(&prefix) {
                Some(end) => Self {
                    start: Included(prefix),
                    end: Excluded(end),
                },
                None => Self {
                    start: Included(prefix),
                    end: Unbounded,
                },
            }
        }
    }

    pub fn contains(&self, k: &[u8]) -> bool {
        (match &self.start {
            Included(s) => k >= s,
            Excluded(s) => k > s,
            Unbounded => true,
        }) && (match &self.end {
            Included(e) => k <= e,
            Excluded(e) => k < e,
            Unbounded => true,
        })
    }

    /// True when no key can satisfy the bounds.
    ///
    /// Both bounds are verified independently rather than by equality
    /// alone, so inverted bounds are caught as well. Callers must check
    /// this before handing the range to `BTreeMap::range`, which panics
    /// on inverted bounds.
    pub fn is_empty(&self) -> bool {
        match (&self.start, &self.end) {
            (Included(s), Included(e)) => s > e,
            (Included(s), Excluded(e)) | (Excluded(s), Included(e)) | (Excluded(s), Excluded(e)) => {
                s >= e
            }
            _ => false,
        }
    }
}

impl RangeBounds<Bytes> for BytesRange {
    fn start_bound(&self) -> Bound<&Bytes> {
        self.start.as_ref()
    }
    fn end_bound(&self) -> Bound<&Bytes> {
        self.end.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // Property tests for increment

    proptest! {
        #[test]
        fn should_increment_produce_strictly_greater_result(data: Vec<u8>) {
            let all_ff = !data.is_empty() && data.iter().all(|&b| b == 0xFF);
            prop_assume!(!data.is_empty() && !all_ff);

            let incremented = lex_increment(&data).unwrap();
            prop_assert!(
                incremented.as_ref() > data.as_slice(),
                "lex_increment({:?}) = {:?} should be > input",
                data,
                incremented
            );
        }

        #[test]
        fn should_prefix_range_contain_all_prefixed_keys(prefix: Vec<u8>, suffix: Vec<u8>) {
            prop_assume!(!prefix.is_empty());

            let range = BytesRange::prefix(Bytes::from(prefix.clone()));

            // The prefix itself should be included
            prop_assert!(range.contains(&prefix));

            // Any key with this prefix should be included
            let mut extended = prefix.clone();
            extended.extend(&suffix);
            prop_assert!(range.contains(&extended));
        }

        #[test]
        fn should_emptiness_check_agree_with_contains(start: Vec<u8>, end: Vec<u8>, probe: Vec<u8>) {
            let range = BytesRange::new(
                Included(Bytes::from(start)),
                Excluded(Bytes::from(end)),
            );

            if range.is_empty() {
                prop_assert!(!range.contains(&probe));
            }
        }
    }

    // Concrete increment tests

    #[test]
    fn should_increment_simple_byte() {
        assert_eq!(lex_increment(b"a").unwrap().as_ref(), b"b");
        assert_eq!(lex_increment(&[0x00]).unwrap().as_ref(), &[0x01]);
        assert_eq!(lex_increment(&[0xFE]).unwrap().as_ref(), &[0xFF]);
    }

    #[test]
    fn should_increment_past_trailing_ff() {
        assert_eq!(lex_increment(&[0x61, 0xFF]).unwrap().as_ref(), &[0x62]);
        assert_eq!(
            lex_increment(&[0x61, 0xFF, 0xFF]).unwrap().as_ref(),
            &[0x62]
        );
    }

    #[test]
    fn should_return_none_for_non_incrementable() {
        assert!(lex_increment(&[]).is_none());
        assert!(lex_increment(&[0xFF]).is_none());
        assert!(lex_increment(&[0xFF, 0xFF]).is_none());
    }

    // BytesRange tests

    #[test]
    fn should_create_prefix_range() {
        let range = BytesRange::prefix(Bytes::from("foo"));

        assert!(range.contains(b"foo"));
        assert!(range.contains(b"foobar"));
        assert!(range.contains(b"foo\xFF"));

        assert!(!range.contains(b"fo"));
        assert!(!range.contains(b"fop"));
    }

    #[test]
    fn should_leave_all_ff_prefix_unbounded_above() {
        let range = BytesRange::prefix(Bytes::from_static(&[0xFF, 0xFF]));

        assert!(range.contains(&[0xFF, 0xFF]));
        assert!(range.contains(&[0xFF, 0xFF, 0x00]));
        assert!(!range.contains(&[0xFF]));
    }

    #[test]
    fn should_detect_empty_bounds() {
        let same = Bytes::from("k");

        // start == end with an exclusive end selects nothing
        assert!(BytesRange::new(Included(same.clone()), Excluded(same.clone())).is_empty());
        // a single inclusive key is not empty
        assert!(!BytesRange::new(Included(same.clone()), Included(same.clone())).is_empty());
        // inverted bounds select nothing
        assert!(BytesRange::new(Included(Bytes::from("z")), Excluded(Bytes::from("a"))).is_empty());
        // unbounded ranges always select
        assert!(!BytesRange::unbounded().is_empty());
    }
}
