//! String to byte-sequence conversion.
//!
//! Keys and values travel through the keyspace as raw bytes; this module
//! owns the two directions of the mapping.

use bytes::Bytes;

use crate::error::{Error, Result};

/// Encodes a string as its UTF-8 bytes.
pub(crate) fn encode(s: impl Into<String>) -> Bytes {
    Bytes::from(s.into())
}

/// Decodes stored bytes back into a string.
///
/// Fails with [`Error::Encoding`] when the bytes are not valid UTF-8,
/// which happens when a byte-level writer shares the keyspace.
pub(crate) fn decode(bytes: &Bytes) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| Error::Encoding(format!("stored bytes are not valid utf-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_utf8_strings() {
        // given
        let original = "letter:ä";

        // when
        let decoded = decode(&encode(original)).unwrap();

        // then
        assert_eq!(decoded, original);
    }

    #[test]
    fn should_reject_invalid_utf8() {
        // given
        let bytes = Bytes::from_static(&[0x66, 0x6F, 0xFF]);

        // when
        let result = decode(&bytes);

        // then
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn should_encode_empty_string() {
        assert_eq!(encode(""), Bytes::new());
        assert_eq!(decode(&Bytes::new()).unwrap(), "");
    }
}
