//! bencode_ascii renders decoded bencode data as indented, human-readable
//! ASCII text.
//!
//! This is inspired by Google's der-ascii project for DER/BER encodings.

mod format;

pub use crate::format::to_ascii;

/// Decodes bencode data and formats the root dictionary as ASCII.
pub fn bencode2ascii(data: &[u8]) -> Result<String, bencodec::DecodeError> {
    let bytes = bytes::Bytes::copy_from_slice(data);
    let dict = bencodec::from_bytes(bytes)?;
    Ok(to_ascii(&bencodec::Value::Dict(dict)))
}

#[cfg(test)]
mod tests {
    use bencodec::{DecodeErrorKind, Dictionary, Value, to_vec};

    use crate::bencode2ascii;

    #[test]
    fn test_torrent_like() {
        let mut info = Dictionary::new();
        info.insert("name", "file.iso");
        info.insert("length", 1024);
        info.insert("pieces", vec![0xDEu8, 0xAD]);

        let mut root = Dictionary::new();
        root.insert("announce", "http://tracker/");
        root.insert("info", info);

        let ascii = bencode2ascii(&to_vec(&root)).unwrap();
        assert_eq!(
            ascii,
            "{\n  \"announce\": \"http://tracker/\",\n  \"info\": {\n    \"length\": 1024,\n    \"name\": \"file.iso\",\n    \"pieces\": hex\"dead\",\n  },\n}"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(bencode2ascii(b"").unwrap(), "{}");
    }

    #[test]
    fn test_nested_list() {
        let root: Dictionary = [(
            "l",
            Value::List(vec![Value::from(-1), Value::List(vec![])]),
        )]
        .into_iter()
        .collect();
        let ascii = bencode2ascii(&to_vec(&root)).unwrap();
        assert_eq!(ascii, "{\n  \"l\": [\n    -1,\n    [],\n  ],\n}");
    }

    #[test]
    fn test_invalid_root() {
        let err = bencode2ascii(b"li1ee").unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::InvalidRoot(b'l'));
    }

    #[test]
    fn test_truncated() {
        let err = bencode2ascii(b"d3:foo").unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::Truncated);
    }
}
