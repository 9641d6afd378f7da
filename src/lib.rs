//! A streaming decoder and canonical encoder for bencode, the length-prefixed
//! serialization format used by BitTorrent.
//!
//! Values are integers, byte strings, lists and dictionaries keyed by byte
//! strings. Decoding reads one token at a time from a [`Source`] and requires
//! the root value to be a dictionary. Encoding always writes dictionary keys
//! in byte-wise sorted order, so equal values produce identical bytes.
//!
//! # Examples
//!
//! ```
//! use bencodec::{Dictionary, Value, from_bytes, to_vec};
//!
//! let mut dict = Dictionary::new();
//! dict.insert("name", "spam");
//! dict.insert("length", 42);
//!
//! let bytes = to_vec(&dict);
//! assert_eq!(bytes, b"d6:lengthi42e4:name4:spame");
//!
//! let parsed = from_bytes(bytes).unwrap();
//! assert_eq!(parsed.get("name").and_then(Value::as_str), Some("spam"));
//! assert_eq!(parsed, dict);
//! ```

mod buf;
mod decode;
mod encode;
mod error;
mod value;

pub use crate::buf::{ReaderSource, SliceSource, Source};
pub use crate::decode::{MAX_DEPTH, MAX_DIGITS, decode, decode_value, from_bytes, from_reader};
pub use crate::encode::{encode, encode_into, encoded_len, to_vec};
pub use crate::error::{DecodeError, DecodeErrorKind, DecodeResult};
pub use crate::value::{Dictionary, Integer, Value};
