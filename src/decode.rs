use std::io::Read;

use bytes::Bytes;

use crate::buf::{ReaderSource, SliceSource, Source};
use crate::value::{Dictionary, Integer, Value};
use crate::{DecodeError, DecodeErrorKind, DecodeResult};

/// Maximum nesting of lists and dictionaries, the root dictionary included.
///
/// The encoder accepts trees of any depth, so a tree nested deeper than this
/// encodes fine but is rejected with `DepthLimitExceeded` when decoded.
pub const MAX_DEPTH: usize = 256;

/// Longest digit run accepted for an integer or a string length.
///
/// The longest canonical run is 20 bytes (`-9223372036854775808`); the slack
/// leaves room for a few leading zeros.
pub const MAX_DIGITS: usize = 32;

/// Decode a root dictionary from `source`.
///
/// An empty source decodes to an empty dictionary. Decoding stops after the
/// root dictionary's terminator; any bytes after it are left unread.
pub fn decode<S: Source>(source: &mut S) -> DecodeResult<Dictionary> {
    let start = source.offset();
    match source.read_byte()? {
        None => Ok(Dictionary::new()),
        Some(b'd') => Decoder::new(source).nested(start, Decoder::read_dict),
        Some(token) => Err(DecodeError::new(DecodeErrorKind::InvalidRoot(token), start)),
    }
}

/// Decode a root dictionary from an in-memory buffer.
///
/// Unlike [`decode`], trailing bytes after the root dictionary are an error.
/// Decoded byte strings are copies and do not keep `data` alive.
pub fn from_bytes(data: impl Into<Bytes>) -> DecodeResult<Dictionary> {
    let mut source = SliceSource::new(data);
    let dict = decode(&mut source)?;

    if source.remaining() != 0 {
        return Err(DecodeError::new(
            DecodeErrorKind::ExtraData {
                bytes_remaining: source.remaining(),
            },
            source.offset(),
        ));
    }

    Ok(dict)
}

/// Decode a root dictionary from a reader.
///
/// Reading stops at the root dictionary's terminator, so unlike
/// [`from_bytes`] trailing bytes are not detected: waiting for end of input
/// would block on a live stream. Use [`decode`] with a [`ReaderSource`] to
/// read several dictionaries from one stream.
pub fn from_reader<R: Read>(reader: R) -> DecodeResult<Dictionary> {
    decode(&mut ReaderSource::new(reader))
}

/// Decode a single value of any type from `source`.
///
/// There is no lenient case here: an empty source is `Truncated`.
pub fn decode_value<S: Source>(source: &mut S) -> DecodeResult<Value> {
    Decoder::new(source).read_next()
}

struct Decoder<'a, S> {
    source: &'a mut S,
    depth: usize,
}

impl<'a, S: Source> Decoder<'a, S> {
    fn new(source: &'a mut S) -> Self {
        Decoder { source, depth: 0 }
    }

    fn truncated(&self) -> DecodeError {
        DecodeError::new(DecodeErrorKind::Truncated, self.source.offset())
    }

    /// Reads a lookahead byte and the value it introduces.
    fn read_next(&mut self) -> DecodeResult<Value> {
        let start = self.source.offset();
        let token = self.source.read_byte()?.ok_or_else(|| self.truncated())?;
        self.read_value(token, start)
    }

    fn read_value(&mut self, token: u8, start: usize) -> DecodeResult<Value> {
        match token {
            b'i' => Ok(Value::Integer(self.read_integer()?)),
            b'l' => Ok(Value::List(self.nested(start, Self::read_list)?)),
            b'd' => Ok(Value::Dict(self.nested(start, Self::read_dict)?)),
            b'0'..=b'9' | b'-' => {
                self.source.unread_byte();
                Ok(Value::Bytes(self.read_bytes()?))
            }
            other => Err(DecodeError::new(
                DecodeErrorKind::UnexpectedToken(other),
                start,
            )),
        }
    }

    fn nested<T>(
        &mut self,
        start: usize,
        read: impl FnOnce(&mut Self) -> DecodeResult<T>,
    ) -> DecodeResult<T> {
        if self.depth == MAX_DEPTH {
            return Err(DecodeError::new(
                DecodeErrorKind::DepthLimitExceeded(MAX_DEPTH),
                start,
            ));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    fn read_integer(&mut self) -> DecodeResult<Integer> {
        let start = self.source.offset();
        let digits = self.source.read_until(b'e', MAX_DIGITS)?;
        parse_integer(&digits).ok_or_else(|| {
            DecodeError::new(
                DecodeErrorKind::InvalidInteger(String::from_utf8_lossy(&digits).into_owned()),
                start,
            )
        })
    }

    fn read_bytes(&mut self) -> DecodeResult<Bytes> {
        let start = self.source.offset();
        let digits = self.source.read_until(b':', MAX_DIGITS)?;
        let len = parse_length(&digits).ok_or_else(|| {
            DecodeError::new(
                DecodeErrorKind::InvalidLength(String::from_utf8_lossy(&digits).into_owned()),
                start,
            )
        })?;
        self.source.read_exact(len)
    }

    fn read_list(&mut self) -> DecodeResult<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            let start = self.source.offset();
            match self.source.read_byte()? {
                None => return Err(self.truncated()),
                Some(b'e') => return Ok(items),
                Some(token) => items.push(self.read_value(token, start)?),
            }
        }
    }

    fn read_dict(&mut self) -> DecodeResult<Dictionary> {
        let mut dict = Dictionary::new();
        loop {
            let start = self.source.offset();
            match self.source.read_byte()? {
                None => return Err(self.truncated()),
                Some(b'e') => return Ok(dict),
                Some(b'0'..=b'9' | b'-') => {
                    self.source.unread_byte();
                    let key = self.read_bytes()?;
                    let value = self.read_next()?;
                    // Repeated keys overwrite the earlier entry.
                    dict.insert(key, value);
                }
                Some(token) => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::UnexpectedToken(token),
                        start,
                    ));
                }
            }
        }
    }
}

/// Parses an integer digit run, trying the signed range before the unsigned one.
fn parse_integer(digits: &[u8]) -> Option<Integer> {
    if digits.len() > MAX_DIGITS {
        return None;
    }
    let text = std::str::from_utf8(digits).ok()?;
    text.parse::<i64>()
        .map(Integer::Signed)
        .or_else(|_| text.parse::<u64>().map(Integer::Unsigned))
        .ok()
}

/// Parses a string length prefix. Lengths are limited to the `i64` range.
fn parse_length(digits: &[u8]) -> Option<usize> {
    if digits.len() > MAX_DIGITS {
        return None;
    }
    let text = std::str::from_utf8(digits).ok()?;
    let len = text.parse::<i64>().ok()?;
    usize::try_from(len).ok()
}
