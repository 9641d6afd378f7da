use std::io::{self, BufRead, BufReader, Read};

use bytes::Bytes;

use crate::{DecodeError, DecodeErrorKind, DecodeResult};

/// A forward-only byte source the decoder reads tokens from.
///
/// Implementations only need to remember the most recently read byte so it
/// can be pushed back once; the decoder never unreads more than that.
pub trait Source {
    /// Reads one byte, or `None` at end of input.
    fn read_byte(&mut self) -> DecodeResult<Option<u8>>;

    /// Pushes back the byte returned by the last `read_byte` call.
    fn unread_byte(&mut self);

    /// Reads the bytes before the next `delim`, consuming the delimiter.
    ///
    /// At most `limit + 1` bytes are consumed. If `delim` is not among them,
    /// those `limit + 1` bytes are returned and the caller treats the token as
    /// too long. Fails with `Truncated` if input ends before either happens.
    fn read_until(&mut self, delim: u8, limit: usize) -> DecodeResult<Bytes>;

    /// Reads exactly `len` bytes, failing with `Truncated` if fewer remain.
    fn read_exact(&mut self, len: usize) -> DecodeResult<Bytes>;

    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;
}

/// A `Source` over an in-memory buffer.
///
/// Byte-string payloads are copied out, so a decoded tree does not keep the
/// input buffer alive.
pub struct SliceSource {
    data: Bytes,
    pos: usize,
}

impl SliceSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        SliceSource {
            data: data.into(),
            pos: 0,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn truncated(&self) -> DecodeError {
        DecodeError::new(DecodeErrorKind::Truncated, self.data.len())
    }
}

impl Source for SliceSource {
    fn read_byte(&mut self) -> DecodeResult<Option<u8>> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn unread_byte(&mut self) {
        debug_assert!(self.pos > 0, "unread_byte with nothing read");
        self.pos = self.pos.saturating_sub(1);
    }

    fn read_until(&mut self, delim: u8, limit: usize) -> DecodeResult<Bytes> {
        let window = self.remaining().min(limit.saturating_add(1));
        let end = self.pos + window;
        match self.data[self.pos..end].iter().position(|&b| b == delim) {
            Some(idx) => {
                let token = self.data.slice(self.pos..self.pos + idx);
                self.pos += idx + 1;
                Ok(token)
            }
            None if window > limit => {
                let token = self.data.slice(self.pos..end);
                self.pos = end;
                Ok(token)
            }
            None => {
                self.pos = self.data.len();
                Err(self.truncated())
            }
        }
    }

    fn read_exact(&mut self, len: usize) -> DecodeResult<Bytes> {
        if len > self.remaining() {
            self.pos = self.data.len();
            return Err(self.truncated());
        }
        let result = Bytes::copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(result)
    }

    fn offset(&self) -> usize {
        self.pos
    }
}

/// A `Source` over any `std::io::Read`, buffered internally.
///
/// Payload reads grow their buffer as data arrives, so a large declared
/// length does not allocate up front.
pub struct ReaderSource<R> {
    reader: BufReader<R>,
    last: Option<u8>,
    pushed_back: bool,
    offset: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader: BufReader::new(reader),
            last: None,
            pushed_back: false,
            offset: 0,
        }
    }

    fn io_error(&self, err: io::Error) -> DecodeError {
        let kind = match err.kind() {
            io::ErrorKind::UnexpectedEof => DecodeErrorKind::Truncated,
            kind => DecodeErrorKind::Io(kind),
        };
        DecodeError::new(kind, self.offset)
    }

    fn take_pushed_back(&mut self) -> Option<u8> {
        if self.pushed_back {
            self.pushed_back = false;
            self.offset += 1;
            self.last
        } else {
            None
        }
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn read_byte(&mut self) -> DecodeResult<Option<u8>> {
        if let Some(byte) = self.take_pushed_back() {
            return Ok(Some(byte));
        }

        let byte = loop {
            match self.reader.fill_buf().map(|buf| buf.first().copied()) {
                Ok(byte) => break byte,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(self.io_error(err)),
            }
        };
        if byte.is_some() {
            self.reader.consume(1);
            self.offset += 1;
            self.last = byte;
        }
        Ok(byte)
    }

    fn unread_byte(&mut self) {
        debug_assert!(
            self.last.is_some() && !self.pushed_back,
            "unread_byte with nothing to push back"
        );
        if self.last.is_some() && !self.pushed_back {
            self.pushed_back = true;
            self.offset -= 1;
        }
    }

    fn read_until(&mut self, delim: u8, limit: usize) -> DecodeResult<Bytes> {
        let mut token = Vec::new();
        loop {
            match self.read_byte()? {
                None => return Err(DecodeError::new(DecodeErrorKind::Truncated, self.offset)),
                Some(byte) if byte == delim => return Ok(Bytes::from(token)),
                Some(byte) => {
                    token.push(byte);
                    if token.len() > limit {
                        return Ok(Bytes::from(token));
                    }
                }
            }
        }
    }

    fn read_exact(&mut self, len: usize) -> DecodeResult<Bytes> {
        let mut payload = Vec::new();
        if len > 0
            && let Some(byte) = self.take_pushed_back()
        {
            payload.push(byte);
        }

        let want = (len - payload.len()) as u64;
        let result = (&mut self.reader).take(want).read_to_end(&mut payload);
        let read = result.map_err(|err| self.io_error(err))?;
        self.offset += read;

        if payload.len() < len {
            return Err(DecodeError::new(DecodeErrorKind::Truncated, self.offset));
        }
        if let Some(&byte) = payload.last() {
            self.last = Some(byte);
        }
        Ok(Bytes::from(payload))
    }

    fn offset(&self) -> usize {
        self.offset
    }
}
