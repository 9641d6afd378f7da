use thiserror::Error;

/// Specific kinds of errors that can occur when decoding bencode data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("input ended in the middle of a token")]
    Truncated,

    #[error("root value must be a dictionary, found token {0:#04x}")]
    InvalidRoot(u8),

    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    #[error("invalid string length: {0:?}")]
    InvalidLength(String),

    #[error("unexpected token {0:#04x} where a value was expected")]
    UnexpectedToken(u8),

    #[error("extra data after root dictionary: {bytes_remaining} bytes remaining")]
    ExtraData { bytes_remaining: usize },

    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),

    #[error("read failed: {0}")]
    Io(std::io::ErrorKind),
}

/// Error type returned when decoding bencode data fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("decode error at byte {offset}: {kind}")]
pub struct DecodeError {
    kind: DecodeErrorKind,
    offset: usize,
}

impl DecodeError {
    /// Creates a new DecodeError for a token starting at `offset`.
    pub const fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Returns the specific kind of decode error that occurred.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Returns the byte offset of the token that failed to decode.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
