//! Error types for binary VDF parsing and building

use thiserror::Error;

/// Errors that can occur when parsing or building binary VDF documents
#[derive(Error, Debug)]
pub enum VdfError {
    /// Tag byte that is not one of the known value types
    #[error("Unknown VDF tag {tag:#04x} at offset {offset}")]
    UnknownTag {
        /// Tag byte read from the stream
        tag: u8,
        /// Offset of the tag byte
        offset: u64,
    },

    /// Stream ended in the middle of a value
    #[error("Unexpected end of VDF data at offset {offset}")]
    UnexpectedEof {
        /// Offset at which more data was expected
        offset: u64,
    },

    /// Key is not valid UTF-8
    #[error("Invalid UTF-8 key at offset {offset}: {source}")]
    InvalidUtf8 {
        /// Offset of the first byte of the key
        offset: u64,
        /// Underlying conversion error
        source: std::string::FromUtf8Error,
    },

    /// Objects nested deeper than [`MAX_DEPTH`](super::MAX_DEPTH)
    #[error("VDF objects nested deeper than {max} levels at offset {offset}")]
    NestingTooDeep {
        /// Maximum supported depth
        max: usize,
        /// Offset of the offending object tag
        offset: u64,
    },

    /// Bytes left over after the root terminator
    #[error("Trailing data after VDF document at offset {offset}")]
    TrailingData {
        /// Offset of the first trailing byte
        offset: u64,
    },

    /// Key or string containing a NUL byte, which cannot be encoded
    #[error("Cannot encode {what} containing a NUL byte: {text:?}")]
    EmbeddedNul {
        /// "key" or "string value"
        what: &'static str,
        /// The offending text
        text: String,
    },

    /// Dynamic value with no VDF representation
    #[error("Unsupported VDF value type: {0}")]
    UnsupportedValueType(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing/writing error
    #[error("Binary format error: {0}")]
    BinRw(binrw::Error),
}

impl VdfError {
    /// Whether the error describes a malformed byte stream
    ///
    /// Encoding errors, unsupported values and I/O failures return `false`.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::UnknownTag { .. }
                | Self::UnexpectedEof { .. }
                | Self::InvalidUtf8 { .. }
                | Self::NestingTooDeep { .. }
                | Self::TrailingData { .. }
        )
    }

    /// Map a `binrw` error raised at `offset`
    ///
    /// End-of-stream conditions become [`VdfError::UnexpectedEof`].
    pub(crate) fn from_binrw(err: binrw::Error, offset: u64) -> Self {
        if err.is_eof() {
            Self::UnexpectedEof { offset }
        } else {
            Self::from(err)
        }
    }
}

impl From<binrw::Error> for VdfError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(e) => Self::Io(e),
            other => Self::BinRw(other),
        }
    }
}

/// Type alias for VDF operation results
pub type Result<T> = std::result::Result<T, VdfError>;
