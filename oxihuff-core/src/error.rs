//! Error types for OxiHuff operations.
//!
//! Every failure the codec can report is a variant of [`OxiHuffError`]. The
//! codec itself never logs or retries; errors are handed straight back to the
//! caller, which decides what the user sees.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Compression was asked to encode zero symbols.
    #[error("Content length needs to be larger than zero")]
    EmptyContent,

    /// The serialized tree cannot be rebuilt from its structure bits and symbols.
    #[error("Malformed Huffman tree: {message}")]
    MalformedTree {
        /// Description of the inconsistency.
        message: String,
    },

    /// The packed payload ran out before every symbol was decoded.
    #[error("Truncated data: decoded {decoded} of {expected} symbols")]
    TruncatedData {
        /// Symbols decoded before the payload ran out.
        decoded: u64,
        /// Symbols declared by the header.
        expected: u64,
    },

    /// A declared length field points past the end of the buffer, or holds
    /// a value the format does not allow.
    #[error("Invalid field '{field}' at offset {offset}: need {needed} bytes, have {available}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Byte offset where the field's region starts.
        offset: u64,
        /// Bytes (or units) the field asks for.
        needed: u64,
        /// Bytes (or units) actually available.
        available: u64,
    },

    /// The declared output would exceed the configured limit.
    #[error("Declared output of {declared} symbols exceeds limit of {limit}")]
    OutputLimitExceeded {
        /// Symbol count declared by the header.
        declared: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of data: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Decoded symbols are not valid text in the requested encoding.
    #[error("Invalid text: {message}")]
    InvalidText {
        /// Description of the conversion failure.
        message: String,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create a malformed tree error.
    pub fn malformed_tree(message: impl Into<String>) -> Self {
        Self::MalformedTree {
            message: message.into(),
        }
    }

    /// Create a truncated data error.
    pub fn truncated(decoded: u64, expected: u64) -> Self {
        Self::TruncatedData { decoded, expected }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: &'static str, offset: u64, needed: u64, available: u64) -> Self {
        Self::InvalidField {
            field,
            offset,
            needed,
            available,
        }
    }

    /// Create an output limit error.
    pub fn output_limit(declared: u64, limit: u64) -> Self {
        Self::OutputLimitExceeded { declared, limit }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an invalid text error.
    pub fn invalid_text(message: impl Into<String>) -> Self {
        Self::InvalidText {
            message: message.into(),
        }
    }

    /// Whether this error describes a damaged or hostile compressed buffer
    /// (as opposed to bad input text or an I/O failure).
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedTree { .. }
                | Self::TruncatedData { .. }
                | Self::InvalidField { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}
