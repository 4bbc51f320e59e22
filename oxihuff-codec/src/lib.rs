//! # OxiHuff Codec: Pure Rust Static Huffman Coding
//!
//! Lossless compression of text by classic static Huffman coding. A text is
//! a sequence of 16-bit symbols (UTF-16 code units); the compressed buffer
//! carries the code tree in pre-order form followed by the bit-packed codes.
//!
//! ## Pipeline
//!
//! ```text
//! compress:   text → FrequencyTable → HuffmanTree → CodeTable → packed bits → bytes
//! decompress: bytes → HuffmanTree (deserialized) → bit walk → text
//! ```
//!
//! Both directions are pure functions of their input: no state survives a
//! call, so independent calls may run concurrently from any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress_str, decompress_to_string};
//!
//! let original = "Eerie eyes seen near lake.";
//! let compressed = compress_str(original).unwrap();
//! assert!(compressed.len() < original.len() * 2);
//!
//! let restored = decompress_to_string(&compressed).unwrap();
//! assert_eq!(restored, original);
//! ```
//!
//! ## Features
//!
//! - `async-io`: [`async_io`] adapters over Tokio readers and writers
//! - `parallel`: [`compress_batch`] compresses independent inputs with Rayon
//! - `serde`: `Serialize` for [`ArchiveSummary`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codec;
mod config;
mod frequency;
mod tree;

#[cfg(feature = "async-io")]
pub mod async_io;
#[cfg(feature = "parallel")]
mod batch;

pub use codec::{
    ArchiveSummary, FIXED_FIELDS_LEN, MAX_SYMBOL_COUNT, inspect, inspect_tree,
};
pub use config::HuffmanConfig;
pub use frequency::FrequencyTable;
pub use oxihuff_core::error::{OxiHuffError, Result};
pub use tree::{CodeTable, HuffmanTree, Node, SerializedTree};

#[cfg(feature = "parallel")]
pub use batch::compress_batch;

use std::io::{Read, Write};

/// One alphabet element: a UTF-16 code unit.
pub type Symbol = u16;

/// Compress a symbol sequence.
///
/// Fails with [`OxiHuffError::EmptyContent`] if `text` is empty.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{compress, decompress};
///
/// let text: Vec<u16> = "mississippi".encode_utf16().collect();
/// let compressed = compress(&text).unwrap();
/// assert_eq!(decompress(&compressed).unwrap(), text);
/// ```
pub fn compress(text: &[Symbol]) -> Result<Vec<u8>> {
    codec::encode(text)
}

/// Decompress a buffer produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<Symbol>> {
    codec::decode(data, &HuffmanConfig::DEFAULT)
}

/// Decompress with explicit limits.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{HuffmanConfig, OxiHuffError, compress_str, decompress_with_config};
///
/// let compressed = compress_str("aaaaaaaaaa").unwrap();
/// let config = HuffmanConfig::new().with_max_output_symbols(4);
/// let err = decompress_with_config(&compressed, &config).unwrap_err();
/// assert!(matches!(err, OxiHuffError::OutputLimitExceeded { declared: 10, limit: 4 }));
/// ```
pub fn decompress_with_config(data: &[u8], config: &HuffmanConfig) -> Result<Vec<Symbol>> {
    codec::decode(data, config)
}

/// Compress a string via its UTF-16 code units.
pub fn compress_str(text: &str) -> Result<Vec<u8>> {
    let units: Vec<Symbol> = text.encode_utf16().collect();
    compress(&units)
}

/// Decompress into a `String`.
///
/// Fails with [`OxiHuffError::InvalidText`] if the decoded units are not
/// valid UTF-16.
pub fn decompress_to_string(data: &[u8]) -> Result<String> {
    let units = decompress(data)?;
    String::from_utf16(&units).map_err(|e| OxiHuffError::invalid_text(e.to_string()))
}

/// Compress `text` and write the complete buffer to `writer`.
///
/// Nothing is written unless compression succeeds. Returns the number of
/// bytes written.
pub fn compress_to_writer<W: Write>(text: &[Symbol], mut writer: W) -> Result<usize> {
    let compressed = compress(text)?;
    writer.write_all(&compressed)?;
    writer.flush()?;
    Ok(compressed.len())
}

/// Read a whole compressed buffer from `reader` and decompress it.
pub fn decompress_from_reader<R: Read>(mut reader: R) -> Result<Vec<Symbol>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decompress(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_str() {
        let original = "Eerie eyes seen near lake.";
        let compressed = compress_str(original).unwrap();
        assert_eq!(decompress_to_string(&compressed).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_non_bmp() {
        let original = "naïve café — 日本語テキスト 🦀🦀";
        let compressed = compress_str(original).unwrap();
        assert_eq!(decompress_to_string(&compressed).unwrap(), original);
    }

    #[test]
    fn test_unpaired_surrogate_roundtrips_as_units() {
        let text: Vec<Symbol> = vec![0xD800, b'a' as Symbol, 0xD800];
        let compressed = compress(&text).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), text);

        let err = decompress_to_string(&compressed).unwrap_err();
        assert!(matches!(err, OxiHuffError::InvalidText { .. }));
    }

    #[test]
    fn test_empty_str() {
        assert!(matches!(compress_str(""), Err(OxiHuffError::EmptyContent)));
    }

    #[test]
    fn test_writer_reader_adapters() {
        let text: Vec<Symbol> = "hello, world".encode_utf16().collect();
        let mut sink = Vec::new();
        let written = compress_to_writer(&text, &mut sink).unwrap();
        assert_eq!(written, sink.len());

        let restored = decompress_from_reader(&sink[..]).unwrap();
        assert_eq!(restored, text);
    }

    #[test]
    fn test_writer_untouched_on_error() {
        let mut sink = Vec::new();
        assert!(compress_to_writer(&[], &mut sink).is_err());
        assert!(sink.is_empty());
    }
}
