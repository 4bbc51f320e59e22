//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman compressor.
//!
//! - [`bitstream`]: LSB-first bit packing plus streaming `BitReader`/`BitWriter`
//! - [`bytes`]: Big-endian cursor for the fixed-order wire fields
//! - [`error`]: Error types shared by every OxiHuff crate
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     file I/O, text encodings, progress                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec                                                   │
//! │     frequency table, Huffman tree, wire format          │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     BitReader/BitWriter, pack/unpack, ByteCursor        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{pack, unpack};
//!
//! let bits = [true, false, true, true, false, false, false, false, true];
//! let bytes = pack(&bits);
//! assert_eq!(bytes.len(), 2);
//! assert_eq!(unpack(&bytes, bits.len() as u64).unwrap(), bits);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod bytes;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter, pack, packed_len, unpack};
pub use bytes::ByteCursor;
pub use error::{OxiHuffError, Result};
