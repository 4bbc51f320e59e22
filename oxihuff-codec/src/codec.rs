//! Compressed buffer layout and the compress/decompress pipelines.
//!
//! # Layout
//!
//! All integers are big-endian.
//!
//! | field                | size                         |
//! |----------------------|------------------------------|
//! | `symbol_count`       | 4                            |
//! | symbols              | 2 × `symbol_count`           |
//! | `structure_bit_count`| 4                            |
//! | structure bits       | ⌈`structure_bit_count` / 8⌉  |
//! | `original_length`    | 8                            |
//! | `payload_byte_count` | 4                            |
//! | payload              | `payload_byte_count`         |
//!
//! Symbols are listed in pre-order leaf discovery order. Structure and
//! payload bits are packed LSB-first. The payload is the concatenation of
//! every input symbol's code; `original_length` tells the decoder where the
//! real bits stop, so padding in the last byte is never decoded.

use crate::Symbol;
use crate::config::HuffmanConfig;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use oxihuff_core::bitstream::{BitReader, BitWriter, pack, packed_len, unpack};
use oxihuff_core::bytes::ByteCursor;
use oxihuff_core::error::{OxiHuffError, Result};

/// Largest alphabet a 16-bit symbol allows.
pub const MAX_SYMBOL_COUNT: u32 = 1 << 16;

/// Size of the fixed-width fields, excluding symbols and packed regions.
pub const FIXED_FIELDS_LEN: usize = 4 + 4 + 8 + 4;

/// Facts about a compressed buffer, read without decoding the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArchiveSummary {
    /// Distinct symbols (leaves) in the tree.
    pub symbol_count: u32,
    /// Structure bits describing the tree shape.
    pub structure_bit_count: u32,
    /// Symbols in the original text.
    pub original_length: u64,
    /// Bytes of packed payload.
    pub payload_bytes: u32,
    /// Whole buffer size.
    pub total_bytes: usize,
    /// Longest code length in bits (1 for a single-symbol tree).
    pub max_code_len: usize,
}

impl ArchiveSummary {
    /// Compressed size relative to the original's 2 bytes per symbol.
    ///
    /// Returns 0.0 for an empty original.
    pub fn ratio(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        self.total_bytes as f64 / (self.original_length as f64 * 2.0)
    }
}

/// The parsed sections of a compressed buffer.
struct Sections<'a> {
    symbols: Vec<Symbol>,
    structure: Vec<bool>,
    original_length: u64,
    payload: &'a [u8],
}

fn missing(field: &str) -> OxiHuffError {
    OxiHuffError::malformed_tree(format!("buffer too short for {}", field))
}

fn region<'a>(cursor: &mut ByteCursor<'a>, field: &'static str, len: u64) -> Result<&'a [u8]> {
    let offset = cursor.offset() as u64;
    let available = cursor.remaining() as u64;
    usize::try_from(len)
        .ok()
        .and_then(|len| cursor.take(len))
        .ok_or_else(|| OxiHuffError::invalid_field(field, offset, len, available))
}

fn parse(data: &[u8]) -> Result<Sections<'_>> {
    let mut cursor = ByteCursor::new(data);

    let symbol_count = cursor
        .read_u32_be()
        .ok_or_else(|| missing("symbol count"))?;
    if symbol_count == 0 || symbol_count > MAX_SYMBOL_COUNT {
        return Err(OxiHuffError::invalid_field(
            "symbol_count",
            0,
            symbol_count as u64,
            MAX_SYMBOL_COUNT as u64,
        ));
    }
    let mut symbol_bytes = ByteCursor::new(region(
        &mut cursor,
        "symbols",
        symbol_count as u64 * 2,
    )?);
    let mut symbols = Vec::with_capacity(symbol_count as usize);
    while let Some(symbol) = symbol_bytes.read_u16_be() {
        symbols.push(symbol);
    }

    let structure_bit_count = cursor
        .read_u32_be()
        .ok_or_else(|| missing("structure bit count"))?;
    // A full binary tree with k leaves has exactly 2k - 1 nodes.
    let node_count = symbol_count as u64 * 2 - 1;
    if structure_bit_count as u64 != node_count {
        return Err(OxiHuffError::invalid_field(
            "structure_bit_count",
            cursor.offset() as u64 - 4,
            structure_bit_count as u64,
            node_count,
        ));
    }
    let structure_bytes = region(
        &mut cursor,
        "structure",
        packed_len(structure_bit_count as u64),
    )?;
    let structure = unpack(structure_bytes, structure_bit_count as u64)?;

    let original_length = cursor
        .read_u64_be()
        .ok_or_else(|| missing("original length"))?;
    let payload_byte_count = cursor
        .read_u32_be()
        .ok_or_else(|| missing("payload byte count"))?;
    let payload = region(&mut cursor, "payload", payload_byte_count as u64)?;

    if !cursor.is_empty() {
        return Err(OxiHuffError::invalid_field(
            "trailing data",
            cursor.offset() as u64,
            0,
            cursor.remaining() as u64,
        ));
    }

    Ok(Sections {
        symbols,
        structure,
        original_length,
        payload,
    })
}

fn len_field(field: &'static str, offset: usize, len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| OxiHuffError::invalid_field(field, offset as u64, len as u64, u32::MAX as u64))
}

/// Split a code into `write_bits` calls of at most 32 bits, first bit in
/// the LSB position.
fn code_chunks(code: &[bool]) -> Vec<(u32, u8)> {
    code.chunks(32)
        .map(|chunk| {
            let value = chunk
                .iter()
                .enumerate()
                .fold(0u32, |acc, (i, &bit)| acc | (bit as u32) << i);
            (value, chunk.len() as u8)
        })
        .collect()
}

/// Compress a symbol sequence into the wire layout.
///
/// Fails with `EmptyContent` if `text` is empty. No bytes are produced
/// unless the whole buffer is built.
pub fn encode(text: &[Symbol]) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(OxiHuffError::EmptyContent);
    }

    let frequencies = FrequencyTable::from_symbols(text);
    let tree = HuffmanTree::build(&frequencies)?;
    let table = tree.code_table();
    let flat = tree.serialize();

    // Dense lookup up to the largest symbol present.
    let size = table.iter().last().map_or(0, |(symbol, _)| symbol as usize + 1);
    let mut lookup: Vec<Vec<(u32, u8)>> = vec![Vec::new(); size];
    for (symbol, code) in table.iter() {
        lookup[symbol as usize] = code_chunks(code);
    }

    let payload_bits = table.encoded_bit_len(&frequencies);
    let mut writer = BitWriter::new(Vec::with_capacity(packed_len(payload_bits) as usize));
    for &symbol in text {
        for &(value, count) in &lookup[symbol as usize] {
            writer.write_bits(value, count)?;
        }
    }
    debug_assert_eq!(writer.bits_written(), payload_bits);
    let payload = writer.finish()?;

    let structure = pack(&flat.structure);
    let mut out = Vec::with_capacity(
        FIXED_FIELDS_LEN + flat.symbols.len() * 2 + structure.len() + payload.len(),
    );

    let symbol_count = len_field("symbol_count", 0, flat.symbols.len())?;
    out.extend_from_slice(&symbol_count.to_be_bytes());
    for symbol in &flat.symbols {
        out.extend_from_slice(&symbol.to_be_bytes());
    }

    let structure_bit_count = len_field("structure_bit_count", out.len(), flat.structure.len())?;
    out.extend_from_slice(&structure_bit_count.to_be_bytes());
    out.extend_from_slice(&structure);
    out.extend_from_slice(&(text.len() as u64).to_be_bytes());

    let payload_byte_count = len_field("payload_byte_count", out.len(), payload.len())?;
    out.extend_from_slice(&payload_byte_count.to_be_bytes());
    out.extend_from_slice(&payload);

    Ok(out)
}

/// Decompress a buffer produced by [`encode`].
pub fn decode(data: &[u8], config: &HuffmanConfig) -> Result<Vec<Symbol>> {
    let sections = parse(data)?;
    let tree = HuffmanTree::deserialize(&sections.symbols, &sections.structure)?;

    let expected = sections.original_length;
    if expected > config.max_output_symbols {
        return Err(OxiHuffError::output_limit(
            expected,
            config.max_output_symbols,
        ));
    }

    // Every symbol costs at least one payload bit, so this bounds the
    // allocation by the input size rather than the declared length.
    let payload_bits = sections.payload.len() as u64 * 8;
    let mut out = Vec::with_capacity(expected.min(payload_bits) as usize);

    let root = tree.root();
    if let Some(symbol) = root.symbol() {
        if expected > payload_bits {
            return Err(OxiHuffError::truncated(payload_bits, expected));
        }
        out.resize(expected as usize, symbol);
        return Ok(out);
    }

    let mut reader = BitReader::new(sections.payload);
    let mut node = root;
    while (out.len() as u64) < expected {
        let bit = match reader.read_bit() {
            Ok(bit) => bit,
            Err(OxiHuffError::UnexpectedEof { .. }) => {
                return Err(OxiHuffError::truncated(out.len() as u64, expected));
            }
            Err(e) => return Err(e),
        };

        node = node
            .child(bit)
            .ok_or_else(|| OxiHuffError::malformed_tree("walked past a leaf"))?;
        if let Some(symbol) = node.symbol() {
            out.push(symbol);
            node = root;
        }
    }

    Ok(out)
}

/// Parse and validate a buffer's fields and tree without decoding the payload.
pub fn inspect(data: &[u8]) -> Result<ArchiveSummary> {
    inspect_tree(data).map(|(summary, _)| summary)
}

/// Like [`inspect`], also handing back the rebuilt tree.
pub fn inspect_tree(data: &[u8]) -> Result<(ArchiveSummary, HuffmanTree)> {
    let sections = parse(data)?;
    let tree = HuffmanTree::deserialize(&sections.symbols, &sections.structure)?;

    let summary = ArchiveSummary {
        symbol_count: sections.symbols.len() as u32,
        structure_bit_count: sections.structure.len() as u32,
        original_length: sections.original_length,
        payload_bytes: sections.payload.len() as u32,
        total_bytes: data.len(),
        max_code_len: tree.depth().max(1),
    };
    Ok((summary, tree))
}
