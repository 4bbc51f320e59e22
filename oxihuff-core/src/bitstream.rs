//! Bit-level I/O and bit packing.
//!
//! This module provides `BitReader` and `BitWriter` for streaming bits to and
//! from byte-oriented readers/writers, plus the [`pack`]/[`unpack`] pair for
//! converting whole bit sequences in one go.
//!
//! # Bit Ordering
//!
//! Bits are LSB-first within each byte: bit `i` of a sequence lives in byte
//! `i / 8` at bit position `i % 8`. The final byte is zero-padded. Padding
//! carries no information; consumers always know the exact number of
//! meaningful bits from a separate length field, so no terminator bit is
//! ever written.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1, 1).unwrap();
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes, vec![0b1101]);
//!
//! let mut reader = BitReader::new(&bytes[..]);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert!(reader.read_bit().unwrap());
//! ```

use crate::error::{OxiHuffError, Result};
use std::io::{Read, Write};

/// Number of bytes needed to hold `bit_count` packed bits.
#[inline]
pub fn packed_len(bit_count: u64) -> u64 {
    bit_count.div_ceil(8)
}

/// Pack an ordered bit sequence into bytes, LSB-first.
///
/// The output is exactly `ceil(bits.len() / 8)` bytes long.
pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut out = vec![0u8; bits.len().div_ceil(8)];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    out
}

/// Unpack exactly `bit_count` bits from `bytes`.
///
/// Bits beyond `bit_count` in the last byte are ignored. Fails with
/// `UnexpectedEof` if `bytes` is too short to hold `bit_count` bits.
pub fn unpack(bytes: &[u8], bit_count: u64) -> Result<Vec<bool>> {
    let needed = packed_len(bit_count);
    if (bytes.len() as u64) < needed {
        return Err(OxiHuffError::unexpected_eof(
            (needed - bytes.len() as u64) as usize,
        ));
    }

    let bit_count = bit_count as usize;
    let mut bits = Vec::with_capacity(bit_count);
    for i in 0..bit_count {
        bits.push(bytes[i / 8] & (1 << (i % 8)) != 0);
    }
    Ok(bits)
}

/// A bit-level reader that wraps any `Read` implementation.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Ensure at least `count` bits are available in the buffer.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        debug_assert!(count <= 57, "Cannot fill more than 57 bits at once");

        while self.bits_in_buffer < count {
            let bits_needed = count - self.bits_in_buffer;
            let bytes_needed = bits_needed.div_ceil(8).min(7) as usize;

            let mut temp_buf = [0u8; 8];
            let n = self.reader.read(&mut temp_buf[..bytes_needed])?;
            if n == 0 {
                return Err(OxiHuffError::unexpected_eof(bytes_needed));
            }
            for byte in temp_buf.iter().take(n) {
                self.buffer |= (*byte as u64) << self.bits_in_buffer;
                self.bits_in_buffer += 8;
            }
        }

        Ok(())
    }

    /// Read up to 32 bits, first bit read in the LSB position.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let mask = (1u64 << count).wrapping_sub(1);
        let result = (self.buffer & mask) as u32;

        self.buffer >>= count;
        self.bits_in_buffer -= count;

        Ok(result)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and flushes complete
/// bytes to the underlying writer. Call [`BitWriter::finish`] when done to
/// write the zero-padded final byte and get the writer back.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Flush complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        if self.bits_in_buffer >= 32 {
            let bytes = (self.buffer as u32).to_le_bytes();
            self.writer.write_all(&bytes)?;
            self.buffer >>= 32;
            self.bits_in_buffer -= 32;
        }

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer & 0xFF) as u8;
            self.writer.write_all(&[byte])?;
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }
        Ok(())
    }

    /// Write up to 32 bits, LSB of `value` first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count).wrapping_sub(1)
        };
        let value = value & mask;

        self.buffer |= (value as u64) << self.bits_in_buffer;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Pad the last byte with zeros, flush, and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        if self.bits_in_buffer % 8 != 0 {
            self.bits_in_buffer += 8 - self.bits_in_buffer % 8;
        }
        self.flush_bytes()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_lsb_first() {
        // index 0 -> bit 0 of byte 0
        let bits = [true, false, true, false, true, true, false, true];
        assert_eq!(pack(&bits), vec![0xB5]);
    }

    #[test]
    fn test_pack_length() {
        assert!(pack(&[]).is_empty());
        assert_eq!(pack(&[true]).len(), 1);
        assert_eq!(pack(&[false; 8]).len(), 1);
        assert_eq!(pack(&[false; 9]).len(), 2);
        // trailing zero bits still occupy their bytes
        assert_eq!(pack(&[false; 17]), vec![0, 0, 0]);
    }

    #[test]
    fn test_unpack_ignores_padding() {
        let bytes = [0xFF];
        assert_eq!(unpack(&bytes, 3).unwrap(), vec![true, true, true]);
        assert!(unpack(&bytes, 0).unwrap().is_empty());
    }

    #[test]
    fn test_unpack_short_buffer() {
        let err = unpack(&[0x01], 9).unwrap_err();
        assert!(matches!(err, OxiHuffError::UnexpectedEof { expected: 1 }));
    }

    #[test]
    fn test_pack_unpack_trailing_zeros() {
        let bits = [true, false, false, false, false, false, false, false, false, false];
        let bytes = pack(&bits);
        assert_eq!(unpack(&bytes, bits.len() as u64).unwrap(), bits);
    }

    #[test]
    fn test_bitreader_basic() {
        let data = [0xB5];
        let mut reader = BitReader::new(&data[..]);

        let expected = [true, false, true, false, true, true, false, true];
        for bit in expected {
            assert_eq!(reader.read_bit().unwrap(), bit);
        }
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = [0xFF, 0x00];
        let mut reader = BitReader::new(&data[..]);

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0x0F);
        assert_eq!(reader.read_bits(4).unwrap(), 0x0);
    }

    #[test]
    fn test_bitwriter_matches_pack() {
        let bits = [
            true, true, false, true, false, false, true, false, true, true, true,
        ];
        let mut writer = BitWriter::new(Vec::new());
        for &bit in &bits {
            writer.write_bits(bit as u32, 1).unwrap();
        }
        assert_eq!(writer.bits_written(), bits.len() as u64);
        assert_eq!(writer.finish().unwrap(), pack(&bits));
    }

    #[test]
    fn test_bitwriter_multi_bits() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11001, 5).unwrap();
        // 3 bits: 101, 5 bits: 11001 -> 11001_101 = 0xCD
        assert_eq!(writer.finish().unwrap(), vec![0xCD]);
    }

    #[test]
    fn test_bitwriter_wide_flush() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xDEAD_BEEF, 32).unwrap();
        writer.write_bits(0x1, 4).unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            vec![0xEF, 0xBE, 0xAD, 0xDE, 0x01]
        );
    }

    #[test]
    fn test_finish_empty() {
        let writer = BitWriter::new(Vec::new());
        assert!(writer.finish().unwrap().is_empty());
    }
}
