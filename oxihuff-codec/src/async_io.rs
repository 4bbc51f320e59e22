//! Async I/O adapters for the codec.
//!
//! The codec still works on fully materialized buffers: input is read to
//! the end before compression starts, and output is written only once the
//! whole result exists.
//!
//! # Example
//!
//! ```rust,ignore
//! use oxihuff_codec::async_io::compress_async;
//!
//! let mut input = tokio::fs::File::open("notes.txt").await?;
//! let mut output = tokio::fs::File::create("notes.txt.compressed").await?;
//! compress_async(&mut input, &mut output).await?;
//! ```
//!
//! # Feature Flag
//!
//! Available with the `async-io` feature:
//!
//! ```toml
//! [dependencies]
//! oxihuff-codec = { version = "0.1.0", features = ["async-io"] }
//! ```

use oxihuff_core::error::{OxiHuffError, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Read UTF-8 text from `input`, compress it and write the buffer to `output`.
///
/// Returns the number of bytes written.
pub async fn compress_async<R, W>(input: &mut R, output: &mut W) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut raw = Vec::new();
    input.read_to_end(&mut raw).await?;
    let text = String::from_utf8(raw).map_err(|e| OxiHuffError::invalid_text(e.to_string()))?;

    let compressed = crate::compress_str(&text)?;
    output.write_all(&compressed).await?;
    output.flush().await?;
    Ok(compressed.len())
}

/// Read a compressed buffer from `input` and write the restored text to
/// `output` as UTF-8.
///
/// Returns the number of bytes written.
pub async fn decompress_async<R, W>(input: &mut R, output: &mut W) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut data = Vec::new();
    input.read_to_end(&mut data).await?;

    let text = crate::decompress_to_string(&data)?;
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(text.len())
}
