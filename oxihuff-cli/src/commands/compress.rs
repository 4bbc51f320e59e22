//! Compress command implementation.

use super::{CliResult, Options, run_files};
use crate::utils::{compressed_path, decode_text};
use oxihuff_codec::compress_str;
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_compress(files: &[PathBuf], output: Option<&Path>, options: &Options) -> CliResult<()> {
    if output.is_some() && files.len() > 1 {
        return Err("--output can only be used with a single input file".into());
    }

    run_files(files, options, "Compressing", |input| {
        let target = match output {
            Some(path) => path.to_path_buf(),
            None => compressed_path(input),
        };
        compress_file(input, &target, options)
    })
}

/// Compress one file; returns the summary line for verbose output.
pub fn compress_file(input: &Path, target: &Path, options: &Options) -> CliResult<String> {
    let raw = fs::read(input)?;
    let text = decode_text(&raw, options.encoding)?;
    let compressed = compress_str(&text)?;
    fs::write(target, &compressed)?;

    Ok(format!(
        "  Compressed: {} -> {} ({} -> {} bytes)",
        input.display(),
        target.display(),
        raw.len(),
        compressed.len()
    ))
}
