//! Decompress command implementation.

use super::{CliResult, Options, run_files};
use crate::utils::{decompressed_path, encode_text};
use oxihuff_codec::{OxiHuffError, decompress_with_config};
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    files: &[PathBuf],
    output: Option<&Path>,
    options: &Options,
) -> CliResult<()> {
    if output.is_some() && files.len() > 1 {
        return Err("--output can only be used with a single input file".into());
    }

    run_files(files, options, "Decompressing", |input| {
        let target = match output {
            Some(path) => path.to_path_buf(),
            None => decompressed_path(input),
        };
        decompress_file(input, &target, options)
    })
}

/// Restore one file; returns the summary line for verbose output.
pub fn decompress_file(input: &Path, target: &Path, options: &Options) -> CliResult<String> {
    let data = fs::read(input)?;
    let units = decompress_with_config(&data, &options.config)?;
    let text = String::from_utf16(&units).map_err(|e| OxiHuffError::invalid_text(e.to_string()))?;
    let restored = encode_text(&text, options.encoding)?;
    fs::write(target, &restored)?;

    Ok(format!(
        "  Decompressed: {} -> {} ({} -> {} bytes)",
        input.display(),
        target.display(),
        data.len(),
        restored.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::compress::compress_file;
    use crate::commands::test_support::scratch_dir;
    use oxihuff_codec::HuffmanConfig;

    fn options(encoding: &'static encoding_rs::Encoding) -> Options {
        Options {
            encoding,
            config: HuffmanConfig::DEFAULT,
            verbose: true,
            progress: false,
        }
    }

    #[test]
    fn test_roundtrip_through_files() {
        let dir = scratch_dir("decompress-roundtrip");
        let input = dir.join("poem.txt");
        let original = "naïve café, 日本語, 🦀\n";
        fs::write(&input, original).unwrap();

        let opts = options(encoding_rs::UTF_8);
        crate::commands::cmd_compress(&[input], None, &opts).unwrap();
        cmd_decompress(&[dir.join("poem.txt.compressed")], None, &opts).unwrap();

        let restored = fs::read_to_string(dir.join("poem.txt.decompressed")).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_roundtrip_legacy_encoding() {
        let dir = scratch_dir("decompress-latin1");
        let input = dir.join("latin1.txt");
        let raw = [b'd', b'\xE9', b'j', b'\xE0', b' ', b'v', b'u'];
        fs::write(&input, raw).unwrap();

        let opts = options(encoding_rs::WINDOWS_1252);
        let packed = dir.join("packed");
        let line = compress_file(&input, &packed, &opts).unwrap();
        assert!(line.contains("Compressed"));

        let out = dir.join("out");
        decompress_file(&packed, &out, &opts).unwrap();
        assert_eq!(fs::read(out).unwrap(), raw);
    }

    #[test]
    fn test_output_limit_applies() {
        let dir = scratch_dir("decompress-limit");
        let input = dir.join("a.txt");
        fs::write(&input, "aaaaaaaaaa").unwrap();
        compress_file(&input, &dir.join("a.huff"), &options(encoding_rs::UTF_8)).unwrap();

        let mut opts = options(encoding_rs::UTF_8);
        opts.config = HuffmanConfig::new().with_max_output_symbols(5);
        let err = decompress_file(&dir.join("a.huff"), &dir.join("a.out"), &opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OxiHuffError>(),
            Some(OxiHuffError::OutputLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_corrupt_file_reports_error() {
        let dir = scratch_dir("decompress-corrupt");
        let input = dir.join("junk.compressed");
        fs::write(&input, [0, 0, 0, 1, 0]).unwrap();

        let err = decompress_file(&input, &dir.join("junk.out"), &options(encoding_rs::UTF_8))
            .unwrap_err();
        let err = err.downcast_ref::<OxiHuffError>().unwrap();
        assert!(err.is_corrupt_input());
    }
}
