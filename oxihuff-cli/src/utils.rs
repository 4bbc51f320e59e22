//! Utility functions for the CLI.

use crate::commands::CliResult;
use encoding_rs::Encoding;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to compressed files.
pub const COMPRESSED_SUFFIX: &str = "compressed";

/// Suffix appended to restored files.
pub const DECOMPRESSED_SUFFIX: &str = "decompressed";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// `notes.txt` → `notes.txt.compressed`
pub fn compressed_path(input: &Path) -> PathBuf {
    with_suffix(input, COMPRESSED_SUFFIX)
}

/// `notes.txt.compressed` → `notes.txt.decompressed`; any other name just
/// gets the suffix appended.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == COMPRESSED_SUFFIX) {
        with_suffix(&input.with_extension(""), DECOMPRESSED_SUFFIX)
    } else {
        with_suffix(input, DECOMPRESSED_SUFFIX)
    }
}

/// Look up a text encoding by its WHATWG label (`utf-8`, `latin1`, `sjis`, ...).
pub fn resolve_encoding(label: &str) -> CliResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| format!("unknown encoding: {}", label).into())
}

/// Decode file contents, dropping a byte order mark if present.
pub fn decode_text(raw: &[u8], encoding: &'static Encoding) -> CliResult<String> {
    let (text, had_errors) = encoding.decode_with_bom_removal(raw);
    if had_errors {
        return Err(format!("input is not valid {}", encoding.name()).into());
    }
    Ok(text.into_owned())
}

/// Encode restored text for writing.
///
/// UTF-16 encodings have no encoder and fall back to UTF-8.
pub fn encode_text(text: &str, encoding: &'static Encoding) -> CliResult<Vec<u8>> {
    let (bytes, used, unmappable) = encoding.encode(text);
    if unmappable {
        return Err(format!("text cannot be represented in {}", used.name()).into());
    }
    Ok(bytes.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("dir/notes.txt")),
            PathBuf::from("dir/notes.txt.compressed")
        );
        assert_eq!(
            compressed_path(Path::new("README")),
            PathBuf::from("README.compressed")
        );
    }

    #[test]
    fn test_decompressed_path() {
        assert_eq!(
            decompressed_path(Path::new("notes.txt.compressed")),
            PathBuf::from("notes.txt.decompressed")
        );
        assert_eq!(
            decompressed_path(Path::new("blob.bin")),
            PathBuf::from("blob.bin.decompressed")
        );
    }

    #[test]
    fn test_resolve_encoding() {
        assert_eq!(resolve_encoding("utf-8").unwrap(), encoding_rs::UTF_8);
        assert_eq!(resolve_encoding(" UTF8 ").unwrap(), encoding_rs::UTF_8);
        assert_eq!(resolve_encoding("latin1").unwrap(), encoding_rs::WINDOWS_1252);
        assert!(resolve_encoding("klingon").is_err());
    }

    #[test]
    fn test_decode_legacy_encoding() {
        let raw = [0x63, 0x61, 0x66, 0xE9];
        let text = decode_text(&raw, encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(text, "café");
        assert_eq!(encode_text(&text, encoding_rs::WINDOWS_1252).unwrap(), raw);
    }

    #[test]
    fn test_decode_strips_bom() {
        let raw = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(decode_text(&raw, encoding_rs::UTF_8).unwrap(), "hi");
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(decode_text(&[0xFF, 0xFE, 0xFD], encoding_rs::UTF_8).is_err());
        assert!(encode_text("日本", encoding_rs::WINDOWS_1252).is_err());
    }
}
