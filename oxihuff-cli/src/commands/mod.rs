//! Command implementations for OxiHuff CLI.

pub mod compress;
pub mod decompress;
pub mod info;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;

use crate::utils::create_progress_bar;
use encoding_rs::Encoding;
use oxihuff_codec::HuffmanConfig;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result type shared by commands; errors cross rayon worker threads.
pub type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Settings from the global flags.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub encoding: &'static Encoding,
    pub config: HuffmanConfig,
    pub verbose: bool,
    pub progress: bool,
}

/// Run `job` on every file and report the failures.
///
/// Files are independent: one failing does not stop the others. `job`
/// returns the line printed in verbose mode.
fn run_files<F>(files: &[PathBuf], options: &Options, message: &'static str, job: F) -> CliResult<()>
where
    F: Fn(&Path) -> CliResult<String> + Sync,
{
    let pb = create_progress_bar(files.len() as u64, options.progress);
    pb.set_message(message);

    let run = |path: &PathBuf| {
        let result = job(path);
        if let Ok(line) = &result {
            if options.verbose {
                pb.suspend(|| println!("{}", line));
            }
        }
        pb.inc(1);
        result
    };

    #[cfg(feature = "parallel")]
    let results: Vec<CliResult<String>> = files.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<CliResult<String>> = files.iter().map(run).collect();

    pb.finish_with_message("Done");

    let mut failed = 0;
    for (path, result) in files.iter().zip(results) {
        if let Err(e) = result {
            eprintln!("Error: {}: {}", path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} file(s) failed", failed, files.len()).into());
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// Fresh scratch directory under the system temp dir.
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("oxihuff-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
