//! OxiHuff CLI - static Huffman text compression
//!
//! Compresses text files into self-describing Huffman buffers and restores them.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{CliResult, Options, cmd_compress, cmd_decompress, cmd_info};
use oxihuff_codec::HuffmanConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust static Huffman text compressor")]
#[command(long_about = "
OxiHuff compresses text with a static Huffman code built from the text's own
symbol frequencies. The code tree travels inside the compressed file.

Examples:
  oxihuff compress notes.txt
  oxihuff compress -o notes.huff notes.txt
  oxihuff decompress notes.txt.compressed
  oxihuff --encoding latin1 compress legacy.txt
  oxihuff info --tree notes.txt.compressed
  oxihuff completions bash
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Text encoding of source and restored files (UTF-16 labels write UTF-8)
    #[arg(long, global = true, default_value = "utf-8")]
    encoding: String,

    /// Refuse to decompress files declaring more symbols than this
    #[arg(long, global = true)]
    max_symbols: Option<u64>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show progress bar
    #[arg(short = 'P', long, global = true)]
    progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress text files
    #[command(visible_alias = "c", aliases = ["e", "enc", "encode"])]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only; default <FILE>.compressed)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore compressed files
    #[command(visible_alias = "d", aliases = ["dec", "decode"])]
    Decompress {
        /// Files to decompress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only; default <FILE>.decompressed)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show information about a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Also print the code tree
        #[arg(short, long)]
        tree: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn run(cli: Cli) -> CliResult<()> {
    let options = Options {
        encoding: utils::resolve_encoding(&cli.encoding)?,
        config: cli
            .max_symbols
            .map_or(HuffmanConfig::DEFAULT, |max| {
                HuffmanConfig::new().with_max_output_symbols(max)
            }),
        verbose: cli.verbose,
        progress: cli.progress,
    };

    match cli.command {
        Commands::Compress { files, output } => cmd_compress(&files, output.as_deref(), &options),
        Commands::Decompress { files, output } => {
            cmd_decompress(&files, output.as_deref(), &options)
        }
        Commands::Info { file, json, tree } => cmd_info(&file, json, tree),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "oxihuff", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
