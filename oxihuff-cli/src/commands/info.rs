//! Info command implementation.

use super::CliResult;
use oxihuff_codec::{ArchiveSummary, inspect, inspect_tree};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// What `info` reports about one compressed file.
#[derive(Debug, Serialize)]
struct InfoReport {
    file: String,
    #[serde(flatten)]
    summary: ArchiveSummary,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<String>,
}

fn build_report(file: &Path, data: &[u8], with_tree: bool) -> CliResult<InfoReport> {
    let (summary, tree) = if with_tree {
        let (summary, tree) = inspect_tree(data)?;
        (summary, Some(tree.to_string()))
    } else {
        (inspect(data)?, None)
    };

    Ok(InfoReport {
        file: file.display().to_string(),
        summary,
        ratio: summary.ratio(),
        tree,
    })
}

pub fn cmd_info(file: &Path, json: bool, with_tree: bool) -> CliResult<()> {
    let data = fs::read(file)?;
    let report = build_report(file, &data, with_tree)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = &report.summary;
    println!("Archive Information");
    println!("===================");
    println!("File: {}", report.file);
    println!("Size: {} bytes", summary.total_bytes);
    println!();
    println!("Contents:");
    println!("  Original length: {} units", summary.original_length);
    println!("  Distinct symbols: {}", summary.symbol_count);
    println!("  Structure bits: {}", summary.structure_bit_count);
    println!("  Payload: {} bytes", summary.payload_bytes);
    println!("  Longest code: {} bits", summary.max_code_len);
    println!("  Compression ratio: {:.1}%", report.ratio * 100.0);

    if let Some(tree) = &report.tree {
        println!();
        println!("Tree:");
        println!("{}", tree);
    }

    Ok(())
}
