//! Performance benchmarks for oxihuff-codec
//!
//! Measures compression and decompression throughput for a few text
//! shapes, plus tree construction on its own.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxihuff_codec::{FrequencyTable, HuffmanTree, Symbol, compress, decompress};
use std::hint::black_box;

type TextGenerator = fn(usize) -> Vec<Symbol>;

mod test_data {
    use oxihuff_codec::Symbol;

    /// One repeated unit (single-leaf tree)
    pub fn uniform(size: usize) -> Vec<Symbol> {
        vec![b'x' as Symbol; size]
    }

    /// Uniformly spread over printable ASCII (close to worst case)
    pub fn random(size: usize) -> Vec<Symbol> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push(0x20 + ((seed >> 33) % 95) as Symbol);
        }
        data
    }

    /// English prose
    pub fn text_like(size: usize) -> Vec<Symbol> {
        let text: Vec<Symbol> = "The quick brown fox jumps over the lazy dog. \
                                 Pack my box with five dozen liquor jugs. \
                                 How vexingly quick daft zebras jump! "
            .encode_utf16()
            .collect();
        text.iter().copied().cycle().take(size).collect()
    }

    /// Wide alphabet of CJK units
    pub fn cjk(size: usize) -> Vec<Symbol> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x0FEDCBA987654321;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push(0x4E00 + ((seed >> 33) % 3000) as Symbol);
        }
        data
    }
}

const SIZES: [(&str, usize); 3] = [("4K", 4 * 1024), ("64K", 64 * 1024), ("1M", 1024 * 1024)];

const PATTERNS: [(&str, TextGenerator); 4] = [
    ("uniform", test_data::uniform as TextGenerator),
    ("random", test_data::random as TextGenerator),
    ("text", test_data::text_like as TextGenerator),
    ("cjk", test_data::cjk as TextGenerator),
];

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let data = generator(size);
            let id = format!("{}/{}", size_name, pattern_name);

            group.throughput(Throughput::Bytes(size as u64 * 2));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &data, |b, data| {
                b.iter(|| compress(black_box(data)).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let compressed = compress(&generator(size)).unwrap();
            let id = format!("{}/{}", size_name, pattern_name);

            group.throughput(Throughput::Bytes(size as u64 * 2));
            group.bench_with_input(
                BenchmarkId::from_parameter(&id),
                &compressed,
                |b, compressed| b.iter(|| decompress(black_box(compressed)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    for (pattern_name, generator) in PATTERNS {
        let freqs = FrequencyTable::from_symbols(&generator(64 * 1024));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &freqs,
            |b, freqs| b.iter(|| HuffmanTree::build(black_box(freqs)).unwrap().code_table()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_tree_build);
criterion_main!(benches);
