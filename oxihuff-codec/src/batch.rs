//! Parallel compression of independent inputs.

use crate::Symbol;
use oxihuff_core::error::Result;
use rayon::prelude::*;

/// Compress many texts concurrently.
///
/// Each input gets its own tree and buffer; results come back in input
/// order and are byte-identical to calling [`crate::compress`] on each.
pub fn compress_batch(texts: &[&[Symbol]]) -> Vec<Result<Vec<u8>>> {
    texts.par_iter().map(|text| crate::compress(text)).collect()
}
