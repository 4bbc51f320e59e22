//! Symbol frequency counting.

use crate::Symbol;
use std::collections::BTreeMap;

/// Occurrence count of every distinct symbol in a text.
///
/// Keys are unique and every stored count is non-zero. Iteration is in
/// ascending symbol order, which is also the order leaves are seeded into
/// the Huffman merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    /// Count every symbol of `text`.
    pub fn from_symbols(text: &[Symbol]) -> Self {
        let mut counts = BTreeMap::new();
        for &symbol in text {
            *counts.entry(symbol).or_insert(0u64) += 1;
        }
        Self { counts }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no symbol was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for `symbol`, if it occurs.
    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Sum of all counts (the text length).
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyTable {
    /// Build a table from explicit counts. Zero counts are dropped and
    /// repeated symbols are summed.
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter {
            if count > 0 {
                *counts.entry(symbol).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}
