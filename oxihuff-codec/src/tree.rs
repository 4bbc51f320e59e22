//! Huffman tree construction, code derivation and (de)serialization.
//!
//! The tree is a plain owned binary tree: every [`Node::Internal`] owns its
//! two children through a `Box`. All walks over it use explicit stacks, so
//! trees read from untrusted input cannot exhaust the call stack no matter
//! how deep they are.
//!
//! # Merge order
//!
//! [`HuffmanTree::build`] seeds one leaf per distinct symbol in ascending
//! symbol order. Every node gets an arrival number when it enters the
//! priority queue (leaves first, merged nodes as they are created), and the
//! queue pops by `(weight, arrival)`. Among equal weights the earliest
//! arrival wins, and the first node popped becomes the left child. The
//! compressed byte stream depends on this order, so it must not change.

use crate::Symbol;
use crate::frequency::FrequencyTable;
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;

/// A node of a Huffman tree.
#[derive(Debug)]
pub enum Node {
    /// A symbol and its frequency.
    Leaf {
        /// The symbol this leaf decodes to.
        symbol: Symbol,
        /// Occurrence count (0 for trees read back from a compressed buffer).
        weight: u64,
    },
    /// Exactly two children; the weight is the sum of theirs.
    Internal {
        /// Child reached with a `0` bit.
        left: Box<Node>,
        /// Child reached with a `1` bit.
        right: Box<Node>,
        /// Sum of both children's weights.
        weight: u64,
    },
}

impl Node {
    /// Create a leaf.
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new internal node.
    pub fn internal(left: Node, right: Node) -> Self {
        let weight = left.weight().saturating_add(right.weight());
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            weight,
        }
    }

    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The leaf's symbol, or `None` for an internal node.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Follow one branch: `false` goes left, `true` goes right.
    ///
    /// Returns `None` on a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
            Node::Leaf { .. } => None,
        }
    }
}

fn take_child(slot: &mut Box<Node>) -> Node {
    std::mem::replace(&mut **slot, Node::leaf(0, 0))
}

impl Drop for Node {
    fn drop(&mut self) {
        let Node::Internal { left, right, .. } = self else {
            return;
        };
        if left.is_leaf() && right.is_leaf() {
            return;
        }

        // Detach subtrees onto a heap stack so every node is dropped with
        // leaf children only.
        let mut stack = vec![take_child(left), take_child(right)];
        while let Some(mut node) = stack.pop() {
            if let Node::Internal { left, right, .. } = &mut node {
                stack.push(take_child(left));
                stack.push(take_child(right));
            }
        }
    }
}

impl fmt::Display for Node {
    /// Renders internal nodes as `{left, right}` and leaves as the quoted
    /// character, e.g. `{'a', {'b', 'c'}}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a> {
            Visit(&'a Node),
            Emit(&'static str),
        }

        let mut stack = vec![Step::Visit(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Emit(text) => f.write_str(text)?,
                Step::Visit(Node::Leaf { symbol, .. }) => match char::from_u32(*symbol as u32) {
                    Some(c) => write!(f, "{:?}", c)?,
                    None => write!(f, "'\\u{{{:04x}}}'", symbol)?,
                },
                Step::Visit(Node::Internal { left, right, .. }) => {
                    f.write_str("{")?;
                    stack.push(Step::Emit("}"));
                    stack.push(Step::Visit(&**right));
                    stack.push(Step::Emit(", "));
                    stack.push(Step::Visit(&**left));
                }
            }
        }
        Ok(())
    }
}

/// A node waiting in the merge queue.
struct Pending {
    weight: u64,
    arrival: u64,
    node: Node,
}

impl Pending {
    fn key(&self) -> (u64, u64) {
        (self.weight, self.arrival)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Tree flattened to pre-order form.
///
/// Each visited node contributes one structure bit: `false` for an internal
/// node, `true` for a leaf. Leaf symbols are listed in the order the leaves
/// are visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializedTree {
    /// Leaf symbols in pre-order discovery order.
    pub symbols: Vec<Symbol>,
    /// One bit per node, pre-order.
    pub structure: Vec<bool>,
}

/// Per-symbol code: the path from the root, `false` = left, `true` = right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Vec<bool>>,
}

impl CodeTable {
    /// Code for `symbol`, if the tree contains it.
    pub fn get(&self, symbol: Symbol) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[bool])> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_slice()))
    }

    /// Total payload bits for a text with the given frequencies:
    /// the sum of `count * code length` over all symbols.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}

/// An optimal prefix-free code tree.
#[derive(Debug)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a frequency distribution.
    ///
    /// A table with one distinct symbol yields a lone leaf with no parent.
    /// Fails with `EmptyContent` if the table is empty.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        let mut arrival = 0u64;
        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse(Pending {
                weight,
                arrival,
                node: Node::leaf(symbol, weight),
            }));
            arrival += 1;
        }

        loop {
            let Some(Reverse(first)) = heap.pop() else {
                return Err(OxiHuffError::EmptyContent);
            };
            let Some(Reverse(second)) = heap.pop() else {
                return Ok(Self { root: first.node });
            };

            let node = Node::internal(first.node, second.node);
            heap.push(Reverse(Pending {
                weight: node.weight(),
                arrival,
                node,
            }));
            arrival += 1;
        }
    }

    /// Rebuild a tree from its pre-order form.
    ///
    /// Structure bits and symbols are consumed in lockstep. Fails with
    /// `MalformedTree` if either runs out early or is not fully used.
    pub fn deserialize(symbols: &[Symbol], structure: &[bool]) -> Result<Self> {
        let mut bits = structure.iter();
        let mut leaves = symbols.iter();
        // Internal nodes still waiting for children; `Some` holds a finished
        // left subtree.
        let mut open: Vec<Option<Node>> = Vec::new();
        // Entries of `open` that are still `None`.
        let mut unstarted = 0usize;

        loop {
            let Some(&is_leaf) = bits.next() else {
                return Err(OxiHuffError::malformed_tree(format!(
                    "structure ended with {} unfinished internal nodes",
                    open.len().max(1)
                )));
            };
            if !is_leaf {
                // The new node needs two leaves, every other unstarted one
                // at least one more.
                unstarted += 1;
                if unstarted + 1 > leaves.len() {
                    return Err(OxiHuffError::malformed_tree(format!(
                        "structure needs more than {} symbols",
                        symbols.len()
                    )));
                }
                open.push(None);
                continue;
            }

            let Some(&symbol) = leaves.next() else {
                return Err(OxiHuffError::malformed_tree(format!(
                    "structure needs more than {} symbols",
                    symbols.len()
                )));
            };

            let mut done = Node::leaf(symbol, 0);
            loop {
                match open.pop() {
                    None => {
                        if bits.len() > 0 {
                            return Err(OxiHuffError::malformed_tree(format!(
                                "{} structure bits after the tree was complete",
                                bits.len()
                            )));
                        }
                        if leaves.len() > 0 {
                            return Err(OxiHuffError::malformed_tree(format!(
                                "{} symbols not referenced by the structure",
                                leaves.len()
                            )));
                        }
                        return Ok(Self { root: done });
                    }
                    Some(None) => {
                        unstarted -= 1;
                        open.push(Some(done));
                        break;
                    }
                    Some(Some(left)) => done = Node::internal(left, done),
                }
            }
        }
    }

    /// Flatten to pre-order structure bits and leaf symbols.
    pub fn serialize(&self) -> SerializedTree {
        let mut out = SerializedTree::default();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    out.structure.push(true);
                    out.symbols.push(*symbol);
                }
                Node::Internal { left, right, .. } => {
                    out.structure.push(false);
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }

    /// Derive every symbol's code.
    ///
    /// A lone-leaf tree has no branches; its symbol gets the one-bit code `0`.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = BTreeMap::new();
        if let Node::Leaf { symbol, .. } = &self.root {
            codes.insert(*symbol, vec![false]);
            return CodeTable { codes };
        }

        let mut stack = vec![(&self.root, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((&**right, right_path));
                    stack.push((&**left, left_path));
                }
            }
        }
        CodeTable { codes }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Whether the tree is a single leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
            }
        }
        max
    }

    /// Total weight at the root.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
