//! This module contains the [`Trie`] struct, the ordered-prefix index used
//! for completion.
use tinyvec::TinyVec;

const ROOT: usize = 0;

/// Child edges sorted by byte; completion order is defined by this ordering.
/// Most nodes have few children, so the edges start inline.
type EdgeList = TinyVec<[(u8, u32); 4]>;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    edges: EdgeList,
    terminal: bool,
}

/// A byte-indexed trie over the canonical words.
///
/// The trie works on raw bytes, not code points. UTF-8 is a prefix code, so a
/// byte prefix cut at a code-point boundary corresponds exactly to a prefix of
/// code points, and depth-first traversal in ascending byte order yields
/// byte-lexicographic completion order.
///
/// Nodes live in an arena with an internal free list; removal prunes every
/// node left without children and without a terminal flag.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    free: Vec<u32>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            free: Vec::new(),
        }
    }

    /// Inserts a word. Inserting a present word is a no-op.
    pub fn insert(&mut self, word: &str) {
        let mut node = ROOT;
        for &byte in word.as_bytes() {
            let search = self.nodes[node]
                .edges
                .binary_search_by_key(&byte, |edge| edge.0);
            node = match search {
                Ok(position) => self.nodes[node].edges[position].1 as usize,
                Err(position) => {
                    let child = self.allocate();
                    self.nodes[node].edges.insert(position, (byte, child));
                    child as usize
                }
            };
        }
        self.nodes[node].terminal = true;
    }

    /// Removes a word. Removing an absent word is a no-op.
    ///
    /// The walked path is unwound afterwards and every node that ends up
    /// without children and without a terminal flag is pruned, so the trie
    /// stays minimal.
    pub fn remove(&mut self, word: &str) {
        let mut path = Vec::with_capacity(word.len());
        let mut node = ROOT;
        for &byte in word.as_bytes() {
            match self.nodes[node]
                .edges
                .binary_search_by_key(&byte, |edge| edge.0)
            {
                Ok(position) => {
                    let child = self.nodes[node].edges[position].1 as usize;
                    path.push((node, position));
                    node = child;
                }
                Err(_) => return,
            }
        }
        if !self.nodes[node].terminal {
            return;
        }
        self.nodes[node].terminal = false;
        while let Some((parent, position)) = path.pop() {
            if self.nodes[node].terminal || !self.nodes[node].edges.is_empty() {
                break;
            }
            self.nodes[parent].edges.remove(position);
            self.free.push(node as u32);
            node = parent;
        }
    }

    /// Collects up to `limit` words beginning with the byte sequence `prefix`,
    /// in byte-lexicographic order.
    ///
    /// A prefix that matches no stored word yields an empty vector. A prefix
    /// equal to a stored word yields that word first.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The byte prefix to complete.
    /// * `limit` - The upper bound on the number of results.
    pub fn complete(&self, prefix: &[u8], limit: usize) -> Vec<String> {
        let mut results = Vec::new();
        if limit == 0 {
            return results;
        }
        let mut node = ROOT;
        for &byte in prefix {
            match self.nodes[node]
                .edges
                .binary_search_by_key(&byte, |edge| edge.0)
            {
                Ok(position) => node = self.nodes[node].edges[position].1 as usize,
                Err(_) => return results,
            }
        }
        let mut accumulator = prefix.to_vec();
        self.collect(node, &mut accumulator, limit, &mut results);
        results
    }

    /// The number of allocated nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Empties the trie.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(TrieNode::default());
        self.free.clear();
    }

    /// Allocates a node, reusing a freed slot if one is available.
    fn allocate(&mut self) -> u32 {
        if let Some(index) = self.free.pop() {
            self.nodes[index as usize] = TrieNode::default();
            index
        } else {
            let index = self.nodes.len() as u32;
            self.nodes.push(TrieNode::default());
            index
        }
    }

    fn collect(
        &self,
        node: usize,
        accumulator: &mut Vec<u8>,
        limit: usize,
        results: &mut Vec<String>,
    ) {
        if results.len() == limit {
            return;
        }
        if self.nodes[node].terminal {
            // Accumulated bytes retrace a stored word, which is valid UTF-8.
            results.push(String::from_utf8_lossy(accumulator).into_owned());
        }
        for &(byte, child) in self.nodes[node].edges.iter() {
            if results.len() == limit {
                return;
            }
            accumulator.push(byte);
            self.collect(child as usize, accumulator, limit, results);
            accumulator.pop();
        }
    }
}
