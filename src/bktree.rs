//! This module contains the [`BkTree`] struct, the metric-space index used
//! for bounded edit-distance suggestion.
use ahash::AHashMap;
use serde::Serialize;

use crate::utils::levenshtein;
use crate::word::WordId;
use crate::word_set::WordSet;

/// A suggestion produced by [`BkTree::suggest`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// The Levenshtein distance between the query and the suggestion.
    pub distance: u32,
}

#[derive(Debug, Clone)]
struct BkNode {
    word: WordId,
    dead: bool,
    children: AHashMap<u32, u32>,
}

impl BkNode {
    fn new(word: WordId) -> Self {
        Self {
            word,
            dead: false,
            children: AHashMap::default(),
        }
    }
}

/// A Burkhard-Keller tree over the word handles of a [`WordSet`].
///
/// Every child is attached under the exact Levenshtein distance to its
/// parent, which lets a search discard whole subtrees through the triangle
/// inequality. Nodes are never re-parented: removal marks the node dead in
/// place, and the facade rebuilds the tree once dead nodes pile up.
///
/// The tree stores handles only; every operation takes the owning [`WordSet`]
/// to resolve them, so word bytes are never copied into the tree.
#[derive(Debug, Clone, Default)]
pub struct BkTree {
    nodes: Vec<BkNode>,
    live: usize,
    dead: usize,
}

impl BkTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word handle. Duplicates are silently ignored; re-inserting a
    /// word whose node is dead revives that node.
    pub fn insert(&mut self, words: &WordSet, id: WordId) {
        if self.nodes.is_empty() {
            self.nodes.push(BkNode::new(id));
            self.live += 1;
            return;
        }
        let text = words.word(id);
        let mut node = 0usize;
        loop {
            let distance = levenshtein(words.word(self.nodes[node].word), text);
            if distance == 0 {
                if self.nodes[node].dead {
                    self.nodes[node].word = id;
                    self.nodes[node].dead = false;
                    self.dead -= 1;
                    self.live += 1;
                }
                return;
            }
            match self.nodes[node].children.get(&distance).copied() {
                Some(child) => node = child as usize,
                None => {
                    let child = self.nodes.len() as u32;
                    self.nodes.push(BkNode::new(id));
                    self.nodes[node].children.insert(distance, child);
                    self.live += 1;
                    return;
                }
            }
        }
    }

    /// Marks the node of a word handle dead. The tree structure is not
    /// rewritten; the node keeps routing searches until the next rebuild.
    pub fn remove(&mut self, words: &WordSet, id: WordId) {
        if self.nodes.is_empty() {
            return;
        }
        let text = words.word(id);
        let mut node = 0usize;
        loop {
            let distance = levenshtein(words.word(self.nodes[node].word), text);
            if distance == 0 {
                if !self.nodes[node].dead {
                    self.nodes[node].dead = true;
                    self.live -= 1;
                    self.dead += 1;
                }
                return;
            }
            match self.nodes[node].children.get(&distance).copied() {
                Some(child) => node = child as usize,
                None => return,
            }
        }
    }

    /// Collects every live word within `max_distance` of `query`, except the
    /// query itself, sorted by ascending distance and then ascending word.
    ///
    /// # Arguments
    ///
    /// * `words` - The set owning the handles stored in this tree.
    /// * `query` - The canonical query word.
    /// * `max_distance` - The inclusive distance bound.
    /// * `limit` - The upper bound on the number of results.
    pub fn suggest(
        &self,
        words: &WordSet,
        query: &str,
        max_distance: u32,
        limit: usize,
    ) -> Vec<Suggestion> {
        let mut candidates = Vec::new();
        if self.nodes.is_empty() || limit == 0 {
            return candidates;
        }
        let mut stack = vec![0usize];
        while let Some(node) = stack.pop() {
            let current = &self.nodes[node];
            let text = words.word(current.word);
            let distance = levenshtein(text, query);
            if distance <= max_distance && !current.dead && text != query {
                candidates.push(Suggestion {
                    word: text.to_owned(),
                    distance,
                });
            }
            for (&key, &child) in current.children.iter() {
                // |key - distance| > max_distance cannot hold any qualifying
                // word, by the triangle inequality.
                if key.abs_diff(distance) <= max_distance {
                    stack.push(child as usize);
                }
            }
        }
        candidates.sort_unstable_by(|a, b| {
            (a.distance, a.word.as_str()).cmp(&(b.distance, b.word.as_str()))
        });
        candidates.truncate(limit);
        candidates
    }

    /// The number of live nodes.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// The number of dead nodes still routing searches.
    pub fn tombstone_count(&self) -> usize {
        self.dead
    }

    /// Empties the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.live = 0;
        self.dead = 0;
    }
}
