//! The configuration module of the word library engine.
use serde::{Deserialize, Serialize};

/// The configuration of the [`WordLib`](crate::engine::WordLib) struct. This
/// should suffice most scenarios.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Config {
    /// The configuration of the word boundary rules.
    pub tokenizer: TokenizerConfig,
    /// The configuration of the engine itself.
    pub engine: EngineConfig,
}

/// The configuration of the word boundary rules used by
/// [`tokenize`](crate::tokenizer::tokenize).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub struct TokenizerConfig {
    /// Whether `'` and `’` between two word characters belong to the word
    /// (`don't`, `it's`). Apostrophes at token edges are always trimmed.
    /// The default is `true`.
    pub include_apostrophes: bool,
    /// Whether `-` between two word characters belongs to the word
    /// (`well-known`); otherwise the word splits at the hyphen.
    /// The default is `false`.
    pub include_hyphens: bool,
    /// Whether ASCII digits count as word characters. When disabled, words
    /// split around digits. The default is `true`.
    pub include_digits: bool,
    /// Tokens shorter than this many bytes are dropped.
    /// The default is `1`.
    pub min_length: usize,
    /// Tokens longer than this many bytes are split at the boundary and the
    /// remainder restarts accumulation. The default is `256`.
    pub max_length: usize,
}

/// The specific config of the [`WordLib`](crate::engine::WordLib) cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub struct EngineConfig {
    /// The suggestion index is rebuilt once its tombstoned nodes exceed this
    /// percentage of its live size. Rebuilding trades an occasional
    /// `O(n log n)` pass for keeping searches from degrading.
    /// The default is `25`.
    pub max_tombstone_percent: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig {
                include_apostrophes: true,
                include_hyphens: false,
                include_digits: true,
                min_length: 1,
                max_length: 256,
            },
            engine: EngineConfig {
                max_tombstone_percent: 25,
            },
        }
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Config::default().tokenizer
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Config::default().engine
    }
}
