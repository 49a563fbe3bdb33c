//! The main module that contains the [`WordLib`] facade and its related
//! types.
use std::path::Path;

use displaydoc::Display;
use serde::Serialize;

use crate::bktree::{BkTree, Suggestion};
use crate::config::Config;
use crate::storage::{self, LoadError, SaveError};
use crate::tokenizer::{self, Span};
use crate::trie::Trie;
use crate::utils;
use crate::word::{canonicalize, WordError};
use crate::word_set::{AddError, SetInsertion, WordSet};

/// The largest edit distance [`WordLib::suggest`] accepts.
pub const MAX_SUGGEST_DISTANCE: u32 = 4;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
/// Represents the result of a successful [`WordLib::add`].
pub enum AddOutcome {
    /// The word was added to the dictionary.
    Added,
    /// The word was already in the dictionary and nothing changed.
    AlreadyPresent,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
/// Represents the result of a successful [`WordLib::remove`].
pub enum RemoveOutcome {
    /// The word was removed from the dictionary.
    Removed,
    /// The word was not in the dictionary and nothing changed.
    NotFound,
}

#[derive(Debug, thiserror::Error)]
/// The error type for [`WordLib::suggest`].
pub enum SuggestError {
    #[error("{0}")]
    /// The query failed word validation.
    Word(#[from] WordError),
    /// The requested distance bound is not supported.
    #[error(
        "the maximum distance is {0}, while the maximum supported is {MAX_SUGGEST_DISTANCE}"
    )]
    MaxDistanceTooLarge(u32),
}

/// Counters reported by [`WordLib::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    /// The number of words in the dictionary after the load.
    pub loaded: usize,
    /// The number of malformed or rejected lines that were skipped.
    pub skipped: usize,
}

/// A token [`WordLib::check_text`] did not find in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnknownWord<'text> {
    /// The byte interval of the token in the checked text.
    pub span: Span,
    /// The token itself, borrowed from the checked text.
    pub word: &'text str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
enum RebuildReason {
    TombstonePressure,
    Load,
    Save,
}

/// The word library engine: a facade over the membership set, the completion
/// trie, the suggestion tree, the tokenizer and the storage layer.
///
/// The membership set owns the canonical bytes of every word and is the
/// single source of truth; the trie and the suggestion tree never hold a word
/// that is not in the set. Every mutation updates the three structures as a
/// group, so queries always observe a consistent dictionary.
///
/// The engine is single-writer and not thread-safe; adapters serialize calls.
#[derive(Debug, Clone)]
pub struct WordLib {
    words: WordSet,
    completions: Trie,
    suggestions: BkTree,
    config: Config,
    dirty: bool,
}

impl Default for WordLib {
    fn default() -> Self {
        Self::new()
    }
}

impl WordLib {
    /// Creates an empty engine with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty engine with a custom [`Config`].
    pub fn with_config(config: Config) -> Self {
        Self {
            words: WordSet::new(),
            completions: Trie::new(),
            suggestions: BkTree::new(),
            config,
            dirty: false,
        }
    }

    /// The configuration the engine was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Adds a word to the dictionary.
    ///
    /// The word is canonicalized first: surrounding whitespace is stripped
    /// and ASCII letters are lowercased, while non-ASCII bytes are preserved
    /// verbatim.
    ///
    /// # Returns
    ///
    /// * [`AddOutcome::Added`] - The word is newly in the dictionary.
    /// * [`AddOutcome::AlreadyPresent`] - The word was already there.
    ///
    /// # Errors
    ///
    /// Returns an [`AddError`] when the word fails validation or the
    /// dictionary is full. The dictionary is unchanged in this case.
    pub fn add(&mut self, word: &str) -> Result<AddOutcome, AddError> {
        match self.words.add(word)? {
            SetInsertion::Present(_) => Ok(AddOutcome::AlreadyPresent),
            SetInsertion::Inserted(id) => {
                let text = self.words.word(id);
                self.completions.insert(text);
                self.suggestions.insert(&self.words, id);
                self.dirty = true;
                Ok(AddOutcome::Added)
            }
        }
    }

    /// Removes a word from the dictionary.
    ///
    /// # Returns
    ///
    /// * [`RemoveOutcome::Removed`] - The word is no longer in the dictionary.
    /// * [`RemoveOutcome::NotFound`] - The word was not there.
    ///
    /// # Errors
    ///
    /// Returns a [`WordError`] when the word fails validation.
    pub fn remove(&mut self, word: &str) -> Result<RemoveOutcome, WordError> {
        match self.words.remove(word)? {
            None => Ok(RemoveOutcome::NotFound),
            Some(id) => {
                let text = self.words.word(id);
                self.completions.remove(text);
                self.suggestions.remove(&self.words, id);
                self.dirty = true;
                self.maybe_rebuild_suggestions();
                Ok(RemoveOutcome::Removed)
            }
        }
    }

    /// Checks whether the canonical form of `word` is in the dictionary.
    /// Words that fail validation are simply not members.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// The number of words in the dictionary.
    pub fn count(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether the dictionary has mutated since the last successful
    /// [`WordLib::save`] or [`WordLib::load`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Iterates over every word in unspecified order.
    /// The iterator is invalidated by any mutation.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|(_, word)| word)
    }

    /// Every word in byte-lexicographic order. This is the order
    /// [`WordLib::save`] writes.
    pub fn sorted_words(&self) -> Vec<&str> {
        utils::get_deterministic_display_form_from_words(self.words())
    }

    /// Collects up to `limit` words beginning with `prefix`, in
    /// byte-lexicographic order.
    ///
    /// The prefix is matched byte-wise against canonical words and is not
    /// canonicalized itself, so an uppercase prefix completes to nothing.
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.completions.complete(prefix.as_bytes(), limit)
    }

    /// Collects up to `limit` words within `max_distance` byte-level edits of
    /// `word`, sorted by ascending distance and then ascending word. The word
    /// itself is never suggested.
    ///
    /// # Errors
    ///
    /// Returns a [`SuggestError`] when the query fails validation or
    /// `max_distance` exceeds [`MAX_SUGGEST_DISTANCE`].
    pub fn suggest(
        &self,
        word: &str,
        max_distance: u32,
        limit: usize,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        if max_distance > MAX_SUGGEST_DISTANCE {
            return Err(SuggestError::MaxDistanceTooLarge(max_distance));
        }
        let query = canonicalize(word)?;
        Ok(self
            .suggestions
            .suggest(&self.words, &query, max_distance, limit))
    }

    /// Tokenizes `text` and returns up to `limit` tokens that are not in the
    /// dictionary, in order of appearance.
    ///
    /// Tokens are matched case-insensitively for ASCII, so `The` is known
    /// when `the` is in the dictionary.
    pub fn check_text<'text>(&self, text: &'text str, limit: usize) -> Vec<UnknownWord<'text>> {
        let mut unknown = Vec::new();
        for span in tokenizer::tokenize(text.as_bytes(), &self.config.tokenizer) {
            if unknown.len() == limit {
                break;
            }
            let word = &text[span.start..span.end];
            if !self.words.contains(word) {
                unknown.push(UnknownWord { span, word });
            }
        }
        unknown
    }

    /// Empties the dictionary. The engine becomes dirty when anything was
    /// removed.
    pub fn clear(&mut self) {
        if !self.words.is_empty() {
            self.dirty = true;
        }
        self.words.clear();
        self.completions.clear();
        self.suggestions.clear();
    }

    /// Replaces the dictionary with the content of the file at `path`.
    ///
    /// A missing file loads an empty dictionary. Malformed lines are skipped,
    /// counted in the returned [`LoadStats`] and reported through
    /// [`log::warn!`]. On success the engine is clean.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when the file cannot be read or every line of
    /// a non-empty file is malformed. The in-memory dictionary is unchanged
    /// in this case.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadStats, LoadError> {
        let path = path.as_ref();
        let file = storage::load(path)?;
        self.words.clear();
        self.completions.clear();
        self.suggestions.clear();
        let mut skipped = file.skipped;
        for word in &file.words {
            match self.words.add(word) {
                Ok(_) => {}
                Err(error) => {
                    log::warn!("skipping a word while loading `{}`: {}", path.display(), error);
                    skipped += 1;
                }
            }
        }
        self.rebuild_completions();
        self.rebuild_suggestions(RebuildReason::Load);
        self.dirty = false;
        if skipped > 0 {
            log::warn!(
                "skipped {} malformed line(s) while loading `{}`",
                skipped,
                path.display()
            );
        }
        Ok(LoadStats {
            loaded: self.words.len(),
            skipped,
        })
    }

    /// Writes the dictionary to the file at `path`.
    ///
    /// Words are written sorted, one per line, through the atomic protocol of
    /// [`storage::save`]: a crash at any point leaves either the previous
    /// file or the new one. On success the engine is clean.
    ///
    /// # Errors
    ///
    /// Returns a [`SaveError`] when any filesystem step fails; the file at
    /// `path` is untouched in this case.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.rebuild_suggestions(RebuildReason::Save);
        let sorted = self.sorted_words();
        storage::save(path.as_ref(), &sorted)?;
        self.dirty = false;
        Ok(())
    }

    fn rebuild_completions(&mut self) {
        self.completions.clear();
        for (_, text) in self.words.iter() {
            self.completions.insert(text);
        }
    }

    fn rebuild_suggestions(&mut self, reason: RebuildReason) {
        let mut fresh = BkTree::new();
        let mut live: Vec<_> = self.words.iter().collect();
        // Insertion order shapes the tree; sorting keeps rebuilds
        // deterministic across runs.
        live.sort_unstable_by(|a, b| a.1.cmp(b.1));
        for (id, _) in live {
            fresh.insert(&self.words, id);
        }
        self.suggestions = fresh;
        self.words.sweep();
        log::debug!(
            "rebuilt the suggestion index ({}): {} live words",
            reason,
            self.words.len()
        );
    }

    fn maybe_rebuild_suggestions(&mut self) {
        let threshold = usize::from(self.config.engine.max_tombstone_percent);
        if self.suggestions.tombstone_count() * 100 > self.suggestions.live_count() * threshold {
            self.rebuild_suggestions(RebuildReason::TombstonePressure);
        }
    }
}
