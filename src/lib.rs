/*!
# wordlib

This crate provides a process-local word library engine: it ingests a personal
dictionary, answers membership queries, generates prefix completions, proposes
spelling suggestions for misspelled tokens, and tokenizes arbitrary text to
locate unknown words. It is designed to be embedded behind thin adapters (a
command-line front-end, an editor language-server adapter) that never see its
internals.
Here is a quick example of how this crate works:

```rust
use wordlib::{AddOutcome, Span, WordLib};

let mut library = WordLib::new();
assert_eq!(library.add("Hello").unwrap(), AddOutcome::Added);
assert_eq!(library.add("help").unwrap(), AddOutcome::Added);
assert_eq!(library.add("helicopter").unwrap(), AddOutcome::Added);
assert_eq!(library.add("world").unwrap(), AddOutcome::Added);
// Membership is case-insensitive for ASCII.
assert!(library.contains("hello"));
assert!(library.contains("HELLO"));
// Completion is byte-lexicographic.
assert_eq!(library.complete("hel", 10), ["helicopter", "hello", "help"]);
// Suggestions are sorted by distance, then by word.
let suggestions = library.suggest("helo", 2, 10).unwrap();
assert_eq!(suggestions[0].word, "hello");
assert_eq!(suggestions[0].distance, 1);
// Unknown tokens come back with byte-accurate spans.
let unknown = library.check_text("hello wrld", 10);
assert_eq!(unknown.len(), 1);
assert_eq!(unknown[0].word, "wrld");
assert_eq!(unknown[0].span, Span { start: 6, end: 10 });
```

# Overview

The primary type in this crate is [WordLib], a facade over five cooperating
components with a strict dependency order:

1. [`WordSet`](word_set::WordSet): exact membership with near-constant-time
   lookup; the owner of the canonical bytes of every word.
2. [`Trie`](trie::Trie): ordered-prefix completion.
3. [`BkTree`](bktree::BkTree): bounded edit-distance suggestion.
4. [`tokenize`](tokenizer::tokenize): UTF-8 text to byte-accurate word spans.
5. [`storage`]: atomic load/save of a flat word file.

The facade keeps the three indexes consistent on every mutation, tracks a
dirty flag, and answers [WordLib::check_text] by composing the tokenizer with
the membership set. The most important methods are:

- [WordLib::add] / [WordLib::remove]: mutate the dictionary; the outcome
  enums distinguish "nothing changed" from a real mutation.
- [WordLib::complete]: prefix completion in byte-lexicographic order.
- [WordLib::suggest]: spelling suggestions within a bounded edit distance.
- [WordLib::check_text]: locate tokens that are not in the dictionary.
- [WordLib::load] / [WordLib::save]: durable persistence; `save` is atomic
  under crashes.

# Canonical form

Words are stored canonically: surrounding whitespace stripped, ASCII letters
lowercased, everything else preserved verbatim. Case-insensitivity is
therefore ASCII-only: `café` and `CAFÉ` are distinct words. Adapters that
want full Unicode case folding canonicalize before calling in.

# Dictionary files

A dictionary file is UTF-8 text with one word per line, LF line endings, and
words in byte-lexicographic order, the shape of `/usr/share/dict/words`.
[WordLib::save] writes through a temporary sibling file, fsync and rename, so
a crash at any point leaves either the old file or the new one, with the
previous content in `<path>.bak`.

# Concurrency

The engine is a plain value: single-writer, no interior locking, no global
state. Adapters that share one across threads serialize access themselves;
two processes saving to the same path race and the last rename wins.
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
pub mod bktree;
pub mod config;
pub mod engine;
pub mod storage;
pub mod tokenizer;
pub mod trie;
pub mod utils;
pub mod word;
pub mod word_set;
pub use bktree::Suggestion;
pub use config::Config;
pub use config::EngineConfig;
pub use config::TokenizerConfig;
pub use engine::AddOutcome;
pub use engine::LoadStats;
pub use engine::RemoveOutcome;
pub use engine::SuggestError;
pub use engine::UnknownWord;
pub use engine::WordLib;
pub use engine::MAX_SUGGEST_DISTANCE;
pub use storage::LoadError;
pub use storage::SaveError;
pub use tokenizer::Span;
pub use word::WordError;
pub use word::MAX_WORD_BYTES;
pub use word_set::AddError;
