//! This module contains the tokenizer that locates candidate words in
//! arbitrary bytes.
use serde::Serialize;

use crate::config::TokenizerConfig;

/// A half-open byte interval `[start, end)` into a caller-owned text buffer.
///
/// Spans emitted by [`tokenize`] always start and end on UTF-8 code-point
/// boundaries, so they can be used to slice the source text directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// The byte offset of the first byte of the token.
    pub start: usize,
    /// The byte offset one past the last byte of the token.
    pub end: usize,
}

impl Span {
    /// The length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty. Emitted spans never are.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// Starts or continues a word.
    Word,
    /// Belongs to a word only between two word characters.
    Joiner,
    Separator,
}

fn classify(character: char, config: &TokenizerConfig) -> CharClass {
    match character {
        '\'' | '\u{2019}' => {
            if config.include_apostrophes {
                CharClass::Joiner
            } else {
                CharClass::Separator
            }
        }
        '-' => {
            if config.include_hyphens {
                CharClass::Joiner
            } else {
                CharClass::Separator
            }
        }
        c if c.is_ascii_alphabetic() => CharClass::Word,
        c if c.is_ascii_digit() => {
            if config.include_digits {
                CharClass::Word
            } else {
                CharClass::Separator
            }
        }
        // Non-ASCII code points are assumed to be letters of some script.
        c if !c.is_ascii() => CharClass::Word,
        _ => CharClass::Separator,
    }
}

/// Decodes the character starting at `index`, returning `None` and a one-byte
/// advance when the bytes there are not valid UTF-8.
fn decode(text: &[u8], index: usize) -> (Option<char>, usize) {
    let window_end = text.len().min(index + 4);
    let window = match std::str::from_utf8(&text[index..window_end]) {
        Ok(window) => window,
        Err(error) => {
            let valid = error.valid_up_to();
            if valid == 0 {
                return (None, 1);
            }
            match std::str::from_utf8(&text[index..index + valid]) {
                Ok(window) => window,
                Err(_) => return (None, 1),
            }
        }
    };
    match window.chars().next() {
        Some(character) => (Some(character), character.len_utf8()),
        None => (None, 1),
    }
}

fn flush(spans: &mut Vec<Span>, start: usize, end: usize, config: &TokenizerConfig) {
    if end <= start {
        return;
    }
    let length = end - start;
    if length >= config.min_length && length <= config.max_length {
        spans.push(Span { start, end });
    }
}

/// Scans `text` left to right and returns the spans of candidate words, in
/// order of appearance.
///
/// A byte starts or continues a word when it decodes to an ASCII letter, an
/// ASCII digit (when enabled) or any non-ASCII code point. Apostrophes and
/// hyphens join two word characters when enabled and are trimmed at token
/// edges. Malformed UTF-8 never aborts the scan; an undecodable byte is a
/// separator.
///
/// The tokenizer is a single pass, holds no state between calls and
/// allocates only for the returned vector.
///
/// ```rust
/// use wordlib::config::TokenizerConfig;
/// use wordlib::tokenizer::{tokenize, Span};
///
/// let spans = tokenize(b"don't panic", &TokenizerConfig::default());
/// assert_eq!(spans, [Span { start: 0, end: 5 }, Span { start: 6, end: 11 }]);
/// ```
pub fn tokenize(text: &[u8], config: &TokenizerConfig) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut word_end = 0usize;
    let mut joiner_pending = false;
    let mut index = 0usize;
    while index < text.len() {
        let (decoded, length) = decode(text, index);
        let class = match decoded {
            Some(character) => classify(character, config),
            None => CharClass::Separator,
        };
        match class {
            CharClass::Word => {
                match start {
                    None => start = Some(index),
                    Some(token_start) => {
                        if index + length - token_start > config.max_length {
                            flush(&mut spans, token_start, word_end, config);
                            start = Some(index);
                        }
                    }
                }
                word_end = index + length;
                joiner_pending = false;
            }
            CharClass::Joiner => {
                // A joiner stays inside the token only directly after a word
                // character; a second consecutive joiner ends the token.
                if start.is_some() && !joiner_pending && word_end == index {
                    joiner_pending = true;
                } else {
                    if let Some(token_start) = start {
                        flush(&mut spans, token_start, word_end, config);
                    }
                    start = None;
                    joiner_pending = false;
                }
            }
            CharClass::Separator => {
                if let Some(token_start) = start {
                    flush(&mut spans, token_start, word_end, config);
                }
                start = None;
                joiner_pending = false;
            }
        }
        index += length;
    }
    if let Some(token_start) = start {
        flush(&mut spans, token_start, word_end, config);
    }
    spans
}
