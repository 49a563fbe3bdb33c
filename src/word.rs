//! This module contains the canonical word form and its validation rules.
use std::borrow::Cow;

use nonmax::NonMaxU32;

/// The maximum length of a canonical word in bytes.
pub const MAX_WORD_BYTES: usize = 256;

/// The error type for words that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum WordError {
    /// The word is empty after surrounding whitespace is stripped.
    #[error("the word is empty after surrounding whitespace is stripped")]
    Empty,
    /// The word is longer than [`MAX_WORD_BYTES`] bytes.
    #[error("the word is {0} bytes long, while the maximum supported is {MAX_WORD_BYTES}")]
    TooLong(usize),
    /// The word contains an embedded NUL byte.
    #[error("the word contains an embedded NUL byte")]
    EmbeddedNul,
}

/// An opaque handle to a word owned by a [`WordSet`](crate::word_set::WordSet).
///
/// Handles stay valid across table growth; secondary indexes hold them instead
/// of copying the word bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct WordId(pub(crate) NonMaxU32);

impl WordId {
    pub(crate) fn from_usize(index: usize) -> Option<WordId> {
        u32::try_from(index).ok().and_then(NonMaxU32::new).map(WordId)
    }

    pub(crate) fn as_usize(self) -> usize {
        self.0.get() as usize
    }
}

/// Converts a raw word into its canonical form.
///
/// Canonicalization strips surrounding whitespace and lowercases ASCII
/// letters. Bytes outside the ASCII range are preserved verbatim, so `café`
/// and `CAFÉ` canonicalize to different words.
///
/// # Errors
///
/// Returns a [`WordError`] when the trimmed word is empty, longer than
/// [`MAX_WORD_BYTES`] bytes or contains a NUL byte.
pub fn canonicalize(raw: &str) -> Result<Cow<'_, str>, WordError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WordError::Empty);
    }
    if trimmed.len() > MAX_WORD_BYTES {
        return Err(WordError::TooLong(trimmed.len()));
    }
    if trimmed.bytes().any(|byte| byte == 0) {
        return Err(WordError::EmbeddedNul);
    }
    if trimmed.bytes().any(|byte| byte.is_ascii_uppercase()) {
        // str::to_ascii_lowercase leaves multibyte sequences untouched.
        Ok(Cow::Owned(trimmed.to_ascii_lowercase()))
    } else {
        Ok(Cow::Borrowed(trimmed))
    }
}
