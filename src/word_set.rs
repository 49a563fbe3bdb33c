//! This module contains the [`WordSet`] struct, the exact-membership index
//! that owns the canonical bytes of every word in the library.
use std::fmt::Debug;

use crate::utils;
use crate::word::{canonicalize, WordError, WordId};

const INITIAL_CAPACITY: usize = 64;
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a over the canonical bytes. 32 bits suffice for the dictionary sizes
/// this crate targets; the hash is cached per slot so growth never rehashes.
pub(crate) fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Tombstone,
    Live { hash: u32, id: WordId },
}

#[derive(Debug, Clone)]
enum Entry {
    Vacant,
    Live(Box<str>),
    /// Removed from the table but the bytes are retained until
    /// [`WordSet::sweep`], so secondary indexes can keep resolving the handle.
    Doomed(Box<str>),
}

enum Probe {
    Found(usize),
    Vacant(usize),
}

#[derive(Debug, thiserror::Error)]
/// The error type for [`WordSet::add`].
pub enum AddError {
    /// The word failed validation.
    #[error("{0}")]
    Word(#[from] WordError),
    /// Every word handle is in use.
    #[error("the dictionary holds {0} words, the maximum supported")]
    DictionaryFull(usize),
}

/// The outcome of [`WordSet::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetInsertion {
    /// The word was absent and is now live under the given handle.
    Inserted(WordId),
    /// The canonical form was already live; nothing changed.
    Present(WordId),
}

/// An open-addressed hash set of canonical words.
///
/// Slots hold a cached FNV-1a hash and a [`WordId`] into an internal arena of
/// owned strings. Probing is linear with tombstones: removal leaves a
/// tombstone so probe chains stay intact, and the first tombstone seen during
/// an insert probe is reused when the key is absent. The table doubles when
/// live plus tombstoned slots exceed three quarters of capacity; tombstones
/// are dropped on growth.
#[derive(Clone)]
pub struct WordSet {
    slots: Box<[Slot]>,
    entries: Vec<Entry>,
    free: Vec<u32>,
    live: usize,
    tombstones: usize,
}

impl Default for WordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSet {
    /// Creates an empty set with the initial power-of-two capacity.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::Empty; INITIAL_CAPACITY].into_boxed_slice(),
            entries: Vec::new(),
            free: Vec::new(),
            live: 0,
            tombstones: 0,
        }
    }

    /// Adds a word to the set.
    ///
    /// The input is canonicalized first; see [`canonicalize`](crate::word::canonicalize)
    /// for the rules.
    ///
    /// # Returns
    ///
    /// * [`SetInsertion::Inserted`] - The word was absent and is now live.
    /// * [`SetInsertion::Present`] - The canonical form was already live.
    ///
    /// # Errors
    ///
    /// Returns an [`AddError`] when the word fails validation or no word
    /// handle is available.
    pub fn add(&mut self, raw: &str) -> Result<SetInsertion, AddError> {
        let canonical = canonicalize(raw)?;
        if (self.live + self.tombstones + 1) * 4 > self.slots.len() * 3 {
            self.grow();
        }
        let hash = fnv1a(canonical.as_bytes());
        match self.probe(hash, &canonical) {
            Probe::Found(index) => match self.slots[index] {
                Slot::Live { id, .. } => Ok(SetInsertion::Present(id)),
                _ => unreachable!("probe returned a non-live slot as found"),
            },
            Probe::Vacant(index) => {
                let id = self.allocate(canonical.into_owned().into_boxed_str())?;
                if matches!(self.slots[index], Slot::Tombstone) {
                    self.tombstones -= 1;
                }
                self.slots[index] = Slot::Live { hash, id };
                self.live += 1;
                Ok(SetInsertion::Inserted(id))
            }
        }
    }

    /// Removes a word from the set.
    ///
    /// The slot becomes a tombstone and the word bytes are retained until
    /// [`WordSet::sweep`], so handles held by secondary indexes keep
    /// resolving.
    ///
    /// # Returns
    ///
    /// * `Some(WordId)` - The handle of the removed word.
    /// * `None` - The word was not in the set.
    ///
    /// # Errors
    ///
    /// Returns a [`WordError`] when the word fails validation.
    pub fn remove(&mut self, raw: &str) -> Result<Option<WordId>, WordError> {
        let canonical = canonicalize(raw)?;
        let hash = fnv1a(canonical.as_bytes());
        match self.probe(hash, &canonical) {
            Probe::Found(index) => match self.slots[index] {
                Slot::Live { id, .. } => {
                    self.slots[index] = Slot::Tombstone;
                    self.live -= 1;
                    self.tombstones += 1;
                    let entry_index = id.as_usize();
                    if let Entry::Live(word) =
                        std::mem::replace(&mut self.entries[entry_index], Entry::Vacant)
                    {
                        self.entries[entry_index] = Entry::Doomed(word);
                    }
                    Ok(Some(id))
                }
                _ => unreachable!("probe returned a non-live slot as found"),
            },
            Probe::Vacant(_) => Ok(None),
        }
    }

    /// Checks whether the canonical form of `raw` is in the set.
    /// Invalid words are simply not members.
    pub fn contains(&self, raw: &str) -> bool {
        self.id_of(raw).is_some()
    }

    /// Retrieves the handle of the canonical form of `raw`, if it is live.
    pub fn id_of(&self, raw: &str) -> Option<WordId> {
        let canonical = canonicalize(raw).ok()?;
        let hash = fnv1a(canonical.as_bytes());
        match self.probe(hash, &canonical) {
            Probe::Found(index) => match self.slots[index] {
                Slot::Live { id, .. } => Some(id),
                _ => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    /// Resolves a handle to its word.
    ///
    /// Handles of removed words keep resolving until [`WordSet::sweep`].
    pub fn word(&self, id: WordId) -> &str {
        match &self.entries[id.as_usize()] {
            Entry::Live(word) | Entry::Doomed(word) => word,
            Entry::Vacant => unreachable!("word handle resolves to a vacant entry"),
        }
    }

    /// The number of live words.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the set holds no live words.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The current slot capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over every live word in unspecified order.
    /// The iterator is invalidated by any mutation.
    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> + '_ {
        self.slots.iter().filter_map(move |slot| match *slot {
            Slot::Live { id, .. } => Some((id, self.word(id))),
            _ => None,
        })
    }

    /// Empties the set, releasing every entry including doomed ones.
    pub fn clear(&mut self) {
        self.slots = vec![Slot::Empty; INITIAL_CAPACITY].into_boxed_slice();
        self.entries.clear();
        self.free.clear();
        self.live = 0;
        self.tombstones = 0;
    }

    /// Releases the bytes of removed words and recycles their handles.
    /// Callers must drop every stale handle before sweeping.
    pub(crate) fn sweep(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if matches!(entry, Entry::Doomed(_)) {
                *entry = Entry::Vacant;
                self.free.push(index as u32);
            }
        }
    }

    fn probe(&self, hash: u32, word: &str) -> Probe {
        let mask = self.slots.len() - 1;
        let mut index = hash as usize & mask;
        let mut reusable = None;
        loop {
            match self.slots[index] {
                Slot::Empty => return Probe::Vacant(reusable.unwrap_or(index)),
                Slot::Tombstone => {
                    if reusable.is_none() {
                        reusable = Some(index);
                    }
                }
                Slot::Live {
                    hash: slot_hash,
                    id,
                } => {
                    if slot_hash == hash && self.word(id) == word {
                        return Probe::Found(index);
                    }
                }
            }
            index = (index + 1) & mask;
        }
    }

    fn allocate(&mut self, word: Box<str>) -> Result<WordId, AddError> {
        if let Some(index) = self.free.pop() {
            let id = WordId::from_usize(index as usize)
                .unwrap_or_else(|| unreachable!("recycled handle out of range"));
            self.entries[index as usize] = Entry::Live(word);
            Ok(id)
        } else {
            let id = WordId::from_usize(self.entries.len())
                .ok_or(AddError::DictionaryFull(self.entries.len()))?;
            self.entries.push(Entry::Live(word));
            Ok(id)
        }
    }

    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        let mask = new_capacity - 1;
        let mut new_slots = vec![Slot::Empty; new_capacity].into_boxed_slice();
        for slot in self.slots.iter() {
            if let Slot::Live { hash, id } = *slot {
                let mut index = hash as usize & mask;
                while !matches!(new_slots[index], Slot::Empty) {
                    index = (index + 1) & mask;
                }
                new_slots[index] = Slot::Live { hash, id };
            }
        }
        self.slots = new_slots;
        self.tombstones = 0;
    }
}

impl Debug for WordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordSet")
            .field("live", &self.live)
            .field("tombstones", &self.tombstones)
            .field("capacity", &self.slots.len())
            .field(
                "words",
                &utils::get_deterministic_display_form_from_words(self.iter().map(|(_, w)| w)),
            )
            .finish()
    }
}
