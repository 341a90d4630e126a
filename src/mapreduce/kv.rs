//! The universal carrier types: bounded string pairs and the growable
//! list they travel in.
//!
//! Every stage of a job (input, intermediate partitions, output) is a
//! [`KvList`]. Appends copy both strings and truncate them to the bounded
//! maxima, always on a `char` boundary, so a single oversized emission
//! cannot blow up a partition.

use serde::{Deserialize, Serialize};
use std::slice;
use std::vec;

/// Maximum stored key length, in bytes.
pub const KEY_MAX: usize = 128;

/// Maximum stored value length, in bytes.
pub const VALUE_MAX: usize = 1024;

/// Initial capacity of a fresh [`KvList`].
pub const INITIAL_CAPACITY: usize = 64;

/// One key/value pair. Both sides are owned, bounded strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPair {
    pub key: String,
    pub value: String,
}

/// A growable, insertion-ordered sequence of [`KvPair`]s.
#[derive(Debug, Clone, Default)]
pub struct KvList {
    items: Vec<KvPair>,
}

impl KvList {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
        }
    }

    /// Append a pair by copy, truncating both strings to their bounds.
    pub fn push(&mut self, key: &str, value: &str) {
        self.items.push(KvPair {
            key: bounded(key, KEY_MAX).to_owned(),
            value: bounded(value, VALUE_MAX).to_owned(),
        });
    }

    /// Append an already-bounded pair without re-copying.
    pub(crate) fn append(&mut self, pair: KvPair) {
        self.items.push(pair);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sort ascending by key, lexicographically. Not stable; equal keys
    /// keep no particular relative order.
    pub fn sort_by_key(&mut self) {
        self.items.sort_unstable_by(|a, b| a.key.cmp(&b.key));
    }

    pub fn iter(&self) -> slice::Iter<'_, KvPair> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[KvPair] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<KvPair> {
        self.items
    }

    pub(crate) fn drain(&mut self) -> vec::Drain<'_, KvPair> {
        self.items.drain(..)
    }

    /// An append capability over this list, for driving map and reduce
    /// callbacks by hand (tests, custom harnesses).
    pub fn emitter(&mut self) -> Emitter<'_> {
        Emitter { list: self }
    }
}

impl<'a> IntoIterator for &'a KvList {
    type Item = &'a KvPair;
    type IntoIter = slice::Iter<'a, KvPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for KvList {
    type Item = KvPair;
    type IntoIter = vec::IntoIter<KvPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// The append capability handed to map and reduce callbacks.
///
/// An `Emitter` targets exactly one list: the worker-local scratch buffer
/// during the map phase, routed to partitions afterwards, and the shared
/// output list during the reduce phase.
pub struct Emitter<'a> {
    list: &'a mut KvList,
}

impl Emitter<'_> {
    pub fn emit(&mut self, key: &str, value: &str) {
        self.list.push(key, value);
    }
}

/// A maximal run of equal keys in a sorted partition, as presented to the
/// reduce callback. The keys in the underlying slots are all identical;
/// only the value side is interesting here.
pub struct Group<'a> {
    pairs: &'a [KvPair],
}

impl<'a> Group<'a> {
    pub fn new(pairs: &'a [KvPair]) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.pairs.iter().map(|p| p.value.as_str())
    }
}

/// Clip `s` to at most `max` bytes without splitting a `char`.
fn bounded(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
