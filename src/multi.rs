// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Multi-key skip list map.
//!
//! Duplicate keys are allowed. Nodes are ordered by `(key, sequence)`, where
//! the sequence number is assigned from a counter at insertion time, so equal
//! keys keep their arrival order:
//!
//! ```text
//! insert 1:a, 1:b, 2:c, 1:d
//!
//! HEAD -> (1,#0,a) -> (1,#1,b) -> (1,#3,d) -> (2,#2,c) -> NIL
//! ```
//!
//! `find_range(&1)` yields `a, b, d`; `erase_one(&1)` removes `a`.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::compare::{Comparator, Natural};
use crate::config::Config;
use crate::error::{ConfigError, InvariantError};
use crate::iter::{self, Walk};
use crate::level::{self, Geometric, LevelGenerator};
use crate::raw::RawSkipList;

/// A stored value and the sequence number it was inserted with.
#[derive(Clone, Debug)]
pub(crate) struct Occurrence<V> {
    seq: u64,
    value: V,
}

/// An ordered map that keeps every inserted `(key, value)` pair.
#[derive(Clone)]
pub struct MultiSkipMap<K, V, C = Natural, G = Geometric> {
    raw: RawSkipList<K, Occurrence<V>, G, false>,
    cmp: C,
    next_seq: u64,
}

impl<K: Ord, V> MultiSkipMap<K, V> {
    /// An empty map with natural key order and the default configuration.
    pub fn new() -> Self {
        Self::from_generator(Geometric::default(), Natural)
    }

    /// An empty map with natural key order.
    pub fn with_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::from_generator(config.generator()?, Natural))
    }
}

impl<K, V, C: Comparator<K>> MultiSkipMap<K, V, C> {
    /// An empty map ordered by `cmp`.
    pub fn with_comparator(config: &Config, cmp: C) -> Result<Self, ConfigError> {
        Ok(Self::from_generator(config.generator()?, cmp))
    }
}

impl<K, V, C, G> MultiSkipMap<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    /// An empty map drawing node levels from `generator`.
    ///
    /// Fails if the generator reports a `max_level` outside
    /// `1..=MAX_LEVEL_LIMIT`.
    pub fn with_generator(generator: G, cmp: C) -> Result<Self, ConfigError> {
        level::validate_max_level(generator.max_level())?;
        Ok(Self::from_generator(generator, cmp))
    }

    fn from_generator(generator: G, cmp: C) -> Self {
        MultiSkipMap {
            raw: RawSkipList::new(generator),
            cmp,
            next_seq: 0,
        }
    }

    /// Insert `(key, value)` after every existing occurrence of `key`.
    pub fn insert(&mut self, key: K, value: V) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let cmp = &self.cmp;
        let path = self.raw.descend(|k, occurrence| match cmp.compare(k, &key) {
            Ordering::Less => true,
            Ordering::Equal => occurrence.seq < seq,
            Ordering::Greater => false,
        });
        self.raw.link(path, key, Occurrence { seq, value });
    }

    /// The earliest inserted value still stored for `key`.
    pub fn find(&self, key: &K) -> Option<&V> {
        let (idx, _) = self.raw.find(key, &self.cmp)?;
        Some(&self.raw.node(idx).value.value)
    }

    /// Every value stored for `key`, in insertion order.
    ///
    /// The iterator borrows `key` separately from the map, so a temporary key
    /// only needs to outlive the iteration.
    pub fn find_range<'a, 'k>(&'a self, key: &'k K) -> Range<'a, 'k, K, V, C> {
        let (start, _) = self.raw.lower_bound(key, &self.cmp);
        Range {
            walk: self.raw.walk_from(start),
            key,
            cmp: &self.cmp,
        }
    }

    /// Number of values stored for `key`.
    pub fn count(&self, key: &K) -> usize {
        self.find_range(key).count()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find(key, &self.cmp).is_some()
    }

    /// Remove the earliest inserted occurrence of `key`, returning its value.
    pub fn remove_one(&mut self, key: &K) -> Option<V> {
        self.raw
            .remove_first(key, &self.cmp)
            .map(|(_, occurrence)| occurrence.value)
    }

    /// Remove the earliest inserted occurrence of `key`.
    pub fn erase_one(&mut self, key: &K) -> bool {
        self.remove_one(key).is_some()
    }

    /// Remove every occurrence of `key`, one search and unlink at a time.
    /// Returns how many were removed.
    pub fn erase_all(&mut self, key: &K) -> usize {
        let mut removed = 0;
        while self.raw.remove_first(key, &self.cmp).is_some() {
            removed += 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    pub fn height(&self) -> usize {
        self.raw.height()
    }

    pub fn max_level(&self) -> usize {
        self.raw.max_level()
    }

    /// Remove everything. Sequence numbering continues where it left off.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// All pairs ordered by key, then by insertion.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.raw.iter(),
        }
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + Clone + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + Clone + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Check every structural invariant, including that equal keys appear in
    /// insertion order.
    pub fn verify(&self) -> Result<(), InvariantError> {
        let cmp = &self.cmp;
        self.raw.verify(|a, b| match cmp.compare(&a.key, &b.key) {
            Ordering::Less => true,
            Ordering::Equal => a.value.seq < b.value.seq,
            Ordering::Greater => false,
        })
    }
}

/// All values of one key, in insertion order.
pub struct Range<'a, 'k, K, V, C> {
    walk: Walk<'a, K, Occurrence<V>>,
    key: &'k K,
    cmp: &'a C,
}

impl<K, V, C> Clone for Range<'_, '_, K, V, C> {
    fn clone(&self) -> Self {
        Range {
            walk: self.walk.clone(),
            key: self.key,
            cmp: self.cmp,
        }
    }
}

impl<'a, K, V, C: Comparator<K>> Iterator for Range<'a, '_, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let (k, occurrence) = self.walk.peek()?;
        if !self.cmp.compare(k, self.key).is_eq() {
            return None;
        }
        self.walk.next();
        Some(&occurrence.value)
    }
}

impl<K, V, C: Comparator<K>> FusedIterator for Range<'_, '_, K, V, C> {}

/// Ascending iterator over the pairs of a [`MultiSkipMap`].
pub struct Iter<'a, K, V> {
    inner: iter::Iter<'a, K, Occurrence<V>>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, occurrence)| (k, &occurrence.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

// ///////////////////////////////////////////////
// Trait implementations
// ///////////////////////////////////////////////

impl<K: Ord, V> Default for MultiSkipMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C, G> fmt::Debug for MultiSkipMap<K, V, C, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
    G: LevelGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, V, C, G> PartialEq for MultiSkipMap<K, V, C, G>
where
    K: PartialEq,
    V: PartialEq,
    C: Comparator<K>,
    G: LevelGenerator,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C, G> Eq for MultiSkipMap<K, V, C, G>
where
    K: Eq,
    V: Eq,
    C: Comparator<K>,
    G: LevelGenerator,
{
}

impl<K, V, C, G> PartialOrd for MultiSkipMap<K, V, C, G>
where
    K: PartialOrd,
    V: PartialOrd,
    C: Comparator<K>,
    G: LevelGenerator,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, V, C, G> Ord for MultiSkipMap<K, V, C, G>
where
    K: Ord,
    V: Ord,
    C: Comparator<K>,
    G: LevelGenerator,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K, V, C, G> Extend<(K, V)> for MultiSkipMap<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for MultiSkipMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C, G> IntoIterator for &'a MultiSkipMap<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
