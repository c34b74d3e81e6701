// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Unique-key ordered maps.
//!
//! [`OrderedMap`] is one type with two faces, selected by its `INDEXED`
//! parameter:
//!
//! - [`SkipMap`] (`INDEXED = false`): find, insert and erase in expected
//!   `O(log n)`.
//! - [`IndexedSkipMap`] (`INDEXED = true`): the same, plus span counters on
//!   every link so that [`at`](OrderedMap::at) and
//!   [`rank_of`](OrderedMap::rank_of) are also expected `O(log n)`. Inserts
//!   and erases maintain the spans during the same descent that finds the
//!   insertion point.
//!
//! # Example
//!
//! ```
//! use skipmap::IndexedSkipMap;
//!
//! let mut map = IndexedSkipMap::new();
//! for key in [5, 1, 4, 2, 3] {
//!     map.insert(key, key * 10);
//! }
//!
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(map.at(0), Some((&1, &10)));
//! assert_eq!(map.at(4), Some((&5, &50)));
//! assert_eq!(map.rank_of(&4), Some(3));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::compare::{Comparator, Natural};
use crate::config::Config;
use crate::error::{ConfigError, InvariantError};
use crate::iter::{Iter, Keys, Values};
use crate::level::{self, Geometric, LevelGenerator};
use crate::raw::{NIL, RawSkipList};

/// An ordered map with unique keys, backed by a skip list.
///
/// Use through the [`SkipMap`] and [`IndexedSkipMap`] aliases.
#[derive(Clone)]
pub struct OrderedMap<K, V, C, G, const INDEXED: bool> {
    raw: RawSkipList<K, V, G, INDEXED>,
    cmp: C,
}

/// Unique-key skip list map.
pub type SkipMap<K, V, C = Natural, G = Geometric> = OrderedMap<K, V, C, G, false>;

/// Unique-key skip list map with rank queries.
pub type IndexedSkipMap<K, V, C = Natural, G = Geometric> = OrderedMap<K, V, C, G, true>;

impl<K: Ord, V, const INDEXED: bool> OrderedMap<K, V, Natural, Geometric, INDEXED> {
    /// An empty map with natural key order and the default configuration.
    pub fn new() -> Self {
        Self::from_generator(Geometric::default(), Natural)
    }

    /// An empty map with natural key order.
    ///
    /// Fails if `config` is invalid; no map is built in that case.
    pub fn with_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::from_generator(config.generator()?, Natural))
    }
}

impl<K, V, C: Comparator<K>, const INDEXED: bool> OrderedMap<K, V, C, Geometric, INDEXED> {
    /// An empty map ordered by `cmp`.
    ///
    /// ```
    /// use skipmap::{Config, SkipMap};
    ///
    /// let reverse = |a: &i32, b: &i32| b.cmp(a);
    /// let mut map = SkipMap::with_comparator(&Config::default(), reverse).unwrap();
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    /// assert_eq!(map.first(), Some((&2, &"two")));
    /// ```
    pub fn with_comparator(config: &Config, cmp: C) -> Result<Self, ConfigError> {
        Ok(Self::from_generator(config.generator()?, cmp))
    }
}

impl<K, V, C, G, const INDEXED: bool> OrderedMap<K, V, C, G, INDEXED>
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
        OrderedMap {
            raw: RawSkipList::new(generator),
            cmp,
        }
    }

    /// Insert `key` with `value`.
    ///
    /// Returns `false` without touching the map if the key is already
    /// present; the given key and value are dropped in that case.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.raw.insert_unique(key, value, &self.cmp)
    }

    /// The value stored for `key`.
    pub fn find(&self, key: &K) -> Option<&V> {
        let (idx, _) = self.raw.find(key, &self.cmp)?;
        Some(&self.raw.node(idx).value)
    }

    /// Mutable access to the value stored for `key`.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let (idx, _) = self.raw.find(key, &self.cmp)?;
        Some(&mut self.raw.node_mut(idx).value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find(key, &self.cmp).is_some()
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.raw.remove_first(key, &self.cmp).map(|(_, v)| v)
    }

    /// Remove `key`, returning the stored pair.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove_first(key, &self.cmp)
    }

    /// Remove `key`. Returns whether anything was removed.
    pub fn erase(&mut self, key: &K) -> bool {
        self.raw.remove_first(key, &self.cmp).is_some()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Number of levels currently in use.
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// The configured level cap.
    pub fn max_level(&self) -> usize {
        self.raw.max_level()
    }

    /// Smallest entry.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// Largest entry, found by descending the express lanes.
    pub fn last(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((&node.key, &node.value))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.raw.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.raw.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.raw.iter())
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Check every structural invariant, including spans on an indexed map.
    pub fn verify(&self) -> Result<(), InvariantError> {
        let cmp = &self.cmp;
        self.raw
            .verify(|a, b| cmp.compare(&a.key, &b.key) == Ordering::Less)
    }
}

impl<K, V, C, G> OrderedMap<K, V, C, G, true>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    /// The entry at 0-based `rank` in ascending order.
    ///
    /// Out-of-range ranks return `None`.
    pub fn at(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.select(rank)?);
        Some((&node.key, &node.value))
    }

    /// The 0-based ascending position of `key`.
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.raw.find(key, &self.cmp).map(|(_, rank)| rank)
    }

    /// Ascending iteration starting at `rank`.
    pub fn iter_from(&self, rank: usize) -> Iter<'_, K, V> {
        match self.raw.select(rank) {
            Some(idx) => Iter::new(self.raw.walk_from(idx), self.raw.len() - rank),
            None => Iter::new(self.raw.walk_from(NIL), 0),
        }
    }

    /// Number of keys strictly less than `key`, present or not.
    pub fn count_below(&self, key: &K) -> usize {
        self.raw.lower_bound(key, &self.cmp).1
    }
}

// ///////////////////////////////////////////////
// Trait implementations
// ///////////////////////////////////////////////

impl<K: Ord, V, const INDEXED: bool> Default for OrderedMap<K, V, Natural, Geometric, INDEXED> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C, G, const INDEXED: bool> fmt::Debug for OrderedMap<K, V, C, G, INDEXED>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
    G: LevelGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, G, const INDEXED: bool> PartialEq for OrderedMap<K, V, C, G, INDEXED>
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

impl<K, V, C, G, const INDEXED: bool> Eq for OrderedMap<K, V, C, G, INDEXED>
where
    K: Eq,
    V: Eq,
    C: Comparator<K>,
    G: LevelGenerator,
{
}

impl<K, V, C, G, const INDEXED: bool> PartialOrd for OrderedMap<K, V, C, G, INDEXED>
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

impl<K, V, C, G, const INDEXED: bool> Ord for OrderedMap<K, V, C, G, INDEXED>
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

/// Entries whose key is already present are dropped.
impl<K, V, C, G, const INDEXED: bool> Extend<(K, V)> for OrderedMap<K, V, C, G, INDEXED>
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

impl<K: Ord, V, const INDEXED: bool> FromIterator<(K, V)>
    for OrderedMap<K, V, Natural, Geometric, INDEXED>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C, G, const INDEXED: bool> IntoIterator for &'a OrderedMap<K, V, C, G, INDEXED>
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
