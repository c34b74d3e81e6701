// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Skipmap - ordered maps built on probabilistic skip lists.
//!
//! A skip list is a sorted linked list with extra "express lanes". Every node
//! is given a random height; a node of height `h` is linked into levels
//! `0..h`. Searches start at the top level of the head and drop down a level
//! whenever the next step would overshoot, giving expected `O(log n)` search,
//! insert and erase with no rebalancing.
//!
//! ```text
//! Level 2: HEAD ---------------> 30 ---------------> NIL
//! Level 1: HEAD ------> 20 ----> 30 ------> 50 ----> NIL
//! Level 0: HEAD -> 10 -> 20 -> 30 -> 40 -> 50 -> 60 -> NIL
//! ```
//!
//! # Containers
//!
//! | Container | Keys | Extra operations |
//! |-----------|------|------------------|
//! | [`SkipMap`] | unique | |
//! | [`IndexedSkipMap`] | unique | `at`, `rank_of` in `O(log n)` |
//! | [`MultiSkipMap`] | duplicates kept in arrival order | `find_range`, `erase_all` |
//!
//! All three share one engine. The indexed map additionally stores, for every
//! link, how many level-0 steps it skips, which turns rank queries into a
//! single descent.
//!
//! # Quick Start
//!
//! ```
//! use skipmap::{IndexedSkipMap, MultiSkipMap, SkipMap};
//!
//! let mut map = SkipMap::new();
//! assert!(map.insert(2, "two"));
//! assert!(!map.insert(2, "deux"));
//! assert_eq!(map.find(&2), Some(&"two"));
//!
//! let mut indexed: IndexedSkipMap<u32, ()> = (0..100).map(|k| (k * 10, ())).collect();
//! assert_eq!(indexed.at(42).map(|(k, _)| *k), Some(420));
//! assert_eq!(indexed.rank_of(&420), Some(42));
//! indexed.erase(&0);
//! assert_eq!(indexed.rank_of(&420), Some(41));
//!
//! let mut multi = MultiSkipMap::new();
//! multi.insert("k", 1);
//! multi.insert("k", 2);
//! assert_eq!(multi.find_range(&"k").copied().collect::<Vec<_>>(), vec![1, 2]);
//! ```
//!
//! # Configuration
//!
//! Heights are capped at `max_level` and promoted with probability `p`; both
//! come from a [`Config`]. Seeding the config makes the list shape
//! reproducible, which is what the tests rely on.

mod compare;
mod config;
mod error;
pub mod iter;
mod level;
mod map;
pub mod multi;
mod raw;

pub use compare::{Comparator, Natural};
pub use config::Config;
pub use error::{ConfigError, InvariantError};
pub use level::{
    DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, Geometric, GeometricLevelGenerator, LevelGenerator,
    MAX_LEVEL_LIMIT,
};
pub use map::{IndexedSkipMap, OrderedMap, SkipMap};
pub use multi::MultiSkipMap;
