// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Seeded synthetic workloads.
//!
//! Every stream is derived from one seed so a failing run can be replayed
//! exactly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

/// One operation against a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Insert(u32, u32),
    Erase(u32),
    Find(u32),
    /// Positional lookup. Only meaningful for indexed maps.
    At(usize),
    /// Rank query. Only meaningful for indexed maps.
    RankOf(u32),
}

/// Relative weights of each operation kind in `Workload::ops`.
#[derive(Clone, Copy, Debug)]
pub struct Mix {
    pub insert: u32,
    pub erase: u32,
    pub find: u32,
    pub at: u32,
    pub rank_of: u32,
}

impl Default for Mix {
    fn default() -> Self {
        return Mix {
            insert: 50,
            erase: 20,
            find: 20,
            at: 5,
            rank_of: 5,
        };
    }
}

impl Mix {
    fn total(&self) -> u32 {
        return self.insert + self.erase + self.find + self.at + self.rank_of;
    }
}

pub struct Workload {
    rng: StdRng,
    key_space: u32,
}

impl Workload {
    /// Keys are drawn from `0..key_space`.
    pub fn new(seed: u64, key_space: u32) -> Workload {
        assert!(key_space > 0, "key space must not be empty");
        return Workload {
            rng: StdRng::seed_from_u64(seed),
            key_space,
        };
    }

    pub fn key_space(&self) -> u32 {
        return self.key_space;
    }

    /// `0..count` in random order.
    pub fn shuffled_keys(&mut self, count: u32) -> Vec<u32> {
        let mut keys: Vec<u32> = (0..count).collect();
        keys.shuffle(&mut self.rng);
        return keys;
    }

    /// `count` distinct keys from the key space, in draw order.
    pub fn distinct_keys(&mut self, count: usize) -> Vec<u32> {
        assert!(
            count <= self.key_space as usize,
            "cannot draw {} distinct keys from {}",
            count,
            self.key_space
        );
        let mut seen = FxHashSet::default();
        let mut keys = Vec::with_capacity(count);
        while keys.len() < count {
            let key = self.rng.gen_range(0..self.key_space);
            if seen.insert(key) {
                keys.push(key);
            }
        }
        return keys;
    }

    /// A random operation stream with the default mix.
    pub fn ops(&mut self, count: usize) -> Vec<Op> {
        return self.ops_with(count, Mix::default());
    }

    pub fn ops_with(&mut self, count: usize, mix: Mix) -> Vec<Op> {
        let total = mix.total();
        assert!(total > 0, "operation mix is empty");
        let mut ops = Vec::with_capacity(count);
        for _ in 0..count {
            let key = self.rng.gen_range(0..self.key_space);
            let mut roll = self.rng.gen_range(0..total);

            // --- Pick the bucket the roll landed in ---
            let op = if roll < mix.insert {
                Op::Insert(key, self.rng.gen_range(0..u32::MAX))
            } else {
                roll -= mix.insert;
                if roll < mix.erase {
                    Op::Erase(key)
                } else {
                    roll -= mix.erase;
                    if roll < mix.find {
                        Op::Find(key)
                    } else {
                        roll -= mix.find;
                        if roll < mix.at {
                            Op::At(self.rng.gen_range(0..self.key_space as usize))
                        } else {
                            Op::RankOf(key)
                        }
                    }
                }
            };
            ops.push(op);
        }
        return ops;
    }
}
