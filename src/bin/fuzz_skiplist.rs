//! AFL fuzz harness for the skip list maps
//!
//! Replays a byte-encoded operation stream against an `IndexedSkipMap` (with
//! a small level cap so towers collide often) and a `BTreeMap` model, and a
//! `MultiSkipMap` against a model of per-key queues. After every step:
//! 1. Results match the model
//! 2. `verify()` passes (order, level nesting, height, spans)
//! 3. Rank queries agree with the model's positions

use std::collections::{BTreeMap, VecDeque};

use afl::fuzz;
use skipmap::{Config, IndexedSkipMap, MultiSkipMap};

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Insert { key: u8, value: u8 },
    Erase { key: u8 },
    At { rank: u8 },
    RankOf { key: u8 },
    Clear,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 16;
        let rest = &bytes[1..];

        match op_type {
            0..=6 if rest.len() >= 2 => {
                let op = FuzzOp::Insert {
                    key: rest[0],
                    value: rest[1],
                };
                Some((op, &rest[2..]))
            }
            7..=10 if !rest.is_empty() => Some((FuzzOp::Erase { key: rest[0] }, &rest[1..])),
            11 | 12 if !rest.is_empty() => Some((FuzzOp::At { rank: rest[0] }, &rest[1..])),
            13 | 14 if !rest.is_empty() => Some((FuzzOp::RankOf { key: rest[0] }, &rest[1..])),
            15 => Some((FuzzOp::Clear, rest)),
            _ => None,
        }
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        // Seed from the input so each case has a fixed shape
        let seed = data.iter().fold(0u64, |h, b| h.rotate_left(5) ^ *b as u64);
        let config = Config::default().with_max_level(4).with_seed(seed);

        let mut map: IndexedSkipMap<u8, u8> = match IndexedSkipMap::with_config(&config) {
            Ok(map) => map,
            Err(_) => return,
        };
        let mut multi: MultiSkipMap<u8, u8> = match MultiSkipMap::with_config(&config) {
            Ok(map) => map,
            Err(_) => return,
        };
        let mut model: BTreeMap<u8, u8> = BTreeMap::new();
        let mut multi_model: BTreeMap<u8, VecDeque<u8>> = BTreeMap::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Insert { key, value } => {
                    let fresh = map.insert(key, value);
                    assert_eq!(fresh, !model.contains_key(&key), "insert {}", key);
                    model.entry(key).or_insert(value);

                    multi.insert(key, value);
                    multi_model.entry(key).or_default().push_back(value);
                }
                FuzzOp::Erase { key } => {
                    assert_eq!(map.erase(&key), model.remove(&key).is_some(), "erase {}", key);

                    let expected = multi_model.get_mut(&key).and_then(|q| q.pop_front());
                    if multi_model.get(&key).is_some_and(|q| q.is_empty()) {
                        multi_model.remove(&key);
                    }
                    assert_eq!(multi.remove_one(&key), expected, "remove_one {}", key);
                }
                FuzzOp::At { rank } => {
                    let rank = rank as usize;
                    assert_eq!(
                        map.at(rank).map(|(k, v)| (*k, *v)),
                        model.iter().nth(rank).map(|(k, v)| (*k, *v)),
                        "at {}",
                        rank
                    );
                }
                FuzzOp::RankOf { key } => {
                    let expected = model.contains_key(&key).then(|| model.range(..key).count());
                    assert_eq!(map.rank_of(&key), expected, "rank_of {}", key);
                    assert_eq!(map.count_below(&key), model.range(..key).count());
                }
                FuzzOp::Clear => {
                    map.clear();
                    model.clear();
                    multi.clear();
                    multi_model.clear();
                }
            }

            if let Err(err) = map.verify() {
                panic!("indexed invariant broken after {:?}: {}", op, err);
            }
            if let Err(err) = multi.verify() {
                panic!("multi invariant broken after {:?}: {}", op, err);
            }
            assert_eq!(map.len(), model.len());
            assert_eq!(multi.len(), multi_model.values().map(|q| q.len()).sum::<usize>());
        }

        assert!(map.iter().map(|(k, v)| (*k, *v)).eq(model.iter().map(|(k, v)| (*k, *v))));
        for (key, queue) in &multi_model {
            assert!(multi.find_range(key).eq(queue.iter()), "find_range {}", key);
        }
    });
}
