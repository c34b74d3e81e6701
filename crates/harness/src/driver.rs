// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Replay an operation stream against a map and a `BTreeMap` model.
//!
//! Every operation's result is checked against the model as it is applied.
//! At the end the full contents are compared and the map's structural
//! invariants are verified.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use skipmap::{IndexedSkipMap, LevelGenerator, MultiSkipMap, Natural, OrderedMap};
use tracing::debug;

use crate::compare::same_contents;
use crate::workload::Op;

/// Counts of what a run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub applied: usize,
    pub inserted: usize,
    pub rejected: usize,
    pub erased: usize,
    pub hits: usize,
    pub misses: usize,
    /// Operations the container does not support (rank queries on an
    /// unindexed map).
    pub skipped: usize,
}

/// The first point where the map and the model disagreed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the offending operation, or the stream length for
    /// end-of-run checks.
    pub step: usize,
    pub op: Option<Op>,
    pub detail: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            Some(op) => write!(f, "step {} ({:?}): {}", self.step, op, self.detail),
            None => write!(f, "after {} steps: {}", self.step, self.detail),
        }
    }
}

impl std::error::Error for Divergence {}

fn expect_eq<T: PartialEq + fmt::Debug>(what: &str, got: T, expected: T) -> Result<(), String> {
    if got != expected {
        return Err(format!("{}: got {:?}, model says {:?}", what, got, expected));
    }
    return Ok(());
}

// --- Unique-key maps ---

fn step_unique<G, const INDEXED: bool>(
    map: &mut OrderedMap<u32, u32, Natural, G, INDEXED>,
    model: &mut BTreeMap<u32, u32>,
    op: Op,
    report: &mut Report,
) -> Result<(), String>
where
    G: LevelGenerator,
{
    match op {
        Op::Insert(key, value) => {
            let fresh = map.insert(key, value);
            let expected = !model.contains_key(&key);
            if expected {
                model.insert(key, value);
            }
            expect_eq("insert", fresh, expected)?;
            if fresh {
                report.inserted += 1;
            } else {
                report.rejected += 1;
            }
        }
        Op::Erase(key) => {
            let erased = map.erase(&key);
            expect_eq("erase", erased, model.remove(&key).is_some())?;
            if erased {
                report.erased += 1;
            }
        }
        Op::Find(key) => {
            let found = map.find(&key).copied();
            expect_eq("find", found, model.get(&key).copied())?;
            if found.is_some() {
                report.hits += 1;
            } else {
                report.misses += 1;
            }
        }
        Op::At(_) | Op::RankOf(_) => report.skipped += 1,
    }
    return Ok(());
}

fn finish_unique<G, const INDEXED: bool>(
    map: &OrderedMap<u32, u32, Natural, G, INDEXED>,
    model: &BTreeMap<u32, u32>,
) -> Result<(), String>
where
    G: LevelGenerator,
{
    same_contents(map.iter(), model.iter()).map_err(|m| format!("contents: {}", m))?;
    map.verify().map_err(|e| format!("invariant: {}", e))?;
    return Ok(());
}

/// Replay `ops` against a unique-key map. Rank queries are counted as
/// skipped.
pub fn run_unique<G, const INDEXED: bool>(
    map: &mut OrderedMap<u32, u32, Natural, G, INDEXED>,
    ops: &[Op],
) -> Result<Report, Divergence>
where
    G: LevelGenerator,
{
    let mut model: BTreeMap<u32, u32> = map.iter().map(|(k, v)| (*k, *v)).collect();
    let mut report = Report::default();

    for (step, op) in ops.iter().enumerate() {
        step_unique(map, &mut model, *op, &mut report).map_err(|detail| Divergence {
            step,
            op: Some(*op),
            detail,
        })?;
        report.applied += 1;
    }

    finish_unique(map, &model).map_err(|detail| Divergence {
        step: ops.len(),
        op: None,
        detail,
    })?;
    debug!(?report, len = map.len(), "unique run finished");
    return Ok(report);
}

/// Replay `ops` against an indexed map, checking rank queries too.
pub fn run_indexed<G>(
    map: &mut IndexedSkipMap<u32, u32, Natural, G>,
    ops: &[Op],
) -> Result<Report, Divergence>
where
    G: LevelGenerator,
{
    let mut model: BTreeMap<u32, u32> = map.iter().map(|(k, v)| (*k, *v)).collect();
    let mut report = Report::default();

    for (step, op) in ops.iter().enumerate() {
        let outcome = match *op {
            Op::At(rank) => {
                let got = map.at(rank).map(|(k, v)| (*k, *v));
                let expected = model.iter().nth(rank).map(|(k, v)| (*k, *v));
                if got.is_some() {
                    report.hits += 1;
                } else {
                    report.misses += 1;
                }
                expect_eq("at", got, expected)
            }
            Op::RankOf(key) => {
                let got = map.rank_of(&key);
                let expected = model
                    .contains_key(&key)
                    .then(|| model.range(..key).count());
                if got.is_some() {
                    report.hits += 1;
                } else {
                    report.misses += 1;
                }
                expect_eq("rank_of", got, expected)
            }
            other => step_unique(map, &mut model, other, &mut report),
        };
        outcome.map_err(|detail| Divergence {
            step,
            op: Some(*op),
            detail,
        })?;
        report.applied += 1;
    }

    finish_unique(map, &model).map_err(|detail| Divergence {
        step: ops.len(),
        op: None,
        detail,
    })?;
    debug!(?report, len = map.len(), "indexed run finished");
    return Ok(report);
}

// --- Multi-key maps ---

/// Replay `ops` against a multi-key map. `Erase` removes the oldest
/// occurrence and `Find` compares every occurrence of the key.
pub fn run_multi<G>(
    map: &mut MultiSkipMap<u32, u32, Natural, G>,
    ops: &[Op],
) -> Result<Report, Divergence>
where
    G: LevelGenerator,
{
    let mut model: BTreeMap<u32, VecDeque<u32>> = BTreeMap::new();
    for (k, v) in map.iter() {
        model.entry(*k).or_default().push_back(*v);
    }
    let mut report = Report::default();

    for (step, op) in ops.iter().enumerate() {
        let outcome = match *op {
            Op::Insert(key, value) => {
                map.insert(key, value);
                model.entry(key).or_default().push_back(value);
                report.inserted += 1;
                Ok(())
            }
            Op::Erase(key) => {
                let got = map.remove_one(&key);
                let expected = match model.get_mut(&key) {
                    Some(queue) => {
                        let front = queue.pop_front();
                        if queue.is_empty() {
                            model.remove(&key);
                        }
                        front
                    }
                    None => None,
                };
                if got.is_some() {
                    report.erased += 1;
                }
                expect_eq("remove_one", got, expected)
            }
            Op::Find(key) => {
                let got: Vec<u32> = map.find_range(&key).copied().collect();
                let expected: Vec<u32> = model
                    .get(&key)
                    .map(|queue| queue.iter().copied().collect())
                    .unwrap_or_default();
                if got.is_empty() {
                    report.misses += 1;
                } else {
                    report.hits += 1;
                }
                expect_eq("find_range", got, expected)
            }
            Op::At(_) | Op::RankOf(_) => {
                report.skipped += 1;
                Ok(())
            }
        };
        outcome.map_err(|detail| Divergence {
            step,
            op: Some(*op),
            detail,
        })?;
        report.applied += 1;
    }

    let finish = || -> Result<(), String> {
        let flattened = model
            .iter()
            .flat_map(|(k, queue)| queue.iter().map(move |v| (*k, *v)));
        same_contents(map.iter().map(|(k, v)| (*k, *v)), flattened)
            .map_err(|m| format!("contents: {}", m))?;
        map.verify().map_err(|e| format!("invariant: {}", e))?;
        return Ok(());
    };
    finish().map_err(|detail| Divergence {
        step: ops.len(),
        op: None,
        detail,
    })?;
    debug!(?report, len = map.len(), "multi run finished");
    return Ok(report);
}
