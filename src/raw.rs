// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Skip list engine shared by every container.
//!
//! Nodes live in an arena (`Vec<Option<Node>>`) and link to each other by
//! index, so removing a node can never leave a dangling reference behind.
//! Freed slots go on a free list and are reused by later inserts.
//!
//! ```text
//! Level 2: HEAD ---------------------> [4] -----------------> NIL
//! Level 1: HEAD ---------> [2] ------> [4] -----------------> NIL
//! Level 0: HEAD -> [1] --> [2] -> [3] -> [4] -> [5] -> [6] -> NIL
//!   pos:    0      1       2      3      4      5      6      (len = 6)
//! ```
//!
//! # Spans
//!
//! When `SPANS` is set, every link also stores how many level-0 steps it
//! covers: `span = pos(to) - pos(from)`, where the head sits at position 0,
//! the `i`-th node at position `i`, and `NIL` at position `len`. In the
//! picture above the head's level-2 link has span 4 and `[4]`'s level-2 link
//! to `NIL` has span 2. Summing spans along any level from the head gives
//! `len`, and summing them along a search path gives the rank reached.
//!
//! Without `SPANS` the span fields stay zero and are never read.
//!
//! # Descent
//!
//! Every operation is driven by one top-down walk ([`RawSkipList::walk`]):
//! at each level, advance while the next node is "before" the target, then
//! drop a level. Callers decide what "before" means (a key comparison for
//! the unique maps, a `(key, sequence)` comparison for the multi map) and
//! whether to record the path. Insert and remove thread both relinking and
//! span updates through the recorded [`Path`].

use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::compare::Comparator;
use crate::error::InvariantError;
use crate::iter::{Iter, Walk};
use crate::level::{LevelGenerator, MAX_LEVEL_LIMIT};

/// Arena index. u32 keeps links at 8 bytes with their span.
pub(crate) type Idx = u32;

/// End of a level.
pub(crate) const NIL: Idx = Idx::MAX;

/// The head tower. Never stored in the arena.
pub(crate) const HEAD: Idx = Idx::MAX - 1;

/// One forward link of a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub next: Idx,
    pub span: u32,
}

impl Link {
    const END: Link = Link { next: NIL, span: 0 };
}

/// A stored entry and its tower. `links.len()` is the node's level.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub links: SmallVec<[Link; 4]>,
}

/// Result of a recorded descent: for every level, the last node before the
/// target position and the rank (sum of spans) reached at that node.
#[derive(Debug)]
pub(crate) struct Path {
    preds: SmallVec<[Idx; 16]>,
    ranks: SmallVec<[usize; 16]>,
}

impl Path {
    /// Predecessor at `level`.
    pub fn pred(&self, level: usize) -> Idx {
        self.preds[level]
    }
}

#[derive(Clone)]
pub(crate) struct RawSkipList<K, V, G, const SPANS: bool> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<Idx>,
    head: SmallVec<[Link; 16]>,
    /// Levels in use, `1..=max_level`.
    height: usize,
    len: usize,
    generator: G,
}

impl<K, V, G: LevelGenerator, const SPANS: bool> RawSkipList<K, V, G, SPANS> {
    /// The generator's `max_level` must already be validated.
    pub fn new(generator: G) -> Self {
        let max_level = generator.max_level();
        debug_assert!(
            (1..=MAX_LEVEL_LIMIT).contains(&max_level),
            "unchecked max level {}",
            max_level
        );
        debug!(max_level, spans = SPANS, "skip list created");
        RawSkipList {
            nodes: Vec::new(),
            free: Vec::new(),
            head: smallvec![Link::END; max_level],
            height: 1,
            len: 0,
            generator,
        }
    }

    // --- Accessors ---

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    pub fn node(&self, idx: Idx) -> &Node<K, V> {
        match &self.nodes[idx as usize] {
            Some(node) => node,
            None => panic!("node {} is not live", idx),
        }
    }

    pub fn node_mut(&mut self, idx: Idx) -> &mut Node<K, V> {
        match &mut self.nodes[idx as usize] {
            Some(node) => node,
            None => panic!("node {} is not live", idx),
        }
    }

    fn links(&self, at: Idx) -> &[Link] {
        if at == HEAD {
            &self.head
        } else {
            &self.node(at).links
        }
    }

    fn links_mut(&mut self, at: Idx) -> &mut [Link] {
        if at == HEAD {
            &mut self.head
        } else {
            &mut self.node_mut(at).links
        }
    }

    /// Level-0 successor of `at` (which may be `HEAD`).
    pub fn successor(&self, at: Idx) -> Idx {
        self.links(at)[0].next
    }

    /// Span value to store for a count, zero when spans are off.
    #[inline(always)]
    fn span_of(count: usize) -> u32 {
        if SPANS { count as u32 } else { 0 }
    }

    // --- Arena ---

    fn alloc(&mut self, node: Node<K, V>) -> Idx {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx as usize] = Some(node);
            return idx;
        }
        let idx = self.nodes.len();
        assert!(idx < HEAD as usize, "skip list is full ({} nodes)", idx);
        self.nodes.push(Some(node));
        idx as Idx
    }

    fn release(&mut self, idx: Idx) -> Node<K, V> {
        match self.nodes[idx as usize].take() {
            Some(node) => {
                self.free.push(idx);
                node
            }
            None => panic!("node {} released twice", idx),
        }
    }

    // --- Descent ---

    /// Walk from the head down to level 0, advancing at each level while
    /// `before` holds for the next node. `record(level, node, rank)` is
    /// called as the walk leaves each level. Returns the final level-0
    /// predecessor and the rank reached there.
    ///
    /// `before` must be monotone along level 0: true for a prefix of the
    /// nodes and false for the rest.
    pub fn walk<F, R>(&self, mut before: F, mut record: R) -> (Idx, usize)
    where
        F: FnMut(&K, &V) -> bool,
        R: FnMut(usize, Idx, usize),
    {
        let mut at = HEAD;
        let mut rank = 0usize;
        for level in (0..self.height).rev() {
            loop {
                let link = self.links(at)[level];
                if link.next == NIL {
                    break;
                }
                let node = self.node(link.next);
                if !before(&node.key, &node.value) {
                    break;
                }
                rank += link.span as usize;
                at = link.next;
            }
            record(level, at, rank);
        }
        (at, rank)
    }

    /// Descent without recording.
    pub fn seek<F>(&self, before: F) -> (Idx, usize)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.walk(before, |_, _, _| {})
    }

    /// Descent recording the predecessor and rank at every level.
    pub fn descend<F>(&self, before: F) -> Path
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut path = Path {
            preds: smallvec![HEAD; self.max_level()],
            ranks: smallvec![0; self.max_level()],
        };
        self.walk(before, |level, at, rank| {
            path.preds[level] = at;
            path.ranks[level] = rank;
        });
        path
    }

    // --- Mutation ---

    /// Insert a node directly after the level-0 predecessor of `path`.
    /// The caller is responsible for ordering and uniqueness.
    pub fn link(&mut self, mut path: Path, key: K, value: V) -> Idx {
        let level = self.generator.next_level().clamp(1, self.max_level());

        if level > self.height {
            for l in self.height..level {
                path.preds[l] = HEAD;
                path.ranks[l] = 0;
                self.head[l] = Link {
                    next: NIL,
                    span: Self::span_of(self.len),
                };
            }
            trace!(from = self.height, to = level, "list height raised");
            self.height = level;
        }

        let idx = self.alloc(Node {
            key,
            value,
            links: smallvec![Link::END; level],
        });

        // Rank of the level-0 predecessor; the new node lands at reach + 1.
        let reach = path.ranks[0];
        for l in 0..level {
            let pred = path.preds[l];
            let old = self.links(pred)[l];
            let covered = reach - path.ranks[l];
            self.links_mut(idx)[l] = Link {
                next: old.next,
                span: Self::span_of(old.span as usize - covered),
            };
            self.links_mut(pred)[l] = Link {
                next: idx,
                span: Self::span_of(covered + 1),
            };
        }

        // Links passing over the new node now cover one more step.
        if SPANS {
            for l in level..self.height {
                let pred = path.preds[l];
                self.links_mut(pred)[l].span += 1;
            }
        }

        self.len += 1;
        idx
    }

    /// Remove `target`, whose predecessors at every level are in `path`.
    pub fn unlink(&mut self, path: &Path, target: Idx) -> (K, V) {
        for l in 0..self.height {
            let removed = self.node(target).links.get(l).copied();
            let link = &mut self.links_mut(path.pred(l))[l];
            match removed {
                Some(removed) if link.next == target => {
                    link.next = removed.next;
                    if SPANS {
                        link.span = (link.span + removed.span).saturating_sub(1);
                    }
                }
                _ => {
                    if SPANS {
                        link.span = link.span.saturating_sub(1);
                    }
                }
            }
        }

        let height = self.height;
        while self.height > 1 && self.head[self.height - 1].next == NIL {
            self.height -= 1;
        }
        if self.height != height {
            trace!(from = height, to = self.height, "list height lowered");
        }

        self.len -= 1;
        let node = self.release(target);
        (node.key, node.value)
    }

    /// Drop every node and reset the head.
    pub fn clear(&mut self) {
        debug!(len = self.len, "skip list cleared");
        self.nodes.clear();
        self.free.clear();
        for link in self.head.iter_mut() {
            *link = Link::END;
        }
        self.height = 1;
        self.len = 0;
    }

    // --- Key-ordered helpers ---

    /// First node whose key is not less than `key`, with its 0-based rank.
    pub fn lower_bound<C: Comparator<K>>(&self, key: &K, cmp: &C) -> (Idx, usize) {
        let (pred, rank) = self.seek(|k, _| cmp.compare(k, key).is_lt());
        (self.successor(pred), rank)
    }

    /// First node whose key equals `key`, with its 0-based rank.
    pub fn find<C: Comparator<K>>(&self, key: &K, cmp: &C) -> Option<(Idx, usize)> {
        let (idx, rank) = self.lower_bound(key, cmp);
        if idx != NIL && cmp.compare(&self.node(idx).key, key).is_eq() {
            Some((idx, rank))
        } else {
            None
        }
    }

    /// Insert unless a node with an equal key exists.
    pub fn insert_unique<C: Comparator<K>>(&mut self, key: K, value: V, cmp: &C) -> bool {
        let path = self.descend(|k, _| cmp.compare(k, &key).is_lt());
        let next = self.successor(path.pred(0));
        if next != NIL && cmp.compare(&self.node(next).key, &key).is_eq() {
            return false;
        }
        self.link(path, key, value);
        true
    }

    /// Remove the first node whose key equals `key`.
    pub fn remove_first<C: Comparator<K>>(&mut self, key: &K, cmp: &C) -> Option<(K, V)> {
        let path = self.descend(|k, _| cmp.compare(k, key).is_lt());
        let target = self.successor(path.pred(0));
        if target == NIL || !cmp.compare(&self.node(target).key, key).is_eq() {
            return None;
        }
        Some(self.unlink(&path, target))
    }

    /// Last node along level 0.
    pub fn last(&self) -> Option<Idx> {
        let (at, _) = self.seek(|_, _| true);
        if at == HEAD { None } else { Some(at) }
    }

    // --- Iteration ---

    pub fn walk_from(&self, idx: Idx) -> Walk<'_, K, V> {
        Walk::new(&self.nodes, idx)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.walk_from(self.head[0].next), self.len)
    }

    // --- Invariant checking ---

    /// Check sortedness, level nesting, height and (when enabled) spans.
    ///
    /// `ordered(a, b)` must return true when `b` may directly follow `a` on
    /// level 0.
    pub fn verify<F>(&self, mut ordered: F) -> Result<(), InvariantError>
    where
        F: FnMut(&Node<K, V>, &Node<K, V>) -> bool,
    {
        // Level 0: count, order, and assign positions.
        let mut position = vec![0usize; self.nodes.len()];
        let mut walked = 0usize;
        let mut tallest = 1usize;
        let mut prev = HEAD;
        let mut at = self.head[0].next;
        while at != NIL {
            walked += 1;
            if walked > self.len {
                return Err(InvariantError::Length {
                    counted: self.len,
                    walked,
                });
            }
            let node = self.node(at);
            if prev != HEAD && !ordered(self.node(prev), node) {
                return Err(InvariantError::Order { position: walked });
            }
            position[at as usize] = walked;
            tallest = tallest.max(node.links.len());
            prev = at;
            at = node.links[0].next;
        }
        if walked != self.len {
            return Err(InvariantError::Length {
                counted: self.len,
                walked,
            });
        }
        if tallest != self.height {
            return Err(InvariantError::Height {
                height: self.height,
                tallest,
            });
        }

        // Every level: a subsequence of level 0, with exact spans.
        for level in 0..self.height {
            let mut at = HEAD;
            let mut from = 0usize;
            loop {
                let link = self.links(at)[level];
                let to = if link.next == NIL {
                    self.len
                } else {
                    let to = position[link.next as usize];
                    if to <= from || self.node(link.next).links.len() <= level {
                        return Err(InvariantError::Level {
                            level,
                            position: to,
                        });
                    }
                    to
                };
                if SPANS && link.span as usize != to - from {
                    return Err(InvariantError::Span {
                        position: from,
                        level,
                        stored: link.span as usize,
                        derived: to - from,
                    });
                }
                if link.next == NIL {
                    break;
                }
                at = link.next;
                from = to;
            }
        }

        Ok(())
    }
}

impl<K, V, G: LevelGenerator> RawSkipList<K, V, G, true> {
    /// Node at 0-based `rank`, found by following spans.
    pub fn select(&self, rank: usize) -> Option<Idx> {
        if rank >= self.len {
            return None;
        }
        let target = rank + 1;
        let mut at = HEAD;
        let mut reached = 0usize;
        for level in (0..self.height).rev() {
            loop {
                let link = self.links(at)[level];
                if link.next == NIL || reached + link.span as usize > target {
                    break;
                }
                reached += link.span as usize;
                at = link.next;
            }
            if reached == target {
                return Some(at);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Natural;
    use crate::level::Geometric;

    /// Replays a fixed list of levels, cycling.
    struct Script {
        levels: Vec<usize>,
        next: usize,
        max: usize,
    }

    impl Script {
        fn new(max: usize, levels: &[usize]) -> Script {
            Script {
                levels: levels.to_vec(),
                next: 0,
                max,
            }
        }
    }

    impl LevelGenerator for Script {
        fn max_level(&self) -> usize {
            self.max
        }

        fn next_level(&mut self) -> usize {
            let level = self.levels[self.next % self.levels.len()];
            self.next += 1;
            level
        }
    }

    type Counted = RawSkipList<i32, i32, Script, true>;

    fn sorted(a: &Node<i32, i32>, b: &Node<i32, i32>) -> bool {
        a.key < b.key
    }

    fn keys<G: LevelGenerator, const S: bool>(list: &RawSkipList<i32, i32, G, S>) -> Vec<i32> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn empty_list() {
        let list = Counted::new(Script::new(4, &[1]));
        assert_eq!(list.len(), 0);
        assert_eq!(list.height(), 1);
        assert_eq!(list.find(&3, &Natural), None);
        assert_eq!(list.select(0), None);
        assert_eq!(list.last(), None);
        assert!(list.verify(sorted).is_ok());
    }

    #[test]
    fn spans_follow_the_picture() {
        // Levels chosen to build the diagram in the module docs.
        let mut list = Counted::new(Script::new(4, &[1, 2, 1, 3, 1, 1]));
        for key in 1..=6 {
            assert!(list.insert_unique(key, key * 10, &Natural));
        }
        assert_eq!(list.height(), 3);
        assert_eq!(list.head[2], Link { next: 3, span: 4 });
        assert_eq!(list.head[1], Link { next: 1, span: 2 });
        assert_eq!(list.node(3).links[2], Link { next: NIL, span: 2 });
        assert_eq!(list.node(5).links[0], Link { next: NIL, span: 0 });
        assert!(list.verify(sorted).is_ok());
    }

    #[test]
    fn select_follows_spans() {
        let mut list = Counted::new(Script::new(4, &[3, 1, 2, 1, 4, 1, 1, 2]));
        for key in [50, 10, 40, 20, 30, 60, 70, 0] {
            list.insert_unique(key, -key, &Natural);
        }
        let expected = [0, 10, 20, 30, 40, 50, 60, 70];
        for (rank, key) in expected.iter().enumerate() {
            let idx = list.select(rank).unwrap();
            assert_eq!(list.node(idx).key, *key);
            assert_eq!(list.find(key, &Natural).map(|(_, r)| r), Some(rank));
        }
        assert_eq!(list.select(expected.len()), None);
        assert!(list.verify(sorted).is_ok());
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut list = Counted::new(Script::new(4, &[2]));
        assert!(list.insert_unique(1, 1, &Natural));
        assert!(!list.insert_unique(1, 2, &Natural));
        assert_eq!(list.len(), 1);
        assert_eq!(list.node(list.find(&1, &Natural).unwrap().0).value, 1);
    }

    #[test]
    fn height_shrinks_when_top_empties() {
        let mut list = Counted::new(Script::new(4, &[1, 4, 1]));
        for key in [1, 2, 3] {
            list.insert_unique(key, key, &Natural);
        }
        assert_eq!(list.height(), 4);
        assert_eq!(list.remove_first(&2, &Natural), Some((2, 2)));
        assert_eq!(list.height(), 1);
        assert!(list.verify(sorted).is_ok());
        assert_eq!(keys(&list), vec![1, 3]);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list = Counted::new(Script::new(4, &[1, 2]));
        for key in 0..8 {
            list.insert_unique(key, key, &Natural);
        }
        for key in 0..4 {
            list.remove_first(&key, &Natural);
        }
        for key in 10..14 {
            list.insert_unique(key, key, &Natural);
        }
        assert_eq!(list.nodes.len(), 8);
        assert_eq!(keys(&list), vec![4, 5, 6, 7, 10, 11, 12, 13]);
        assert!(list.verify(sorted).is_ok());
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut list = Counted::new(Script::new(4, &[2, 1, 3]));
        for key in [1, 2, 3] {
            list.insert_unique(key, key, &Natural);
        }
        assert_eq!(list.remove_first(&7, &Natural), None);
        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec![1, 2, 3]);
        assert!(list.verify(sorted).is_ok());
    }

    #[test]
    fn out_of_range_levels_are_clamped() {
        let mut list = Counted::new(Script::new(3, &[0, 9, 2]));
        for key in 0..30 {
            list.insert_unique(key, key, &Natural);
        }
        assert!(list.height() <= 3);
        assert!(list.verify(sorted).is_ok());
    }

    #[test]
    fn corrupted_span_is_detected() {
        let mut list = Counted::new(Script::new(4, &[2, 1, 1]));
        for key in [1, 2, 3] {
            list.insert_unique(key, key, &Natural);
        }
        list.head[1].span += 1;
        assert!(matches!(
            list.verify(sorted),
            Err(InvariantError::Span { level: 1, .. })
        ));
    }

    #[test]
    fn corrupted_length_is_detected() {
        let mut list = Counted::new(Script::new(4, &[1]));
        list.insert_unique(1, 1, &Natural);
        list.len = 2;
        assert_eq!(
            list.verify(sorted),
            Err(InvariantError::Length {
                counted: 2,
                walked: 1
            })
        );
    }

    #[test]
    fn churn_keeps_invariants() {
        let generator = Geometric::seeded(4, 0.5, 17).unwrap();
        let mut list: RawSkipList<i32, i32, _, true> = RawSkipList::new(generator);
        for round in 0..20 {
            for key in 0..50 {
                list.insert_unique((key * 7 + round) % 97, key, &Natural);
            }
            for key in 0..30 {
                list.remove_first(&((key * 11 + round) % 97), &Natural);
            }
            list.verify(sorted).unwrap();
        }
    }

    #[test]
    fn plain_list_keeps_zero_spans() {
        let generator = Geometric::seeded(8, 0.5, 3).unwrap();
        let mut list: RawSkipList<i32, i32, _, false> = RawSkipList::new(generator);
        for key in (0..100).rev() {
            list.insert_unique(key, key, &Natural);
        }
        for key in (0..100).step_by(3) {
            list.remove_first(&key, &Natural);
        }
        assert!(list.head.iter().all(|link| link.span == 0));
        list.verify(sorted).unwrap();
        assert_eq!(keys(&list).len(), 66);
    }
}
