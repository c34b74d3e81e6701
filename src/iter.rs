// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Level-0 iterators.
//!
//! All iterators borrow the list, so the list cannot be mutated while one is
//! alive. They are `Clone`, which makes them restartable: clone before
//! consuming to walk the same sequence again.

use std::iter::FusedIterator;

use crate::raw::{Idx, NIL, Node};

/// A raw walk along level 0 starting at some node.
pub(crate) struct Walk<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    next: Idx,
}

impl<'a, K, V> Walk<'a, K, V> {
    pub fn new(nodes: &'a [Option<Node<K, V>>], start: Idx) -> Self {
        Walk { nodes, next: start }
    }

    /// Look at the next entry without consuming it.
    pub fn peek(&self) -> Option<(&'a K, &'a V)> {
        if self.next == NIL {
            return None;
        }
        let node = self.node(self.next);
        Some((&node.key, &node.value))
    }

    fn node(&self, idx: Idx) -> &'a Node<K, V> {
        let nodes: &'a [Option<Node<K, V>>] = self.nodes;
        match &nodes[idx as usize] {
            Some(node) => node,
            None => panic!("node {} is not live", idx),
        }
    }
}

// Manual impl: a derive would require `K: Clone, V: Clone`.
impl<K, V> Clone for Walk<'_, K, V> {
    fn clone(&self) -> Self {
        Walk {
            nodes: self.nodes,
            next: self.next,
        }
    }
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }
        let node = self.node(self.next);
        self.next = node.links[0].next;
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Walk<'_, K, V> {}

/// Ascending iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V> {
    walk: Walk<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(walk: Walk<'a, K, V>, remaining: usize) -> Self {
        Iter { walk, remaining }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.walk.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Ascending iterator over keys.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Keys { inner }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Values in ascending key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Values { inner }
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}
