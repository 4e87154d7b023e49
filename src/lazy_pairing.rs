//! Lazy Pairing Heap implementation
//!
//! The lazy variant keeps a list of roots and never links eagerly:
//! - insert and merge only concatenate root lists and report zero cost
//! - decrease_key cuts the node and appends it to the root list
//! - delete_min runs the two-pass consolidation over the whole root list,
//!   extracts the resulting root and leaves its children as the new root list
//!
//! All linking work is therefore charged to delete_min.

use crate::cost::{Cost, Extracted};
use crate::linear;
use crate::node::{NodeArena, NodeId, OwnerTag};
use crate::traits::{node_not_found, Key, MeldableHeap};
use std::marker::PhantomData;

/// Pairing heap with a root list, consolidating only on delete_min
///
/// A minimum pointer is maintained as bookkeeping so `find_min` is O(1); the
/// comparisons spent on it are not reported.
#[derive(Debug)]
pub struct LazyPairingHeap<K, T> {
    forest: Vec<NodeId>,
    min: Option<NodeId>,
    len: usize,
    owner: OwnerTag,
    _phantom: PhantomData<fn() -> (K, T)>,
}

impl<K: Key, T> Default for LazyPairingHeap<K, T> {
    fn default() -> Self {
        <Self as MeldableHeap<K, T>>::new()
    }
}

impl<K: Key, T> MeldableHeap<K, T> for LazyPairingHeap<K, T> {
    fn new() -> Self {
        Self {
            forest: Vec::new(),
            min: None,
            len: 0,
            owner: OwnerTag::default(),
            _phantom: PhantomData,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) -> Cost {
        arena.attach(node, &mut self.owner);
        self.forest.push(node);
        self.len += 1;
        self.note_candidate(arena, node);
        Cost::ZERO
    }

    fn find_min(&self, _arena: &NodeArena<K, T>) -> Option<NodeId> {
        self.min
    }

    fn delete_min(&mut self, arena: &mut NodeArena<K, T>) -> Extracted {
        let forest = std::mem::take(&mut self.forest);
        let roots = forest.len();
        let Some((root, cost)) = linear::two_pass(arena, forest) else {
            return Extracted::empty();
        };
        if roots > 64 {
            log::debug!("lazy pairing: consolidated {roots} roots");
        }

        self.forest = linear::take_children(arena, root);
        self.min = self.scan_min(arena);
        arena.detach(root);
        self.len -= 1;

        Extracted {
            node: Some(root),
            cost,
        }
    }

    fn merge(&mut self, arena: &mut NodeArena<K, T>, other: Self) -> Cost {
        arena.adopt(&mut self.owner, other.owner);
        self.forest.extend(other.forest);
        self.len += other.len;
        if let Some(other_min) = other.min {
            self.note_candidate(arena, other_min);
        }
        Cost::ZERO
    }

    fn decrease_key(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, diff: K) -> Cost {
        if diff <= K::default() {
            return Cost::ZERO;
        }
        arena.expect_member(node, self.owner, "decrease_key");

        let key = arena.key(node) - diff;
        if arena.parent(node).is_some() {
            linear::cut(arena, node);
            self.forest.push(node);
        } else {
            self.expect_root(node, "decrease_key");
        }
        arena.set_key(node, key);
        self.note_candidate(arena, node);
        Cost::ZERO
    }

    fn delete(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) {
        arena.expect_member(node, self.owner, "delete");

        if arena.parent(node).is_some() {
            linear::cut(arena, node);
        } else {
            let index = self.root_index(node, "delete");
            self.forest.remove(index);
        }

        let children = linear::take_children(arena, node);
        self.forest.extend(children);
        arena.detach(node);
        self.len -= 1;

        if self.min == Some(node) {
            self.min = self.scan_min(arena);
        }
    }
}

impl<K: Key, T> LazyPairingHeap<K, T> {
    /// Number of independent trees currently in the root list
    pub fn root_count(&self) -> usize {
        self.forest.len()
    }

    fn note_candidate(&mut self, arena: &NodeArena<K, T>, node: NodeId) {
        match self.min {
            Some(min) if arena.key(min) <= arena.key(node) => {}
            _ => self.min = Some(node),
        }
    }

    fn scan_min(&self, arena: &NodeArena<K, T>) -> Option<NodeId> {
        self.forest.iter().copied().min_by_key(|&id| arena.key(id))
    }

    fn root_index(&self, node: NodeId, context: &str) -> usize {
        match self.forest.iter().position(|&id| id == node) {
            Some(index) => index,
            None => node_not_found(node, context),
        }
    }

    fn expect_root(&self, node: NodeId, context: &str) {
        if cfg!(debug_assertions) {
            self.root_index(node, context);
        }
    }
}
