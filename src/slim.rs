//! Slim Heap implementation
//!
//! The slim heap is the smooth heap without the decrease-key buffer:
//! - insert and merge append to the root list, one comparison for the minimum
//! - decrease_key cuts the node's whole subtree and appends it as a new root
//! - delete_min replaces the minimum root by its children and treapifies
//!
//! Children are kept in circular sibling rings; see [`crate::circular`].

use crate::circular::{self, RootPool};
use crate::cost::{Cost, Extracted};
use crate::node::{NodeArena, NodeId, OwnerTag};
use crate::traits::{Key, MeldableHeap};
use std::marker::PhantomData;

/// Slim heap
#[derive(Debug)]
pub struct SlimHeap<K, T> {
    pool: RootPool,
    len: usize,
    owner: OwnerTag,
    _phantom: PhantomData<fn() -> (K, T)>,
}

impl<K: Key, T> Default for SlimHeap<K, T> {
    fn default() -> Self {
        <Self as MeldableHeap<K, T>>::new()
    }
}

impl<K: Key, T> MeldableHeap<K, T> for SlimHeap<K, T> {
    fn new() -> Self {
        Self {
            pool: RootPool::new(),
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
        self.len += 1;
        self.pool.push_root(arena, node)
    }

    fn find_min(&self, _arena: &NodeArena<K, T>) -> Option<NodeId> {
        self.pool.min
    }

    fn delete_min(&mut self, arena: &mut NodeArena<K, T>) -> Extracted {
        let Some((min, cost)) = self.pool.extract_min(arena) else {
            return Extracted::empty();
        };

        arena.detach(min);
        self.len -= 1;
        log::trace!("slim delete_min: {cost}");
        Extracted {
            node: Some(min),
            cost,
        }
    }

    fn merge(&mut self, arena: &mut NodeArena<K, T>, other: Self) -> Cost {
        arena.adopt(&mut self.owner, other.owner);
        self.len += other.len;
        self.pool.absorb(arena, other.pool, false)
    }

    fn decrease_key(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, diff: K) -> Cost {
        if diff <= K::default() {
            return Cost::ZERO;
        }
        arena.expect_member(node, self.owner, "decrease_key");

        let key = arena.key(node) - diff;
        if arena.parent(node).is_some() {
            circular::cut(arena, node);
            self.pool.forest.push(node);
        }
        arena.set_key(node, key);
        self.pool.offer_min(arena, node)
    }

    fn delete(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) {
        arena.expect_member(node, self.owner, "delete");

        if self.pool.min == Some(node) {
            self.delete_min(arena);
            return;
        }

        self.pool.remove_node(arena, node, "delete");
        arena.detach(node);
        self.len -= 1;
    }
}

impl<K: Key, T> SlimHeap<K, T> {
    /// Number of independent trees in the root list
    pub fn root_count(&self) -> usize {
        self.pool.forest.len()
    }
}
