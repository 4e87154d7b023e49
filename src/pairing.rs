//! Standard Pairing Heap implementation
//!
//! A pairing heap is a single heap-ordered multiway tree with:
//! - O(1) insert and merge (one link against the root)
//! - O(log n) amortized delete_min via two-pass consolidation
//! - o(log n) amortized decrease_key (cut and relink against the root)
//!
//! Children are kept in linear sibling lists; see [`crate::linear`].

use crate::cost::{Cost, Extracted};
use crate::linear;
use crate::node::{NodeArena, NodeId, OwnerTag};
use crate::traits::{Key, MeldableHeap};
use std::marker::PhantomData;

/// Standard (eager) Pairing Heap
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::{MeldableHeap, NodeArena};
/// use self_adjusting_heaps::pairing::StandardPairingHeap;
///
/// let mut arena = NodeArena::new();
/// let mut heap = StandardPairingHeap::new();
/// let node = arena.alloc(5, "item");
/// heap.insert(&mut arena, node);
/// heap.decrease_key(&mut arena, node, 4);
/// assert_eq!(arena.key(heap.find_min(&arena).unwrap()), 1);
/// ```
#[derive(Debug)]
pub struct StandardPairingHeap<K, T> {
    root: Option<NodeId>,
    len: usize,
    owner: OwnerTag,
    _phantom: PhantomData<fn() -> (K, T)>,
}

impl<K: Key, T> Default for StandardPairingHeap<K, T> {
    fn default() -> Self {
        <Self as MeldableHeap<K, T>>::new()
    }
}

impl<K: Key, T> MeldableHeap<K, T> for StandardPairingHeap<K, T> {
    fn new() -> Self {
        Self {
            root: None,
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
        self.meld_root(arena, node)
    }

    fn find_min(&self, _arena: &NodeArena<K, T>) -> Option<NodeId> {
        self.root
    }

    fn delete_min(&mut self, arena: &mut NodeArena<K, T>) -> Extracted {
        let Some(root) = self.root else {
            return Extracted::empty();
        };

        let children = linear::take_children(arena, root);
        let cost = match linear::two_pass(arena, children) {
            Some((new_root, cost)) => {
                self.root = Some(new_root);
                cost
            }
            None => {
                self.root = None;
                Cost::ZERO
            }
        };

        arena.detach(root);
        self.len -= 1;
        log::trace!("pairing delete_min: {cost}");
        Extracted {
            node: Some(root),
            cost,
        }
    }

    fn merge(&mut self, arena: &mut NodeArena<K, T>, other: Self) -> Cost {
        arena.adopt(&mut self.owner, other.owner);
        self.len += other.len;
        match other.root {
            Some(other_root) => self.meld_root(arena, other_root),
            None => Cost::ZERO,
        }
    }

    fn decrease_key(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, diff: K) -> Cost {
        if diff <= K::default() {
            return Cost::ZERO;
        }
        arena.expect_member(node, self.owner, "decrease_key");

        let key = arena.key(node) - diff;
        if self.root == Some(node) {
            arena.set_key(node, key);
            return Cost::ZERO;
        }

        linear::cut(arena, node);
        arena.set_key(node, key);
        self.meld_root(arena, node)
    }

    fn delete(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) {
        arena.expect_member(node, self.owner, "delete");

        if self.root == Some(node) {
            self.delete_min(arena);
            return;
        }

        linear::cut(arena, node);
        let children = linear::take_children(arena, node);
        arena.detach(node);
        self.len -= 1;

        if let Some((subtree, _)) = linear::two_pass(arena, children) {
            self.meld_root(arena, subtree);
        }
    }
}

impl<K: Key, T> StandardPairingHeap<K, T> {
    /// Links an independent tree against the current root.
    fn meld_root(&mut self, arena: &mut NodeArena<K, T>, tree: NodeId) -> Cost {
        match self.root {
            None => {
                self.root = Some(tree);
                Cost::ZERO
            }
            Some(root) => {
                self.root = Some(linear::link(arena, root, tree));
                Cost::link()
            }
        }
    }
}
