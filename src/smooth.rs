//! Smooth Heap implementation
//!
//! A smooth heap keeps a root list and consolidates it with treapify on
//! delete_min. Decrease-key is deferred through a small buffer:
//! - the decreased node leaves its position (its leftmost child takes the
//!   vacated slot) and waits in the buffer with its remaining subtree
//! - once the buffer holds more than ceil(log2 n) trees it is sorted, folded
//!   into a single path and appended to the root list
//!
//! Complexity, amortized:
//! - insert, merge: O(1)
//! - delete_min: O(log n)
//! - decrease_key: O(log log n) for the buffer sort, spread over its flushes
//!
//! Children are kept in circular sibling rings; see [`crate::circular`].

use crate::circular::{self, RootPool};
use crate::cost::{Cost, Extracted};
use crate::node::{NodeArena, NodeId, OwnerTag};
use crate::traits::{node_not_found, Key, MeldableHeap};
use std::marker::PhantomData;

/// Smooth heap with a decrease-key buffer
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::{MeldableHeap, NodeArena};
/// use self_adjusting_heaps::smooth::SmoothHeap;
///
/// let mut arena = NodeArena::new();
/// let mut heap = SmoothHeap::new();
/// for k in [8, 3, 5] {
///     let id = arena.alloc(k, ());
///     heap.insert(&mut arena, id);
/// }
/// let out = heap.delete_min(&mut arena);
/// assert_eq!(arena.key(out.node.unwrap()), 3);
/// ```
#[derive(Debug)]
pub struct SmoothHeap<K, T> {
    pool: RootPool,
    buffer: Vec<NodeId>,
    len: usize,
    owner: OwnerTag,
    _phantom: PhantomData<fn() -> (K, T)>,
}

impl<K: Key, T> Default for SmoothHeap<K, T> {
    fn default() -> Self {
        <Self as MeldableHeap<K, T>>::new()
    }
}

impl<K: Key, T> MeldableHeap<K, T> for SmoothHeap<K, T> {
    fn new() -> Self {
        Self {
            pool: RootPool::new(),
            buffer: Vec::new(),
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
        if self.pool.min.is_none() {
            return Extracted::empty();
        }

        let mut cost = self.clean_buffer(arena);
        let Some((min, consolidation)) = self.pool.extract_min(arena) else {
            return Extracted::empty();
        };
        cost += consolidation;

        arena.detach(min);
        self.len -= 1;
        log::trace!("smooth delete_min: {cost}");
        Extracted {
            node: Some(min),
            cost,
        }
    }

    fn merge(&mut self, arena: &mut NodeArena<K, T>, mut other: Self) -> Cost {
        arena.adopt(&mut self.owner, other.owner);
        if other.len == 0 {
            return Cost::ZERO;
        }

        let mut cost = Cost::ZERO;
        if self.size() >= other.size() {
            cost += other.clean_buffer(arena);
            cost += self.pool.absorb(arena, other.pool, false);
        } else {
            cost += self.clean_buffer(arena);
            cost += self.pool.absorb(arena, other.pool, true);
            self.buffer = other.buffer;
        }
        self.len += other.len;
        cost
    }

    fn decrease_key(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, diff: K) -> Cost {
        if diff <= K::default() {
            return Cost::ZERO;
        }
        arena.expect_member(node, self.owner, "decrease_key");

        let key = arena.key(node) - diff;
        arena.set_key(node, key);

        if arena.parent(node).is_some() {
            match circular::take_leftmost_child(arena, node) {
                Some(child) => circular::replace(arena, node, child),
                None => circular::cut(arena, node),
            }
            self.buffer.push(node);
        } else if let Some(index) = self.pool.forest.iter().position(|&id| id == node) {
            match circular::take_leftmost_child(arena, node) {
                Some(child) => self.pool.forest[index] = child,
                None => {
                    self.pool.forest.remove(index);
                }
            }
            self.buffer.push(node);
        } else if !self.buffer.contains(&node) {
            node_not_found(node, "decrease_key");
        }

        let mut cost = self.pool.offer_min(arena, node);
        if self.buffer.len() > buffer_limit(self.len) {
            cost += self.clean_buffer(arena);
        }
        cost
    }

    fn delete(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) {
        arena.expect_member(node, self.owner, "delete");

        if self.pool.min == Some(node) {
            // flushing may hand the minimum to an equal key buffered earlier
            self.clean_buffer(arena);
            if self.pool.min == Some(node) {
                self.delete_min(arena);
                return;
            }
        }

        if let Some(index) = self.buffer.iter().position(|&id| id == node) {
            self.buffer.remove(index);
            let children = circular::take_children(arena, node);
            self.pool.forest.extend(children);
        } else {
            self.pool.remove_node(arena, node, "delete");
        }

        arena.detach(node);
        self.len -= 1;
    }
}

impl<K: Key, T> SmoothHeap<K, T> {
    /// Number of decreased trees waiting to be consolidated
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Number of independent trees in the root list, buffer excluded
    pub fn root_count(&self) -> usize {
        self.pool.forest.len()
    }

    fn size(&self) -> usize {
        self.pool.forest.len() + self.buffer.len()
    }

    /// Sorts the buffered trees, folds them into a single path and appends
    /// the path's root to the root list.
    fn clean_buffer(&mut self, arena: &mut NodeArena<K, T>) -> Cost {
        if self.buffer.is_empty() {
            return Cost::ZERO;
        }

        let buffered = std::mem::take(&mut self.buffer);
        let count = buffered.len();
        let (mut sorted, comparisons) = sort_by_key(arena, buffered);
        sorted.reverse();

        let mut cost = Cost::new(comparisons, 0);
        let mut path = sorted.into_iter();
        let Some(mut root) = path.next() else {
            return cost;
        };
        for next in path {
            circular::stable_link_right(arena, root, next);
            root = next;
            cost.links += 1;
        }

        self.pool.forest.push(root);
        cost += self.pool.offer_min(arena, root);
        log::debug!("smooth heap flushed {count} buffered trees: {cost}");
        cost
    }
}

/// Largest buffer allowed for a heap of `len` nodes: ceil(log2 len).
fn buffer_limit(len: usize) -> usize {
    if len <= 1 {
        0
    } else {
        (usize::BITS - (len - 1).leading_zeros()) as usize
    }
}

/// Stable bottom-up merge sort by key, counting comparisons.
fn sort_by_key<K: Key, T>(arena: &NodeArena<K, T>, items: Vec<NodeId>) -> (Vec<NodeId>, u64) {
    let n = items.len();
    let mut comparisons = 0;
    let mut src = items;
    let mut dst = Vec::with_capacity(n);

    let mut width = 1;
    while width < n {
        dst.clear();
        for start in (0..n).step_by(2 * width) {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            let (mut l, mut r) = (start, mid);
            while l < mid && r < end {
                comparisons += 1;
                if arena.key(src[l]) <= arena.key(src[r]) {
                    dst.push(src[l]);
                    l += 1;
                } else {
                    dst.push(src[r]);
                    r += 1;
                }
            }
            dst.extend_from_slice(&src[l..mid]);
            dst.extend_from_slice(&src[r..end]);
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }

    (src, comparisons)
}
