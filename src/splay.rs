//! Splay Tree Heap implementation
//!
//! A priority queue on a splay tree whose in-order sequence is insertion
//! order, newest first. Every node caches the minimum key of its subtree, so
//! the minimum is found by descending towards the cached value.
//!
//! - insert: attach as the left child of the leftmost node, splay it up
//! - delete_min: descend to the minimum, splice it out, splay the splice point
//! - decrease_key: refresh the node's cached minimum, splay it up
//! - merge: hang the donor tree below the leftmost node, splay its root up
//!
//! Every rotation recomputes the cached minimum of both rotated nodes, which
//! also repairs every ancestor of the splayed node on its way to the root.

use crate::cost::{Cost, Extracted};
use crate::node::{NodeArena, NodeId, OwnerTag};
use crate::traits::{node_not_found, Key, MeldableHeap};
use std::marker::PhantomData;

/// Splay-tree-backed priority queue
///
/// Links count the attachment of a new node or donor tree plus one per
/// rotation. Comparisons count every key comparison made while recomputing
/// cached minima and while descending to the minimum.
#[derive(Debug)]
pub struct SplayTreeHeap<K, T> {
    root: Option<NodeId>,
    len: usize,
    owner: OwnerTag,
    _phantom: PhantomData<fn() -> (K, T)>,
}

impl<K: Key, T> Default for SplayTreeHeap<K, T> {
    fn default() -> Self {
        <Self as MeldableHeap<K, T>>::new()
    }
}

impl<K: Key, T> MeldableHeap<K, T> for SplayTreeHeap<K, T> {
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
        self.hang_leftmost(arena, node)
    }

    fn find_min(&self, arena: &NodeArena<K, T>) -> Option<NodeId> {
        self.descend_to_min(arena).map(|(node, _)| node)
    }

    fn delete_min(&mut self, arena: &mut NodeArena<K, T>) -> Extracted {
        let Some((min, comparisons)) = self.descend_to_min(arena) else {
            return Extracted::empty();
        };

        let cost = Cost::new(comparisons, 0) + self.remove(arena, min);
        log::trace!("splay delete_min: {cost}");
        Extracted {
            node: Some(min),
            cost,
        }
    }

    fn merge(&mut self, arena: &mut NodeArena<K, T>, other: Self) -> Cost {
        arena.adopt(&mut self.owner, other.owner);
        self.len += other.len;
        match other.root {
            Some(donor) => self.hang_leftmost(arena, donor),
            None => Cost::ZERO,
        }
    }

    fn decrease_key(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, diff: K) -> Cost {
        if diff <= K::default() {
            return Cost::ZERO;
        }
        arena.expect_member(node, self.owner, "decrease_key");

        let key = arena.key(node) - diff;
        arena.set_key(node, key);
        let mut cost = refresh_min(arena, node);
        cost += self.splay(arena, node);
        cost
    }

    fn delete(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) {
        arena.expect_member(node, self.owner, "delete");
        self.remove(arena, node);
    }
}

impl<K: Key, T> SplayTreeHeap<K, T> {
    /// Attaches an independent tree as the left child of the leftmost node
    /// and splays it to the root.
    fn hang_leftmost(&mut self, arena: &mut NodeArena<K, T>, tree: NodeId) -> Cost {
        let Some(root) = self.root else {
            self.root = Some(tree);
            return Cost::ZERO;
        };

        let mut leftmost = root;
        while let Some(left) = arena.left(leftmost) {
            leftmost = left;
        }
        arena.set_left(leftmost, Some(tree));
        arena.set_parent(tree, Some(leftmost));

        let mut cost = Cost::new(0, 1);
        cost += self.splay(arena, tree);
        cost
    }

    /// Walks from the root towards the cached minimum, preferring the left
    /// subtree on ties. Returns the node and the comparisons spent.
    fn descend_to_min(&self, arena: &NodeArena<K, T>) -> Option<(NodeId, u64)> {
        let root = self.root?;
        let target = arena.subtree_min(root);
        let mut comparisons = 0;
        let mut current = root;

        loop {
            comparisons += 1;
            if arena.key(current) == target {
                return Some((current, comparisons));
            }

            current = match (arena.left(current), arena.right(current)) {
                (Some(left), Some(right)) => {
                    comparisons += 1;
                    if arena.subtree_min(left) == target {
                        left
                    } else {
                        right
                    }
                }
                (Some(child), None) | (None, Some(child)) => child,
                (None, None) => node_not_found(current, "find_min"),
            };
        }
    }

    /// Splices `node` out of the tree and splays the splice point.
    ///
    /// A node with two children is replaced by its in-order predecessor,
    /// moved structurally so that handles keep their keys and payloads.
    fn remove(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) -> Cost {
        let parent = arena.parent(node);
        let splice_point = match (arena.left(node), arena.right(node)) {
            (Some(left), Some(right)) => {
                let mut pred = left;
                while let Some(next) = arena.right(pred) {
                    pred = next;
                }

                let splice_point = if pred == left {
                    pred
                } else {
                    let pred_parent = arena.parent(pred);
                    let pred_left = arena.left(pred);
                    if let Some(pred_parent) = pred_parent {
                        arena.set_right(pred_parent, pred_left);
                    }
                    if let Some(pred_left) = pred_left {
                        arena.set_parent(pred_left, pred_parent);
                    }
                    arena.set_left(pred, Some(left));
                    arena.set_parent(left, Some(pred));
                    pred_parent.unwrap_or(pred)
                };

                arena.set_right(pred, Some(right));
                arena.set_parent(right, Some(pred));
                self.replace_child(arena, parent, node, Some(pred));
                Some(splice_point)
            }
            (Some(child), None) | (None, Some(child)) => {
                self.replace_child(arena, parent, node, Some(child));
                parent
            }
            (None, None) => {
                self.replace_child(arena, parent, node, None);
                parent
            }
        };

        arena.detach(node);
        self.len -= 1;

        match splice_point {
            Some(point) => {
                let mut cost = refresh_min(arena, point);
                cost += self.splay(arena, point);
                cost
            }
            None => Cost::ZERO,
        }
    }

    /// Puts `new` where `old` hung below `parent` (or at the root).
    fn replace_child(
        &mut self,
        arena: &mut NodeArena<K, T>,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if arena.left(parent) == Some(old) {
                    arena.set_left(parent, new);
                } else {
                    arena.set_right(parent, new);
                }
            }
        }
        if let Some(new) = new {
            arena.set_parent(new, parent);
        }
    }

    /// Rotates `node` above its parent.
    fn rotate_up(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) -> Cost {
        let Some(parent) = arena.parent(node) else {
            return Cost::ZERO;
        };
        let grandparent = arena.parent(parent);

        if arena.left(parent) == Some(node) {
            let inner = arena.right(node);
            arena.set_left(parent, inner);
            if let Some(inner) = inner {
                arena.set_parent(inner, Some(parent));
            }
            arena.set_right(node, Some(parent));
        } else {
            let inner = arena.left(node);
            arena.set_right(parent, inner);
            if let Some(inner) = inner {
                arena.set_parent(inner, Some(parent));
            }
            arena.set_left(node, Some(parent));
        }
        arena.set_parent(parent, Some(node));
        self.replace_child(arena, grandparent, parent, Some(node));

        let mut cost = Cost::new(0, 1);
        cost += refresh_min(arena, parent);
        cost += refresh_min(arena, node);
        cost
    }

    /// Moves `node` to the root with zig, zig-zig and zig-zag steps.
    fn splay(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) -> Cost {
        let mut cost = Cost::ZERO;
        while let Some(parent) = arena.parent(node) {
            match arena.parent(parent) {
                None => cost += self.rotate_up(arena, node),
                Some(grandparent) => {
                    let node_is_left = arena.left(parent) == Some(node);
                    let parent_is_left = arena.left(grandparent) == Some(parent);
                    if node_is_left == parent_is_left {
                        cost += self.rotate_up(arena, parent);
                    } else {
                        cost += self.rotate_up(arena, node);
                    }
                    cost += self.rotate_up(arena, node);
                }
            }
        }
        cost
    }
}

/// Recomputes the cached subtree minimum of `node` from its key and its
/// children's cached minima.
fn refresh_min<K: Key, T>(arena: &mut NodeArena<K, T>, node: NodeId) -> Cost {
    let mut min = arena.key(node);
    let mut comparisons = 0;
    for child in [arena.left(node), arena.right(node)].into_iter().flatten() {
        comparisons += 1;
        min = min.min(arena.subtree_min(child));
    }
    arena.set_subtree_min(node, min);
    Cost::new(comparisons, 0)
}
