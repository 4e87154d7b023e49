//! Tree surgery for multiway trees with circular sibling rings
//!
//! Used by the smooth and slim heaps. The children of a node form a ring
//! (see [`index_ring`]) anchored at the node's `right` link, which names the
//! rightmost child; `next(right)` is therefore the leftmost child, and both
//! ends of the child list can be reached and spliced in O(1). Roots are never
//! ring-linked.
//!
//! The module also provides treapify, the linear-time consolidation both
//! heaps use on delete_min, and [`RootPool`], the root list with a minimum
//! pointer they share.

use crate::cost::Cost;
use crate::node::{NodeArena, NodeId};
use crate::traits::{node_not_found, Key};
use index_ring::RingOps;

const RING: RingOps = RingOps::new();

/// `left` becomes the parent of `right`; `right` becomes its rightmost child.
pub(crate) fn stable_link_left<K: Key, T>(arena: &mut NodeArena<K, T>, left: NodeId, right: NodeId) {
    match arena.right(left) {
        Some(anchor) => RING.insert_after(arena, anchor, right),
        None => RING.make_circular(arena, right),
    }
    arena.set_right(left, Some(right));
    arena.set_parent(right, Some(left));
}

/// `right` becomes the parent of `left`; `left` becomes its leftmost child.
pub(crate) fn stable_link_right<K: Key, T>(arena: &mut NodeArena<K, T>, left: NodeId, right: NodeId) {
    match arena.right(right) {
        Some(anchor) => RING.insert_after(arena, anchor, left),
        None => {
            RING.make_circular(arena, left);
            arena.set_right(right, Some(left));
        }
    }
    arena.set_parent(left, Some(right));
}

/// Leftmost child of `node`, if any.
pub(crate) fn leftmost_child<K: Key, T>(arena: &NodeArena<K, T>, node: NodeId) -> Option<NodeId> {
    arena.right(node).and_then(|anchor| arena.next_sibling(anchor))
}

/// Cuts `node` (with its subtree) out of its parent's ring.
///
/// Does nothing to a root.
pub(crate) fn cut<K: Key, T>(arena: &mut NodeArena<K, T>, node: NodeId) {
    let Some(parent) = arena.parent(node) else {
        return;
    };

    if arena.right(parent) == Some(node) {
        let anchor = if RING.is_singleton(&*arena, node) {
            None
        } else {
            arena.prev_sibling(node)
        };
        arena.set_right(parent, anchor);
    }
    RING.remove(arena, node);
    arena.set_parent(node, None);
}

/// Cuts the leftmost child of `node` and returns it as an independent root.
pub(crate) fn take_leftmost_child<K: Key, T>(arena: &mut NodeArena<K, T>, node: NodeId) -> Option<NodeId> {
    let child = leftmost_child(arena, node)?;
    cut(arena, child);
    Some(child)
}

/// Puts the independent root `new` in the ring position of the non-root
/// `old`, leaving `old` as an independent root.
pub(crate) fn replace<K: Key, T>(arena: &mut NodeArena<K, T>, old: NodeId, new: NodeId) {
    let Some(parent) = arena.parent(old) else {
        return;
    };

    RING.replace(arena, old, new);
    if arena.right(parent) == Some(old) {
        arena.set_right(parent, Some(new));
    }
    arena.set_parent(new, Some(parent));
    arena.set_parent(old, None);
}

/// Detaches all children of `node`, returning them left to right as
/// independent roots.
pub(crate) fn take_children<K: Key, T>(arena: &mut NodeArena<K, T>, node: NodeId) -> Vec<NodeId> {
    let Some(leftmost) = leftmost_child(arena, node) else {
        return Vec::new();
    };

    let children: Vec<NodeId> = RING.iter(&*arena, leftmost).collect();
    for &child in &children {
        RING.force_unlink(arena, child);
        arena.set_parent(child, None);
    }
    arena.set_right(node, None);
    children
}

/// Links a list of roots into a single tree, left to right
///
/// Scans the roots keeping an increasing run on a stack. When the next root
/// is not larger than the top of the run, the top is a local maximum: it is
/// linked below the larger of its two neighbours (the predecessor on the
/// stack via [`stable_link_left`], or the incoming root via
/// [`stable_link_right`]), and the walk continues down the stack while the
/// new top is still a local maximum. What remains on the stack at the end is
/// increasing and is linked right to left.
///
/// Every link is counted, giving exactly `roots.len() - 1` links. Every key
/// comparison is counted once; links in the final right-to-left phase need
/// none.
pub(crate) fn treapify<K: Key, T>(
    arena: &mut NodeArena<K, T>,
    roots: Vec<NodeId>,
) -> Option<(NodeId, Cost)> {
    let mut cost = Cost::ZERO;
    let mut run: Vec<NodeId> = Vec::with_capacity(roots.len());

    for incoming in roots {
        while let Some(mut top) = run.pop() {
            cost.comparisons += 1;
            if arena.key(top) < arena.key(incoming) {
                run.push(top);
                break;
            }

            loop {
                cost.links += 1;
                let Some(&pred) = run.last() else {
                    stable_link_right(arena, top, incoming);
                    break;
                };

                cost.comparisons += 1;
                if arena.key(pred) > arena.key(incoming) {
                    stable_link_left(arena, pred, top);
                    run.pop();
                    top = pred;
                } else {
                    stable_link_right(arena, top, incoming);
                    break;
                }
            }
        }
        run.push(incoming);
    }

    while run.len() > 1 {
        let top = run.pop()?;
        let pred = *run.last()?;
        stable_link_left(arena, pred, top);
        cost.links += 1;
    }

    run.pop().map(|root| (root, cost))
}

/// Root list with a pointer to its minimum-key root
///
/// Shared by the smooth and slim heaps: new roots are appended, the minimum
/// pointer is refreshed by one comparison per candidate, and delete_min
/// replaces the minimum root by its children in place before treapifying.
#[derive(Debug, Default)]
pub(crate) struct RootPool {
    pub(crate) forest: Vec<NodeId>,
    pub(crate) min: Option<NodeId>,
}

impl RootPool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends an independent root and offers it as the new minimum.
    pub(crate) fn push_root<K: Key, T>(&mut self, arena: &NodeArena<K, T>, node: NodeId) -> Cost {
        self.forest.push(node);
        self.offer_min(arena, node)
    }

    /// Makes `node` the minimum if its key is not larger than the current one.
    pub(crate) fn offer_min<K: Key, T>(&mut self, arena: &NodeArena<K, T>, node: NodeId) -> Cost {
        match self.min {
            None => {
                self.min = Some(node);
                Cost::ZERO
            }
            Some(min) => {
                if arena.key(node) <= arena.key(min) {
                    self.min = Some(node);
                }
                Cost::comparison()
            }
        }
    }

    /// Appends (or prepends) another pool's roots and offers its minimum.
    pub(crate) fn absorb<K: Key, T>(&mut self, arena: &NodeArena<K, T>, other: RootPool, prepend: bool) -> Cost {
        if prepend {
            let mut forest = other.forest;
            forest.append(&mut self.forest);
            self.forest = forest;
        } else {
            self.forest.extend(other.forest);
        }
        match other.min {
            Some(other_min) => self.offer_min(arena, other_min),
            None => Cost::ZERO,
        }
    }

    pub(crate) fn root_index(&self, node: NodeId, context: &str) -> usize {
        match self.forest.iter().position(|&id| id == node) {
            Some(index) => index,
            None => node_not_found(node, context),
        }
    }

    /// Removes the minimum root, puts its children in its place and
    /// treapifies the whole root list into one tree.
    ///
    /// Returns the removed node, still attached, and the treapify cost.
    pub(crate) fn extract_min<K: Key, T>(&mut self, arena: &mut NodeArena<K, T>) -> Option<(NodeId, Cost)> {
        let min = self.min?;
        let index = self.root_index(min, "delete_min");
        let children = take_children(arena, min);
        self.forest.splice(index..=index, children);

        let roots = self.forest.len();
        if roots > 64 {
            log::debug!("treapify over {roots} roots");
        }

        let forest = std::mem::take(&mut self.forest);
        let cost = match treapify(arena, forest) {
            Some((root, cost)) => {
                self.forest.push(root);
                self.min = Some(root);
                cost
            }
            None => {
                self.min = None;
                Cost::ZERO
            }
        };
        Some((min, cost))
    }

    /// Takes a node that is not the minimum out of the pool; its children
    /// become roots. A root's children take its place in the root list.
    pub(crate) fn remove_node<K: Key, T>(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, context: &str) {
        if arena.parent(node).is_some() {
            cut(arena, node);
            let children = take_children(arena, node);
            self.forest.extend(children);
        } else {
            let index = self.root_index(node, context);
            let children = take_children(arena, node);
            self.forest.splice(index..=index, children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots(arena: &mut NodeArena<i32, ()>, keys: &[i32]) -> Vec<NodeId> {
        keys.iter().map(|&k| arena.alloc(k, ())).collect()
    }

    fn child_keys(arena: &NodeArena<i32, ()>, node: NodeId) -> Vec<i32> {
        match leftmost_child(arena, node) {
            Some(first) => RING.iter(arena, first).map(|id| arena.key(id)).collect(),
            None => Vec::new(),
        }
    }

    fn assert_heap_ordered(arena: &NodeArena<i32, ()>, root: NodeId) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for child in take_ids(arena, node) {
                assert!(arena.key(node) <= arena.key(child));
                assert_eq!(arena.parent(child), Some(node));
                stack.push(child);
            }
        }
    }

    fn take_ids(arena: &NodeArena<i32, ()>, node: NodeId) -> Vec<NodeId> {
        match leftmost_child(arena, node) {
            Some(first) => RING.iter(arena, first).collect(),
            None => Vec::new(),
        }
    }

    #[test]
    fn test_stable_links_place_children_at_ends() {
        let mut arena = NodeArena::new();
        let ids = roots(&mut arena, &[1, 2, 3, 4]);

        stable_link_left(&mut arena, ids[0], ids[1]);
        stable_link_left(&mut arena, ids[0], ids[2]);
        stable_link_right(&mut arena, ids[3], ids[0]);

        assert_eq!(child_keys(&arena, ids[0]), vec![4, 2, 3]);
        assert_eq!(arena.right(ids[0]), Some(ids[2]));
    }

    #[test]
    fn test_cut_rightmost_moves_anchor() {
        let mut arena = NodeArena::new();
        let ids = roots(&mut arena, &[1, 2, 3]);
        stable_link_left(&mut arena, ids[0], ids[1]);
        stable_link_left(&mut arena, ids[0], ids[2]);

        cut(&mut arena, ids[2]);
        assert_eq!(arena.right(ids[0]), Some(ids[1]));
        assert_eq!(child_keys(&arena, ids[0]), vec![2]);

        cut(&mut arena, ids[1]);
        assert_eq!(arena.right(ids[0]), None);
        assert_eq!(arena.parent(ids[1]), None);
    }

    #[test]
    fn test_replace_promotes_into_slot() {
        let mut arena = NodeArena::new();
        let ids = roots(&mut arena, &[1, 5, 6, 9]);
        stable_link_left(&mut arena, ids[0], ids[1]);
        stable_link_left(&mut arena, ids[0], ids[2]);
        stable_link_left(&mut arena, ids[2], ids[3]);

        let child = take_leftmost_child(&mut arena, ids[2]).unwrap();
        replace(&mut arena, ids[2], child);

        assert_eq!(child_keys(&arena, ids[0]), vec![5, 9]);
        assert_eq!(arena.right(ids[0]), Some(ids[3]));
        assert_eq!(arena.parent(ids[2]), None);
    }

    #[test]
    fn test_treapify_links_n_minus_one() {
        let mut arena = NodeArena::new();
        let ids = roots(&mut arena, &[6, 2, 9, 4, 4, 1, 8, 3, 7, 5]);
        let count = ids.len() as u64;

        let (root, cost) = treapify(&mut arena, ids).unwrap();

        assert_eq!(arena.key(root), 1);
        assert_eq!(cost.links, count - 1);
        assert_heap_ordered(&arena, root);
    }

    #[test]
    fn test_treapify_increasing_run() {
        let mut arena = NodeArena::new();
        let ids = roots(&mut arena, &[1, 2, 3, 4]);

        let (root, cost) = treapify(&mut arena, ids.clone()).unwrap();

        // a single increasing run becomes a path, one comparison per step
        assert_eq!(root, ids[0]);
        assert_eq!(cost, Cost::new(3, 3));
        assert_eq!(arena.parent(ids[3]), Some(ids[2]));
    }

    #[test]
    fn test_treapify_decreasing_run() {
        let mut arena = NodeArena::new();
        let ids = roots(&mut arena, &[4, 3, 2, 1]);

        let (root, cost) = treapify(&mut arena, ids.clone()).unwrap();

        assert_eq!(root, ids[3]);
        assert_eq!(cost, Cost::new(3, 3));
        assert_eq!(arena.parent(ids[0]), Some(ids[1]));
    }

    #[test]
    fn test_pool_extract_min_replaces_in_place() {
        let mut arena = NodeArena::new();
        let ids = roots(&mut arena, &[3, 1, 5, 7]);
        stable_link_left(&mut arena, ids[1], ids[2]);
        stable_link_left(&mut arena, ids[1], ids[3]);

        let mut pool = RootPool::new();
        pool.push_root(&arena, ids[0]);
        pool.push_root(&arena, ids[1]);

        let (min, cost) = pool.extract_min(&mut arena).unwrap();
        assert_eq!(min, ids[1]);
        assert_eq!(cost.links, 2);
        assert_eq!(pool.min, Some(ids[0]));
        assert_eq!(pool.forest, vec![ids[0]]);
    }
}
