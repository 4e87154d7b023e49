//! Tree surgery for multiway trees with linear sibling lists
//!
//! Used by the standard and lazy pairing heaps. A node's children hang off its
//! `left` link as a doubly linked list (`next`/`prev`, `None` terminated), and
//! every child carries a `parent` back-reference so any node can be cut in
//! O(1).

use crate::cost::Cost;
use crate::node::{NodeArena, NodeId};
use crate::traits::Key;

/// Makes `child` the leftmost child of `parent`.
pub(crate) fn attach_first<K: Key, T>(arena: &mut NodeArena<K, T>, parent: NodeId, child: NodeId) {
    let first = arena.left(parent);
    arena.set_next_sibling(child, first);
    if let Some(first) = first {
        arena.set_prev_sibling(first, Some(child));
    }
    arena.set_left(parent, Some(child));
    arena.set_parent(child, Some(parent));
}

/// Links two roots; the one with the larger key becomes the leftmost child
/// of the other. Ties favor `a`.
///
/// Returns the surviving root. Costs one comparison and one link.
pub(crate) fn link<K: Key, T>(arena: &mut NodeArena<K, T>, a: NodeId, b: NodeId) -> NodeId {
    if arena.key(a) <= arena.key(b) {
        attach_first(arena, a, b);
        a
    } else {
        attach_first(arena, b, a);
        b
    }
}

/// Cuts `node` (with its subtree) out of its parent's child list.
///
/// Does nothing to a root.
pub(crate) fn cut<K: Key, T>(arena: &mut NodeArena<K, T>, node: NodeId) {
    let Some(parent) = arena.parent(node) else {
        return;
    };
    let prev = arena.prev_sibling(node);
    let next = arena.next_sibling(node);

    match prev {
        Some(prev) => arena.set_next_sibling(prev, next),
        None => arena.set_left(parent, next),
    }
    if let Some(next) = next {
        arena.set_prev_sibling(next, prev);
    }

    arena.set_parent(node, None);
    arena.set_prev_sibling(node, None);
    arena.set_next_sibling(node, None);
}

/// Detaches all children of `node`, returning them left to right as
/// independent roots.
pub(crate) fn take_children<K: Key, T>(arena: &mut NodeArena<K, T>, node: NodeId) -> Vec<NodeId> {
    let mut children = Vec::new();
    let mut current = arena.left(node);
    if current.is_some() {
        arena.set_left(node, None);
    }

    while let Some(child) = current {
        current = arena.next_sibling(child);
        arena.set_parent(child, None);
        if current.is_some() {
            arena.set_next_sibling(child, None);
        }
        if arena.prev_sibling(child).is_some() {
            arena.set_prev_sibling(child, None);
        }
        children.push(child);
    }

    children
}

/// Consolidates independent roots into one tree with the two-pass method
///
/// A left-to-right pairing pass links consecutive pairs (ties favor the left
/// tree), then a right-to-left combining pass folds the paired trees into the
/// rightmost one (ties favor the accumulated tree). Every step is exactly one
/// comparison and one link, so `k` roots cost `k - 1` of each.
///
/// Returns `None` for an empty input.
pub(crate) fn two_pass<K: Key, T>(
    arena: &mut NodeArena<K, T>,
    roots: Vec<NodeId>,
) -> Option<(NodeId, Cost)> {
    let mut cost = Cost::ZERO;

    // Pairing pass
    let mut paired = Vec::with_capacity(roots.len().div_ceil(2));
    let mut iter = roots.into_iter();
    while let Some(first) = iter.next() {
        match iter.next() {
            Some(second) => {
                paired.push(link(arena, first, second));
                cost += Cost::link();
            }
            None => paired.push(first),
        }
    }

    // Combining pass
    let mut combined = paired.pop()?;
    while let Some(tree) = paired.pop() {
        combined = link(arena, combined, tree);
        cost += Cost::link();
    }

    Some((combined, cost))
}
