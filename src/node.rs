//! Node storage shared by all heap variants
//!
//! Nodes live in a caller-owned [`NodeArena`] backed by a `slotmap`, and are
//! addressed by generational [`NodeId`] keys. A heap only ever holds ids, so
//! moving a whole forest from one heap into another during `merge` moves ids,
//! never nodes, and a handle stays valid for as long as the caller keeps the
//! node allocated.
//!
//! Every write to a structural link goes through the arena, which counts it.
//! The dispatcher reads that counter to report raw pointer updates per heap.
//!
//! # Example
//!
//! ```rust
//! use self_adjusting_heaps::NodeArena;
//!
//! let mut arena: NodeArena<u32, &str> = NodeArena::new();
//! let id = arena.alloc(10, "vertex 3");
//! assert_eq!(arena.key(id), 10);
//! assert!(!arena.is_attached(id));
//! assert_eq!(arena.release(id), Ok((10, "vertex 3")));
//! ```

use crate::traits::{node_not_found, HeapError};
use index_ring::RingLinks;
use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;

new_key_type! {
    /// Handle to a node in a [`NodeArena`]
    pub struct NodeId;
}

/// A single heap node
///
/// Which links are meaningful depends on the variant holding the node:
///
/// | field   | linear pairing   | circular (smooth/slim) | splay tree   |
/// |---------|------------------|------------------------|--------------|
/// | `left`  | first child      | unused                 | left child   |
/// | `right` | unused           | rightmost child        | right child  |
/// | `next`  | next sibling     | next sibling in ring   | unused       |
/// | `prev`  | previous sibling | prev sibling in ring   | unused       |
#[derive(Debug, Clone)]
pub struct Node<K, T> {
    key: K,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    next: Option<NodeId>,
    prev: Option<NodeId>,
    subtree_min: K,
    owner: Option<usize>,
    payload: T,
}

/// Identity of one heap instance within an arena
///
/// A heap is registered on its first insert. Merging unions the donor's
/// owner set into the receiver's, so nodes stamped by either heap are
/// recognised as members of the survivor without restamping them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct OwnerTag(Option<usize>);

/// Arena owning every node the caller allocates
#[derive(Debug, Clone)]
pub struct NodeArena<K, T> {
    nodes: SlotMap<NodeId, Node<K, T>>,
    // union-find over heap instances, indexed by owner tag
    owners: Vec<usize>,
    owner_ranks: Vec<u8>,
    pointer_writes: u64,
}

impl<K: Copy, T> Default for NodeArena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy, T> NodeArena<K, T> {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            owners: Vec::new(),
            owner_ranks: Vec::new(),
            pointer_writes: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            owners: Vec::new(),
            owner_ranks: Vec::new(),
            pointer_writes: 0,
        }
    }

    /// Allocates a detached node
    pub fn alloc(&mut self, key: K, payload: T) -> NodeId {
        self.nodes.insert(Node {
            key,
            parent: None,
            left: None,
            right: None,
            next: None,
            prev: None,
            subtree_min: key,
            owner: None,
            payload,
        })
    }

    /// Frees a detached node, returning its key and payload
    ///
    /// # Errors
    /// `InvalidHandle` if the node was already released, `NodeAttached` if it
    /// still belongs to a heap.
    pub fn release(&mut self, id: NodeId) -> Result<(K, T), HeapError> {
        match self.nodes.get(id) {
            None => Err(HeapError::InvalidHandle),
            Some(node) if node.owner.is_some() => Err(HeapError::NodeAttached),
            Some(_) => self
                .nodes
                .remove(id)
                .map(|node| (node.key, node.payload))
                .ok_or(HeapError::InvalidHandle),
        }
    }

    /// Returns true if `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node is allocated
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current key of a node
    ///
    /// # Panics
    /// If the node was released.
    pub fn key(&self, id: NodeId) -> K {
        self.node(id).key
    }

    /// Payload of a node
    pub fn payload(&self, id: NodeId) -> &T {
        &self.node(id).payload
    }

    /// Mutable payload of a node; the heaps never read it
    pub fn payload_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.node_mut(id).payload
    }

    /// Returns true if the node currently belongs to a heap
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.owner.is_some())
    }

    /// Total number of structural link writes made through this arena
    pub fn pointer_writes(&self) -> u64 {
        self.pointer_writes
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, T> {
        match self.nodes.get(id) {
            Some(node) => node,
            None => node_not_found(id, "arena lookup"),
        }
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, T> {
        match self.nodes.get_mut(id) {
            Some(node) => node,
            None => node_not_found(id, "arena lookup"),
        }
    }

    // ------------------------------------------------------------------
    // Crate-internal structural access
    // ------------------------------------------------------------------

    pub(crate) fn set_key(&mut self, id: NodeId, key: K) {
        self.node_mut(id).key = key;
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    pub(crate) fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub(crate) fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub(crate) fn subtree_min(&self, id: NodeId) -> K {
        self.node(id).subtree_min
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.pointer_writes += 1;
        self.node_mut(id).parent = parent;
    }

    pub(crate) fn set_left(&mut self, id: NodeId, left: Option<NodeId>) {
        self.pointer_writes += 1;
        self.node_mut(id).left = left;
    }

    pub(crate) fn set_right(&mut self, id: NodeId, right: Option<NodeId>) {
        self.pointer_writes += 1;
        self.node_mut(id).right = right;
    }

    pub(crate) fn set_next_sibling(&mut self, id: NodeId, next: Option<NodeId>) {
        self.pointer_writes += 1;
        self.node_mut(id).next = next;
    }

    pub(crate) fn set_prev_sibling(&mut self, id: NodeId, prev: Option<NodeId>) {
        self.pointer_writes += 1;
        self.node_mut(id).prev = prev;
    }

    pub(crate) fn set_subtree_min(&mut self, id: NodeId, min: K) {
        self.pointer_writes += 1;
        self.node_mut(id).subtree_min = min;
    }

    /// Marks a detached node as owned by the heap holding `tag`.
    ///
    /// # Panics
    /// If the node already belongs to a heap.
    pub(crate) fn attach(&mut self, id: NodeId, tag: &mut OwnerTag) {
        let owner = self.register(tag);
        let node = self.node_mut(id);
        if node.owner.is_some() {
            log::error!("insert: node {id:?} already belongs to a heap");
            panic!("insert: node {id:?} already belongs to a heap");
        }
        node.owner = Some(owner);
    }

    /// Folds the donor heap's owner set into the receiver's.
    pub(crate) fn adopt(&mut self, tag: &mut OwnerTag, donor: OwnerTag) {
        let Some(donor) = donor.0 else {
            return;
        };
        let Some(receiver) = tag.0 else {
            tag.0 = Some(donor);
            return;
        };
        let (Some(a), Some(b)) = (self.find_owner(receiver), self.find_owner(donor)) else {
            return;
        };
        if a == b {
            return;
        }
        match self.owner_ranks[a].cmp(&self.owner_ranks[b]) {
            Ordering::Less => self.owners[a] = b,
            Ordering::Greater => self.owners[b] = a,
            Ordering::Equal => {
                self.owners[b] = a;
                self.owner_ranks[a] += 1;
            }
        }
    }

    /// Clears every structural link of a node and marks it detached.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        let cleared = [
            node.parent.take(),
            node.left.take(),
            node.right.take(),
            node.next.take(),
            node.prev.take(),
        ]
        .iter()
        .filter(|link| link.is_some())
        .count();
        node.subtree_min = node.key;
        node.owner = None;
        self.pointer_writes += cleared as u64;
    }

    /// Panics unless the node is live and owned by the heap holding `tag`.
    #[track_caller]
    pub(crate) fn expect_member(&mut self, id: NodeId, tag: OwnerTag, context: &str) {
        let owner = self.nodes.get(id).and_then(|node| node.owner);
        let member = match (owner, tag.0) {
            (Some(owner), Some(heap)) => {
                let owner = self.find_owner(owner);
                owner.is_some() && owner == self.find_owner(heap)
            }
            _ => false,
        };
        if !member {
            node_not_found(id, context);
        }
    }

    fn register(&mut self, tag: &mut OwnerTag) -> usize {
        if let Some(index) = tag.0 {
            return index;
        }
        let index = self.owners.len();
        self.owners.push(index);
        self.owner_ranks.push(0);
        tag.0 = Some(index);
        index
    }

    /// Representative of an owner set, halving the path on the way up.
    fn find_owner(&mut self, mut index: usize) -> Option<usize> {
        loop {
            let parent = *self.owners.get(index)?;
            if parent == index {
                return Some(index);
            }
            let grandparent = self.owners[parent];
            self.owners[index] = grandparent;
            index = grandparent;
        }
    }
}

impl<K: Copy, T> RingLinks for NodeArena<K, T> {
    type Id = NodeId;

    fn next(&self, id: NodeId) -> Option<NodeId> {
        self.next_sibling(id)
    }

    fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.prev_sibling(id)
    }

    fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        self.set_next_sibling(id, next);
    }

    fn set_prev(&mut self, id: NodeId, prev: Option<NodeId>) {
        self.set_prev_sibling(id, prev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_release() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(42, "payload");

        assert!(arena.contains(id));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.key(id), 42);
        assert_eq!(*arena.payload(id), "payload");

        assert_eq!(arena.release(id), Ok((42, "payload")));
        assert!(!arena.contains(id));
        assert_eq!(arena.release(id), Err(HeapError::InvalidHandle));
    }

    #[test]
    fn test_release_attached_node_fails() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(1, ());
        arena.attach(id, &mut OwnerTag::default());

        assert_eq!(arena.release(id), Err(HeapError::NodeAttached));

        arena.detach(id);
        assert!(arena.release(id).is_ok());
    }

    #[test]
    fn test_stale_handle_is_detected_after_slot_reuse() {
        let mut arena = NodeArena::new();
        let old = arena.alloc(1, ());
        arena.release(old).unwrap();
        let new = arena.alloc(2, ());

        assert!(!arena.contains(old));
        assert!(arena.contains(new));
        assert!(!arena.is_attached(old));
    }

    #[test]
    fn test_pointer_writes_are_counted() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1, ());
        let b = arena.alloc(2, ());

        arena.set_left(a, Some(b));
        arena.set_parent(b, Some(a));
        assert_eq!(arena.pointer_writes(), 2);

        // detach counts only the links that were actually set
        arena.detach(a);
        assert_eq!(arena.pointer_writes(), 3);
        assert_eq!(arena.left(a), None);
    }

    #[test]
    #[should_panic(expected = "already belongs to a heap")]
    fn test_double_attach_panics() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(1, ());
        let mut tag = OwnerTag::default();
        arena.attach(id, &mut tag);
        arena.attach(id, &mut tag);
    }

    #[test]
    fn test_membership_follows_adoption() {
        let mut arena = NodeArena::new();
        let (mut a, mut b) = (OwnerTag::default(), OwnerTag::default());
        let x = arena.alloc(1, ());
        let y = arena.alloc(2, ());
        arena.attach(x, &mut a);
        arena.attach(y, &mut b);

        arena.expect_member(x, a, "check");
        arena.adopt(&mut a, b);
        arena.expect_member(y, a, "check");

        // adopting into a heap that never inserted takes over the donor's set
        let mut empty = OwnerTag::default();
        arena.adopt(&mut empty, a);
        arena.expect_member(x, empty, "check");
        arena.expect_member(y, empty, "check");
    }

    #[test]
    #[should_panic(expected = "not in this heap")]
    fn test_node_of_other_owner_is_rejected() {
        let mut arena = NodeArena::new();
        let (mut a, mut b) = (OwnerTag::default(), OwnerTag::default());
        let x = arena.alloc(1, ());
        let y = arena.alloc(2, ());
        arena.attach(x, &mut a);
        arena.attach(y, &mut b);

        arena.expect_member(y, a, "decrease_key");
    }

    #[test]
    #[should_panic(expected = "not in this heap")]
    fn test_unregistered_owner_rejects_everything() {
        let mut arena = NodeArena::new();
        let x = arena.alloc(1, ());
        arena.attach(x, &mut OwnerTag::default());

        arena.expect_member(x, OwnerTag::default(), "delete");
    }
}
