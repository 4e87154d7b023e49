//! Common traits for the heap variants
//!
//! This module provides the operation contract shared by every structural
//! strategy in the crate:
//!
//! - [`Key`]: the totally ordered numeric key type nodes are ordered by
//! - [`MeldableHeap`]: insert, find-min, delete-min, merge, decrease-key and
//!   delete over nodes stored in a caller-owned [`NodeArena`]
//!
//! Every mutating operation reports what it cost as a [`Cost`] record, so
//! variants can be compared on comparisons and links rather than wall-clock
//! time.

use crate::cost::{Cost, Extracted};
use crate::node::{NodeArena, NodeId};
use std::fmt;
use std::ops::Sub;

/// Error type for fallible configuration and arena operations
///
/// Structural corruption (a node that is not where the heap expects it) is not
/// represented here: it aborts the operation with a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// No variant is registered under this name
    UnknownVariant(String),
    /// No variant is registered under this numeric id
    UnknownVariantId(i32),
    /// No cost-accounting mode is registered under this name or id
    UnknownCostMode(String),
    /// The node id does not refer to a live node of the arena
    InvalidHandle,
    /// The node still belongs to a heap and cannot be released
    NodeAttached,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::UnknownVariant(name) => {
                write!(f, "no heap variant named {name:?} is implemented")
            }
            HeapError::UnknownVariantId(id) => {
                write!(f, "invalid heap id: no heap of type id {id} is implemented")
            }
            HeapError::UnknownCostMode(mode) => {
                write!(f, "unknown cost-accounting mode {mode:?}")
            }
            HeapError::InvalidHandle => {
                write!(f, "node handle is no longer valid (node was released)")
            }
            HeapError::NodeAttached => {
                write!(f, "node still belongs to a heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Trait for key types the heaps can order nodes by.
///
/// Keys are totally ordered, copyable, and support subtraction so that
/// `decrease_key` can be expressed as a non-negative difference. The
/// `Default` value is the zero difference.
pub trait Key: Ord + Copy + Sub<Output = Self> + Default + fmt::Debug {}

impl<K> Key for K where K: Ord + Copy + Sub<Output = Self> + Default + fmt::Debug {}

/// Operation contract implemented by every heap variant
///
/// A heap never allocates or frees nodes. The caller allocates a node in a
/// [`NodeArena`], hands its id to [`MeldableHeap::insert`], and gets the same
/// id back from [`MeldableHeap::delete_min`] with all structural links
/// cleared.
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::{MeldableHeap, NodeArena};
/// use self_adjusting_heaps::pairing::StandardPairingHeap;
///
/// let mut arena = NodeArena::new();
/// let mut heap = StandardPairingHeap::new();
///
/// let a = arena.alloc(5, "five");
/// let b = arena.alloc(3, "three");
/// heap.insert(&mut arena, a);
/// heap.insert(&mut arena, b);
///
/// assert_eq!(heap.find_min(&arena), Some(b));
/// let out = heap.delete_min(&mut arena);
/// assert_eq!(out.node, Some(b));
/// assert_eq!(*arena.payload(b), "three");
/// ```
pub trait MeldableHeap<K: Key, T> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of nodes in the heap
    fn len(&self) -> usize;

    /// Inserts a detached node
    ///
    /// # Panics
    /// If the node is stale or already belongs to a heap.
    fn insert(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) -> Cost;

    /// Returns the node with the minimum key without removing it
    fn find_min(&self, arena: &NodeArena<K, T>) -> Option<NodeId>;

    /// Removes the node with the minimum key
    ///
    /// On an empty heap, `node` is `None` and the cost is zero.
    fn delete_min(&mut self, arena: &mut NodeArena<K, T>) -> Extracted;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, arena: &mut NodeArena<K, T>, other: Self) -> Cost;

    /// Decreases the key of `node` by `diff`
    ///
    /// A `diff` that is not positive leaves the heap untouched and costs
    /// nothing.
    ///
    /// # Panics
    /// If `node` does not belong to this heap, or (with overflow checks on)
    /// if `key - diff` underflows `K`.
    fn decrease_key(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, diff: K) -> Cost;

    /// Removes an arbitrary node from the heap
    ///
    /// # Panics
    /// If `node` does not belong to this heap.
    fn delete(&mut self, arena: &mut NodeArena<K, T>, node: NodeId);
}

/// Logs and aborts on a node the heap cannot account for.
#[cold]
#[track_caller]
pub(crate) fn node_not_found(node: NodeId, context: &str) -> ! {
    log::error!("{context}: node {node:?} is not in this heap");
    panic!("{context}: node {node:?} is not in this heap");
}
