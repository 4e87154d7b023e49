//! Standard library compatibility layer
//!
//! Provides a `std::collections::BinaryHeap`-like wrapper over any variant,
//! for callers that want plain keys rather than node handles.
//!
//! # Differences from BinaryHeap
//!
//! - **Min-heap vs Max-heap**: This is a min-heap, while `BinaryHeap` is a max-heap.
//! - **Copy keys**: `peek` returns the key by value.
//! - **Owned arena**: the wrapper allocates one node per `push` and releases it
//!   on `pop`; costs are discarded.
//!
//! # Example
//!
//! ```rust
//! use self_adjusting_heaps::stdlib_compat::StdHeap;
//! use self_adjusting_heaps::smooth::SmoothHeap;
//!
//! let mut heap: StdHeap<i32, SmoothHeap<i32, ()>> = StdHeap::new();
//! heap.push(5);
//! heap.push(3);
//! heap.push(7);
//! assert_eq!(heap.peek(), Some(3)); // min-heap, unlike BinaryHeap's max-heap
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.into_sorted_vec(), vec![5, 7]);
//! ```

use crate::node::NodeArena;
use crate::traits::{Key, MeldableHeap};
use std::marker::PhantomData;

/// A `BinaryHeap`-like min-heap over keys
///
/// # Type Parameters
/// - `K`: The key type
/// - `H`: The underlying variant (e.g., `SlimHeap<K, ()>`)
pub struct StdHeap<K: Key, H: MeldableHeap<K, ()>> {
    arena: NodeArena<K, ()>,
    heap: H,
    _phantom: PhantomData<K>,
}

impl<K: Key, H: MeldableHeap<K, ()>> StdHeap<K, H> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            heap: H::new(),
            _phantom: PhantomData,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes a key onto the heap
    pub fn push(&mut self, key: K) {
        let node = self.arena.alloc(key, ());
        self.heap.insert(&mut self.arena, node);
    }

    /// Returns the smallest key without removing it
    pub fn peek(&self) -> Option<K> {
        self.heap.find_min(&self.arena).map(|node| self.arena.key(node))
    }

    /// Removes and returns the smallest key
    pub fn pop(&mut self) -> Option<K> {
        let node = self.heap.delete_min(&mut self.arena).node?;
        self.arena.release(node).ok().map(|(key, ())| key)
    }

    /// Drains the heap into a vector in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(key) = self.pop() {
            sorted.push(key);
        }
        sorted
    }
}

impl<K: Key, H: MeldableHeap<K, ()>> Default for StdHeap<K, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, H: MeldableHeap<K, ()>> Extend<K> for StdHeap<K, H> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.push(key);
        }
    }
}

impl<K: Key, H: MeldableHeap<K, ()>> FromIterator<K> for StdHeap<K, H> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy_pairing::LazyPairingHeap;
    use crate::splay::SplayTreeHeap;

    #[test]
    fn test_pop_releases_nodes() {
        let mut heap: StdHeap<u32, LazyPairingHeap<u32, ()>> = [4, 1, 3].into_iter().collect();
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.arena.len(), 2);
    }

    #[test]
    fn test_into_sorted_vec() {
        let heap: StdHeap<i64, SplayTreeHeap<i64, ()>> = [9, -2, 7, 7, 0].into_iter().collect();
        assert_eq!(heap.peek(), Some(-2));
        assert_eq!(heap.into_sorted_vec(), vec![-2, 0, 7, 7, 9]);
    }
}
