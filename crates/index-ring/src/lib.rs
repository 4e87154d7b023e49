//! Circular doubly-linked lists over index-addressed storage.
//!
//! This crate provides the ring operations needed by heap-ordered forests whose
//! sibling lists are circular, without raw pointers: the `next`/`prev` links live
//! in whatever storage the caller owns (an arena, a slot map, a pair of `Vec`s),
//! and nodes are addressed by copyable ids.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - A node can be removed or replaced in O(1) given only its id
//! - Iteration wraps around (must track starting point)
//!
//! An unlinked node has both links set to `None`.
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingLinks, RingOps};
//!
//! #[derive(Default)]
//! struct Slots {
//!     next: Vec<Option<usize>>,
//!     prev: Vec<Option<usize>>,
//! }
//!
//! impl RingLinks for Slots {
//!     type Id = usize;
//!     fn next(&self, id: usize) -> Option<usize> { self.next[id] }
//!     fn prev(&self, id: usize) -> Option<usize> { self.prev[id] }
//!     fn set_next(&mut self, id: usize, next: Option<usize>) { self.next[id] = next; }
//!     fn set_prev(&mut self, id: usize, prev: Option<usize>) { self.prev[id] = prev; }
//! }
//!
//! let mut slots = Slots { next: vec![None; 2], prev: vec![None; 2] };
//! let ops = RingOps::new();
//!
//! ops.make_circular(&mut slots, 0);
//! ops.insert_after(&mut slots, 0, 1);
//!
//! assert_eq!(slots.next(0), Some(1));
//! assert_eq!(slots.next(1), Some(0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

// =============================================================================
// RingLinks
// =============================================================================

/// Access to the `next`/`prev` links of nodes stored elsewhere.
///
/// When a node is unlinked, both links are `None`. When linked (even as a
/// single node), both point to nodes of the same ring.
pub trait RingLinks {
    /// Identifier of a node in the storage.
    type Id: Copy + Eq;

    /// Gets the next link of `id`.
    fn next(&self, id: Self::Id) -> Option<Self::Id>;

    /// Gets the previous link of `id`.
    fn prev(&self, id: Self::Id) -> Option<Self::Id>;

    /// Sets the next link of `id`.
    fn set_next(&mut self, id: Self::Id, next: Option<Self::Id>);

    /// Sets the previous link of `id`.
    fn set_prev(&mut self, id: Self::Id, prev: Option<Self::Id>);
}

#[inline]
fn linked_next<S: RingLinks>(links: &S, id: S::Id) -> S::Id {
    match links.next(id) {
        Some(next) => next,
        None => panic!("ring corrupted: linked node has no successor"),
    }
}

#[inline]
fn linked_prev<S: RingLinks>(links: &S, id: S::Id) -> S::Id {
    match links.prev(id) {
        Some(prev) => prev,
        None => panic!("ring corrupted: linked node has no predecessor"),
    }
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating circular doubly-linked lists.
///
/// All operations except [`RingOps::count`] and iteration are O(1).
///
/// Misuse (inserting a node that is already linked, removing one that is not)
/// is caught by debug assertions; in release builds it corrupts the ring.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Checks if a node is linked.
    #[inline]
    pub fn is_linked<S: RingLinks>(&self, links: &S, id: S::Id) -> bool {
        links.next(id).is_some()
    }

    /// Returns true if `id` is the only member of its ring.
    #[inline]
    pub fn is_singleton<S: RingLinks>(&self, links: &S, id: S::Id) -> bool {
        links.next(id) == Some(id)
    }

    /// Makes a single node into a circular list of one element.
    ///
    /// After this, `next(id) == id` and `prev(id) == id`.
    #[inline]
    pub fn make_circular<S: RingLinks>(&self, links: &mut S, id: S::Id) {
        debug_assert!(!self.is_linked(links, id), "node is already linked");
        links.set_next(id, Some(id));
        links.set_prev(id, Some(id));
    }

    /// Marks a node as not linked without touching its neighbours.
    ///
    /// Only correct when the whole ring is being dissolved.
    #[inline]
    pub fn force_unlink<S: RingLinks>(&self, links: &mut S, id: S::Id) {
        links.set_next(id, None);
        links.set_prev(id, None);
    }

    /// Inserts `new` after `at`.
    ///
    /// `at` must be linked and `new` must not be.
    #[inline]
    pub fn insert_after<S: RingLinks>(&self, links: &mut S, at: S::Id, new: S::Id) {
        debug_assert!(self.is_linked(links, at), "at is not linked");
        debug_assert!(!self.is_linked(links, new), "new is already linked");

        let next = linked_next(links, at);

        links.set_next(at, Some(new));
        links.set_prev(new, Some(at));
        links.set_next(new, Some(next));
        links.set_prev(next, Some(new));
    }

    /// Removes a node from its ring.
    ///
    /// Returns `true` if the node was the only element (the ring is now gone),
    /// `false` if other nodes remain.
    #[inline]
    pub fn remove<S: RingLinks>(&self, links: &mut S, id: S::Id) -> bool {
        debug_assert!(self.is_linked(links, id), "node is not linked");

        let next = linked_next(links, id);
        let prev = linked_prev(links, id);

        if next == id {
            self.force_unlink(links, id);
            true
        } else {
            links.set_next(prev, Some(next));
            links.set_prev(next, Some(prev));
            self.force_unlink(links, id);
            false
        }
    }

    /// Puts `new` in the ring position of `old`, unlinking `old`.
    ///
    /// `old` must be linked and `new` must not be. If `old` was alone in its
    /// ring, `new` ends up alone in a ring of its own.
    pub fn replace<S: RingLinks>(&self, links: &mut S, old: S::Id, new: S::Id) {
        debug_assert!(self.is_linked(links, old), "old is not linked");
        debug_assert!(!self.is_linked(links, new), "new is already linked");

        if self.is_singleton(links, old) {
            self.force_unlink(links, old);
            self.make_circular(links, new);
            return;
        }

        let next = linked_next(links, old);
        let prev = linked_prev(links, old);

        links.set_next(prev, Some(new));
        links.set_prev(new, Some(prev));
        links.set_next(new, Some(next));
        links.set_prev(next, Some(new));
        self.force_unlink(links, old);
    }

    /// Counts the number of elements in the ring containing `start`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<S: RingLinks>(&self, links: &S, start: S::Id) -> usize {
        self.iter(links, start).count()
    }

    /// Iterates the ring starting at `start`, following `next` links.
    ///
    /// The storage is borrowed for the lifetime of the iterator, so the ring
    /// cannot change underneath it.
    pub fn iter<'a, S: RingLinks>(&self, links: &'a S, start: S::Id) -> Iter<'a, S> {
        debug_assert!(self.is_linked(links, start), "node is not linked");
        Iter {
            links,
            start,
            current: Some(start),
        }
    }
}

// =============================================================================
// Iter
// =============================================================================

/// Iterator over the members of one ring.
pub struct Iter<'a, S: RingLinks> {
    links: &'a S,
    start: S::Id,
    current: Option<S::Id>,
}

impl<S: RingLinks> Iterator for Iter<'_, S> {
    type Item = S::Id;

    fn next(&mut self) -> Option<S::Id> {
        let current = self.current?;
        let next = linked_next(self.links, current);
        self.current = if next == self.start { None } else { Some(next) };
        Some(current)
    }
}

// =============================================================================
// Tests
// =============================================================================
