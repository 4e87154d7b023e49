//! Self-Adjusting Heap Data Structures for Rust
//!
//! This crate provides several interchangeable mergeable priority queues with
//! `decrease_key` support, each reporting the comparisons and links every
//! operation spent so their amortized behavior can be compared directly.
//!
//! # Features
//!
//! - **Pairing Heap**: O(1) insert and merge; O(log n) amortized delete-min; o(log n) amortized decrease_key
//! - **Lazy Pairing Heap**: O(1) insert, merge and decrease_key; all linking deferred to delete-min
//! - **Smooth Heap**: O(1) insert and merge; O(log n) amortized delete-min via treapify; buffered decrease_key
//! - **Slim Heap**: the smooth heap without the decrease_key buffer
//! - **Splay Tree Heap**: a splay tree in insertion order with cached subtree minima
//!
//! Nodes live in a caller-owned [`NodeArena`]; heaps only hold [`NodeId`]s.
//! [`PriorityQueue`] picks a variant at runtime from a [`HeapConfig`].
//!
//! # Example
//!
//! ```rust
//! use self_adjusting_heaps::{CostMode, HeapConfig, NodeArena, PriorityQueue, Variant};
//!
//! let mut arena = NodeArena::new();
//! let mut queue = PriorityQueue::new(HeapConfig::new(Variant::Smooth, CostMode::Both));
//! let handle1 = arena.alloc(5, "item1");
//! let handle2 = arena.alloc(3, "item2");
//! queue.insert(&mut arena, handle1);
//! queue.insert(&mut arena, handle2);
//! queue.decrease_key(&mut arena, handle1, 4);
//! assert_eq!(queue.find_min(&arena), Some(handle1));
//! assert_eq!(arena.key(handle1), 1);
//! ```

pub mod cost;
pub mod dispatch;
pub mod lazy_pairing;
pub mod node;
pub mod pairing;
pub mod slim;
pub mod smooth;
pub mod splay;
pub mod stdlib_compat;
pub mod traits;

mod circular;
mod linear;

// Re-export the main types for convenience
pub use cost::{Cost, CostMode, Extracted};
pub use dispatch::{HeapConfig, PriorityQueue, Variant};
pub use node::{NodeArena, NodeId};
pub use traits::{HeapError, Key, MeldableHeap};
