//! Extreme stress tests that really push the heaps to their limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use self_adjusting_heaps::lazy_pairing::LazyPairingHeap;
use self_adjusting_heaps::pairing::StandardPairingHeap;
use self_adjusting_heaps::slim::SlimHeap;
use self_adjusting_heaps::smooth::SmoothHeap;
use self_adjusting_heaps::splay::SplayTreeHeap;
use self_adjusting_heaps::{CostMode, HeapConfig, MeldableHeap, NodeArena, NodeId, PriorityQueue, Variant};

/// Small deterministic generator so failures reproduce exactly
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

/// Test massive numbers of inserts and extractions
fn test_massive_operations<H: MeldableHeap<i64, ()>>() {
    let mut arena = NodeArena::with_capacity(5000);
    let mut heap = H::new();

    for i in (0..5000).rev() {
        let id = arena.alloc(i, ());
        heap.insert(&mut arena, id);
    }
    assert_eq!(heap.len(), 5000);

    for i in 0..5000 {
        let node = heap.delete_min(&mut arena).node.unwrap();
        assert_eq!(arena.key(node), i);
    }
    assert!(heap.is_empty());
}

/// Test many decrease_key operations
fn test_many_decrease_keys<H: MeldableHeap<i64, ()>>() {
    let mut arena = NodeArena::new();
    let mut heap = H::new();
    let mut ids = Vec::new();

    for i in 0..1000 {
        let id = arena.alloc(10_000 + i, ());
        heap.insert(&mut arena, id);
        ids.push(id);
    }
    heap.delete_min(&mut arena);

    for (i, &id) in ids.iter().enumerate().skip(1) {
        let diff = arena.key(id) - i as i64;
        heap.decrease_key(&mut arena, id, diff);
    }

    for i in 1..1000 {
        let node = heap.delete_min(&mut arena).node.unwrap();
        assert_eq!(arena.key(node), i);
    }
}

/// Find-min stays consistent with a model over thousands of random operations
fn test_interleaved_random<H: MeldableHeap<i64, ()>>(seed: u64) {
    let mut rng = Lcg(seed);
    let mut arena = NodeArena::new();
    let mut heap = H::new();
    let mut live: Vec<NodeId> = Vec::new();

    for _ in 0..5000 {
        match rng.below(10) {
            0..=3 => {
                let id = arena.alloc(rng.below(100_000) as i64, ());
                heap.insert(&mut arena, id);
                live.push(id);
            }
            4..=5 if !live.is_empty() => {
                let id = live[rng.below(live.len())];
                let diff = rng.below(5_000) as i64;
                heap.decrease_key(&mut arena, id, diff);
            }
            6 if !live.is_empty() => {
                let id = live.swap_remove(rng.below(live.len()));
                heap.delete(&mut arena, id);
                arena.release(id).unwrap();
            }
            7 => {
                let mut other = H::new();
                for _ in 0..rng.below(20) {
                    let id = arena.alloc(rng.below(100_000) as i64, ());
                    other.insert(&mut arena, id);
                    live.push(id);
                }
                heap.merge(&mut arena, other);
            }
            _ => {
                if let Some(node) = heap.delete_min(&mut arena).node {
                    let position = live.iter().position(|&id| id == node).unwrap();
                    let expected = live.iter().map(|&id| arena.key(id)).min().unwrap();
                    assert_eq!(arena.key(node), expected);
                    live.swap_remove(position);
                    arena.release(node).unwrap();
                }
            }
        }

        assert_eq!(heap.len(), live.len());
        let expected = live.iter().map(|&id| arena.key(id)).min();
        assert_eq!(heap.find_min(&arena).map(|id| arena.key(id)), expected);
    }

    // only nodes still in the heap remain allocated
    assert_eq!(arena.len(), live.len());
}

/// Test merge with large heaps
fn test_large_merge<H: MeldableHeap<i64, ()>>() {
    let mut arena = NodeArena::new();
    let mut heap1 = H::new();
    let mut heap2 = H::new();

    for i in 0..1000 {
        let a = arena.alloc(i * 2, ());
        let b = arena.alloc(i * 2 + 1, ());
        heap1.insert(&mut arena, a);
        heap2.insert(&mut arena, b);
    }
    heap1.delete_min(&mut arena);
    heap2.delete_min(&mut arena);

    heap1.merge(&mut arena, heap2);
    assert_eq!(heap1.len(), 1998);

    let mut last = i64::MIN;
    while let Some(node) = heap1.delete_min(&mut arena).node {
        assert!(arena.key(node) >= last);
        last = arena.key(node);
    }
}

macro_rules! stress_tests {
    ($module:ident, $heap:ident) => {
        mod $module {
            use super::*;

            #[test]
            fn massive() {
                test_massive_operations::<$heap<i64, ()>>();
            }

            #[test]
            fn many_decrease_keys() {
                test_many_decrease_keys::<$heap<i64, ()>>();
            }

            #[test]
            fn interleaved_random() {
                for seed in [1, 42, 0xdead_beef] {
                    test_interleaved_random::<$heap<i64, ()>>(seed);
                }
            }

            #[test]
            fn large_merge() {
                test_large_merge::<$heap<i64, ()>>();
            }
        }
    };
}

stress_tests!(standard_pairing, StandardPairingHeap);
stress_tests!(lazy_pairing, LazyPairingHeap);
stress_tests!(smooth, SmoothHeap);
stress_tests!(slim, SlimHeap);
stress_tests!(splay, SplayTreeHeap);

#[test]
fn test_dispatcher_pointer_updates_accumulate() {
    for variant in Variant::ALL {
        let mut arena = NodeArena::new();
        let mut queue = PriorityQueue::new(HeapConfig::new(variant, CostMode::Both));
        let mut rng = Lcg(7);

        let mut last = 0;
        for _ in 0..500 {
            let id = arena.alloc(rng.below(1000) as i64, ());
            queue.insert(&mut arena, id);
        }
        while queue.delete_min(&mut arena).node.is_some() {
            assert!(queue.pointer_updates() >= last, "{variant}");
            last = queue.pointer_updates();
        }
        assert!(last > 0, "{variant}");
    }
}
