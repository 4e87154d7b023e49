//! Runtime selection of a heap variant
//!
//! [`PriorityQueue`] wraps one of the five variants behind a closed enum,
//! chosen from a [`HeapConfig`] at construction. It forwards every call,
//! projects the returned [`Cost`] through the configured [`CostMode`] and
//! keeps a running total of the structural link writes its operations made.

use crate::cost::{Cost, CostMode, Extracted};
use crate::lazy_pairing::LazyPairingHeap;
use crate::node::{NodeArena, NodeId};
use crate::pairing::StandardPairingHeap;
use crate::slim::SlimHeap;
use crate::smooth::SmoothHeap;
use crate::splay::SplayTreeHeap;
use crate::traits::{HeapError, Key, MeldableHeap};
use std::fmt;
use std::str::FromStr;

/// The structural strategies a [`PriorityQueue`] can run on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    #[default]
    Standard,
    Lazy,
    Smooth,
    Slim,
    Splay,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Standard,
        Variant::Lazy,
        Variant::Smooth,
        Variant::Slim,
        Variant::Splay,
    ];

    /// Numeric id of this variant in experiment configurations.
    pub fn id(self) -> i32 {
        match self {
            Variant::Standard => 0,
            Variant::Lazy => 21,
            Variant::Smooth => 12,
            Variant::Slim => 24,
            Variant::Splay => 26,
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Variant::Standard => "Pairing Heap",
            Variant::Lazy => "Lazy Pairing Heap",
            Variant::Smooth => "Smooth Heap",
            Variant::Slim => "Slim Heap",
            Variant::Splay => "Splay Tree Heap",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Lazy => "lazy",
            Variant::Smooth => "smooth",
            Variant::Slim => "slim",
            Variant::Splay => "splay",
        }
    }
}

impl TryFrom<i32> for Variant {
    type Error = HeapError;

    fn try_from(id: i32) -> Result<Self, HeapError> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.id() == id)
            .ok_or(HeapError::UnknownVariantId(id))
    }
}

impl FromStr for Variant {
    type Err = HeapError;

    fn from_str(s: &str) -> Result<Self, HeapError> {
        let wanted = s.trim().to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|variant| variant.key() == wanted || variant.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| HeapError::UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Construction parameters of a [`PriorityQueue`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeapConfig {
    pub variant: Variant,
    pub cost_mode: CostMode,
}

impl HeapConfig {
    pub fn new(variant: Variant, cost_mode: CostMode) -> Self {
        HeapConfig { variant, cost_mode }
    }

    /// Builds a config from numeric variant and cost-mode ids.
    ///
    /// # Errors
    /// `UnknownVariantId` or `UnknownCostMode` for ids with no meaning.
    pub fn from_ids(variant: i32, cost_mode: i32) -> Result<Self, HeapError> {
        Ok(HeapConfig {
            variant: Variant::try_from(variant)?,
            cost_mode: CostMode::try_from(cost_mode)?,
        })
    }
}

#[derive(Debug)]
enum AnyHeap<K, T> {
    Standard(StandardPairingHeap<K, T>),
    Lazy(LazyPairingHeap<K, T>),
    Smooth(SmoothHeap<K, T>),
    Slim(SlimHeap<K, T>),
    Splay(SplayTreeHeap<K, T>),
}

macro_rules! forward {
    ($heap:expr, $h:ident => $body:expr) => {
        match $heap {
            AnyHeap::Standard($h) => $body,
            AnyHeap::Lazy($h) => $body,
            AnyHeap::Smooth($h) => $body,
            AnyHeap::Slim($h) => $body,
            AnyHeap::Splay($h) => $body,
        }
    };
}

impl<K: Key, T> AnyHeap<K, T> {
    fn new(variant: Variant) -> Self {
        match variant {
            Variant::Standard => AnyHeap::Standard(StandardPairingHeap::new()),
            Variant::Lazy => AnyHeap::Lazy(LazyPairingHeap::new()),
            Variant::Smooth => AnyHeap::Smooth(SmoothHeap::new()),
            Variant::Slim => AnyHeap::Slim(SlimHeap::new()),
            Variant::Splay => AnyHeap::Splay(SplayTreeHeap::new()),
        }
    }

    fn variant(&self) -> Variant {
        match self {
            AnyHeap::Standard(_) => Variant::Standard,
            AnyHeap::Lazy(_) => Variant::Lazy,
            AnyHeap::Smooth(_) => Variant::Smooth,
            AnyHeap::Slim(_) => Variant::Slim,
            AnyHeap::Splay(_) => Variant::Splay,
        }
    }
}

/// Priority queue dispatching to a configured variant
///
/// # Example
///
/// ```rust
/// use self_adjusting_heaps::{CostMode, HeapConfig, NodeArena, PriorityQueue, Variant};
///
/// let mut arena = NodeArena::new();
/// let mut queue = PriorityQueue::new(HeapConfig::new(Variant::Slim, CostMode::Both));
/// for k in [5, 3, 8] {
///     let id = arena.alloc(k, ());
///     queue.insert(&mut arena, id);
/// }
/// let out = queue.delete_min(&mut arena);
/// assert_eq!(arena.key(out.node.unwrap()), 3);
/// assert_eq!(out.cost.links, 1);
/// assert!(queue.pointer_updates() > 0);
/// ```
#[derive(Debug)]
pub struct PriorityQueue<K, T> {
    heap: AnyHeap<K, T>,
    cost_mode: CostMode,
    pointer_updates: u64,
}

impl<K: Key, T> PriorityQueue<K, T> {
    pub fn new(config: HeapConfig) -> Self {
        log::debug!("new {} queue counting {}", config.variant, config.cost_mode);
        PriorityQueue {
            heap: AnyHeap::new(config.variant),
            cost_mode: config.cost_mode,
            pointer_updates: 0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.heap.variant()
    }

    pub fn cost_mode(&self) -> CostMode {
        self.cost_mode
    }

    pub fn len(&self) -> usize {
        forward!(&self.heap, h => h.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cumulative structural link writes made by this queue's operations
    pub fn pointer_updates(&self) -> u64 {
        self.pointer_updates
    }

    pub fn insert(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) -> Cost {
        let before = arena.pointer_writes();
        let cost = forward!(&mut self.heap, h => h.insert(arena, node));
        self.finish(arena, before, cost)
    }

    pub fn find_min(&self, arena: &NodeArena<K, T>) -> Option<NodeId> {
        forward!(&self.heap, h => h.find_min(arena))
    }

    pub fn delete_min(&mut self, arena: &mut NodeArena<K, T>) -> Extracted {
        let before = arena.pointer_writes();
        let out = forward!(&mut self.heap, h => h.delete_min(arena));
        Extracted {
            node: out.node,
            cost: self.finish(arena, before, out.cost),
        }
    }

    /// Merges another queue of the same variant into this one
    ///
    /// # Panics
    /// If the two queues run different variants.
    pub fn merge(&mut self, arena: &mut NodeArena<K, T>, other: Self) -> Cost {
        let before = arena.pointer_writes();
        self.pointer_updates += other.pointer_updates;
        let cost = match (&mut self.heap, other.heap) {
            (AnyHeap::Standard(h), AnyHeap::Standard(o)) => h.merge(arena, o),
            (AnyHeap::Lazy(h), AnyHeap::Lazy(o)) => h.merge(arena, o),
            (AnyHeap::Smooth(h), AnyHeap::Smooth(o)) => h.merge(arena, o),
            (AnyHeap::Slim(h), AnyHeap::Slim(o)) => h.merge(arena, o),
            (AnyHeap::Splay(h), AnyHeap::Splay(o)) => h.merge(arena, o),
            (mine, theirs) => {
                let (mine, theirs) = (mine.variant(), theirs.variant());
                log::error!("merge: cannot merge a {theirs} queue into a {mine} queue");
                panic!("merge: cannot merge a {theirs} queue into a {mine} queue");
            }
        };
        self.finish(arena, before, cost)
    }

    pub fn decrease_key(&mut self, arena: &mut NodeArena<K, T>, node: NodeId, diff: K) -> Cost {
        let before = arena.pointer_writes();
        let cost = forward!(&mut self.heap, h => h.decrease_key(arena, node, diff));
        self.finish(arena, before, cost)
    }

    pub fn delete(&mut self, arena: &mut NodeArena<K, T>, node: NodeId) {
        let before = arena.pointer_writes();
        forward!(&mut self.heap, h => h.delete(arena, node));
        self.pointer_updates += arena.pointer_writes() - before;
    }

    fn finish(&mut self, arena: &NodeArena<K, T>, before: u64, cost: Cost) -> Cost {
        self.pointer_updates += arena.pointer_writes() - before;
        self.cost_mode.project(cost)
    }
}
