//! Per-operation cost records
//!
//! Every variant reports the same fixed shape: the number of key comparisons
//! and the number of link operations (parent/child attachments between two
//! previously independent trees) an operation performed. The dispatcher may
//! mask one of the two fields according to its [`CostMode`], but variants
//! always fill in both.

use crate::node::NodeId;
use crate::traits::HeapError;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Comparisons and links performed by one operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    pub comparisons: u64,
    pub links: u64,
}

impl Cost {
    pub const ZERO: Cost = Cost {
        comparisons: 0,
        links: 0,
    };

    pub const fn new(comparisons: u64, links: u64) -> Self {
        Cost { comparisons, links }
    }

    /// A single comparison with no link.
    pub const fn comparison() -> Self {
        Cost::new(1, 0)
    }

    /// One comparison deciding one link.
    pub const fn link() -> Self {
        Cost::new(1, 1)
    }

    /// Sum of both counters.
    pub fn total(&self) -> u64 {
        self.comparisons + self.links
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost {
            comparisons: self.comparisons + rhs.comparisons,
            links: self.links + rhs.links,
        }
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        self.comparisons += rhs.comparisons;
        self.links += rhs.links;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} comparisons, {} links", self.comparisons, self.links)
    }
}

/// Result of a delete-min: the extracted node (if any) and what it cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted {
    pub node: Option<NodeId>,
    pub cost: Cost,
}

impl Extracted {
    pub(crate) const fn empty() -> Self {
        Extracted {
            node: None,
            cost: Cost::ZERO,
        }
    }
}

/// Which counters the dispatcher reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CostMode {
    /// Report comparisons only; links read as zero
    #[default]
    Comparisons,
    /// Report links only; comparisons read as zero
    Links,
    /// Report both counters
    Both,
}

impl CostMode {
    /// Masks the counters this mode does not report.
    pub fn project(self, cost: Cost) -> Cost {
        match self {
            CostMode::Comparisons => Cost::new(cost.comparisons, 0),
            CostMode::Links => Cost::new(0, cost.links),
            CostMode::Both => cost,
        }
    }

    /// Numeric id of this mode in experiment configurations.
    pub fn id(self) -> i32 {
        match self {
            CostMode::Links => -1,
            CostMode::Comparisons => -2,
            CostMode::Both => 0,
        }
    }
}

impl TryFrom<i32> for CostMode {
    type Error = HeapError;

    fn try_from(id: i32) -> Result<Self, HeapError> {
        match id {
            -1 => Ok(CostMode::Links),
            -2 => Ok(CostMode::Comparisons),
            0 => Ok(CostMode::Both),
            other => Err(HeapError::UnknownCostMode(other.to_string())),
        }
    }
}

impl FromStr for CostMode {
    type Err = HeapError;

    fn from_str(s: &str) -> Result<Self, HeapError> {
        match s.to_ascii_lowercase().as_str() {
            "comparisons" | "comps" => Ok(CostMode::Comparisons),
            "links" => Ok(CostMode::Links),
            "both" => Ok(CostMode::Both),
            _ => Err(HeapError::UnknownCostMode(s.to_string())),
        }
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CostMode::Comparisons => "comparisons",
            CostMode::Links => "links",
            CostMode::Both => "both",
        };
        f.write_str(name)
    }
}
