// src/core/cluster/node.rs

//! Maps hash slots to nodes.
//!
//! Two placement policies are supported:
//!
//! - [`Proportional`]: the slot space is divided evenly by the node count and
//!   node `i` owns slots `[i * per_node, (i + 1) * per_node)`. The remainder
//!   slots left over by the integer division also belong to the last node.
//! - [`SlotRangeTable`]: an explicit table of inclusive slot ranges. The
//!   built-in [`SlotRangeTable::six_shard`] table maps the slot space onto
//!   nodes `1..=6`.
//!
//! Which policy a deployment uses is a configuration decision; see
//! [`RoutingConfig`](super::config::RoutingConfig).

use super::config::{NodePolicy, RoutingConfig};
use super::slot::{MAX_SLOT, NUM_SLOTS, get_slot};
use crate::core::ClusterHashError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// A placement policy: which node owns a slot.
pub trait NodeResolver: fmt::Debug + Send + Sync {
    /// Returns the node owning `slot`.
    ///
    /// `slot` must be below [`NUM_SLOTS`].
    fn node_for_slot(&self, slot: u16) -> u32;

    /// The number of distinct nodes this policy can return.
    fn node_count(&self) -> usize;

    /// Returns the node owning `key`.
    fn node_for_key(&self, key: &[u8]) -> u32 {
        self.node_for_slot(get_slot(key))
    }
}

/// A validated node count for proportional placement, in `1..=16384`.
///
/// Counts above the slot count would leave zero slots per node, so they are
/// rejected together with non-positive counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeCount(u16);

impl NodeCount {
    pub fn new(nodes: i64) -> Result<Self, ClusterHashError> {
        if nodes <= 0 || nodes > NUM_SLOTS as i64 {
            return Err(ClusterHashError::InvalidArgument(format!(
                "node count must be between 1 and {NUM_SLOTS}, got {nodes}"
            )));
        }
        Ok(Self(nodes as u16))
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<i32> for NodeCount {
    type Error = ClusterHashError;

    fn try_from(nodes: i32) -> Result<Self, Self::Error> {
        Self::new(nodes as i64)
    }
}

impl fmt::Display for NodeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Even division of the slot space across `nodes` nodes, numbered from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proportional {
    nodes: NodeCount,
}

impl Proportional {
    pub fn new(nodes: NodeCount) -> Self {
        Self { nodes }
    }

    /// The size of each node's even share. Never zero for a valid [`NodeCount`].
    pub fn slots_per_node(&self) -> u32 {
        NUM_SLOTS as u32 / self.nodes.get()
    }
}

impl NodeResolver for Proportional {
    fn node_for_slot(&self, slot: u16) -> u32 {
        debug_assert!((slot as usize) < NUM_SLOTS);
        // Remainder slots would otherwise map one past the last node.
        (slot as u32 / self.slots_per_node()).min(self.nodes.get() - 1)
    }

    fn node_count(&self) -> usize {
        self.nodes.get() as usize
    }
}

/// Computes the node for `key` by proportional division.
///
/// The empty key maps to node 0.
pub fn node_for_key(key: &[u8], nodes: NodeCount) -> u32 {
    if key.is_empty() {
        return 0;
    }
    Proportional::new(nodes).node_for_slot(get_slot(key))
}

/// A contiguous, inclusive range of slots owned by one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    pub start: u16,
    pub end: u16,
    pub node: u32,
}

impl SlotRange {
    pub const fn new(start: u16, end: u16, node: u32) -> Self {
        Self { start, end, node }
    }

    pub fn contains(&self, slot: u16) -> bool {
        self.start <= slot && slot <= self.end
    }

    /// Number of slots in the range.
    pub fn len(&self) -> usize {
        (self.end as usize + 1).saturating_sub(self.start as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// The six-shard layout: roughly 2730 slots per node, nodes numbered 1 to 6.
const SIX_SHARD_RANGES: [SlotRange; 6] = [
    SlotRange::new(0, 2730, 1),
    SlotRange::new(2731, 5460, 2),
    SlotRange::new(5461, 8191, 3),
    SlotRange::new(8192, 10922, 4),
    SlotRange::new(10923, 13652, 5),
    SlotRange::new(13653, 16383, 6),
];

/// An explicit slot-to-node table.
///
/// Construction guarantees that the ranges are sorted, contiguous,
/// non-overlapping and cover `[0, 16384)` exactly, so every slot has exactly
/// one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRangeTable {
    ranges: Vec<SlotRange>,
}

impl SlotRangeTable {
    /// Builds a table from `ranges` given in any order.
    pub fn new(mut ranges: Vec<SlotRange>) -> Result<Self, ClusterHashError> {
        if ranges.is_empty() {
            return Err(ClusterHashError::InvalidRangeTable(
                "table has no ranges".to_string(),
            ));
        }
        ranges.sort_by_key(|r| r.start);

        if let Some(r) = ranges.iter().find(|r| r.is_empty()) {
            return Err(ClusterHashError::InvalidRangeTable(format!(
                "range {}-{} has start after end",
                r.start, r.end
            )));
        }
        if ranges[0].start != 0 {
            return Err(ClusterHashError::InvalidRangeTable(format!(
                "slots 0-{} are not covered",
                ranges[0].start - 1
            )));
        }
        for pair in ranges.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.start <= prev.end {
                return Err(ClusterHashError::InvalidRangeTable(format!(
                    "range {}-{} overlaps range {}-{}",
                    next.start, next.end, prev.start, prev.end
                )));
            }
            if next.start != prev.end + 1 {
                return Err(ClusterHashError::InvalidRangeTable(format!(
                    "slots {}-{} are not covered",
                    prev.end + 1,
                    next.start - 1
                )));
            }
        }
        let last = ranges[ranges.len() - 1];
        if last.end != MAX_SLOT {
            let missing_from = last.end.saturating_add(1);
            return Err(ClusterHashError::InvalidRangeTable(if last.end > MAX_SLOT {
                format!("range {}-{} exceeds slot {MAX_SLOT}", last.start, last.end)
            } else {
                format!("slots {missing_from}-{MAX_SLOT} are not covered")
            }));
        }

        Ok(Self { ranges })
    }

    /// The fixed six-shard table.
    pub fn six_shard() -> Self {
        Self {
            ranges: SIX_SHARD_RANGES.to_vec(),
        }
    }

    pub fn ranges(&self) -> &[SlotRange] {
        &self.ranges
    }
}

impl NodeResolver for SlotRangeTable {
    /// # Panics
    ///
    /// Panics if `slot` is not covered, which a validated table rules out for
    /// every slot below [`NUM_SLOTS`].
    fn node_for_slot(&self, slot: u16) -> u32 {
        find_node(&self.ranges, slot)
            .unwrap_or_else(|| unreachable!("slot {slot} is not covered by the range table"))
    }

    fn node_count(&self) -> usize {
        self.ranges.iter().map(|r| r.node).collect::<BTreeSet<_>>().len()
    }
}

fn find_node(ranges: &[SlotRange], slot: u16) -> Option<u32> {
    let idx = ranges.partition_point(|r| r.end < slot);
    ranges
        .get(idx)
        .filter(|r| r.contains(slot))
        .map(|r| r.node)
}

/// Computes the node for `key` from the fixed six-shard table.
///
/// Always returns a node in `1..=6`. The empty key hashes to slot 0 and so to
/// node 1.
pub fn node_for_key_fixed(key: &[u8]) -> u32 {
    let slot = get_slot(key);
    find_node(&SIX_SHARD_RANGES, slot)
        .unwrap_or_else(|| unreachable!("slot {slot} is not covered by the six-shard table"))
}

/// Routes keys to slots and nodes under one configured placement policy.
#[derive(Debug)]
pub struct Router {
    policy: NodePolicy,
    resolver: Box<dyn NodeResolver>,
}

impl Router {
    pub fn proportional(nodes: NodeCount) -> Self {
        Self {
            policy: NodePolicy::Proportional,
            resolver: Box::new(Proportional::new(nodes)),
        }
    }

    pub fn range_table(table: SlotRangeTable) -> Self {
        Self {
            policy: NodePolicy::RangeTable,
            resolver: Box::new(table),
        }
    }

    pub fn six_shard() -> Self {
        Self::range_table(SlotRangeTable::six_shard())
    }

    /// Builds the router described by `config`.
    ///
    /// A range-table policy without explicit ranges uses the six-shard table.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ClusterHashError> {
        let router = match config.policy {
            NodePolicy::Proportional => Self::proportional(NodeCount::new(config.nodes)?),
            NodePolicy::RangeTable if config.ranges.is_empty() => Self::six_shard(),
            NodePolicy::RangeTable => {
                Self::range_table(SlotRangeTable::new(config.ranges.clone())?)
            }
        };
        debug!(
            policy = %router.policy,
            nodes = router.node_count(),
            "built key router"
        );
        Ok(router)
    }

    pub fn policy(&self) -> NodePolicy {
        self.policy
    }

    pub fn node_count(&self) -> usize {
        self.resolver.node_count()
    }

    pub fn slot(&self, key: &[u8]) -> u16 {
        get_slot(key)
    }

    pub fn node(&self, key: &[u8]) -> u32 {
        self.resolver.node_for_key(key)
    }
}
