// src/core/cluster/config.rs

//! Defines the routing-specific configuration options.

use super::node::SlotRange;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The slot-to-node placement policy.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum NodePolicy {
    /// Divide the slot space evenly by `nodes`; nodes are numbered from 0.
    #[default]
    Proportional,
    /// Look slots up in an explicit range table; nodes are numbered by the table.
    RangeTable,
}

/// Holds all configuration settings related to key routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub policy: NodePolicy,
    /// Node count for the proportional policy. Kept signed so that bad values
    /// reach validation instead of failing deserialization with a vague error.
    #[serde(default = "default_nodes")]
    pub nodes: i64,
    /// Custom ranges for the range-table policy. Empty means the six-shard table.
    #[serde(default)]
    pub ranges: Vec<SlotRange>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            policy: NodePolicy::default(),
            nodes: default_nodes(),
            ranges: Vec::new(),
        }
    }
}

fn default_nodes() -> i64 {
    6
}
