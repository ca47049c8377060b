// src/core/functions/builtins.rs

//! The routing functions exposed to a host engine.

use super::{LogicalType, ScalarFunction, Vector, check_arguments};
use crate::core::ClusterHashError;
use crate::core::cluster::{NodeCount, get_slot, node_for_key, node_for_key_fixed};

/// `hash_slot(key VARCHAR) -> INTEGER`: the key's slot in `[0, 16384)`.
///
/// NULL and empty keys produce 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashSlotFunction;

impl ScalarFunction for HashSlotFunction {
    fn name(&self) -> &'static str {
        "hash_slot"
    }

    fn arguments(&self) -> &'static [LogicalType] {
        &[LogicalType::Varchar]
    }

    fn execute(&self, args: &[Vector]) -> Result<Vec<i32>, ClusterHashError> {
        check_arguments(self, args)?;
        let keys = args[0].as_varchar()?;
        Ok(keys
            .iter()
            .map(|key| key.as_deref().map_or(0, |k| get_slot(k) as i32))
            .collect())
    }
}

/// `node(key VARCHAR, node_count INTEGER) -> INTEGER`: proportional placement.
///
/// Rows with a NULL or empty key, or a NULL node count, produce 0. Any other
/// row with a node count outside `1..=16384` fails the whole batch with
/// [`ClusterHashError::InvalidArgument`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeFunction;

impl ScalarFunction for NodeFunction {
    fn name(&self) -> &'static str {
        "node"
    }

    fn arguments(&self) -> &'static [LogicalType] {
        &[LogicalType::Varchar, LogicalType::Integer]
    }

    fn execute(&self, args: &[Vector]) -> Result<Vec<i32>, ClusterHashError> {
        check_arguments(self, args)?;
        let keys = args[0].as_varchar()?;
        let counts = args[1].as_integer()?;

        keys.iter()
            .zip(counts)
            .map(|(key, count)| -> Result<i32, ClusterHashError> {
                match (key.as_deref(), count) {
                    (Some(key), Some(count)) if !key.is_empty() => {
                        let nodes = NodeCount::try_from(*count)?;
                        Ok(node_for_key(key, nodes) as i32)
                    }
                    _ => Ok(0),
                }
            })
            .collect()
    }
}

/// `cluster_node(key VARCHAR) -> INTEGER`: six-shard table placement, `1..=6`.
///
/// NULL keys produce 0. The empty key hashes to slot 0 and therefore node 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterNodeFunction;

impl ScalarFunction for ClusterNodeFunction {
    fn name(&self) -> &'static str {
        "cluster_node"
    }

    fn arguments(&self) -> &'static [LogicalType] {
        &[LogicalType::Varchar]
    }

    fn execute(&self, args: &[Vector]) -> Result<Vec<i32>, ClusterHashError> {
        check_arguments(self, args)?;
        let keys = args[0].as_varchar()?;
        Ok(keys
            .iter()
            .map(|key| key.as_deref().map_or(0, |k| node_for_key_fixed(k) as i32))
            .collect())
    }
}
