// src/lib.rs

//! Key routing for hash-partitioned clusters.
//!
//! A key is hashed with CRC16-XMODEM (honouring `{hash tags}`) into one of
//! 16384 slots, and the slot is mapped to a node by a placement policy.

pub mod config;
pub mod core;

// Re-export
pub use crate::core::ClusterHashError;
pub use crate::core::cluster::{
    NUM_SLOTS, NodeCount, Router, get_slot, node_for_key, node_for_key_fixed,
};
