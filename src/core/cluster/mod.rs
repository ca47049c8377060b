// src/core/cluster/mod.rs

//! This module contains the key routing primitives: the CRC16 checksum, hash
//! tag extraction, slot calculation and slot-to-node placement.

pub mod config;
pub mod crc16;
pub mod hashtag;
pub mod node;
pub mod slot;

// Re-export key types for easier access from other modules.
pub use config::{NodePolicy, RoutingConfig};
pub use node::{
    NodeCount, NodeResolver, Proportional, Router, SlotRange, SlotRangeTable, node_for_key,
    node_for_key_fixed,
};
pub use slot::{NUM_SLOTS, get_slot};
