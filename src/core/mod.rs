// src/core/mod.rs

//! The central module containing the routing logic and its host-facing surface.

pub mod cluster;
pub mod errors;
pub mod functions;

pub use errors::ClusterHashError;
