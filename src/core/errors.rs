// src/core/errors.rs

//! Defines the primary error type for the routing library.

use thiserror::Error;

/// The main error enum, representing every failure a routing call can report.
///
/// Malformed hash tags and empty keys are not errors: they have defined
/// fallbacks and never reach this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterHashError {
    /// A caller-supplied value is outside its valid domain (e.g. a node count of 0).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Wrong number of arguments for '{function}': expected {expected}, got {got}")]
    WrongArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("WRONGTYPE {0}")]
    WrongType(String),

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    /// A slot range table does not cover the slot space exactly once.
    #[error("Invalid slot range table: {0}")]
    InvalidRangeTable(String),
}
