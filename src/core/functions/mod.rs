// src/core/functions/mod.rs

//! The scalar-function surface a host query engine calls into.
//!
//! A host registers the functions from [`ClusterHashExtension`] in a
//! [`FunctionRegistry`] and then invokes them per batch. Every row is computed
//! independently, and NULL inputs produce `0` instead of NULL.

pub mod builtins;
pub mod registry;
pub mod vector;

pub use builtins::{ClusterNodeFunction, HashSlotFunction, NodeFunction};
pub use registry::{ClusterHashExtension, FunctionRegistry, default_registry};
pub use vector::{LogicalType, Vector};

use crate::core::ClusterHashError;

/// A vectorized scalar function returning one INTEGER per input row.
pub trait ScalarFunction: Send + Sync {
    /// The canonical name the function is registered under.
    fn name(&self) -> &'static str;

    /// The expected argument types, in order.
    fn arguments(&self) -> &'static [LogicalType];

    /// Evaluates the function over a batch of rows.
    fn execute(&self, args: &[Vector]) -> Result<Vec<i32>, ClusterHashError>;
}

/// Validates `args` against `function`'s signature and returns the row count.
pub fn check_arguments(
    function: &dyn ScalarFunction,
    args: &[Vector],
) -> Result<usize, ClusterHashError> {
    let expected = function.arguments();
    if args.len() != expected.len() {
        return Err(ClusterHashError::WrongArgumentCount {
            function: function.name().to_string(),
            expected: expected.len(),
            got: args.len(),
        });
    }

    for (i, (arg, ty)) in args.iter().zip(expected).enumerate() {
        if arg.logical_type() != *ty {
            return Err(ClusterHashError::WrongType(format!(
                "argument {} of '{}' must be {ty}, got {}",
                i + 1,
                function.name(),
                arg.logical_type()
            )));
        }
    }

    let rows = args.first().map_or(0, Vector::len);
    if args.iter().any(|a| a.len() != rows) {
        return Err(ClusterHashError::InvalidArgument(format!(
            "argument columns of '{}' have different lengths",
            function.name()
        )));
    }
    Ok(rows)
}
