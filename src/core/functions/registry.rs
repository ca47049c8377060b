// src/core/functions/registry.rs

//! The dispatch table hosts resolve function names through.

use super::builtins::{ClusterNodeFunction, HashSlotFunction, NodeFunction};
use super::{ScalarFunction, Vector};
use crate::core::ClusterHashError;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A thread-safe, name-indexed table of scalar functions.
///
/// Names are case-insensitive. A function may be registered under several
/// names; all of them share one instance.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: RwLock<HashMap<String, Arc<dyn ScalarFunction>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under its canonical name.
    pub fn register(&self, function: Arc<dyn ScalarFunction>) {
        let name = function.name();
        self.register_as(name, function);
    }

    /// Registers `function` under `name`, replacing any previous entry.
    pub fn register_as(&self, name: &str, function: Arc<dyn ScalarFunction>) {
        let key = name.to_ascii_lowercase();
        let canonical = function.name();
        if self.functions.write().insert(key, function).is_some() {
            warn!(name, "replaced an existing scalar function");
        } else {
            debug!(name, canonical, "registered scalar function");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ScalarFunction>> {
        self.functions
            .read()
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions
            .read()
            .contains_key(&name.to_ascii_lowercase())
    }

    /// Looks `name` up and evaluates it over `args`.
    pub fn call(&self, name: &str, args: &[Vector]) -> Result<Vec<i32>, ClusterHashError> {
        // Clone the handle out so the lock is not held while executing.
        let function = self
            .get(name)
            .ok_or_else(|| ClusterHashError::UnknownFunction(name.to_string()))?;
        function.execute(args)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

/// The bundle of routing functions a host loads in one step.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterHashExtension;

impl ClusterHashExtension {
    pub fn name(&self) -> &'static str {
        "cluster_hash"
    }

    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Registers every routing function, plus the alternative names used by
    /// older deployments (`cluster_slot`, `node_fixed`).
    pub fn load(&self, registry: &FunctionRegistry) {
        let slot: Arc<dyn ScalarFunction> = Arc::new(HashSlotFunction);
        let fixed: Arc<dyn ScalarFunction> = Arc::new(ClusterNodeFunction);

        registry.register(slot.clone());
        registry.register_as("cluster_slot", slot);
        registry.register(Arc::new(NodeFunction));
        registry.register(fixed.clone());
        registry.register_as("node_fixed", fixed);

        debug!(
            extension = self.name(),
            version = self.version(),
            "loaded extension"
        );
    }
}

lazy_static! {
    static ref DEFAULT_REGISTRY: FunctionRegistry = {
        let registry = FunctionRegistry::new();
        ClusterHashExtension.load(&registry);
        registry
    };
}

/// A process-wide registry with [`ClusterHashExtension`] already loaded.
pub fn default_registry() -> &'static FunctionRegistry {
    &DEFAULT_REGISTRY
}
