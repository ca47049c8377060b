// src/config.rs

//! Manages configuration: loading from TOML and validation.

use crate::core::ClusterHashError;
use crate::core::cluster::{NodePolicy, Router, RoutingConfig};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// The top-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Default log filter, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub routing: RoutingConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            routing: RoutingConfig::default(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration at `path`.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid configuration in '{path}'"))?;
        info!(
            path,
            policy = %config.routing.policy,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(anyhow!("log_level cannot be empty"));
        }

        let routing = &self.routing;
        if routing.policy == NodePolicy::Proportional && !routing.ranges.is_empty() {
            warn!(
                "routing.ranges is set but the policy is 'proportional'; the ranges are ignored"
            );
        }

        self.router()
            .map(|_| ())
            .context("Invalid routing configuration")
    }

    /// Builds the key router for this configuration.
    pub fn router(&self) -> Result<Router, ClusterHashError> {
        Router::from_config(&self.routing)
    }
}
