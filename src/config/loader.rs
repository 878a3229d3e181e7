// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_LOG_FILTER;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration for the traversal engine.
///
/// Every section is optional; a missing section takes its defaults, so an
/// empty document is a valid configuration.
///
/// # Example
/// ```yaml
/// engine:
///   on_abandoned: fail
/// logging:
///   filter: "the_relay=debug"
///   with_target: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null rather than an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Options that change how asynchronous operations behave.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct EngineOptions {
    #[serde(default)]
    pub on_abandoned: AbandonPolicy,
}

/// What an operation does when a step drops its continuation without invoking it.
///
/// # Variants
/// * `Fail` - resolve the operation with [`crate::errors::FlowError::Abandoned`]
/// * `Stall` - leave the operation pending forever
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AbandonPolicy {
    #[default]
    Fail,
    Stall,
}

impl std::fmt::Display for AbandonPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbandonPolicy::Fail => write!(f, "fail"),
            AbandonPolicy::Stall => write!(f, "stall"),
        }
    }
}

/// Subscriber settings used by [`crate::observability::init_tracing`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            with_target: false,
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_yaml_str(&content)
}
