// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for configuration loading and tracing setup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid YAML for [`crate::config::Config`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The logging filter directive was rejected by the subscriber
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },

    /// A global tracing subscriber is already installed
    #[error("tracing subscriber already initialised: {0}")]
    SubscriberInstalled(String),
}
