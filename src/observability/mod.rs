// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Engine events are emitted through message types in [`messages`] rather than
//! ad-hoc format strings, so every event carries the same structured fields
//! and the same human-readable text wherever it is logged.
//!
//! # Usage
//!
//! ```rust
//! use the_relay::observability::messages::engine::TraversalStarted;
//! use the_relay::observability::messages::StructuredLog;
//!
//! TraversalStarted {
//!     operation: "map",
//!     mode: "fan_out",
//!     element_count: 3,
//! }
//! .log();
//! ```

pub mod messages;

use crate::config::LoggingConfig;
use crate::errors::ConfigError;
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber configured from `cfg`.
///
/// `RUST_LOG` takes precedence over `cfg.filter` when it is set.
pub fn init_tracing(cfg: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.filter).map_err(|e| ConfigError::InvalidLogFilter {
            filter: cfg.filter.clone(),
            reason: e.to_string(),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cfg.with_target)
        .try_init()
        .map_err(|e| ConfigError::SubscriberInstalled(e.to_string()))
}
