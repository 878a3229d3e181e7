// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::future::LocalBoxFuture;

use crate::config::{Config, EngineOptions};
use crate::errors::FlowError;

/// An asynchronous operation in flight.
///
/// Resolves exactly once: with the aggregated result, or with the first error
/// any step reported.
pub type Flow<'a, R, E> = LocalBoxFuture<'a, Result<R, FlowError<E>>>;

/// Runner for asynchronous traversals and flow combinators.
///
/// The engine holds no per-operation state; every call builds its own
/// counters and result container, so one engine can serve any number of
/// concurrent operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Create an engine from the `engine` section of a configuration
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.engine)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}
