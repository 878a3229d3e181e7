// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for traversal lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Operation start and completion (sync and async)
//! * Step failures that short-circuit an operation
//! * Continuations that are dropped or reported after the operation ended

use crate::config::AbandonPolicy;
use crate::container::Key;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An operation began traversing its container.
///
/// # Log Level
/// `debug!` - Per-operation event
///
/// # Example
/// ```
/// use the_relay::observability::messages::engine::TraversalStarted;
///
/// let msg = TraversalStarted {
///     operation: "filter",
///     mode: "fan_out",
///     element_count: 3,
/// };
///
/// assert_eq!(msg.to_string(), "Starting filter (fan_out) over 3 elements");
/// ```
pub struct TraversalStarted<'a> {
    pub operation: &'a str,
    pub mode: &'a str,
    pub element_count: usize,
}

impl Display for TraversalStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} ({}) over {} elements",
            self.operation, self.mode, self.element_count
        )
    }
}

impl StructuredLog for TraversalStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            operation = self.operation,
            mode = self.mode,
            element_count = self.element_count,
            "{}", self
        );
    }
}

impl TraversalStarted<'_> {
    /// Span covering the whole traversal; steps started by the engine run inside it.
    pub fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "traversal",
            span_name = name,
            operation = self.operation,
            mode = self.mode,
            element_count = self.element_count,
        )
    }
}

/// An operation resolved successfully.
///
/// # Log Level
/// `debug!` - Per-operation event
pub struct TraversalCompleted<'a> {
    pub operation: &'a str,
    pub element_count: usize,
    pub duration: std::time::Duration,
}

impl Display for TraversalCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} completed over {} elements in {:?}",
            self.operation, self.element_count, self.duration
        )
    }
}

impl StructuredLog for TraversalCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            operation = self.operation,
            element_count = self.element_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// A step reported an error and ended its operation.
///
/// # Log Level
/// `debug!` - The error itself is returned to the caller
pub struct StepFailed<'a> {
    pub operation: &'a str,
    pub key: &'a Key,
}

impl Display for StepFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} stopped: step at key '{}' reported an error",
            self.operation, self.key
        )
    }
}

impl StructuredLog for StepFailed<'_> {
    fn log(&self) {
        tracing::debug!(operation = self.operation, key = %self.key, "{}", self);
    }
}

/// A continuation was dropped without being invoked.
///
/// # Log Level
/// `warn!` - The step broke its contract
///
/// # Example
/// ```
/// use the_relay::config::AbandonPolicy;
/// use the_relay::container::Key;
/// use the_relay::observability::messages::engine::ContinuationAbandoned;
///
/// let key = Key::from("a");
/// let msg = ContinuationAbandoned {
///     operation: "series",
///     key: &key,
///     policy: AbandonPolicy::Fail,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ContinuationAbandoned<'a> {
    pub operation: &'a str,
    pub key: &'a Key,
    pub policy: AbandonPolicy,
}

impl Display for ContinuationAbandoned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: continuation for key '{}' was dropped without reporting (policy: {})",
            self.operation, self.key, self.policy
        )
    }
}

impl StructuredLog for ContinuationAbandoned<'_> {
    fn log(&self) {
        tracing::warn!(
            operation = self.operation,
            key = %self.key,
            policy = %self.policy,
            "{}", self
        );
    }
}

/// A continuation fired after its operation had already resolved.
///
/// # Log Level
/// `trace!` - Expected after a short-circuit; the outcome is discarded
pub struct LateCompletion<'a> {
    pub key: &'a Key,
    pub is_error: bool,
}

impl Display for LateCompletion<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let outcome = if self.is_error { "error" } else { "success" };
        write!(
            f,
            "Discarding late {} for key '{}': operation already resolved",
            outcome, self.key
        )
    }
}

impl StructuredLog for LateCompletion<'_> {
    fn log(&self) {
        tracing::trace!(key = %self.key, is_error = self.is_error, "{}", self);
    }
}
