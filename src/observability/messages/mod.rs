// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable text and
//! [`StructuredLog`] to emit the same event with typed fields at its
//! designated level.

pub mod engine;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the event at the message's designated level.
    fn log(&self);
}
