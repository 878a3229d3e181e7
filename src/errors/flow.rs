// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by asynchronous traversals and flow combinators.

use crate::container::Key;
use thiserror::Error;

/// Terminal failure of an asynchronous operation.
///
/// The engine never inspects or wraps a step's error beyond recording which
/// key reported it; the first error reported wins and every later outcome for
/// the same operation is discarded.
#[derive(Debug, Error, PartialEq)]
pub enum FlowError<E> {
    /// A step or task reported an error through its continuation.
    #[error("step at key '{key}' failed: {error:?}")]
    Step { key: Key, error: E },

    /// A continuation was dropped without ever being invoked.
    #[error("continuation for key '{key}' was dropped without reporting")]
    Abandoned { key: Key },
}

impl<E> FlowError<E> {
    /// Key of the element whose step ended the operation.
    pub fn key(&self) -> &Key {
        match self {
            FlowError::Step { key, .. } | FlowError::Abandoned { key } => key,
        }
    }

    /// The error exactly as the step reported it, if a step reported one.
    pub fn into_step_error(self) -> Option<E> {
        match self {
            FlowError::Step { error, .. } => Some(error),
            FlowError::Abandoned { .. } => None,
        }
    }

    pub fn step_error(&self) -> Option<&E> {
        match self {
            FlowError::Step { error, .. } => Some(error),
            FlowError::Abandoned { .. } => None,
        }
    }
}
