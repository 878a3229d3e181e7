// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use tokio::sync::oneshot;

use crate::config::AbandonPolicy;
use crate::container::Key;
use crate::errors::FlowError;
use crate::observability::messages::engine::{ContinuationAbandoned, LateCompletion, StepFailed};
use crate::observability::messages::StructuredLog;

/// One-shot handle a step uses to report its outcome.
///
/// Every reporting method takes `self`, so a continuation reports at most once.
/// Dropping it without reporting is handled according to
/// [`AbandonPolicy`](crate::config::AbandonPolicy).
#[must_use = "a step must report its outcome through the continuation"]
pub struct Continuation<V, E> {
    key: Key,
    sender: oneshot::Sender<Result<V, E>>,
}

impl<V, E> Continuation<V, E> {
    pub(crate) fn channel(key: Key) -> (Self, Pending<V, E>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                key: key.clone(),
                sender,
            },
            Pending { key, receiver },
        )
    }

    /// Key of the element this continuation reports for.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// True once the owning operation has resolved (or been dropped) and no
    /// longer listens for this outcome.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub fn complete(self, outcome: Result<V, E>) {
        let Continuation { key, sender } = self;
        let is_error = outcome.is_err();
        if sender.send(outcome).is_err() {
            LateCompletion {
                key: &key,
                is_error,
            }
            .log();
        }
    }

    pub fn succeed(self, value: V) {
        self.complete(Ok(value));
    }

    pub fn fail(self, error: E) {
        self.complete(Err(error));
    }
}

impl<E> Continuation<(), E> {
    /// Report success for a step that produces no value.
    pub fn done(self) {
        self.succeed(());
    }
}

impl<V, E> fmt::Debug for Continuation<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("key", &self.key)
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

/// Engine-side half of a [`Continuation`].
pub(crate) struct Pending<V, E> {
    key: Key,
    receiver: oneshot::Receiver<Result<V, E>>,
}

impl<V, E> Pending<V, E> {
    /// Wait for the step to report.
    pub(crate) async fn settle(
        self,
        operation: &'static str,
        policy: AbandonPolicy,
    ) -> Result<V, FlowError<E>> {
        let Pending { key, receiver } = self;
        match receiver.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                StepFailed {
                    operation,
                    key: &key,
                }
                .log();
                Err(FlowError::Step { key, error })
            }
            Err(_) => {
                ContinuationAbandoned {
                    operation,
                    key: &key,
                    policy,
                }
                .log();
                match policy {
                    AbandonPolicy::Fail => Err(FlowError::Abandoned { key }),
                    AbandonPolicy::Stall => std::future::pending().await,
                }
            }
        }
    }
}
