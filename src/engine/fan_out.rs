// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::time::Instant;
use tracing::{Instrument, Span};

use crate::config::AbandonPolicy;
use crate::container::{Container, Key};
use crate::engine::continuation::{Continuation, Pending};
use crate::engine::runner::{Engine, Flow};
use crate::errors::FlowError;
use crate::observability::messages::engine::{TraversalCompleted, TraversalStarted};
use crate::observability::messages::StructuredLog;

/// Fan-out/fan-in over a set of steps.
///
/// Every step is started by [`FanOut::launch`] before anything is awaited.
/// [`FanOut::gather`] then waits for all of them, resolving with the first
/// error reported. Outcomes arriving after that error go nowhere: the
/// receivers are dropped together with the in-flight set.
pub(crate) struct FanOut<V, E> {
    operation: &'static str,
    policy: AbandonPolicy,
    span: Span,
    pending: Vec<Pending<V, E>>,
}

impl<V, E> FanOut<V, E> {
    pub(crate) fn new(operation: &'static str, policy: AbandonPolicy, capacity: usize) -> Self {
        let started = TraversalStarted {
            operation,
            mode: "fan_out",
            element_count: capacity,
        };
        let span = started.span(operation);
        span.in_scope(|| started.log());

        Self {
            operation,
            policy,
            span,
            pending: Vec::with_capacity(capacity),
        }
    }

    /// The traversal span; attach it to the operation's future.
    pub(crate) fn span(&self) -> Span {
        self.span.clone()
    }

    /// Launch one step for every element of `container`, in traversal order.
    pub(crate) fn over<T, F>(
        operation: &'static str,
        policy: AbandonPolicy,
        container: &Container<T>,
        mut step: F,
    ) -> Self
    where
        F: FnMut(Continuation<V, E>, &T, &Key, &Container<T>),
    {
        let mut fan_out = Self::new(operation, policy, container.len());
        for (key, value) in container.iter() {
            fan_out.launch(key.clone(), |cont| step(cont, value, &key, container));
        }
        fan_out
    }

    pub(crate) fn launch<F>(&mut self, key: Key, start: F)
    where
        F: FnOnce(Continuation<V, E>),
    {
        let _entered = self.span.enter();
        let (cont, pending) = Continuation::channel(key);
        self.pending.push(pending);
        start(cont);
    }

    /// Wait for every launched step.
    ///
    /// Values are tagged with their launch slot and returned in completion
    /// order; callers that need traversal order sort on the slot.
    pub(crate) async fn gather(self) -> Result<Vec<(usize, V)>, FlowError<E>> {
        let FanOut {
            operation,
            policy,
            pending,
            ..
        } = self;
        let total = pending.len();
        let started = Instant::now();

        let mut inflight: FuturesUnordered<_> = pending
            .into_iter()
            .enumerate()
            .map(|(slot, p)| p.settle(operation, policy).map(move |r| r.map(|v| (slot, v))))
            .collect();

        let mut settled = Vec::with_capacity(total);
        while let Some(outcome) = inflight.next().await {
            settled.push(outcome?);
        }

        TraversalCompleted {
            operation,
            element_count: total,
            duration: started.elapsed(),
        }
        .log();
        Ok(settled)
    }
}

impl Engine {
    /// Run `step` for every element concurrently.
    ///
    /// All steps are invoked before this method returns. The returned future
    /// resolves once every continuation has reported success, or with the
    /// first error reported.
    pub fn each<T, E, F>(&self, container: &Container<T>, step: F) -> Flow<'static, (), E>
    where
        F: FnMut(Continuation<(), E>, &T, &Key, &Container<T>),
        E: 'static,
    {
        let fan_out = FanOut::over("each", self.options().on_abandoned, container, step);
        let span = fan_out.span();
        async move {
            fan_out.gather().await?;
            Ok(())
        }
        .instrument(span)
        .boxed_local()
    }
}
