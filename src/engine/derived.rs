// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::FutureExt;
use std::time::Instant;
use tracing::Instrument;

use crate::container::{Container, Key};
use crate::engine::continuation::Continuation;
use crate::engine::runner::{Engine, Flow};
use crate::engine::fan_out::FanOut;
use crate::engine::series::Series;
use crate::observability::messages::engine::TraversalCompleted;
use crate::observability::messages::StructuredLog;

impl Engine {
    /// Map every element concurrently.
    ///
    /// Each step reports its mapped value through the continuation. The result
    /// has the input's shape with every value stored under its original key,
    /// whatever order the steps finish in.
    pub fn map<T, V, E, F>(&self, container: &Container<T>, step: F) -> Flow<'static, Container<V>, E>
    where
        F: FnMut(Continuation<V, E>, &T, &Key, &Container<T>),
        V: 'static,
        E: 'static,
    {
        let shape = container.shape();
        let fan_out = FanOut::over("map", self.options().on_abandoned, container, step);
        let span = fan_out.span();
        async move {
            let settled = fan_out.gather().await?;
            Ok(shape.assemble(settled))
        }
        .instrument(span)
        .boxed_local()
    }

    /// Filter elements with a concurrently evaluated predicate.
    ///
    /// Passing elements keep their original traversal order even when the
    /// predicates resolve out of order.
    pub fn filter<T, E, F>(&self, container: &Container<T>, step: F) -> Flow<'static, Container<T>, E>
    where
        T: Clone + 'static,
        F: FnMut(Continuation<bool, E>, &T, &Key, &Container<T>),
        E: 'static,
    {
        let shape = container.shape();
        let mut candidates: Vec<Option<T>> =
            container.iter().map(|(_, value)| Some(value.clone())).collect();
        let fan_out = FanOut::over("filter", self.options().on_abandoned, container, step);
        let span = fan_out.span();
        async move {
            let verdicts = fan_out.gather().await?;
            let kept: Vec<(usize, T)> = verdicts
                .into_iter()
                .filter(|(_, keep)| *keep)
                .filter_map(|(slot, _)| {
                    candidates
                        .get_mut(slot)
                        .and_then(Option::take)
                        .map(|value| (slot, value))
                })
                .collect();
            Ok(shape.assemble(kept))
        }
        .instrument(span)
        .boxed_local()
    }

    /// Fold over the container one element at a time.
    ///
    /// The accumulator is moved into each step, which reports the next
    /// accumulator through its continuation. Steps never overlap.
    pub fn fold<'a, T, A, E, F>(
        &self,
        container: &'a Container<T>,
        init: A,
        mut step: F,
    ) -> Flow<'a, A, E>
    where
        F: FnMut(Continuation<A, E>, A, &T, &Key, &Container<T>) + 'a,
        A: 'a,
        E: 'a,
    {
        let series = Series::new("fold", self.options().on_abandoned, container.len());
        let span = series.span();
        async move {
            let started = Instant::now();
            let mut acc = init;
            for (key, value) in container.iter() {
                acc = series
                    .advance(key.clone(), |cont| step(cont, acc, value, &key, container))
                    .await?;
            }
            TraversalCompleted {
                operation: "fold",
                element_count: container.len(),
                duration: started.elapsed(),
            }
            .log();
            Ok(acc)
        }
        .instrument(span)
        .boxed_local()
    }
}
