// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Flow combinators over containers of independent tasks.
//!
//! Unlike the traversals, the elements here are the work itself: each task is
//! handed a continuation (and, for [`Engine::waterfall`], the previous task's
//! value) and reports through it.

use futures::FutureExt;
use std::time::Instant;
use tracing::Instrument;

use crate::container::Container;
use crate::engine::continuation::Continuation;
use crate::engine::runner::{Engine, Flow};
use crate::engine::fan_out::FanOut;
use crate::engine::series::Series;
use crate::observability::messages::engine::TraversalCompleted;
use crate::observability::messages::StructuredLog;

/// A unit of work for [`Engine::parallel`] and [`Engine::series`].
pub type Task<V, E> = Box<dyn FnOnce(Continuation<V, E>)>;

/// A unit of work for [`Engine::waterfall`]; receives the previous task's value.
pub type WaterfallTask<A, E> = Box<dyn FnOnce(Continuation<A, E>, Option<A>)>;

pub fn task<V, E, F>(f: F) -> Task<V, E>
where
    F: FnOnce(Continuation<V, E>) + 'static,
{
    Box::new(f)
}

pub fn waterfall_task<A, E, F>(f: F) -> WaterfallTask<A, E>
where
    F: FnOnce(Continuation<A, E>, Option<A>) + 'static,
{
    Box::new(f)
}

impl Engine {
    /// Start every task at once and collect their values in the tasks' shape.
    ///
    /// Tasks are launched before this method returns, so dropping the
    /// returned future still runs them; their outcomes are then discarded.
    pub fn parallel<V, E>(&self, tasks: Container<Task<V, E>>) -> Flow<'static, Container<V>, E>
    where
        V: 'static,
        E: 'static,
    {
        let shape = tasks.shape();
        let mut fan_out = FanOut::new("parallel", self.options().on_abandoned, tasks.len());
        let span = fan_out.span();
        for (key, task) in tasks.into_entries() {
            fan_out.launch(key, task);
        }
        async move {
            let settled = fan_out.gather().await?;
            Ok(shape.assemble(settled))
        }
        .instrument(span)
        .boxed_local()
    }

    /// Run tasks one at a time in container order, collecting their values.
    pub fn series<V, E>(&self, tasks: Container<Task<V, E>>) -> Flow<'static, Container<V>, E>
    where
        V: 'static,
        E: 'static,
    {
        let series = Series::new("series", self.options().on_abandoned, tasks.len());
        let span = series.span();
        async move {
            let started = Instant::now();
            let total = tasks.len();
            let mut result = tasks.empty_like();
            for (key, task) in tasks.into_entries() {
                let value = series.advance(key.clone(), task).await?;
                result.append(key, value);
            }
            TraversalCompleted {
                operation: "series",
                element_count: total,
                duration: started.elapsed(),
            }
            .log();
            Ok(result)
        }
        .instrument(span)
        .boxed_local()
    }

    /// Run tasks in order, handing each one the value the previous task reported.
    ///
    /// The first task receives `None`. Resolves with the last task's value, or
    /// `None` when there are no tasks.
    pub fn waterfall<A, E>(&self, tasks: Container<WaterfallTask<A, E>>) -> Flow<'static, Option<A>, E>
    where
        A: 'static,
        E: 'static,
    {
        let series = Series::new("waterfall", self.options().on_abandoned, tasks.len());
        let span = series.span();
        async move {
            let started = Instant::now();
            let total = tasks.len();
            let mut carried: Option<A> = None;
            for (key, task) in tasks.into_entries() {
                let input = carried.take();
                carried = Some(series.advance(key, |cont| task(cont, input)).await?);
            }
            TraversalCompleted {
                operation: "waterfall",
                element_count: total,
                duration: started.elapsed(),
            }
            .log();
            Ok(carried)
        }
        .instrument(span)
        .boxed_local()
    }
}
