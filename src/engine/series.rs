// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::FutureExt;
use std::time::Instant;
use tracing::{Instrument, Span};

use crate::config::AbandonPolicy;
use crate::container::{Container, Key};
use crate::engine::continuation::Continuation;
use crate::engine::runner::{Engine, Flow};
use crate::errors::FlowError;
use crate::observability::messages::engine::{TraversalCompleted, TraversalStarted};
use crate::observability::messages::StructuredLog;

/// Runs steps one at a time; each starts only after the previous one reported.
///
/// The caller drives the loop, so operations that thread state between steps
/// (fold, waterfall) can move it into each step.
pub(crate) struct Series {
    operation: &'static str,
    policy: AbandonPolicy,
    span: Span,
}

impl Series {
    pub(crate) fn new(operation: &'static str, policy: AbandonPolicy, element_count: usize) -> Self {
        let started = TraversalStarted {
            operation,
            mode: "series",
            element_count,
        };
        let span = started.span(operation);
        span.in_scope(|| started.log());

        Self {
            operation,
            policy,
            span,
        }
    }

    /// The traversal span; attach it to the operation's future.
    pub(crate) fn span(&self) -> Span {
        self.span.clone()
    }

    /// Start one step and wait for its outcome.
    pub(crate) async fn advance<V, E, F>(&self, key: Key, start: F) -> Result<V, FlowError<E>>
    where
        F: FnOnce(Continuation<V, E>),
    {
        let (cont, pending) = Continuation::channel(key);
        start(cont);
        pending.settle(self.operation, self.policy).await
    }
}

impl Engine {
    /// Run `step` for each element in traversal order, one at a time.
    ///
    /// The first step starts when the returned future is first polled. An
    /// error stops the traversal; later elements are never visited.
    pub fn each_series<'a, T, E, F>(&self, container: &'a Container<T>, mut step: F) -> Flow<'a, (), E>
    where
        F: FnMut(Continuation<(), E>, &T, &Key, &Container<T>) + 'a,
        E: 'a,
    {
        let series = Series::new("each_series", self.options().on_abandoned, container.len());
        let span = series.span();
        async move {
            let started = Instant::now();
            for (key, value) in container.iter() {
                series
                    .advance(key.clone(), |cont| step(cont, value, &key, container))
                    .await?;
            }
            TraversalCompleted {
                operation: "each_series",
                element_count: container.len(),
                duration: started.elapsed(),
            }
            .log();
            Ok(())
        }
        .instrument(span)
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_empty_mapping_resolves_without_steps() {
        let empty: Container<i32> = Container::mapping(Vec::<(String, i32)>::new());
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();

        let result = Engine::default()
            .each_series(&empty, |cont: Continuation<(), ()>, _, _, _| {
                *counter.borrow_mut() += 1;
                cont.done();
            })
            .await;

        assert_eq!(result, Ok(()));
        assert_eq!(*calls.borrow(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_steps_wait_for_previous_completion() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let log = events.clone();
        let c = Container::from(vec![30u64, 10, 20]);

        let result = Engine::default()
            .each_series(&c, |cont: Continuation<(), ()>, v, k, _| {
                log.borrow_mut().push(format!("start {}", k));
                let delay = *v;
                let log = log.clone();
                let key = k.clone();
                tokio::task::spawn_local(async move {
                    sleep(Duration::from_millis(delay)).await;
                    log.borrow_mut().push(format!("end {}", key));
                    cont.done();
                });
            });

        let local = tokio::task::LocalSet::new();
        let result = local.run_until(result).await;

        assert_eq!(result, Ok(()));
        assert_eq!(
            *events.borrow(),
            vec!["start 0", "end 0", "start 1", "end 1", "start 2", "end 2"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_stops_before_later_keys() {
        let visited = Rc::new(RefCell::new(Vec::new()));
        let log = visited.clone();
        let c = Container::mapping([("a", 1), ("b", 2), ("c", 3)]);

        let result = Engine::default()
            .each_series(&c, |cont: Continuation<(), i32>, v, k, _| {
                log.borrow_mut().push(k.clone());
                let v = *v;
                tokio::spawn(async move {
                    sleep(Duration::from_millis(10)).await;
                    if v == 2 {
                        cont.fail(v);
                    } else {
                        cont.done();
                    }
                });
            })
            .await;

        assert_eq!(
            result,
            Err(FlowError::Step {
                key: Key::from("b"),
                error: 2
            })
        );
        assert_eq!(*visited.borrow(), vec![Key::from("a"), Key::from("b")]);
    }

    #[tokio::test]
    async fn test_nothing_runs_until_polled() {
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let c = Container::from(vec![1]);

        let flow = Engine::default().each_series(&c, |cont: Continuation<(), ()>, _, _, _| {
            *counter.borrow_mut() += 1;
            cont.done();
        });
        assert_eq!(*calls.borrow(), 0);

        assert_eq!(flow.await, Ok(()));
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_steps_run_inside_traversal_span() {
        let _subscriber = tracing::subscriber::set_default(tracing_subscriber::registry());
        let spans = Rc::new(RefCell::new(Vec::new()));
        let log = spans.clone();
        let c = Container::mapping([("a", 1), ("b", 2)]);

        let result = Engine::default()
            .each_series(&c, |cont: Continuation<(), ()>, _, _, _| {
                log.borrow_mut()
                    .push(tracing::Span::current().metadata().map(|m| m.name()));
                cont.done();
            })
            .await;

        assert_eq!(result, Ok(()));
        assert_eq!(*spans.borrow(), vec![Some("traversal"), Some("traversal")]);
        // the span closes with the operation
        assert!(tracing::Span::current().is_none());
    }

    #[derive(Clone, Default)]
    struct Messages(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

    struct MessageVisitor(String);

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Messages {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0.lock().unwrap().push(visitor.0);
        }
    }

    #[tokio::test]
    async fn test_completion_is_logged() {
        use tracing_subscriber::layer::SubscriberExt;

        let messages = Messages::default();
        let _subscriber =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(messages.clone()));
        let c = Container::from(vec![1, 2]);

        let result = Engine::default()
            .each_series(&c, |cont: Continuation<(), ()>, _, _, _| cont.done())
            .await;

        assert_eq!(result, Ok(()));
        let logged = messages.0.lock().unwrap();
        assert!(logged.iter().any(|m| m == "Starting each_series (series) over 2 elements"));
        assert!(logged
            .iter()
            .any(|m| m.starts_with("each_series completed over 2 elements")));
    }
}
