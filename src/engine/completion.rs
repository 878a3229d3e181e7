// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Callback-style completion for [`Flow`]s.
//!
//! Both adapters spawn onto the current `tokio::task::LocalSet`, so they must
//! be called from inside one (`LocalSet::run_until` or a spawned local task).

use tokio::task::JoinHandle;

use crate::engine::runner::Flow;
use crate::errors::FlowError;

enum LatchState<R> {
    Pending(Box<dyn FnOnce(R)>),
    Done,
}

/// One-way guard around a completion callback.
///
/// The first [`Latch::fire`] invokes the callback; the latch is then closed
/// and every later call is a no-op.
pub struct Latch<R> {
    state: LatchState<R>,
}

impl<R> Latch<R> {
    pub fn new<D>(done: D) -> Self
    where
        D: FnOnce(R) + 'static,
    {
        Self {
            state: LatchState::Pending(Box::new(done)),
        }
    }

    /// Invoke the callback if the latch is still open. Returns whether it fired.
    pub fn fire(&mut self, outcome: R) -> bool {
        match std::mem::replace(&mut self.state, LatchState::Done) {
            LatchState::Pending(done) => {
                done(outcome);
                true
            }
            LatchState::Done => false,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, LatchState::Done)
    }
}

/// Drive `flow` in the background and hand its outcome to `done` exactly once.
///
/// # Panics
///
/// Panics when called outside a `tokio::task::LocalSet`.
pub fn on_complete<R, E, D>(flow: Flow<'static, R, E>, done: D) -> JoinHandle<()>
where
    R: 'static,
    E: 'static,
    D: FnOnce(Result<R, FlowError<E>>) + 'static,
{
    let mut latch = Latch::new(done);
    tokio::task::spawn_local(async move {
        let outcome = flow.await;
        latch.fire(outcome);
    })
}

/// Drive `flow` in the background and discard its outcome.
///
/// # Panics
///
/// Panics when called outside a `tokio::task::LocalSet`.
pub fn detach<R, E>(flow: Flow<'static, R, E>) -> JoinHandle<()>
where
    R: 'static,
    E: 'static,
{
    tokio::task::spawn_local(async move {
        let _ = flow.await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::engine::flow::{task, Task};
    use crate::engine::Engine;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    #[test]
    fn test_latch_fires_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = calls.clone();
        let mut latch = Latch::new(move |n: i32| log.borrow_mut().push(n));

        assert!(!latch.is_done());
        assert!(latch.fire(1));
        assert!(latch.is_done());
        assert!(!latch.fire(2));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_complete_delivers_result() {
        let outcome = Rc::new(RefCell::new(None));
        let slot = outcome.clone();

        LocalSet::new()
            .run_until(async {
                let tasks: Container<Task<i32, ()>> = Container::from(vec![
                    task(|cont| cont.succeed(1)),
                    task(|cont| {
                        tokio::task::spawn_local(async move {
                            sleep(Duration::from_millis(10)).await;
                            cont.succeed(2);
                        });
                    }),
                ]);
                let handle = on_complete(Engine::default().series(tasks), move |r| {
                    *slot.borrow_mut() = Some(r);
                });
                handle.await.unwrap();
            })
            .await;

        assert_eq!(
            outcome.borrow_mut().take(),
            Some(Ok(Container::Sequence(vec![1, 2])))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_runs_series_without_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));

        LocalSet::new()
            .run_until(async {
                let tasks: Container<Task<(), ()>> = Container::from(
                    (0..3)
                        .map(|i| {
                            let log = log.clone();
                            task(move |cont: crate::engine::Continuation<(), ()>| {
                                log.borrow_mut().push(i);
                                cont.done();
                            })
                        })
                        .collect::<Vec<_>>(),
                );
                detach(Engine::default().series(tasks));
                sleep(Duration::from_millis(10)).await;
            })
            .await;

        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[tokio::test]
    #[should_panic(expected = "LocalSet")]
    async fn test_on_complete_outside_local_set_panics() {
        let tasks: Container<Task<i32, ()>> = Container::from(Vec::new());
        on_complete(Engine::default().series(tasks), |_| {});
    }

    #[tokio::test]
    #[should_panic(expected = "LocalSet")]
    async fn test_detach_outside_local_set_panics() {
        let tasks: Container<Task<i32, ()>> = Container::from(Vec::new());
        detach(Engine::default().series(tasks));
    }
}
