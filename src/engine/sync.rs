// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Synchronous traversals.
//!
//! Steps run immediately, in traversal order, on the caller's stack. There is
//! no error channel: a panicking step unwinds straight out of the call.

use crate::container::{Container, Key};
use crate::observability::messages::engine::TraversalStarted;
use crate::observability::messages::StructuredLog;
use crate::traits::StepOutcome;
use tracing::Span;

fn started(operation: &str, container_len: usize) -> Span {
    let started = TraversalStarted {
        operation,
        mode: "sync",
        element_count: container_len,
    };
    let span = started.span(operation);
    span.in_scope(|| started.log());
    span
}

/// Visit every element in order until a step asks to stop.
///
/// A step returning `false` (or `ControlFlow::Break`) halts the traversal
/// after that element.
pub fn each<T, O, F>(container: &Container<T>, mut step: F)
where
    F: FnMut(&T, &Key, &Container<T>) -> O,
    O: StepOutcome,
{
    let span = started("each", container.len());
    let _entered = span.enter();
    for (key, value) in container.iter() {
        if !step(value, &key, container).should_continue() {
            break;
        }
    }
}

/// Same as [`each`]; sync traversal is always sequential.
pub fn each_series<T, O, F>(container: &Container<T>, step: F)
where
    F: FnMut(&T, &Key, &Container<T>) -> O,
    O: StepOutcome,
{
    each(container, step)
}

/// Collect `step`'s return value for every element into a same-shaped container.
pub fn map<T, U, F>(container: &Container<T>, mut step: F) -> Container<U>
where
    F: FnMut(&T, &Key, &Container<T>) -> U,
{
    let span = started("map", container.len());
    let _entered = span.enter();
    let mut result = container.empty_like();
    for (key, value) in container.iter() {
        let mapped = step(value, &key, container);
        result.append(key, mapped);
    }
    result
}

/// Keep the elements for which `step` returns true.
///
/// Sequences stay dense and in original order; mappings keep each passing
/// element under its original key.
pub fn filter<T, F>(container: &Container<T>, mut step: F) -> Container<T>
where
    T: Clone,
    F: FnMut(&T, &Key, &Container<T>) -> bool,
{
    let span = started("filter", container.len());
    let _entered = span.enter();
    let mut result = container.empty_like();
    for (key, value) in container.iter() {
        if step(value, &key, container) {
            result.append(key, value.clone());
        }
    }
    result
}

/// Left-fold over the container in traversal order.
pub fn fold<T, A, F>(container: &Container<T>, init: A, mut step: F) -> A
where
    F: FnMut(A, &T, &Key, &Container<T>) -> A,
{
    let span = started("fold", container.len());
    let _entered = span.enter();
    container
        .iter()
        .fold(init, |acc, (key, value)| step(acc, value, &key, container))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    #[test]
    fn test_each_empty_sequence() {
        let c: Container<i32> = Container::Sequence(vec![]);
        let mut calls = 0;
        each(&c, |_, _, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_each_visits_in_index_order() {
        let c = Container::from(vec![1, 2, 3]);
        let mut calls = Vec::new();
        each(&c, |v, k, whole| calls.push((*v, k.clone(), whole.len())));
        assert_eq!(
            calls,
            vec![
                (1, Key::Index(0), 3),
                (2, Key::Index(1), 3),
                (3, Key::Index(2), 3)
            ]
        );
    }

    #[test]
    fn test_each_stops_when_step_returns_false() {
        let c = Container::from(vec![1, 2, 3]);
        let mut calls = Vec::new();
        each(&c, |v, _, _| {
            calls.push(*v);
            *v != 2
        });
        assert_eq!(calls, vec![1, 2]);
    }

    #[test]
    fn test_each_stops_on_control_flow_break() {
        let c = Container::mapping([("a", 1), ("b", 2), ("c", 3)]);
        let mut keys = Vec::new();
        each(&c, |_, k, _| {
            keys.push(k.clone());
            if k.as_name() == Some("b") {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(keys, vec![Key::from("a"), Key::from("b")]);
    }

    #[test]
    fn test_each_series_matches_each() {
        let c = Container::mapping([("a", 1), ("b", 2), ("c", 3)]);
        let mut calls = Vec::new();
        each_series(&c, |v, k, _| {
            calls.push((*v, k.clone()));
            *v != 2
        });
        assert_eq!(calls, vec![(1, Key::from("a")), (2, Key::from("b"))]);
    }

    #[test]
    fn test_map_sequence() {
        let c = Container::from(vec![1, 2, 3]);
        let result = map(&c, |v, k, _| v * 10 + k.as_index().unwrap_or(0) as i32);
        assert_eq!(result, Container::Sequence(vec![10, 21, 32]));
    }

    #[test]
    fn test_map_mapping_keeps_keys() {
        let c = Container::mapping([("a", 1), ("b", 2)]);
        let result = map(&c, |v, _, _| v.to_string());
        assert_eq!(result.keys(), vec![Key::from("a"), Key::from("b")]);
        assert_eq!(result.get(&Key::from("b")), Some(&"2".to_string()));
    }

    #[test]
    fn test_map_empty_mapping() {
        let c: Container<i32> = Container::mapping(Vec::<(&str, i32)>::new());
        let result = map(&c, |v, _, _| *v);
        assert_eq!(result.kind(), crate::container::Kind::Mapping);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_sequence_is_dense() {
        let c = Container::from(vec![1, 2, 3, 4]);
        let result = filter(&c, |v, _, _| v % 2 == 0);
        assert_eq!(result, Container::Sequence(vec![2, 4]));
    }

    #[test]
    fn test_filter_mapping_keeps_original_keys() {
        let c = Container::mapping([("a", 1), ("b", 2), ("c", 3)]);
        let result = filter(&c, |v, _, _| *v > 1);
        assert_eq!(result.keys(), vec![Key::from("b"), Key::from("c")]);
    }

    #[test]
    fn test_fold_threads_accumulator_in_order() {
        let c = Container::from(vec![1, 2, 3]);
        let mut calls = Vec::new();
        let total = fold(&c, 100, |acc, v, _, _| {
            calls.push((acc, *v));
            acc + v
        });
        assert_eq!(total, 106);
        assert_eq!(calls, vec![(100, 1), (101, 2), (103, 3)]);
    }

    #[test]
    fn test_fold_empty_returns_initial() {
        let c: Container<i32> = Container::Sequence(vec![]);
        assert_eq!(fold(&c, 7, |acc, v, _, _| acc + v), 7);
    }

    #[test]
    fn test_fold_mapping_uses_insertion_order() {
        let c = Container::mapping([("x", "1"), ("y", "2"), ("z", "3")]);
        let joined = fold(&c, String::new(), |mut acc, v, k, _| {
            acc.push_str(&format!("{}={};", k, v));
            acc
        });
        assert_eq!(joined, "x=1;y=2;z=3;");
    }

    #[test]
    fn test_sync_steps_run_inside_traversal_span() {
        let _subscriber = tracing::subscriber::set_default(tracing_subscriber::registry());
        let c = Container::from(vec![1, 2, 3]);
        let names = map(&c, |_, _, _| tracing::Span::current().metadata().map(|m| m.name()));
        assert_eq!(names, Container::Sequence(vec![Some("traversal"); 3]));
    }
}
