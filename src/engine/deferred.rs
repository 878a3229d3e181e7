// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Asynchronous operations on a default [`Engine`].
//!
//! Shorthand for `Engine::default().<op>(..)` when no configuration is needed.

use crate::container::{Container, Key};
use crate::engine::continuation::Continuation;
use crate::engine::runner::{Engine, Flow};
use crate::engine::flow::{Task, WaterfallTask};

pub fn each<T, E, F>(container: &Container<T>, step: F) -> Flow<'static, (), E>
where
    F: FnMut(Continuation<(), E>, &T, &Key, &Container<T>),
    E: 'static,
{
    Engine::default().each(container, step)
}

pub fn each_series<'a, T, E, F>(container: &'a Container<T>, step: F) -> Flow<'a, (), E>
where
    F: FnMut(Continuation<(), E>, &T, &Key, &Container<T>) + 'a,
    E: 'a,
{
    Engine::default().each_series(container, step)
}

pub fn map<T, V, E, F>(container: &Container<T>, step: F) -> Flow<'static, Container<V>, E>
where
    F: FnMut(Continuation<V, E>, &T, &Key, &Container<T>),
    V: 'static,
    E: 'static,
{
    Engine::default().map(container, step)
}

pub fn filter<T, E, F>(container: &Container<T>, step: F) -> Flow<'static, Container<T>, E>
where
    T: Clone + 'static,
    F: FnMut(Continuation<bool, E>, &T, &Key, &Container<T>),
    E: 'static,
{
    Engine::default().filter(container, step)
}

pub fn fold<'a, T, A, E, F>(container: &'a Container<T>, init: A, step: F) -> Flow<'a, A, E>
where
    F: FnMut(Continuation<A, E>, A, &T, &Key, &Container<T>) + 'a,
    A: 'a,
    E: 'a,
{
    Engine::default().fold(container, init, step)
}

pub fn parallel<V: 'static, E: 'static>(tasks: Container<Task<V, E>>) -> Flow<'static, Container<V>, E> {
    Engine::default().parallel(tasks)
}

pub fn series<V: 'static, E: 'static>(tasks: Container<Task<V, E>>) -> Flow<'static, Container<V>, E> {
    Engine::default().series(tasks)
}

pub fn waterfall<A: 'static, E: 'static>(tasks: Container<WaterfallTask<A, E>>) -> Flow<'static, Option<A>, E> {
    Engine::default().waterfall(tasks)
}
