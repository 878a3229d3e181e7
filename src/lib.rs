// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // engine + logging configuration
pub mod container;     // sequence / mapping abstraction
pub mod engine;        // traversal engines and flow combinators
pub mod errors;        // error handling
pub mod observability;
pub mod traits;        // sync step outcome

pub use crate::container::{Container, Key, Kind};
pub use crate::engine::{deferred, sync};
pub use crate::engine::{task, waterfall_task, Continuation, Engine, Flow, Task, WaterfallTask};
pub use crate::errors::FlowError;
