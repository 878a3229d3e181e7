// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::ops::ControlFlow;

/// Return value of a synchronous traversal step.
///
/// `each` asks the step's result whether to keep going. Returning `()` always
/// continues; returning `false` stops before the next element is visited.
pub trait StepOutcome {
    fn should_continue(&self) -> bool;
}

impl StepOutcome for () {
    fn should_continue(&self) -> bool {
        true
    }
}

impl StepOutcome for bool {
    fn should_continue(&self) -> bool {
        *self
    }
}

impl<B> StepOutcome for ControlFlow<B> {
    fn should_continue(&self) -> bool {
        self.is_continue()
    }
}
