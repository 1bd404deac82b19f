// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An extended `switch` with callbacks.
//!
//! Cases are checked in order. Every case whose predicate matches has its
//! callback invoked; the callback decides whether evaluation stops there
//! ([`CaseFlow::Break`]) or continues with the next case
//! ([`CaseFlow::FallThrough`]).

use std::fmt;

/// What to do after a matching case's callback has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFlow {
    /// Stop evaluating further cases.
    Break,
    /// Continue with the next case.
    FallThrough,
}

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;
type Callback<'a, T> = Box<dyn FnMut(&T) -> CaseFlow + 'a>;

/// A single case: a predicate and the callback to run when it matches.
pub struct SwitchCase<'a, T: ?Sized> {
    predicate: Predicate<'a, T>,
    callback: Callback<'a, T>,
}

impl<'a, T: ?Sized> SwitchCase<'a, T> {
    /// Creates a case from a predicate and a callback.
    pub fn new<P, F>(predicate: P, callback: F) -> Self
    where
        P: Fn(&T) -> bool + 'a,
        F: FnMut(&T) -> CaseFlow + 'a,
    {
        Self {
            predicate: Box::new(predicate),
            callback: Box::new(callback),
        }
    }

    fn matches(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    fn invoke(&mut self, value: &T) -> CaseFlow {
        (self.callback)(value)
    }
}

impl<T: ?Sized> fmt::Debug for SwitchCase<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchCase").finish_non_exhaustive()
    }
}

/// Entry point for building and evaluating switch cases.
pub struct Switch;

impl Switch {
    /// Creates a case. Shorthand for [`SwitchCase::new`].
    pub fn case<'a, T, P, F>(predicate: P, callback: F) -> SwitchCase<'a, T>
    where
        T: ?Sized,
        P: Fn(&T) -> bool + 'a,
        F: FnMut(&T) -> CaseFlow + 'a,
    {
        SwitchCase::new(predicate, callback)
    }

    /// Evaluates `cases` against `value`.
    ///
    /// Returns `true` if at least one case matched. An empty slice returns
    /// `false`.
    pub fn evaluate<T: ?Sized>(value: &T, cases: &mut [SwitchCase<'_, T>]) -> bool {
        let mut any_invoked = false;

        for case in cases.iter_mut() {
            if case.matches(value) {
                any_invoked = true;
                if case.invoke(value) == CaseFlow::Break {
                    break;
                }
            }
        }

        any_invoked
    }
}
