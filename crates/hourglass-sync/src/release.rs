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

//! A release handle that runs its action exactly once.
//!
//! [`ReleaseOnce`] wraps an arbitrary cleanup action. The first call to
//! [`ReleaseOnce::release`] (or dropping the handle) runs it; every later call
//! is silently ignored. Because the handle releases on drop, the action also
//! runs when the owning scope is left through an early return or a panic.

use parking_lot::Mutex;
use std::fmt;

type ReleaseAction<'a> = Box<dyn FnOnce() + Send + 'a>;

struct ReleaseState<'a> {
    released: bool,
    action: Option<ReleaseAction<'a>>,
}

/// Runs a release action on first release and ignores every subsequent one.
///
/// Concurrent releases from several threads are serialized by a single coarse
/// mutex around the check-and-set; the action itself runs outside of it.
pub struct ReleaseOnce<'a> {
    state: Mutex<ReleaseState<'a>>,
}

impl<'a> ReleaseOnce<'a> {
    /// Creates a handle that runs `action` when released.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'a,
    {
        Self {
            state: Mutex::new(ReleaseState {
                released: false,
                action: Some(Box::new(action)),
            }),
        }
    }

    /// Creates a handle with no action. Releasing it only flips its state.
    pub fn noop() -> Self {
        Self {
            state: Mutex::new(ReleaseState {
                released: false,
                action: None,
            }),
        }
    }

    /// Releases the handle, running the action if this is the first release.
    pub fn release(&self) {
        let action = {
            let mut state = self.state.lock();
            if state.released {
                return;
            }
            state.released = true;
            state.action.take()
        };

        if let Some(action) = action {
            action();
        }
    }

    /// Returns `true` once the handle has been released.
    pub fn is_released(&self) -> bool {
        self.state.lock().released
    }
}

impl Drop for ReleaseOnce<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ReleaseOnce<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ReleaseOnce")
            .field("released", &state.released)
            .field("has_action", &state.action.is_some())
            .finish()
    }
}
