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

//! Scoped reader/writer regions.
//!
//! [`ScopedRwLock`] hands out access to its value only through scope objects.
//! Each scope holds the underlying lock for as long as it lives and releases it
//! exactly once: when it is dropped, or earlier through its `release` method,
//! which consumes the scope so it cannot be used afterwards.
//!
//! Three acquisition modes are supported:
//! - **shared**: any number of readers at once,
//! - **upgradable**: shared access that excludes writers and other upgradable
//!   holders, and can be promoted to exclusive access without releasing,
//! - **exclusive**: a single writer, no readers.

use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// The kind of access a scope holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Shared read access.
    Shared,
    /// Shared read access that may be upgraded to exclusive access.
    Upgradable,
    /// Exclusive write access.
    Exclusive,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Shared => write!(f, "shared"),
            AccessMode::Upgradable => write!(f, "upgradable"),
            AccessMode::Exclusive => write!(f, "exclusive"),
        }
    }
}

// Logs the end of a scope. Kept separate from the guard so scopes can still be
// destructured (e.g. when upgrading).
struct ReleaseTrace(AccessMode);

impl ReleaseTrace {
    fn acquired(mode: AccessMode) -> Self {
        log::trace!("[ScopedRwLock] {mode} scope acquired");
        Self(mode)
    }
}

impl Drop for ReleaseTrace {
    fn drop(&mut self) {
        log::trace!("[ScopedRwLock] {} scope released", self.0);
    }
}

/// A reader/writer lock whose access is mediated by scope objects.
#[derive(Default)]
pub struct ScopedRwLock<T> {
    inner: RwLock<T>,
}

impl<T> ScopedRwLock<T> {
    /// Creates a new lock protecting `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    /// Blocks until shared access is granted.
    pub fn read(&self) -> SharedScope<'_, T> {
        let guard = self.inner.read();
        SharedScope {
            guard,
            _trace: ReleaseTrace::acquired(AccessMode::Shared),
        }
    }

    /// Blocks until upgradable shared access is granted.
    pub fn upgradable_read(&self) -> UpgradableScope<'_, T> {
        let guard = self.inner.upgradable_read();
        UpgradableScope {
            guard,
            _trace: ReleaseTrace::acquired(AccessMode::Upgradable),
        }
    }

    /// Blocks until exclusive access is granted.
    pub fn write(&self) -> ExclusiveScope<'_, T> {
        let guard = self.inner.write();
        ExclusiveScope {
            guard,
            _trace: ReleaseTrace::acquired(AccessMode::Exclusive),
        }
    }

    /// Runs `f` under shared access. The region is released however `f` exits.
    pub fn with_read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let scope = self.read();
        f(&*scope)
    }

    /// Runs `f` under exclusive access. The region is released however `f` exits.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut scope = self.write();
        f(&mut *scope)
    }

    /// Returns `true` if any scope currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Returns `true` if an exclusive scope currently holds the lock.
    pub fn is_locked_exclusive(&self) -> bool {
        self.inner.is_locked_exclusive()
    }

    /// Mutable access without locking; the borrow checker proves exclusivity.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    /// Consumes the lock and returns the protected value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for ScopedRwLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_read() {
            Some(value) => f.debug_struct("ScopedRwLock").field("value", &&*value).finish(),
            None => f
                .debug_struct("ScopedRwLock")
                .field("value", &format_args!("<locked>"))
                .finish(),
        }
    }
}

/// Shared access to the value of a [`ScopedRwLock`].
#[must_use = "the region is released as soon as the scope is dropped"]
pub struct SharedScope<'a, T> {
    guard: RwLockReadGuard<'a, T>,
    _trace: ReleaseTrace,
}

impl<T> SharedScope<'_, T> {
    /// The access mode held by this scope.
    pub fn mode(&self) -> AccessMode {
        AccessMode::Shared
    }

    /// Releases the region before the end of the enclosing scope.
    pub fn release(self) {}
}

impl<T> Deref for SharedScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

/// Upgradable shared access to the value of a [`ScopedRwLock`].
#[must_use = "the region is released as soon as the scope is dropped"]
pub struct UpgradableScope<'a, T> {
    guard: RwLockUpgradableReadGuard<'a, T>,
    _trace: ReleaseTrace,
}

impl<'a, T> UpgradableScope<'a, T> {
    /// The access mode held by this scope.
    pub fn mode(&self) -> AccessMode {
        AccessMode::Upgradable
    }

    /// Promotes this scope to exclusive access without releasing the region.
    ///
    /// Blocks until every shared holder has released.
    pub fn upgrade(self) -> ExclusiveScope<'a, T> {
        let UpgradableScope {
            guard,
            _trace: trace,
        } = self;
        drop(trace);
        let guard = RwLockUpgradableReadGuard::upgrade(guard);
        ExclusiveScope {
            guard,
            _trace: ReleaseTrace::acquired(AccessMode::Exclusive),
        }
    }

    /// Releases the region before the end of the enclosing scope.
    pub fn release(self) {}
}

impl<T> Deref for UpgradableScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

/// Exclusive access to the value of a [`ScopedRwLock`].
#[must_use = "the region is released as soon as the scope is dropped"]
pub struct ExclusiveScope<'a, T> {
    guard: RwLockWriteGuard<'a, T>,
    _trace: ReleaseTrace,
}

impl<T> ExclusiveScope<'_, T> {
    /// The access mode held by this scope.
    pub fn mode(&self) -> AccessMode {
        AccessMode::Exclusive
    }

    /// Releases the region before the end of the enclosing scope.
    pub fn release(self) {}
}

impl<T> Deref for ExclusiveScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for ExclusiveScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}
