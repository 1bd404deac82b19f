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

//! Monotonic clock abstraction.
//!
//! Everything that measures time in this crate reads it through [`Clock`], so
//! tests can swap the real [`MonotonicClock`] for a [`ManualClock`] and drive
//! time explicitly.

use hourglass_sync::ScopedRwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of monotonic time, safe to read from any number of threads.
pub trait Clock: Send + Sync {
    /// Returns the current instant. Never goes backwards.
    fn now(&self) -> Instant;

    /// Returns the time elapsed since `earlier`, saturating at zero.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// The system monotonic clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// pass another to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<ScopedRwLock<Instant>>,
}

impl ManualClock {
    /// Creates a manual clock frozen at the current system instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a manual clock frozen at `instant`.
    pub fn starting_at(instant: Instant) -> Self {
        Self {
            now: Arc::new(ScopedRwLock::new(instant)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.with_write(|now| *now += by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.read()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock;
        let first = clock.now();
        thread::sleep(Duration::from_millis(2));
        let second = clock.now();
        assert!(second >= first);
        assert!(clock.elapsed_since(first) >= Duration::from_millis(2));
    }

    #[test]
    fn elapsed_since_future_instant_saturates() {
        let clock = ManualClock::new();
        let future = clock.now() + Duration::from_secs(5);
        assert_eq!(clock.elapsed_since(future), Duration::ZERO);
    }

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();

        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.now(), start, "manual clock must not follow real time");

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.elapsed_since(start), Duration::from_millis(250));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let start = clock.now();

        handle.advance(Duration::from_secs(1));
        assert_eq!(clock.elapsed_since(start), Duration::from_secs(1));
    }

    #[test]
    fn arc_and_reference_forward_to_inner_clock() {
        let clock = ManualClock::new();
        let shared: Arc<dyn Clock> = Arc::new(clock.clone());
        let by_ref = &clock;

        clock.advance(Duration::from_millis(10));
        assert_eq!(shared.now(), clock.now());
        assert_eq!(by_ref.now(), clock.now());
    }
}
