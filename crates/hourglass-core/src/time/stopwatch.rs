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

//! A pausable stopwatch.

use super::clock::{Clock, MonotonicClock};
use std::time::{Duration, Instant};

/// A pausable stopwatch.
///
/// Time accumulates only between [`start`](Stopwatch::start) and
/// [`stop`](Stopwatch::stop); periods spent stopped are not counted.
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    clock: C,
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl Stopwatch {
    /// Creates a new, stopped Stopwatch on the system monotonic clock.
    /// ## Returns
    /// A Stopwatch with zero elapsed time.
    #[inline]
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }

    /// Creates a Stopwatch on the system monotonic clock and starts it.
    #[inline]
    pub fn start_new() -> Self {
        let mut watch = Self::new();
        watch.start();
        watch
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    /// Creates a new, stopped Stopwatch reading time from `clock`.
    #[inline]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            accumulated: Duration::ZERO,
            started_at: None,
        }
    }

    /// Starts or resumes measuring. Calling it while running changes nothing.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
        }
    }

    /// Stops measuring and keeps the elapsed time. Calling it while stopped
    /// changes nothing.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += self.clock.elapsed_since(started_at);
        }
    }

    /// Stops measuring and clears the elapsed time.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    /// Clears the elapsed time and starts measuring again.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Returns `true` while the stopwatch is measuring.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns the total time measured so far.
    /// ## Arguments
    /// * `&self` - A reference to the Stopwatch instance.
    /// ## Returns
    /// The accumulated time of all completed runs plus the current run, if any.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self.accumulated + self.clock.elapsed_since(started_at),
            None => self.accumulated,
        }
    }

    /// Returns the elapsed time in milliseconds. Saturates at `u64::MAX`.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Returns the elapsed time in microseconds. Saturates at `u64::MAX`.
    #[inline]
    pub fn elapsed_us(&self) -> u64 {
        u64::try_from(self.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    /// Returns the elapsed time in seconds as f64.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}
