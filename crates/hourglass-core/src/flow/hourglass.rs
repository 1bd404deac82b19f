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

//! A thread-safe countdown timer.
//!
//! An [`Hourglass`] measures elapsed time against a configured [`Timeout`].
//! One control thread may start, stop, and reset it while any number of other
//! threads query it. The configured timeout, the stopwatch, and the running
//! flag live together inside a single [`ScopedRwLock`]:
//! - mutators (`start`, `stop`, `reset`, `reset_to`) take exclusive access,
//! - queries take shared access and derive every answer from one reading of the
//!   stopwatch, so no reader ever sees a half-applied mutation.
//!
//! # States
//!
//! - **Idle**: never started, or freshly reset. Nothing accumulates.
//! - **Running**: started and not yet timed out.
//! - **Stopped**: started, then stopped. Elapsed time is frozen.
//!
//! Timing out is a derived condition: once the elapsed time reaches a finite
//! timeout, `is_running` reads `false` even though the stopwatch keeps
//! accumulating until `stop` or `reset` is called.

use crate::error::{RangeError, TimeoutError};
use crate::time::{Clock, MonotonicClock, Stopwatch, Timeout};
use hourglass_sync::{ReleaseOnce, ScopedRwLock};
use std::fmt;
use std::time::Duration;

/// A consistent view of an [`Hourglass`] taken under a single shared scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourglassSnapshot {
    /// The configured timeout.
    pub timeout: Timeout,
    /// Time accumulated while running. Not clamped to the timeout.
    pub elapsed: Duration,
    /// Started, not stopped, and not yet timed out.
    pub is_running: bool,
    /// A finite timeout has been reached.
    pub is_timed_out: bool,
    /// Time left until the timeout, clamped at zero.
    pub remaining: Timeout,
}

struct HourglassState<C: Clock> {
    timeout: Timeout,
    stopwatch: Stopwatch<C>,
    running: bool,
}

impl<C: Clock> HourglassState<C> {
    fn is_running_after(&self, elapsed: Duration) -> bool {
        self.running && !self.timeout.is_exceeded_by(elapsed)
    }

    fn snapshot(&self) -> HourglassSnapshot {
        let elapsed = self.stopwatch.elapsed();
        HourglassSnapshot {
            timeout: self.timeout,
            elapsed,
            is_running: self.is_running_after(elapsed),
            is_timed_out: self.timeout.is_exceeded_by(elapsed),
            remaining: self.timeout.remaining_after(elapsed),
        }
    }

    // Shared by `reset` and `reset_to` so neither re-enters the lock.
    fn reset(&mut self) {
        self.stopwatch.reset();
        self.running = false;
    }
}

/// A countdown stopwatch for handling a timeout across several steps.
///
/// ```
/// use hourglass_core::Hourglass;
/// use std::time::Duration;
///
/// let hourglass = Hourglass::new(Duration::from_secs(30)).unwrap();
/// hourglass.start();
/// assert!(hourglass.is_running());
/// assert!(hourglass.check_timeout().is_ok());
/// ```
pub struct Hourglass<C: Clock = MonotonicClock> {
    state: ScopedRwLock<HourglassState<C>>,
}

impl Hourglass {
    /// Creates an idle hourglass on the system monotonic clock.
    ///
    /// `timeout` may be a [`Timeout`], a `Duration`, or signed milliseconds
    /// (`-1` for infinite).
    ///
    /// # Errors
    /// Returns [`RangeError`] if `timeout` is negative and not the infinite
    /// sentinel.
    pub fn new<T>(timeout: T) -> Result<Self, RangeError>
    where
        T: TryInto<Timeout>,
        RangeError: From<T::Error>,
    {
        Self::with_clock(timeout, MonotonicClock)
    }
}

impl<C: Clock> Hourglass<C> {
    /// Creates an idle hourglass reading time from `clock`.
    ///
    /// # Errors
    /// Returns [`RangeError`] if `timeout` is negative and not the infinite
    /// sentinel.
    pub fn with_clock<T>(timeout: T, clock: C) -> Result<Self, RangeError>
    where
        T: TryInto<Timeout>,
        RangeError: From<T::Error>,
    {
        let timeout = timeout.try_into()?;
        Ok(Self::from_parts(timeout, clock))
    }

    /// Creates an idle hourglass from an already validated timeout.
    pub fn from_parts(timeout: Timeout, clock: C) -> Self {
        log::debug!("[Hourglass] created with timeout {timeout}");
        Self {
            state: ScopedRwLock::new(HourglassState {
                timeout,
                stopwatch: Stopwatch::with_clock(clock),
                running: false,
            }),
        }
    }

    /// Starts or resumes the hourglass.
    ///
    /// Starting a running hourglass does not restart its measurement.
    /// Returns `self` so creation and start can be chained.
    pub fn start(&self) -> &Self {
        let mut state = self.state.write();
        state.stopwatch.start();
        state.running = true;
        log::debug!(
            "[Hourglass] started at {:?} of {}",
            state.stopwatch.elapsed(),
            state.timeout
        );
        self
    }

    /// Stops the hourglass and freezes its elapsed time.
    ///
    /// Stopping a stopped hourglass changes nothing and never takes exclusive
    /// access.
    pub fn stop(&self) {
        let state = self.state.upgradable_read();
        if !state.running {
            return;
        }

        let mut state = state.upgrade();
        state.stopwatch.stop();
        state.running = false;
        log::debug!(
            "[Hourglass] stopped at {:?} of {}",
            state.stopwatch.elapsed(),
            state.timeout
        );
    }

    /// Stops the hourglass and clears its elapsed time. The configured
    /// timeout is kept. The hourglass is left idle, not restarted.
    pub fn reset(&self) -> &Self {
        let mut state = self.state.write();
        state.reset();
        log::debug!("[Hourglass] reset to {}", state.timeout);
        self
    }

    /// Resets the hourglass and replaces its timeout.
    ///
    /// # Errors
    /// Returns [`RangeError`] if `timeout` is negative and not the infinite
    /// sentinel. The hourglass is left untouched in that case.
    pub fn reset_to<T>(&self, timeout: T) -> Result<&Self, RangeError>
    where
        T: TryInto<Timeout>,
        RangeError: From<T::Error>,
    {
        let timeout = timeout.try_into()?;

        let mut state = self.state.write();
        state.reset();
        state.timeout = timeout;
        log::debug!("[Hourglass] reset to {timeout}");
        Ok(self)
    }

    /// Starts the hourglass and returns a handle that stops it when released
    /// or dropped.
    pub fn run_scoped(&self) -> ReleaseOnce<'_> {
        self.start();
        ReleaseOnce::new(move || self.stop())
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Timeout {
        self.state.with_read(|state| state.timeout)
    }

    /// `true` between `start` and `stop`/`reset`, as long as a finite timeout
    /// has not been reached.
    pub fn is_running(&self) -> bool {
        self.state
            .with_read(|state| state.is_running_after(state.stopwatch.elapsed()))
    }

    /// `true` once the elapsed time reaches a finite timeout. Always `false`
    /// for an infinite timeout.
    pub fn is_timed_out(&self) -> bool {
        self.state
            .with_read(|state| state.timeout.is_exceeded_by(state.stopwatch.elapsed()))
    }

    /// Time left until the timeout, clamped at zero. An infinite timeout is
    /// returned as is.
    pub fn remaining(&self) -> Timeout {
        self.state
            .with_read(|state| state.timeout.remaining_after(state.stopwatch.elapsed()))
    }

    /// Time accumulated while running. Keeps growing past the timeout until
    /// the hourglass is stopped.
    pub fn elapsed(&self) -> Duration {
        self.state.with_read(|state| state.stopwatch.elapsed())
    }

    /// All derived values, computed from a single reading.
    pub fn snapshot(&self) -> HourglassSnapshot {
        self.state.with_read(HourglassState::snapshot)
    }

    /// Fails with [`TimeoutError`] if the hourglass has timed out, otherwise
    /// does nothing.
    ///
    /// # Errors
    /// Returns [`TimeoutError`] once a finite timeout has been reached.
    pub fn check_timeout(&self) -> Result<(), TimeoutError> {
        let snapshot = self.snapshot();
        if snapshot.is_timed_out {
            log::debug!(
                "[Hourglass] timed out after {:?} of {}",
                snapshot.elapsed,
                snapshot.timeout
            );
            return Err(TimeoutError {
                timeout: snapshot.timeout,
                elapsed: snapshot.elapsed,
            });
        }
        Ok(())
    }
}

impl<C: Clock> fmt::Debug for Hourglass<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("Hourglass")
            .field("timeout", &snapshot.timeout)
            .field("elapsed", &snapshot.elapsed)
            .field("is_running", &snapshot.is_running)
            .field("is_timed_out", &snapshot.is_timed_out)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use std::thread;

    fn manual(timeout: Timeout) -> (Hourglass<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Hourglass::from_parts(timeout, clock.clone()), clock)
    }

    fn millis(ms: u64) -> Timeout {
        Timeout::Finite(Duration::from_millis(ms))
    }

    #[test]
    fn hourglass_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Hourglass>();
        assert_send_sync::<Hourglass<ManualClock>>();
    }

    #[test]
    fn not_started_keeps_initial_state() {
        let (hg, clock) = manual(Timeout::Finite(Duration::from_secs(5)));

        for _ in 0..2 {
            assert!(!hg.is_running());
            assert!(!hg.is_timed_out());
            assert_eq!(hg.remaining(), Timeout::Finite(Duration::from_secs(5)));
            assert_eq!(hg.elapsed(), Duration::ZERO);
            clock.advance(Duration::from_millis(100));
        }
    }

    #[test]
    fn construction_accepts_duration_millis_and_timeout() {
        assert_eq!(
            Hourglass::new(Duration::from_millis(10)).unwrap().timeout(),
            millis(10)
        );
        assert_eq!(Hourglass::new(-1_i64).unwrap().timeout(), Timeout::Infinite);
        assert_eq!(Hourglass::new(250_i64).unwrap().timeout(), millis(250));
        assert_eq!(
            Hourglass::new(Timeout::Infinite).unwrap().timeout(),
            Timeout::Infinite
        );
    }

    #[test]
    fn construction_rejects_negative_timeouts() {
        let err = Hourglass::new(-2_i64).unwrap_err();
        assert_eq!(err.value(), "-2 ms");
    }

    #[test]
    fn runs_until_finite_timeout_is_reached() {
        let (hg, clock) = manual(millis(100));

        hg.start();
        assert!(hg.is_running());
        assert!(!hg.is_timed_out());

        clock.advance(Duration::from_millis(60));
        assert!(hg.is_running());
        assert_eq!(hg.remaining(), millis(40));

        clock.advance(Duration::from_millis(90));
        assert!(!hg.is_running(), "timeout flips the running interpretation");
        assert!(hg.is_timed_out());
        assert_eq!(hg.remaining(), Timeout::ZERO);
        assert_eq!(
            hg.elapsed(),
            Duration::from_millis(150),
            "elapsed is not clamped to the timeout"
        );
    }

    #[test]
    fn infinite_timeout_never_times_out() {
        let (hg, clock) = manual(Timeout::Infinite);

        hg.start();
        clock.advance(Duration::from_secs(3600));
        assert!(hg.is_running());
        assert!(!hg.is_timed_out());
        assert_eq!(hg.remaining(), Timeout::Infinite);
        assert_eq!(hg.elapsed(), Duration::from_secs(3600));

        hg.stop();
        clock.advance(Duration::from_secs(10));
        assert!(!hg.is_running());
        assert_eq!(hg.remaining(), Timeout::Infinite);
        assert_eq!(hg.elapsed(), Duration::from_secs(3600));
    }

    #[test]
    fn stop_freezes_elapsed_and_remaining() {
        let (hg, clock) = manual(Timeout::Finite(Duration::from_secs(60)));

        hg.start();
        clock.advance(Duration::from_secs(1));
        hg.stop();
        let before = hg.snapshot();

        clock.advance(Duration::from_millis(100));
        hg.stop();
        assert_eq!(hg.snapshot(), before);
        assert!(!before.is_running);
        assert!(!before.is_timed_out);
        assert_eq!(before.remaining, Timeout::Finite(Duration::from_secs(59)));
    }

    #[test]
    fn repeated_start_does_not_double_count() {
        let (hg, clock) = manual(Timeout::Finite(Duration::from_secs(1)));

        hg.start();
        clock.advance(Duration::from_millis(200));
        hg.start().start();
        clock.advance(Duration::from_millis(200));

        assert_eq!(hg.elapsed(), Duration::from_millis(400));
    }

    #[test]
    fn reset_before_start_changes_nothing() {
        let (hg, _clock) = manual(Timeout::Infinite);
        let before = hg.snapshot();
        hg.reset();
        assert_eq!(hg.snapshot(), before);
    }

    #[test]
    fn reset_to_before_start_only_changes_timeout() {
        let (hg, _clock) = manual(Timeout::Infinite);

        hg.reset_to(Duration::from_secs(5)).unwrap();
        assert!(!hg.is_running());
        assert!(!hg.is_timed_out());
        assert_eq!(hg.remaining(), Timeout::Finite(Duration::from_secs(5)));
        assert_eq!(hg.elapsed(), Duration::ZERO);
    }

    #[test]
    fn reset_while_running_stops_and_clears() {
        let (hg, clock) = manual(millis(200));

        hg.start();
        clock.advance(Duration::from_millis(50));
        hg.reset();
        clock.advance(Duration::from_millis(50));

        assert!(!hg.is_running());
        assert!(!hg.is_timed_out());
        assert_eq!(hg.remaining(), millis(200));
        assert_eq!(hg.elapsed(), Duration::ZERO, "time must not accumulate after reset");
    }

    #[test]
    fn reset_to_while_running_stops_clears_and_replaces_timeout() {
        let (hg, clock) = manual(millis(200));

        hg.start();
        clock.advance(Duration::from_millis(50));
        hg.reset_to(500_i64).unwrap();
        clock.advance(Duration::from_millis(50));

        assert!(!hg.is_running());
        assert!(!hg.is_timed_out());
        assert_eq!(hg.remaining(), millis(500));
        assert_eq!(hg.elapsed(), Duration::ZERO);
    }

    #[test]
    fn reset_while_stopped_clears() {
        let (hg, clock) = manual(millis(200));

        hg.start();
        clock.advance(Duration::from_millis(50));
        hg.stop();
        hg.reset();

        assert!(!hg.is_running());
        assert_eq!(hg.remaining(), millis(200));
        assert_eq!(hg.elapsed(), Duration::ZERO);
    }

    #[test]
    fn rejected_reset_leaves_state_untouched() {
        let (hg, clock) = manual(millis(300));

        hg.start();
        clock.advance(Duration::from_millis(120));
        let before = hg.snapshot();

        assert!(hg.reset_to(-2_i64).is_err());
        assert_eq!(hg.snapshot(), before);
        assert!(hg.is_running(), "a rejected reset must not stop the hourglass");
    }

    #[test]
    fn zero_timeout_is_timed_out_from_construction() {
        let (hg, clock) = manual(Timeout::ZERO);

        assert!(!hg.is_running());
        assert!(hg.is_timed_out());
        assert_eq!(hg.remaining(), Timeout::ZERO);
        assert_eq!(hg.elapsed(), Duration::ZERO);

        hg.start();
        clock.advance(Duration::from_millis(50));
        assert!(!hg.is_running());
        assert!(hg.is_timed_out());
        assert_eq!(hg.remaining(), Timeout::ZERO);
        assert_eq!(hg.elapsed(), Duration::from_millis(50));
    }

    #[test]
    fn check_timeout_only_fails_once_timed_out() {
        let (hg, clock) = manual(millis(100));

        assert_eq!(hg.check_timeout(), Ok(()));
        hg.start();
        clock.advance(Duration::from_millis(99));
        assert_eq!(hg.check_timeout(), Ok(()));
        assert!(hg.is_running(), "a passing check has no effect");

        clock.advance(Duration::from_millis(1));
        let err = hg.check_timeout().unwrap_err();
        assert_eq!(err.timeout, millis(100));
        assert_eq!(err.elapsed, Duration::from_millis(100));
    }

    #[test]
    fn check_timeout_on_zero_timeout_fails_immediately() {
        let hg = Hourglass::new(Duration::ZERO).unwrap();
        assert!(hg.check_timeout().is_err());
    }

    #[test]
    fn run_scoped_stops_on_release() {
        let (hg, clock) = manual(Timeout::Infinite);

        {
            let _run = hg.run_scoped();
            assert!(hg.is_running());
            clock.advance(Duration::from_millis(30));
        }

        assert!(!hg.is_running());
        clock.advance(Duration::from_millis(30));
        assert_eq!(hg.elapsed(), Duration::from_millis(30));

        let run = hg.run_scoped();
        run.release();
        assert!(!hg.is_running());
        run.release();
    }

    #[test]
    fn snapshot_is_internally_consistent() {
        let (hg, clock) = manual(millis(100));
        hg.start();
        clock.advance(Duration::from_millis(30));

        let snapshot = hg.snapshot();
        assert_eq!(
            snapshot,
            HourglassSnapshot {
                timeout: millis(100),
                elapsed: Duration::from_millis(30),
                is_running: true,
                is_timed_out: false,
                remaining: millis(70),
            }
        );
    }

    #[test]
    fn debug_lists_derived_state() {
        let (hg, _clock) = manual(millis(100));
        assert_eq!(
            format!("{hg:?}"),
            "Hourglass { timeout: Finite(100ms), elapsed: 0ns, is_running: false, is_timed_out: false }"
        );
    }

    /// Real-time scenario: 100 ms timeout, 150 ms sleep.
    #[test]
    fn started_with_100ms_timeout_times_out_in_real_time() {
        let hg = Hourglass::new(Duration::from_millis(100)).unwrap();
        hg.start();
        assert!(hg.is_running());

        thread::sleep(Duration::from_millis(150));

        assert!(!hg.is_running());
        assert!(hg.is_timed_out());
        assert_eq!(hg.remaining(), Timeout::ZERO);
        assert!(hg.elapsed() >= Duration::from_millis(150));
    }

    /// Real-time scenario: infinite timeout, 100 ms sleep.
    #[test]
    fn started_with_infinite_timeout_keeps_running_in_real_time() {
        let hg = Hourglass::new(Timeout::Infinite).unwrap();
        hg.start();

        thread::sleep(Duration::from_millis(100));

        assert!(hg.is_running());
        assert!(!hg.is_timed_out());
        assert_eq!(hg.remaining(), Timeout::Infinite);
        assert!(hg.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn remaining_never_increases_while_running() {
        let hg = Hourglass::new(Duration::from_millis(40)).unwrap();
        hg.start();

        let mut previous = hg.remaining();
        for _ in 0..20 {
            thread::sleep(Duration::from_millis(3));
            let current = hg.remaining();
            assert!(current <= previous, "{current} must not exceed {previous}");
            previous = current;
        }
        assert_eq!(hg.remaining(), Timeout::ZERO);
    }
}
