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

//! The [`Timeout`] value type: a finite duration or the infinite sentinel.
//!
//! `Duration` cannot be negative, so signed inputs (milliseconds, seconds) go
//! through the fallible constructors here. They accept any non-negative value
//! and the `-1` sentinel for "never time out", and reject everything else with
//! a [`RangeError`].

use crate::error::RangeError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Signed millisecond value that stands for [`Timeout::Infinite`].
pub const INFINITE_MILLIS: i64 = -1;

/// How long an hourglass runs before it times out.
///
/// Ordered so that every finite timeout is shorter than [`Timeout::Infinite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timeout {
    /// Times out once this much time has elapsed.
    Finite(Duration),
    /// Never times out.
    Infinite,
}

impl Timeout {
    /// A timeout that has already elapsed before anything starts.
    pub const ZERO: Timeout = Timeout::Finite(Duration::ZERO);

    /// Builds a timeout from signed milliseconds.
    ///
    /// [`INFINITE_MILLIS`] maps to [`Timeout::Infinite`]; other negative values
    /// are rejected.
    pub fn from_millis(millis: i64) -> Result<Self, RangeError> {
        match millis {
            INFINITE_MILLIS => Ok(Timeout::Infinite),
            m if m < 0 => Err(RangeError::new(format!("{m} ms"))),
            m => Ok(Timeout::Finite(Duration::from_millis(m.unsigned_abs()))),
        }
    }

    /// Builds a timeout from signed, fractional seconds.
    ///
    /// `-1.0` and `f64::INFINITY` map to [`Timeout::Infinite`]; other negative
    /// values, NaN, and values too large for a `Duration` are rejected.
    pub fn from_secs_f64(secs: f64) -> Result<Self, RangeError> {
        if secs == f64::INFINITY || secs == -1.0 {
            return Ok(Timeout::Infinite);
        }
        Duration::try_from_secs_f64(secs)
            .map(Timeout::Finite)
            .map_err(|_| RangeError::new(format!("{secs} s")))
    }

    /// Returns `true` for the infinite sentinel.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Timeout::Infinite)
    }

    /// Returns the finite duration, or `None` for the infinite sentinel.
    #[inline]
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Timeout::Finite(duration) => Some(*duration),
            Timeout::Infinite => None,
        }
    }

    /// Signed milliseconds, with [`INFINITE_MILLIS`] for the infinite sentinel.
    /// Saturates at `i64::MAX`.
    pub fn as_millis(&self) -> i64 {
        match self {
            Timeout::Finite(duration) => i64::try_from(duration.as_millis()).unwrap_or(i64::MAX),
            Timeout::Infinite => INFINITE_MILLIS,
        }
    }

    /// Time left after `elapsed`, clamped at zero. Infinite stays infinite.
    pub fn remaining_after(&self, elapsed: Duration) -> Timeout {
        match self {
            Timeout::Finite(duration) => Timeout::Finite(duration.saturating_sub(elapsed)),
            Timeout::Infinite => Timeout::Infinite,
        }
    }

    /// Returns `true` if `elapsed` has reached this timeout. Never true for
    /// the infinite sentinel.
    pub fn is_exceeded_by(&self, elapsed: Duration) -> bool {
        match self {
            Timeout::Finite(duration) => elapsed >= *duration,
            Timeout::Infinite => false,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::Finite(duration)
    }
}

impl TryFrom<i64> for Timeout {
    type Error = RangeError;

    fn try_from(millis: i64) -> Result<Self, Self::Error> {
        Timeout::from_millis(millis)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::Finite(duration) => write!(f, "{duration:?}"),
            Timeout::Infinite => write!(f, "infinite"),
        }
    }
}

impl Serialize for Timeout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_millis())
    }
}

impl<'de> Deserialize<'de> for Timeout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        Timeout::from_millis(millis).map_err(D::Error::custom)
    }
}
