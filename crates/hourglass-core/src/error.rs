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

//! Error types for timer construction, timeout assertions, and configuration.

use crate::time::timeout::Timeout;
use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A supplied timeout is negative and not the infinite sentinel.
///
/// Always a caller-input error. It is raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timeout out of range: {value} (expected a non-negative duration or the infinite sentinel)")]
pub struct RangeError {
    value: String,
}

impl RangeError {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The rejected input, rendered for diagnostics.
    pub fn value(&self) -> &str {
        &self.value
    }
}

// Lets infallible conversions (e.g. `Duration` into `Timeout`) share the
// constructors that accept fallible ones.
impl From<Infallible> for RangeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Raised by [`Hourglass::check_timeout`](crate::Hourglass::check_timeout)
/// once the configured timeout has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {elapsed:?} (timeout {timeout})")]
pub struct TimeoutError {
    /// The configured timeout at the moment of the check.
    pub timeout: Timeout,
    /// The elapsed time observed by the check.
    pub elapsed: Duration,
}

/// Errors while loading or saving an [`HourglassConfig`](crate::HourglassConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read hourglass config {path}")]
    ReadFile {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("failed to write hourglass config {path}")]
    WriteFile {
        /// Path of the file that failed to save.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON.
    #[error("invalid hourglass config JSON")]
    Json(#[from] serde_json::Error),

    /// The configuration holds a negative timeout other than the sentinel.
    #[error("invalid timeout in hourglass config")]
    Range(#[from] RangeError),
}
