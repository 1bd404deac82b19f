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

//! Serializable hourglass configuration.

use crate::error::ConfigError;
use crate::flow::hourglass::Hourglass;
use crate::time::{Clock, MonotonicClock, Timeout, INFINITE_MILLIS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for building an [`Hourglass`].
///
/// In JSON the timeout is written as signed milliseconds, `-1` meaning
/// infinite:
///
/// ```json
/// { "timeout": 1500, "start_immediately": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourglassConfig {
    /// Timeout of the hourglass.
    pub timeout: Timeout,
    /// Start the hourglass as soon as it is built.
    pub start_immediately: bool,
}

// On-disk shape before the timeout is validated.
#[derive(Deserialize)]
#[serde(default)]
struct RawHourglassConfig {
    timeout: i64,
    start_immediately: bool,
}

impl Default for RawHourglassConfig {
    fn default() -> Self {
        Self {
            timeout: INFINITE_MILLIS,
            start_immediately: false,
        }
    }
}

impl Default for HourglassConfig {
    fn default() -> Self {
        Self {
            timeout: Timeout::Infinite,
            start_immediately: false,
        }
    }
}

impl HourglassConfig {
    /// Load a configuration from a JSON string.
    ///
    /// The timeout is read as raw signed milliseconds and validated
    /// afterwards, so an out-of-range value is reported as
    /// [`ConfigError::Range`] rather than as a JSON error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawHourglassConfig = serde_json::from_str(json).map_err(|e| {
            log::warn!("[HourglassConfig] Rejected configuration: {e}");
            ConfigError::Json(e)
        })?;
        let timeout = Timeout::from_millis(raw.timeout).map_err(|e| {
            log::warn!("[HourglassConfig] Rejected configuration: {e}");
            ConfigError::Range(e)
        })?;
        Ok(Self {
            timeout,
            start_immediately: raw.start_immediately,
        })
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build an hourglass on the system monotonic clock.
    pub fn build(&self) -> Hourglass {
        self.build_with_clock(MonotonicClock)
    }

    /// Build an hourglass reading time from `clock`.
    pub fn build_with_clock<C: Clock>(&self, clock: C) -> Hourglass<C> {
        let hourglass = Hourglass::from_parts(self.timeout, clock);
        if self.start_immediately {
            hourglass.start();
        }
        hourglass
    }
}
