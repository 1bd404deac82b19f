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

//! # Hourglass Core
//!
//! A thread-safe countdown timer ([`Hourglass`]) together with the pieces it is
//! built from: a monotonic [`Clock`] abstraction, a pausable [`Stopwatch`] and
//! the [`Timeout`] value type. The [`flow`] module also provides a small
//! predicate/callback dispatch helper ([`Switch`]).

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod flow;
pub mod time;

pub use config::HourglassConfig;
pub use error::{ConfigError, RangeError, TimeoutError};
pub use flow::hourglass::{Hourglass, HourglassSnapshot};
pub use flow::switch::{CaseFlow, Switch, SwitchCase};
pub use time::clock::{Clock, ManualClock, MonotonicClock};
pub use time::stopwatch::Stopwatch;
pub use time::timeout::Timeout;
