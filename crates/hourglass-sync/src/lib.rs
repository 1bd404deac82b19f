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

//! # Hourglass Sync
//!
//! Scoped synchronization building blocks: reader/writer regions whose
//! release is tied to the owning scope, and a run-once release handle for
//! arbitrary cleanup actions.

#![warn(missing_docs)]

pub mod release;
pub mod scoped;

pub use release::ReleaseOnce;
pub use scoped::{AccessMode, ExclusiveScope, ScopedRwLock, SharedScope, UpgradableScope};
