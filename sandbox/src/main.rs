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

//! Demo: several workers share one hourglass as their common deadline.
//!
//! Usage: `sandbox [config.json]`. Without a config file the hourglass gets a
//! 500 ms timeout.

use anyhow::Result;
use hourglass_core::{CaseFlow, Hourglass, HourglassConfig, Switch, Timeout};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const WORKERS: usize = 3;

fn load_config() -> Result<HourglassConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading hourglass config from {path}");
            Ok(HourglassConfig::from_file(path)?)
        }
        None => Ok(HourglassConfig {
            timeout: Timeout::Finite(Duration::from_millis(500)),
            start_immediately: false,
        }),
    }
}

fn run_worker(id: usize, hourglass: &Hourglass) -> u32 {
    let mut steps = 0;
    while hourglass.check_timeout().is_ok() {
        steps += 1;
        thread::sleep(Duration::from_millis(20 * (id as u64 + 1)));
    }
    steps
}

fn report(id: usize, steps: u32) {
    let mut cases = [
        Switch::case(
            |s: &u32| *s == 0,
            |_| {
                log::warn!("worker {id} never got to run");
                CaseFlow::Break
            },
        ),
        Switch::case(
            |s: &u32| *s >= 10,
            |s| {
                log::info!("worker {id} was busy: {s} steps");
                CaseFlow::FallThrough
            },
        ),
        Switch::case(
            |_: &u32| true,
            |s| {
                log::debug!("worker {id} finished after {s} steps");
                CaseFlow::Break
            },
        ),
    ];
    Switch::evaluate(&steps, &mut cases);
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let hourglass = Arc::new(config.build());
    log::info!("Hourglass ready: {hourglass:?}");

    if config.timeout.is_infinite() {
        anyhow::bail!("the demo needs a finite timeout, got {}", config.timeout);
    }

    hourglass.start();
    let workers: Vec<_> = (0..WORKERS)
        .map(|id| {
            let hourglass = Arc::clone(&hourglass);
            thread::spawn(move || (id, run_worker(id, &hourglass)))
        })
        .collect();

    for worker in workers {
        let (id, steps) = worker
            .join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
        report(id, steps);
    }

    let snapshot = hourglass.snapshot();
    log::info!(
        "Deadline reached after {:?} (timeout {}, remaining {})",
        snapshot.elapsed,
        snapshot.timeout,
        snapshot.remaining
    );

    hourglass.reset();
    Ok(())
}
