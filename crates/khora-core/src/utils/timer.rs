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

//! A minimal frame/interval timer used by the application loop and telemetry.

use std::time::{Duration, Instant};

/// A simple stopwatch for measuring elapsed wall-clock time.
///
/// The application loop uses one to compute the per-frame delta time; the
/// telemetry crate uses one to throttle its periodic frame-time log line.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    last: Instant,
}

impl Stopwatch {
    /// Starts a new stopwatch, with its origin at the current instant.
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    /// Returns the time elapsed since the last call to [`Self::lap`] (or
    /// since creation, for the first call), and resets the origin.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }

    /// Returns the time elapsed since the last call to [`Self::lap`] without
    /// resetting the origin.
    pub fn peek(&self) -> Duration {
        Instant::now().duration_since(self.last)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_resets_origin() {
        let mut sw = Stopwatch::new();
        let first = sw.lap();
        let second = sw.lap();
        assert!(first <= Duration::from_secs(1));
        assert!(second <= first + Duration::from_secs(1));
    }
}
