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

use khora_core::utils::timer::Stopwatch;
use std::time::Duration;

/// Tracks per-frame wall-clock time and periodically logs a rolling average
/// frame time and FPS, throttled to `report_interval` so logging doesn't
/// become a cost of its own.
#[derive(Debug)]
pub struct FrameTimer {
    stopwatch: Stopwatch,
    report_interval: Duration,
    since_report: Duration,
    frames_since_report: u32,
    accumulated: Duration,
}

impl FrameTimer {
    /// Creates a timer that logs roughly every `report_interval`.
    pub fn new(report_interval: Duration) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            report_interval,
            since_report: Duration::ZERO,
            frames_since_report: 0,
            accumulated: Duration::ZERO,
        }
    }

    /// Call once per frame, right after the frame's work is done. Returns
    /// the delta time since the previous call, for the caller's own use
    /// (e.g. as the fixed/variable step passed to render systems).
    pub fn tick(&mut self) -> Duration {
        let delta = self.stopwatch.lap();
        self.accumulated += delta;
        self.since_report += delta;
        self.frames_since_report += 1;

        if self.since_report >= self.report_interval && self.frames_since_report > 0 {
            let avg_ms = self.accumulated.as_secs_f64() * 1000.0 / self.frames_since_report as f64;
            let fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
            log::info!("frame time: {avg_ms:.2}ms ({fps:.1} fps over {} frames)", self.frames_since_report);
            self.since_report = Duration::ZERO;
            self.frames_since_report = 0;
            self.accumulated = Duration::ZERO;
        }

        delta
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_returns_a_delta_and_does_not_panic_across_many_frames() {
        let mut timer = FrameTimer::new(Duration::from_millis(1));
        for _ in 0..5 {
            let delta = timer.tick();
            assert!(delta >= Duration::ZERO);
        }
    }
}
