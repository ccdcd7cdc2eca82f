//! Monotonic simulation clock

use serde::{Deserialize, Serialize};

/// Model time for one session, advanced once per tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Elapsed model time in milliseconds
    pub now_ms: f64,
    /// Delta applied by the last tick
    pub delta_ms: f64,
    /// Number of ticks taken
    pub frame: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta_ms`. Negative or non-finite deltas count as zero so
    /// time never runs backwards.
    pub fn advance(&mut self, delta_ms: f64) -> f64 {
        let delta = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        self.delta_ms = delta;
        self.now_ms += delta;
        self.frame += 1;
        delta
    }

    /// Last delta in seconds, for velocity integration
    pub fn delta_secs(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }
}
