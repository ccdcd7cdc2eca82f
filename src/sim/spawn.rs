//! Periodic hostile spawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::{ArenaTuning, SpawnTuning};

/// Outcome of one spawn cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnDecision {
    Accepted(Vec2),
    /// Sampled too close to the player; the cycle is skipped
    Rejected(Vec2),
}

/// Interval timer for hostile creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Time accumulated toward the next interval
    pub elapsed_ms: f64,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `delta_ms` and return how many spawn intervals elapsed
    pub fn advance(&mut self, delta_ms: f64, tuning: &SpawnTuning) -> u32 {
        if tuning.interval_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += delta_ms;
        let mut cycles = 0;
        while self.elapsed_ms >= tuning.interval_ms {
            self.elapsed_ms -= tuning.interval_ms;
            cycles += 1;
        }
        cycles
    }

    /// Sample a spawn point over the arena and check it against the player.
    ///
    /// Coordinates are whole units, inclusive of both arena edges.
    pub fn propose<R: Rng>(
        rng: &mut R,
        arena: &ArenaTuning,
        player_pos: Vec2,
        tuning: &SpawnTuning,
    ) -> SpawnDecision {
        let x = rng.random_range(0..=arena.width.max(0.0) as u32) as f32;
        let y = rng.random_range(0..=arena.height.max(0.0) as u32) as f32;
        let pos = Vec2::new(x, y);
        if pos.distance(player_pos) < tuning.min_clearance {
            SpawnDecision::Rejected(pos)
        } else {
            SpawnDecision::Accepted(pos)
        }
    }
}
