//! Auto-attack target selection and fire-rate gating

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Hostile;
use crate::tuning::ProjectileTuning;

/// Closest living hostile strictly inside `range`.
///
/// Ties keep the first one encountered, i.e. the lowest id.
pub fn nearest_hostile(origin: Vec2, hostiles: &[Hostile], range: f32) -> Option<(u32, f32)> {
    let mut best: Option<(u32, f32)> = None;
    let mut min_dist = range;
    for hostile in hostiles.iter().filter(|h| h.is_alive()) {
        let dist = origin.distance(hostile.body.pos);
        if dist < min_dist {
            min_dist = dist;
            best = Some((hostile.body.id, dist));
        }
    }
    best
}

/// Per-shooter cooldown state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetingSystem {
    pub last_fired_ms: f64,
}

impl TargetingSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&self, now_ms: f64, tuning: &ProjectileTuning) -> bool {
        now_ms - self.last_fired_ms >= tuning.fire_cooldown_ms
    }

    /// Pick a target if the cooldown has elapsed.
    ///
    /// Only a successful pick consumes the cooldown; with nothing in range the
    /// next frame tries again.
    pub fn acquire(
        &mut self,
        now_ms: f64,
        origin: Vec2,
        hostiles: &[Hostile],
        tuning: &ProjectileTuning,
    ) -> Option<u32> {
        if !self.ready(now_ms, tuning) {
            return None;
        }
        let (target, _) = nearest_hostile(origin, hostiles, tuning.attack_range)?;
        self.last_fired_ms = now_ms;
        Some(target)
    }
}
