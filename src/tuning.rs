//! Gameplay tuning
//!
//! Keep this separate from loop constants (`crate::consts`). Every field has a
//! default, so a tuning file only needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Arena bounds (top-left origin, +Y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Player ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub start_x: f32,
    pub start_y: f32,
    pub max_hp: i32,
    /// Per-axis movement speed in units per second
    pub move_speed: f32,
    /// Half the side of the collision box at scale 1
    pub half_size: f32,
    /// Extra body scale per level (scale = 1 + level * growth)
    pub growth_per_level: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_x: 400.0,
            start_y: 300.0,
            max_hp: 100,
            move_speed: 200.0,
            half_size: 16.0,
            growth_per_level: 0.1,
        }
    }
}

/// Hostile chasers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileTuning {
    pub max_hp: i32,
    pub chase_speed: f32,
    pub half_size: f32,
    pub contact_damage: i32,
    /// Knockback speed given to the player on contact
    pub knockback_speed: f32,
    pub xp_reward: u32,
}

impl Default for HostileTuning {
    fn default() -> Self {
        Self {
            max_hp: 10,
            chase_speed: 100.0,
            half_size: 16.0,
            contact_damage: 10,
            knockback_speed: 400.0,
            xp_reward: 20,
        }
    }
}

/// Auto-attack and its projectiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub ttl_ms: f64,
    pub damage: i32,
    pub half_size: f32,
    pub fire_cooldown_ms: f64,
    /// Targets must be strictly closer than this
    pub attack_range: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 400.0,
            ttl_ms: 1000.0,
            damage: 10,
            half_size: 8.0,
            fire_cooldown_ms: 500.0,
            attack_range: 300.0,
        }
    }
}

/// Spawn timer and placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub interval_ms: f64,
    /// Spawns closer than this to the player are skipped
    pub min_clearance: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval_ms: 1000.0,
            min_clearance: 200.0,
        }
    }
}

/// Experience curve and scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    pub first_threshold: u32,
    /// Threshold growth per level, in percent (120 = x1.2, floored)
    pub threshold_growth_percent: u32,
    pub score_per_xp: u64,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            first_threshold: 100,
            threshold_growth_percent: 120,
            score_per_xp: 10,
        }
    }
}

/// Timed cosmetic and transition effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsTuning {
    pub flash_ms: f64,
    pub banner_ms: f64,
    /// Banner spawn offset above the player
    pub banner_offset: f32,
    /// Banner drift over its lifetime
    pub banner_rise: f32,
    pub game_over_delay_ms: f64,
}

impl Default for EffectsTuning {
    fn default() -> Self {
        Self {
            flash_ms: 100.0,
            banner_ms: 1000.0,
            banner_offset: 50.0,
            banner_rise: 50.0,
            game_over_delay_ms: 2000.0,
        }
    }
}

/// Complete gameplay tuning
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub hostile: HostileTuning,
    pub projectile: ProjectileTuning,
    pub spawn: SpawnTuning,
    pub progression: ProgressionTuning,
    pub effects: EffectsTuning,
}

impl Tuning {
    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&text).map_err(|source| TuningError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
