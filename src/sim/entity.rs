//! Simulated bodies
//!
//! Plain data records. Behavior lives in the systems that operate on them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combatant::CombatantState;

/// Which side a body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Hostile,
    Projectile,
}

/// Base record for any simulated body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Axis-aligned collision half extents
    pub half_size: Vec2,
    /// Inactive bodies are skipped by every system and removed at end of frame
    pub active: bool,
    pub faction: Faction,
}

impl Entity {
    pub fn new(id: u32, faction: Faction, pos: Vec2, half_size: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            half_size: Vec2::splat(half_size),
            active: true,
            faction,
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.vel = Vec2::ZERO;
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    pub combat: CombatantState,
    /// Grey tint once the run has ended
    pub dimmed: bool,
}

/// A chaser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub body: Entity,
    pub combat: CombatantState,
}

impl Hostile {
    pub fn is_alive(&self) -> bool {
        self.body.active && !self.combat.is_dead()
    }
}

/// A homing auto-attack projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Entity,
    /// Id of the hostile this projectile may hit (lookup only)
    pub target: u32,
    pub expires_at_ms: f64,
    pub damage: i32,
    /// Set once the projectile has delivered its hit
    pub spent: bool,
}

impl Projectile {
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.expires_at_ms
    }
}
