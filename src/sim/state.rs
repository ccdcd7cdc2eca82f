//! Session state and core simulation types
//!
//! Everything one playthrough mutates lives in `SimulationSession`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SimulationClock;
use super::combatant::CombatantState;
use super::entity::{Entity, Faction, Hostile, Player};
use super::progression::{ProgressionController, RunSummary};
use super::projectile;
use super::schedule::Scheduler;
use super::spawn::SpawnDirector;
use super::targeting::TargetingSystem;
use crate::tuning::{PlayerTuning, Tuning};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player died; waiting out the delay before leaving
    GameOver,
    /// Session finished, the presentation layer should show the start screen
    Ended,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { seed: u64, high_score: u64 },
    HostileSpawned { id: u32, pos: Vec2 },
    SpawnSkipped { pos: Vec2 },
    ProjectileFired { id: u32, target: u32 },
    HostileHit { id: u32, hp: i32 },
    HostileKilled { id: u32 },
    PlayerHit { hp: i32, knockback: Vec2 },
    LevelUp { level: u32 },
    GameOver(RunSummary),
    ReturnToMenu,
}

/// Floating "LEVEL UP!" text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelUpBanner {
    pub id: u32,
    /// Where the banner appeared
    pub origin: Vec2,
    pub spawned_ms: f64,
}

impl LevelUpBanner {
    /// Position and opacity at `now_ms`; the banner drifts up while fading out
    pub fn appearance(&self, now_ms: f64, duration_ms: f64, rise: f32) -> (Vec2, f32) {
        let t = if duration_ms > 0.0 {
            ((now_ms - self.spawned_ms) / duration_ms).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        (self.origin - Vec2::new(0.0, rise * t), 1.0 - t)
    }
}

/// Body scale for a given level. Growth starts with the first level-up.
pub fn player_scale(level: u32, tuning: &PlayerTuning) -> f32 {
    if level <= 1 {
        1.0
    } else {
        1.0 + level as f32 * tuning.growth_per_level
    }
}

/// One complete playthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub clock: SimulationClock,
    pub phase: GamePhase,
    pub player: Player,
    /// Live hostiles, ascending id
    pub hostiles: Vec<Hostile>,
    /// In-flight projectiles, ascending id
    pub projectiles: Vec<super::entity::Projectile>,
    pub progression: ProgressionController,
    pub spawner: SpawnDirector,
    pub targeting: TargetingSystem,
    pub scheduler: Scheduler,
    /// Cosmetic only
    pub banners: Vec<LevelUpBanner>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationSession {
    /// Fresh session. `high_score` is the stored best at start.
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let player_pos = Vec2::new(tuning.player.start_x, tuning.player.start_y);
        let player = Player {
            body: Entity::new(0, Faction::Player, player_pos, tuning.player.half_size),
            combat: CombatantState::new(tuning.player.max_hp),
            dimmed: false,
        };
        log::info!("Session started (seed {}, best {})", seed, high_score);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: SimulationClock::new(),
            phase: GamePhase::Playing,
            player,
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            progression: ProgressionController::new(&tuning.progression, high_score),
            spawner: SpawnDirector::new(),
            targeting: TargetingSystem::new(),
            scheduler: Scheduler::new(),
            banners: Vec::new(),
            events: vec![GameEvent::SessionStarted { seed, high_score }],
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    pub fn player_id(&self) -> u32 {
        self.player.body.id
    }

    /// Add a hostile at `pos`. Returns its id.
    pub fn spawn_hostile(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let hostile = Hostile {
            body: Entity::new(id, Faction::Hostile, pos, self.tuning.hostile.half_size),
            combat: CombatantState::new(self.tuning.hostile.max_hp),
        };
        self.hostiles.push(hostile);
        self.push_event(GameEvent::HostileSpawned { id, pos });
        log::debug!("Spawned hostile {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Launch a projectile from the player at hostile `target`
    pub fn fire_at(&mut self, target: u32) -> Option<u32> {
        let target_pos = self.hostile(target).filter(|h| h.is_alive())?.body.pos;
        let id = self.next_entity_id();
        let shot = projectile::launch(
            id,
            self.player.body.pos,
            target,
            target_pos,
            self.clock.now_ms,
            &self.tuning.projectile,
        );
        self.projectiles.push(shot);
        self.push_event(GameEvent::ProjectileFired { id, target });
        log::debug!("Fired projectile {} at hostile {}", id, target);
        Some(id)
    }

    pub fn hostile(&self, id: u32) -> Option<&Hostile> {
        self.hostiles.iter().find(|h| h.body.id == id)
    }

    pub fn hostile_mut(&mut self, id: u32) -> Option<&mut Hostile> {
        self.hostiles.iter_mut().find(|h| h.body.id == id)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resize the player's box for the current level
    pub fn apply_player_scale(&mut self) {
        let scale = player_scale(self.progression.state.level, &self.tuning.player);
        self.player.body.half_size = Vec2::splat(self.tuning.player.half_size * scale);
    }
}
