//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod combatant;
pub mod entity;
pub mod physics;
pub mod progression;
pub mod projectile;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod targeting;
pub mod tick;

pub use clock::SimulationClock;
pub use collision::{Contact, apply_contact, resolve_contacts};
pub use combatant::{CombatantState, DamageOutcome};
pub use entity::{Entity, Faction, Hostile, Player, Projectile};
pub use progression::{ProgressionController, ProgressionState, RunSummary};
pub use projectile::ProjectileHit;
pub use schedule::{Deferred, Scheduler};
pub use spawn::{SpawnDecision, SpawnDirector};
pub use state::{GameEvent, GamePhase, LevelUpBanner, SimulationSession, player_scale};
pub use targeting::{TargetingSystem, nearest_hostile};
pub use tick::{KeyState, TickInput, tick};
