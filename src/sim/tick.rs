//! Per-frame simulation tick
//!
//! Core game loop that advances a session by one variable-length frame.

use glam::Vec2;

use super::collision::resolve_contacts;
use super::combatant::DamageOutcome;
use super::physics::{clamp_to_arena, integrate};
use super::projectile::{self, ProjectileHit};
use super::schedule::Deferred;
use super::spawn::{SpawnDecision, SpawnDirector};
use super::state::{GameEvent, GamePhase, LevelUpBanner, SimulationSession};
use crate::persistence::KeyValueStore;
use crate::velocity_toward;

/// Direction keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction keys, `None` when no keyboard is attached
    pub keys: Option<KeyState>,
    /// Idle/demo mode - autopilot steers away from hostiles
    pub idle_mode: bool,
}

impl TickInput {
    pub fn keys(keys: KeyState) -> Self {
        Self {
            keys: Some(keys),
            idle_mode: false,
        }
    }

    pub fn idle() -> Self {
        Self {
            keys: Some(KeyState::default()),
            idle_mode: true,
        }
    }
}

/// Advance the session by `delta_ms` of model time.
///
/// `store` receives the final score if the player dies this frame.
pub fn tick(session: &mut SimulationSession, input: &TickInput, delta_ms: f64, store: &mut dyn KeyValueStore) {
    let delta_ms = session.clock.advance(delta_ms);

    // Ended sessions are frozen; a finished run only waits on its timers
    match session.phase {
        GamePhase::Ended => return,
        GamePhase::GameOver => {
            run_deferred(session);
            return;
        }
        GamePhase::Playing => {}
    }

    let dt = session.clock.delta_secs();
    step_bodies(session, dt);

    // Idle mode picks keys for the player
    let keys = if input.idle_mode {
        input.keys.map(|_| autopilot_keys(session))
    } else {
        input.keys
    };

    if let Some(keys) = keys {
        apply_movement(session, keys);
    }
    steer_hostiles(session);
    spawn_hostiles(session, delta_ms);
    if keys.is_some() {
        auto_attack(session);
    }
    update_projectiles(session);
    resolve_player_contacts(session, store);
    run_deferred(session);
    remove_inactive(session);
}

/// Integrate velocities and keep bodies inside the arena
fn step_bodies(session: &mut SimulationSession, dt: f32) {
    let arena = session.tuning.arena;
    if session.player.body.active {
        integrate(&mut session.player.body, dt);
        clamp_to_arena(&mut session.player.body, &arena);
    }
    for hostile in session.hostiles.iter_mut().filter(|h| h.body.active) {
        integrate(&mut hostile.body, dt);
        clamp_to_arena(&mut hostile.body, &arena);
    }
    for p in session.projectiles.iter_mut().filter(|p| p.body.active) {
        integrate(&mut p.body, dt);
    }
}

/// Keys set velocity from rest each frame. Left beats right, up beats down.
fn apply_movement(session: &mut SimulationSession, keys: KeyState) {
    let speed = session.tuning.player.move_speed;
    let mut vel = Vec2::ZERO;
    if keys.left {
        vel.x = -speed;
    } else if keys.right {
        vel.x = speed;
    }
    if keys.up {
        vel.y = -speed;
    } else if keys.down {
        vel.y = speed;
    }
    session.player.body.vel = vel;
}

fn steer_hostiles(session: &mut SimulationSession) {
    if !session.player.body.active {
        return;
    }
    let target = session.player.body.pos;
    let speed = session.tuning.hostile.chase_speed;
    for hostile in session.hostiles.iter_mut().filter(|h| h.is_alive()) {
        hostile.body.vel = velocity_toward(hostile.body.pos, target, speed);
    }
}

fn spawn_hostiles(session: &mut SimulationSession, delta_ms: f64) {
    let cycles = session.spawner.advance(delta_ms, &session.tuning.spawn);
    for _ in 0..cycles {
        if session.is_over() {
            break;
        }
        let decision = SpawnDirector::propose(
            &mut session.rng,
            &session.tuning.arena,
            session.player.body.pos,
            &session.tuning.spawn,
        );
        match decision {
            SpawnDecision::Accepted(pos) => {
                session.spawn_hostile(pos);
            }
            SpawnDecision::Rejected(pos) => {
                session.push_event(GameEvent::SpawnSkipped { pos });
            }
        }
    }
}

fn auto_attack(session: &mut SimulationSession) {
    if session.is_over() || !session.player.body.active {
        return;
    }
    let target = session.targeting.acquire(
        session.clock.now_ms,
        session.player.body.pos,
        &session.hostiles,
        &session.tuning.projectile,
    );
    if let Some(target) = target {
        session.fire_at(target);
    }
}

fn update_projectiles(session: &mut SimulationSession) {
    let now = session.clock.now_ms;
    projectile::expire(&mut session.projectiles, now);
    projectile::steer(
        &mut session.projectiles,
        &session.hostiles,
        session.tuning.projectile.speed,
    );
    let hits = projectile::resolve_hits(&mut session.projectiles, &mut session.hostiles);
    for hit in hits {
        on_projectile_hit(session, hit);
    }
}

fn on_projectile_hit(session: &mut SimulationSession, hit: ProjectileHit) {
    match hit.outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Wounded => {
            let hp = session.hostile(hit.target).map_or(0, |h| h.combat.hp);
            session.push_event(GameEvent::HostileHit { id: hit.target, hp });
            schedule_flash_clear(session, hit.target);
        }
        DamageOutcome::Killed => {
            session.push_event(GameEvent::HostileHit { id: hit.target, hp: 0 });
            on_hostile_killed(session, hit.target);
        }
    }
}

/// Kill reward: experience, and a full heal plus banner per level gained
fn on_hostile_killed(session: &mut SimulationSession, id: u32) {
    log::debug!("Hostile {} killed", id);
    session.push_event(GameEvent::HostileKilled { id });

    let reward = session.tuning.hostile.xp_reward;
    let gained = session
        .progression
        .award_xp(reward, &session.tuning.progression);
    if gained == 0 {
        return;
    }

    let top = session.progression.state.level;
    for level in (top + 1 - gained)..=top {
        session.player.combat.heal_full();
        spawn_banner(session);
        session.push_event(GameEvent::LevelUp { level });
    }
    session.apply_player_scale();
}

fn spawn_banner(session: &mut SimulationSession) {
    let id = session.next_entity_id();
    let now = session.clock.now_ms;
    let origin = session.player.body.pos - Vec2::new(0.0, session.tuning.effects.banner_offset);
    session.banners.push(LevelUpBanner {
        id,
        origin,
        spawned_ms: now,
    });
    let delay = session.tuning.effects.banner_ms;
    session
        .scheduler
        .schedule(now, delay, None, Deferred::RemoveBanner { banner: id });
}

fn schedule_flash_clear(session: &mut SimulationSession, entity: u32) {
    let now = session.clock.now_ms;
    let delay = session.tuning.effects.flash_ms;
    session
        .scheduler
        .schedule(now, delay, Some(entity), Deferred::ClearFlash { entity });
}

fn resolve_player_contacts(session: &mut SimulationSession, store: &mut dyn KeyValueStore) {
    let over = session.is_over();
    let contacts = resolve_contacts(
        &mut session.player,
        &mut session.hostiles,
        &session.tuning.hostile,
        over,
    );
    let player_id = session.player_id();
    for contact in contacts {
        session.push_event(GameEvent::PlayerHit {
            hp: contact.hp,
            knockback: contact.knockback,
        });
        match contact.outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded => schedule_flash_clear(session, player_id),
            DamageOutcome::Killed => on_player_death(session, store),
        }
    }
}

/// Switch to game over, record the score and schedule the return to menu
pub(crate) fn on_player_death(session: &mut SimulationSession, store: &mut dyn KeyValueStore) {
    let Some(summary) = session.progression.on_player_death(store) else {
        return;
    };
    session.phase = GamePhase::GameOver;
    session.player.body.deactivate();
    session.player.combat.flashing = false;
    session.player.dimmed = true;
    session.push_event(GameEvent::GameOver(summary));

    let now = session.clock.now_ms;
    let delay = session.tuning.effects.game_over_delay_ms;
    session
        .scheduler
        .schedule(now, delay, None, Deferred::ReturnToMenu);
}

fn run_deferred(session: &mut SimulationSession) {
    let player_id = session.player_id();
    for task in session.scheduler.take_due(session.clock.now_ms) {
        match task {
            Deferred::ClearFlash { entity } if entity == player_id => {
                session.player.combat.flashing = false;
            }
            Deferred::ClearFlash { entity } => {
                if let Some(h) = session.hostile_mut(entity) {
                    h.combat.flashing = false;
                }
            }
            Deferred::RemoveBanner { banner } => {
                session.banners.retain(|b| b.id != banner);
            }
            Deferred::ReturnToMenu => {
                session.phase = GamePhase::Ended;
                session.push_event(GameEvent::ReturnToMenu);
                log::info!("Returning to start screen");
            }
        }
    }
}

/// Drop inactive bodies and any tasks they own
fn remove_inactive(session: &mut SimulationSession) {
    let removed: Vec<u32> = session
        .hostiles
        .iter()
        .filter(|h| !h.body.active)
        .map(|h| h.body.id)
        .collect();
    for id in removed {
        session.scheduler.cancel_owner(id);
    }
    session.hostiles.retain(|h| h.body.active);
    session.projectiles.retain(|p| p.body.active);
}

/// Keys that move the player away from the nearest hostile, or back toward
/// the middle of the arena when nothing is around
fn autopilot_keys(session: &SimulationSession) -> KeyState {
    const WALL_MARGIN: f32 = 60.0;
    const CENTER_SLACK: f32 = 40.0;

    let arena = session.tuning.arena;
    let center = Vec2::new(arena.width / 2.0, arena.height / 2.0);
    let pos = session.player.body.pos;

    let threat = session
        .hostiles
        .iter()
        .filter(|h| h.is_alive())
        .min_by(|a, b| {
            a.body
                .pos
                .distance_squared(pos)
                .partial_cmp(&b.body.pos.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    // Desired direction on each axis: -1, 0 or 1
    let mut dir = match threat {
        Some(h) => (pos - h.body.pos).signum(),
        None => {
            let to_center = center - pos;
            Vec2::new(
                if to_center.x.abs() > CENTER_SLACK { to_center.x.signum() } else { 0.0 },
                if to_center.y.abs() > CENTER_SLACK { to_center.y.signum() } else { 0.0 },
            )
        }
    };

    // Cornered on an axis: head back toward the middle instead
    if pos.x < WALL_MARGIN || pos.x > arena.width - WALL_MARGIN {
        dir.x = (center.x - pos.x).signum();
    }
    if pos.y < WALL_MARGIN || pos.y > arena.height - WALL_MARGIN {
        dir.y = (center.y - pos.y).signum();
    }

    KeyState {
        left: dir.x < 0.0,
        right: dir.x > 0.0,
        up: dir.y < 0.0,
        down: dir.y > 0.0,
    }
}
