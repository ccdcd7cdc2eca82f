//! Homing projectiles
//!
//! A projectile is bound to one target for life. It re-aims at the target
//! every frame, hits it at most once, and otherwise dies of old age.

use glam::Vec2;

use super::combatant::DamageOutcome;
use super::entity::{Entity, Faction, Hostile, Projectile};
use super::physics::overlaps;
use crate::tuning::ProjectileTuning;
use crate::velocity_toward;

/// A delivered projectile hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: u32,
    pub target: u32,
    pub outcome: DamageOutcome,
}

/// Build a projectile at `origin` heading for `target_pos`
pub fn launch(
    id: u32,
    origin: Vec2,
    target: u32,
    target_pos: Vec2,
    now_ms: f64,
    tuning: &ProjectileTuning,
) -> Projectile {
    let mut body = Entity::new(id, Faction::Projectile, origin, tuning.half_size);
    body.vel = velocity_toward(origin, target_pos, tuning.speed);
    Projectile {
        body,
        target,
        expires_at_ms: now_ms + tuning.ttl_ms,
        damage: tuning.damage,
        spent: false,
    }
}

/// Deactivate projectiles whose lifetime is over
pub fn expire(projectiles: &mut [Projectile], now_ms: f64) {
    for p in projectiles.iter_mut().filter(|p| p.body.active) {
        if p.is_expired(now_ms) {
            p.body.deactivate();
        }
    }
}

/// Point each live projectile at its target's current position.
///
/// A projectile whose target is gone keeps its last velocity.
pub fn steer(projectiles: &mut [Projectile], hostiles: &[Hostile], speed: f32) {
    for p in projectiles.iter_mut().filter(|p| p.body.active) {
        if let Some(target) = find_live(hostiles, p.target) {
            let vel = velocity_toward(p.body.pos, target.body.pos, speed);
            if vel != Vec2::ZERO {
                p.body.vel = vel;
            }
        }
    }
}

/// Apply damage for every projectile overlapping its own target.
///
/// Overlaps with other hostiles are ignored. The projectile is spent and
/// deactivated on its first hit, so later frames cannot hit again.
pub fn resolve_hits(projectiles: &mut [Projectile], hostiles: &mut [Hostile]) -> Vec<ProjectileHit> {
    let mut hits = Vec::new();
    for p in projectiles.iter_mut() {
        if !p.body.active || p.spent {
            continue;
        }
        let Some(target) = hostiles
            .iter_mut()
            .find(|h| h.body.id == p.target && h.is_alive())
        else {
            continue;
        };
        if !overlaps(&p.body, &target.body) {
            continue;
        }

        let outcome = target.combat.apply_damage(p.damage);
        if outcome == DamageOutcome::Killed {
            target.body.deactivate();
        }
        p.spent = true;
        p.body.deactivate();
        hits.push(ProjectileHit {
            projectile: p.body.id,
            target: p.target,
            outcome,
        });
    }
    hits
}

fn find_live(hostiles: &[Hostile], id: u32) -> Option<&Hostile> {
    hostiles.iter().find(|h| h.body.id == id && h.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::combatant::CombatantState;

    fn hostile(id: u32, x: f32, y: f32, hp: i32) -> Hostile {
        Hostile {
            body: Entity::new(id, Faction::Hostile, Vec2::new(x, y), 16.0),
            combat: CombatantState::new(hp),
        }
    }

    #[test]
    fn test_launch_aims_at_target() {
        let tuning = ProjectileTuning::default();
        let p = launch(9, Vec2::ZERO, 1, Vec2::new(0.0, 100.0), 250.0, &tuning);
        assert!((p.body.vel - Vec2::new(0.0, 400.0)).length() < 1e-3);
        assert_eq!(p.expires_at_ms, 1250.0);
        assert_eq!(p.damage, 10);
    }

    #[test]
    fn test_hits_only_designated_target() {
        let tuning = ProjectileTuning::default();
        let mut hostiles = vec![hostile(1, 0.0, 0.0, 10), hostile(2, 200.0, 0.0, 10)];
        // Sitting on hostile 1 but aimed at hostile 2
        let mut projectiles = vec![launch(10, Vec2::ZERO, 2, Vec2::new(200.0, 0.0), 0.0, &tuning)];

        assert!(resolve_hits(&mut projectiles, &mut hostiles).is_empty());
        assert_eq!(hostiles[0].combat.hp, 10);
        assert!(projectiles[0].body.active);
    }

    #[test]
    fn test_hit_applies_once() {
        let tuning = ProjectileTuning::default();
        let mut hostiles = vec![hostile(1, 0.0, 0.0, 30)];
        let mut projectiles = vec![launch(10, Vec2::ZERO, 1, Vec2::ZERO, 0.0, &tuning)];

        let hits = resolve_hits(&mut projectiles, &mut hostiles);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].outcome, DamageOutcome::Wounded);

        // Still overlapping on later frames
        for _ in 0..5 {
            assert!(resolve_hits(&mut projectiles, &mut hostiles).is_empty());
        }
        assert_eq!(hostiles[0].combat.hp, 20);
        assert!(!projectiles[0].body.active);
    }

    #[test]
    fn test_dead_target_leaves_projectile_flying() {
        let tuning = ProjectileTuning::default();
        let mut hostiles = vec![hostile(1, 100.0, 0.0, 10)];
        let mut projectiles = vec![launch(10, Vec2::ZERO, 1, Vec2::new(100.0, 0.0), 0.0, &tuning)];
        let vel = projectiles[0].body.vel;

        hostiles[0].combat.apply_damage(10);
        hostiles[0].body.deactivate();
        projectiles[0].body.pos = Vec2::new(100.0, 0.0);

        steer(&mut projectiles, &hostiles, tuning.speed);
        assert!(resolve_hits(&mut projectiles, &mut hostiles).is_empty());
        assert_eq!(projectiles[0].body.vel, vel);
        assert!(projectiles[0].body.active);

        expire(&mut projectiles, 999.0);
        assert!(projectiles[0].body.active);
        expire(&mut projectiles, 1000.0);
        assert!(!projectiles[0].body.active);
    }

    #[test]
    fn test_steer_follows_moving_target() {
        let tuning = ProjectileTuning::default();
        let mut hostiles = vec![hostile(1, 100.0, 0.0, 10)];
        let mut projectiles = vec![launch(10, Vec2::ZERO, 1, Vec2::new(100.0, 0.0), 0.0, &tuning)];
        hostiles[0].body.pos = Vec2::new(0.0, -100.0);
        steer(&mut projectiles, &hostiles, tuning.speed);
        assert!((projectiles[0].body.vel - Vec2::new(0.0, -400.0)).length() < 1e-3);
    }
}
