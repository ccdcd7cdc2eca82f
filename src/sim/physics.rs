//! Minimal arcade physics substrate
//!
//! Velocity integration, arena clamping and axis-aligned overlap. Enough for
//! the simulation to run without a host engine.

use glam::Vec2;

use super::entity::Entity;
use crate::tuning::ArenaTuning;

/// Advance position by velocity over `dt_secs`
#[inline]
pub fn integrate(body: &mut Entity, dt_secs: f32) {
    body.pos += body.vel * dt_secs;
}

/// Keep the whole box inside the arena
pub fn clamp_to_arena(body: &mut Entity, arena: &ArenaTuning) {
    let min = body.half_size;
    let max = Vec2::new(arena.width, arena.height) - body.half_size;
    body.pos = body.pos.clamp(min, max.max(min));
}

/// Whether two boxes overlap (touching edges do not count)
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    let d = (a.pos - b.pos).abs();
    let reach = a.half_size + b.half_size;
    d.x < reach.x && d.y < reach.y
}

/// Minimum translation that moves `mover` out of `fixed` (zero if apart)
pub fn separation(fixed: &Entity, mover: &Entity) -> Vec2 {
    let delta = mover.pos - fixed.pos;
    let reach = fixed.half_size + mover.half_size;
    let pen = reach - delta.abs();
    if pen.x <= 0.0 || pen.y <= 0.0 {
        return Vec2::ZERO;
    }
    if pen.x < pen.y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(pen.x * sign, 0.0)
    } else {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(0.0, pen.y * sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Faction;

    fn body(x: f32, y: f32, half: f32) -> Entity {
        Entity::new(1, Faction::Hostile, Vec2::new(x, y), half)
    }

    #[test]
    fn test_overlap() {
        assert!(overlaps(&body(0.0, 0.0, 16.0), &body(31.0, 0.0, 16.0)));
        assert!(!overlaps(&body(0.0, 0.0, 16.0), &body(32.0, 0.0, 16.0)));
        assert!(!overlaps(&body(0.0, 0.0, 16.0), &body(10.0, 40.0, 16.0)));
    }

    #[test]
    fn test_separation_resolves_overlap() {
        let fixed = body(100.0, 100.0, 16.0);
        let mut mover = body(120.0, 105.0, 16.0);
        let push = separation(&fixed, &mover);
        assert!(push.x > 0.0 && push.y == 0.0);
        mover.pos += push;
        assert!(!overlaps(&fixed, &mover));
    }

    #[test]
    fn test_clamp_to_arena() {
        let arena = ArenaTuning::default();
        let mut b = body(-50.0, 900.0, 16.0);
        clamp_to_arena(&mut b, &arena);
        assert_eq!(b.pos, Vec2::new(16.0, 584.0));
    }

    #[test]
    fn test_integrate() {
        let mut b = body(0.0, 0.0, 1.0);
        b.vel = Vec2::new(200.0, -100.0);
        integrate(&mut b, 0.5);
        assert_eq!(b.pos, Vec2::new(100.0, -50.0));
    }
}
