//! Player / hostile contact resolution
//!
//! Every hostile touching the player this frame deals its contact damage and
//! knocks the player back. Simultaneous contacts are not merged.

use glam::Vec2;

use super::combatant::DamageOutcome;
use super::entity::{Hostile, Player};
use super::physics::{overlaps, separation};
use crate::tuning::HostileTuning;
use crate::{angle_between, from_angle};

/// One resolved contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub hostile: u32,
    /// Velocity written to the player
    pub knockback: Vec2,
    /// Player HP right after this contact
    pub hp: i32,
    pub outcome: DamageOutcome,
}

/// Knock the player away from `hostile_pos` and apply contact damage.
///
/// The knockback replaces the player's velocity instead of adding to it.
pub fn apply_contact(player: &mut Player, hostile_pos: Vec2, tuning: &HostileTuning) -> (Vec2, DamageOutcome) {
    let angle = angle_between(hostile_pos, player.body.pos);
    let knockback = from_angle(angle, tuning.knockback_speed);
    player.body.vel = knockback;
    let outcome = player.combat.apply_damage(tuning.contact_damage);
    (knockback, outcome)
}

/// Resolve every overlap between the player and live hostiles.
///
/// Nothing happens once the session is over, including when the player dies
/// partway through this frame's contacts. Each touching hostile is pushed
/// out of the player's box afterwards.
pub fn resolve_contacts(
    player: &mut Player,
    hostiles: &mut [Hostile],
    tuning: &HostileTuning,
    session_over: bool,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    if session_over {
        return contacts;
    }
    for hostile in hostiles.iter_mut() {
        if !player.body.active || player.combat.is_dead() {
            break;
        }
        if !hostile.is_alive() || !overlaps(&player.body, &hostile.body) {
            continue;
        }

        let (knockback, outcome) = apply_contact(player, hostile.body.pos, tuning);
        hostile.body.pos += separation(&player.body, &hostile.body);
        contacts.push(Contact {
            hostile: hostile.body.id,
            knockback,
            hp: player.combat.hp,
            outcome,
        });
    }
    contacts
}
