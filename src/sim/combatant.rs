//! Hit points, damage and death

use serde::{Deserialize, Serialize};

/// Result of applying damage to a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead, nothing changed
    Ignored,
    /// Took damage and survived
    Wounded,
    /// This hit was the killing blow. Reported once per combatant.
    Killed,
}

/// Health state attached to the player and to hostiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantState {
    pub hp: i32,
    pub max_hp: i32,
    /// Cosmetic damage flash, cleared by a scheduled task
    pub flashing: bool,
    dead: bool,
}

impl CombatantState {
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            flashing: false,
            dead: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Subtract `amount` hit points and start the damage flash.
    ///
    /// Crossing zero latches the combatant dead and clamps `hp` to 0. Further
    /// calls return [`DamageOutcome::Ignored`] without touching any field.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        self.hp -= amount.max(0);
        self.flashing = true;
        if self.hp <= 0 {
            self.hp = 0;
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Restore to full health (level-up). No effect on the dead.
    pub fn heal_full(&mut self) {
        if !self.dead {
            self.hp = self.max_hp;
        }
    }
}
