//! Health Module
//!
//! Hit points shared by players and enemies.
use std::cmp;

use serde::{Deserialize, Serialize};

/// Current and maximum hit points of a living entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthState {
    max_hp: u32,
    current_hp: u32,
}
impl HealthState {
    /// Create a `HealthState` at full health.
    pub fn new_at_max(max_hp: u32) -> HealthState {
        HealthState {
            max_hp,
            current_hp: max_hp,
        }
    }

    /// Create a `HealthState` with explicit values. Current health is capped at max.
    pub fn new(current_hp: u32, max_hp: u32) -> HealthState {
        HealthState {
            max_hp,
            current_hp: cmp::min(current_hp, max_hp),
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// Return whether this entity is alive or dead.
    pub fn life_state(&self) -> LifeState {
        if self.current_hp > 0 {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life_state() == LifeState::Alive
    }

    /// Do damage to health. Saturates at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Heal the entity. Saturates at max health.
    pub fn heal(&mut self, amount: u32) {
        self.current_hp = cmp::min(self.max_hp, self.current_hp.saturating_add(amount));
    }

    /// Raise the health ceiling without healing.
    pub fn raise_max(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
    }
}

/// Alive or dead. Zero hit points is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Dead,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_saturates_at_zero() {
        let mut hp = HealthState::new_at_max(3);
        hp.damage(2);
        assert_eq!(hp.current_hp(), 1);
        hp.damage(5);
        assert_eq!(hp.current_hp(), 0);
        assert_eq!(hp.life_state(), LifeState::Dead);
    }

    #[test]
    fn heal_saturates_at_max() {
        let mut hp = HealthState::new(1, 4);
        hp.heal(10);
        assert_eq!(hp.current_hp(), 4);
    }

    #[test]
    fn raising_max_leaves_current_alone() {
        let mut hp = HealthState::new(2, 3);
        hp.raise_max(1);
        assert_eq!(hp.max_hp(), 4);
        assert_eq!(hp.current_hp(), 2);
    }

    #[test]
    fn new_caps_current_at_max() {
        let hp = HealthState::new(9, 5);
        assert_eq!(hp.current_hp(), 5);
    }
}
