use delve_data::{EnemyDef, Id, NO_ID};
use serde::{Deserialize, Serialize};

use crate::game::{Location, WorldObject};
use crate::health::HealthState;

/// A hostile creature. Zero health is terminal; enemies are never removed from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: Id,
    pub name: String,
    pub(crate) location: Location,
    pub health: HealthState,
    pub damage: u32,
    /// Critical hit band on the 0-10 scale.
    pub crit: u8,
}

impl Enemy {
    pub fn new(id: Id, name: &str, health: u32) -> Enemy {
        Enemy {
            id,
            name: name.to_string(),
            location: Location::Nowhere,
            health: HealthState::new_at_max(health),
            damage: 1,
            crit: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn to_def(&self) -> EnemyDef {
        EnemyDef {
            id: self.id,
            name: self.name.clone(),
            location: self.location.space_ref().copied().unwrap_or(NO_ID),
            health: self.health.current_hp(),
            damage: self.damage,
            crit: self.crit,
        }
    }
}

impl From<&EnemyDef> for Enemy {
    fn from(def: &EnemyDef) -> Self {
        Enemy {
            id: def.id,
            name: def.name.clone(),
            location: Location::Nowhere,
            health: HealthState::new_at_max(def.health),
            damage: def.damage,
            crit: def.crit,
        }
    }
}

impl WorldObject for Enemy {
    fn id(&self) -> Id {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.name
    }
    fn location(&self) -> Location {
        self.location
    }
}
