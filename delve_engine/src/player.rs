//! Player -- the adventurer and the pack they carry.
use std::collections::BTreeSet;

use delve_data::{Id, NO_ID, PlayerDef};
use serde::{Deserialize, Serialize};

use crate::game::{Location, WorldObject};
use crate::health::HealthState;
use crate::object::ObjectHolder;

/// Bounded set of object ids owned by one player.
///
/// `add` refuses to grow past `max_objs`, but callers are expected to check [`Inventory::is_full`]
/// first so a failed take never reaches this point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    ids: BTreeSet<Id>,
    max_objs: usize,
}

impl Inventory {
    pub fn with_capacity(max_objs: usize) -> Inventory {
        Inventory {
            ids: BTreeSet::new(),
            max_objs,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_objs
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.max_objs
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.ids.iter().copied()
    }
}

impl ObjectHolder for Inventory {
    fn add_object(&mut self, object_id: Id) -> bool {
        if self.is_full() {
            return false;
        }
        self.ids.insert(object_id)
    }

    fn remove_object(&mut self, object_id: Id) -> bool {
        self.ids.remove(&object_id)
    }

    fn contains_object(&self, object_id: Id) -> bool {
        self.ids.contains(&object_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Id,
    pub name: String,
    pub(crate) location: Location,
    pub health: HealthState,
    pub damage: u32,
    /// Critical hit band on the 0-10 scale.
    pub crit: u8,
    pub(crate) inventory: Inventory,
}

impl Player {
    pub fn new(id: Id, name: &str, max_hp: u32, capacity: usize) -> Player {
        Player {
            id,
            name: name.to_string(),
            location: Location::Nowhere,
            health: HealthState::new_at_max(max_hp),
            damage: 1,
            crit: 0,
            inventory: Inventory::with_capacity(capacity),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn to_def(&self) -> PlayerDef {
        PlayerDef {
            id: self.id,
            name: self.name.clone(),
            location: self.location.space_ref().copied().unwrap_or(NO_ID),
            health: self.health.current_hp(),
            capacity: self.inventory.capacity(),
            max_health: self.health.max_hp(),
            damage: self.damage,
            crit: self.crit,
        }
    }
}

impl From<&PlayerDef> for Player {
    fn from(def: &PlayerDef) -> Self {
        Player {
            id: def.id,
            name: def.name.clone(),
            location: Location::Nowhere,
            health: HealthState::new(def.health, def.max_health.max(def.health)),
            damage: def.damage,
            crit: def.crit,
            inventory: Inventory::with_capacity(def.capacity),
        }
    }
}

impl WorldObject for Player {
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
