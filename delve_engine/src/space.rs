//! Space module
//!
//! Rooms of the dungeon, each with one link slot per compass direction and a set of resting objects.

use std::collections::BTreeSet;

use delve_data::{Direction, Id, Light, NO_ID, SpaceDef, TILE_ROWS, is_valid_id};
use serde::{Deserialize, Serialize};

use crate::game::{Location, WorldObject};
use crate::object::ObjectHolder;

/// A node in the world graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub long_description: String,
    /// Base light level, before any carried light source is considered.
    pub light: Light,
    /// Link ids indexed by [`Direction::slot`]; `NO_ID` marks an empty slot.
    pub links: [Id; 4],
    /// Objects resting here. Kept in lockstep with each object's `location`.
    pub(crate) objects: BTreeSet<Id>,
    pub tile: Vec<String>,
}

impl Space {
    pub fn new(id: Id, name: &str) -> Space {
        Space {
            id,
            name: name.to_string(),
            description: String::new(),
            long_description: String::new(),
            light: Light::Bright,
            links: [NO_ID; 4],
            objects: BTreeSet::new(),
            tile: vec![String::new(); TILE_ROWS],
        }
    }

    /// Link id in `dir`, if one is wired.
    pub fn link_toward(&self, dir: Direction) -> Option<Id> {
        let id = self.links[dir.slot()];
        is_valid_id(id).then_some(id)
    }

    /// Ids of the objects resting here, in ascending order.
    pub fn objects(&self) -> impl Iterator<Item = Id> + '_ {
        self.objects.iter().copied()
    }

    pub(crate) fn set_link(&mut self, dir: Direction, link: Id) {
        self.links[dir.slot()] = link;
    }

    pub fn to_def(&self) -> SpaceDef {
        SpaceDef {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            long_description: self.long_description.clone(),
            light: self.light,
            tile: self.tile.clone(),
        }
    }
}

impl From<&SpaceDef> for Space {
    fn from(def: &SpaceDef) -> Self {
        let mut tile = def.tile.clone();
        tile.resize(TILE_ROWS, String::new());
        Space {
            id: def.id,
            name: def.name.clone(),
            description: def.description.clone(),
            long_description: def.long_description.clone(),
            light: def.light,
            links: [NO_ID; 4],
            objects: BTreeSet::new(),
            tile,
        }
    }
}

impl WorldObject for Space {
    fn id(&self) -> Id {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    /// Spaces are the locations, so they are always `Nowhere` themselves.
    fn location(&self) -> Location {
        Location::Nowhere
    }
}

impl ObjectHolder for Space {
    fn add_object(&mut self, object_id: Id) -> bool {
        self.objects.insert(object_id)
    }

    fn remove_object(&mut self, object_id: Id) -> bool {
        self.objects.remove(&object_id)
    }

    fn contains_object(&self, object_id: Id) -> bool {
        self.objects.contains(&object_id)
    }
}
