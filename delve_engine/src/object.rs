//! Object module
//!
//! Interactable things: food and potions, armor, the hook and bed, keys and lamps.

use delve_data::{Id, Light, NO_ID, ObjectDef, ObjectKind};
use serde::{Deserialize, Serialize};

use crate::game::{Location, WorldObject};

/// Anything that can hold objects: a space's floor or a player's pack.
pub trait ObjectHolder {
    fn add_object(&mut self, object_id: Id) -> bool;
    fn remove_object(&mut self, object_id: Id) -> bool;
    fn contains_object(&self, object_id: Id) -> bool;
}

/// An interactable, possibly movable or usable, world item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub id: Id,
    pub name: String,
    pub description: String,
    /// Only [`crate::Game::set_object_location`] may change this.
    pub(crate) location: Location,
    pub movable: bool,
    /// Object this one is gated on; `NO_ID` when none.
    pub dependency: Id,
    /// Link this object opens; `NO_ID` when none.
    pub opens: Id,
    pub illuminate: bool,
    pub turned_on: bool,
    /// The only light level this object can be seen in.
    pub visible_in: Light,
    pub kind: ObjectKind,
}

impl Object {
    pub fn new(id: Id, name: &str) -> Object {
        Object {
            id,
            name: name.to_string(),
            description: String::new(),
            location: Location::Nowhere,
            movable: true,
            dependency: NO_ID,
            opens: NO_ID,
            illuminate: false,
            turned_on: false,
            visible_in: Light::Bright,
            kind: ObjectKind::from_band(id),
        }
    }

    pub fn is_visible_in(&self, light: Light) -> bool {
        self.visible_in == light
    }

    /// True for a light source that is currently lit.
    pub fn is_shining(&self) -> bool {
        self.illuminate && self.turned_on
    }

    /// Record for a save file. Held objects are written with `NO_ID` and listed by inventory records.
    pub fn to_def(&self) -> ObjectDef {
        ObjectDef {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            location: self.location.space_ref().copied().unwrap_or(NO_ID),
            movable: self.movable,
            dependency: self.dependency,
            opens: self.opens,
            illuminate: self.illuminate,
            turned_on: self.turned_on,
            visible_in: self.visible_in,
            kind: Some(self.kind),
        }
    }
}

/// Builds an unplaced object; the registry wires its location afterwards.
impl From<&ObjectDef> for Object {
    fn from(def: &ObjectDef) -> Self {
        Object {
            id: def.id,
            name: def.name.clone(),
            description: def.description.clone(),
            location: Location::Nowhere,
            movable: def.movable,
            dependency: def.dependency,
            opens: def.opens,
            illuminate: def.illuminate,
            turned_on: def.turned_on,
            visible_in: def.visible_in,
            kind: def.resolved_kind(),
        }
    }
}

impl WorldObject for Object {
    fn id(&self) -> Id {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn location(&self) -> Location {
        self.location
    }
}
