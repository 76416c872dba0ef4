use delve_data::{Direction, Id, LinkDef, LinkStatus};
use serde::{Deserialize, Serialize};

use crate::game::{Location, WorldObject};

/// A directed, statusful edge between two spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: Id,
    pub name: String,
    pub origin: Id,
    pub destination: Id,
    pub direction: Direction,
    pub status: LinkStatus,
}

impl Link {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn to_def(&self) -> LinkDef {
        LinkDef {
            id: self.id,
            name: self.name.clone(),
            origin: self.origin,
            destination: self.destination,
            direction: self.direction,
            status: self.status,
        }
    }
}

impl From<&LinkDef> for Link {
    fn from(def: &LinkDef) -> Self {
        Link {
            id: def.id,
            name: def.name.clone(),
            origin: def.origin,
            destination: def.destination,
            direction: def.direction,
            status: def.status,
        }
    }
}

impl WorldObject for Link {
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
        Location::Space(self.origin)
    }
}
