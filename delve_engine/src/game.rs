//! The entity registry and the rest of the running game state.
//!
//! [`Game`] exclusively owns every space, object, player, enemy and link. Entities are stored in
//! capacity-bounded vectors and looked up by linear scan. Object placement changes only through
//! [`Game::set_object_location`], which keeps an object's `location`, the space object-sets and
//! the inventory in lockstep.
//!
//! The registries can hold several players and enemies, but only the first of each (the
//! "primary" entity) is driven by commands and events.

use std::fmt;

use delve_data::{DayTime, Direction, EntityKind, Id, Light, LinkStatus, WorldDef, classify};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use variantly::Variantly;

use crate::command::CommandTag;
use crate::config::{EngineConfig, Limits};
use crate::dialogue::Dialogue;
use crate::event::{EventRecord, EventRules, WeightedRules};
use crate::object::ObjectHolder;
use crate::{Enemy, Link, Object, Player, Space};

/// Where an object, player or enemy currently is.
///
/// `Inventory` means "carried by the primary player". Consumed objects and dead or unplaced
/// creatures are `Nowhere`.
#[derive(Copy, Debug, Default, Clone, Serialize, Deserialize, Variantly, PartialEq, Eq)]
pub enum Location {
    Space(Id),
    Inventory,
    #[default]
    Nowhere,
}

/// Methods common to every registry entity.
pub trait WorldObject {
    fn id(&self) -> Id;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn location(&self) -> Location;
}

/// Registry failures reported to the loader and to command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{kind} registry is full (capacity {capacity})")]
    Full { kind: &'static str, capacity: usize },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: Id },
    #[error("id {id} is not in the {expected} namespace")]
    WrongNamespace { expected: EntityKind, id: Id },
    #[error("no {kind} with id {id}")]
    UnknownId { kind: &'static str, id: Id },
    #[error("a {kind} cannot be placed in an inventory")]
    InvalidLocation { kind: &'static str },
    #[error("inventory is full")]
    InventoryFull,
    #[error("no player in the game")]
    NoPlayer,
}

/// Complete state of a running game.
pub struct Game {
    spaces: Vec<Space>,
    objects: Vec<Object>,
    players: Vec<Player>,
    enemies: Vec<Enemy>,
    links: Vec<Link>,
    limits: Limits,
    pub(crate) config: EngineConfig,
    pub(crate) rng: StdRng,
    pub(crate) rules: Box<dyn EventRules>,
    pub(crate) last_cmd: Option<CommandTag>,
    pub(crate) last_event: EventRecord,
    pub(crate) inspection: Option<String>,
    pub(crate) time: DayTime,
    pub(crate) dialogue: Dialogue,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("spaces", &self.spaces.len())
            .field("objects", &self.objects.len())
            .field("players", &self.players.len())
            .field("enemies", &self.enemies.len())
            .field("links", &self.links.len())
            .field("rules", &self.rules)
            .field("time", &self.time)
            .field("last_cmd", &self.last_cmd)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Create an empty game. The RNG is seeded once, from `config.seed` or the OS.
    pub fn new(config: EngineConfig) -> Game {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let rules = Box::new(WeightedRules::new(config.events.weights));
        Game::with_parts(config, rng, rules)
    }

    /// Create an empty game with an explicit random source and event selector.
    pub fn with_parts(config: EngineConfig, rng: StdRng, rules: Box<dyn EventRules>) -> Game {
        info!("new, empty game created (event rules: {rules:?})");
        Game {
            spaces: Vec::new(),
            objects: Vec::new(),
            players: Vec::new(),
            enemies: Vec::new(),
            links: Vec::new(),
            limits: config.limits,
            config,
            rng,
            rules,
            last_cmd: None,
            last_event: EventRecord::default(),
            inspection: None,
            time: DayTime::Day,
            dialogue: Dialogue::default(),
        }
    }

    /// Swap the event selector, e.g. for a fixed rule in tests.
    pub fn set_rules(&mut self, rules: Box<dyn EventRules>) {
        self.rules = rules;
    }

    /// Take over every entity and the clock from `fresh`, keeping this game's RNG, rules and config.
    pub(crate) fn replace_world(&mut self, fresh: Game) {
        self.spaces = fresh.spaces;
        self.objects = fresh.objects;
        self.players = fresh.players;
        self.enemies = fresh.enemies;
        self.links = fresh.links;
        self.time = fresh.time;
        self.last_event = EventRecord::default();
        self.inspection = None;
    }

    // ----- adding entities -----

    /// Add a space. Its object set and link slots start empty and are wired by
    /// [`Game::set_object_location`] and [`Game::add_link`].
    ///
    /// # Errors
    /// Wrong id namespace, duplicate id or a full registry.
    pub fn add_space(&mut self, mut space: Space) -> Result<(), RegistryError> {
        admit(
            "space",
            EntityKind::Space,
            space.id,
            self.spaces.iter().map(|s| s.id),
            self.limits.spaces,
        )?;
        space.objects.clear();
        space.links = [delve_data::NO_ID; 4];
        self.spaces.push(space);
        Ok(())
    }

    /// Add an object, initially `Nowhere`.
    ///
    /// # Errors
    /// Wrong id namespace, duplicate id or a full registry.
    pub fn add_object(&mut self, mut object: Object) -> Result<(), RegistryError> {
        admit(
            "object",
            EntityKind::Object,
            object.id,
            self.objects.iter().map(|o| o.id),
            self.limits.objects,
        )?;
        object.location = Location::Nowhere;
        self.objects.push(object);
        Ok(())
    }

    /// Add a player, initially `Nowhere` with an empty inventory. The first player added is primary.
    ///
    /// # Errors
    /// Wrong id namespace, duplicate id or a full registry.
    pub fn add_player(&mut self, mut player: Player) -> Result<(), RegistryError> {
        admit(
            "player",
            EntityKind::Player,
            player.id,
            self.players.iter().map(|p| p.id),
            self.limits.players,
        )?;
        player.location = Location::Nowhere;
        player.inventory = crate::player::Inventory::with_capacity(player.inventory.capacity());
        self.players.push(player);
        Ok(())
    }

    /// Add an enemy, initially `Nowhere`. The first enemy added is primary.
    ///
    /// # Errors
    /// Wrong id namespace, duplicate id or a full registry.
    pub fn add_enemy(&mut self, mut enemy: Enemy) -> Result<(), RegistryError> {
        admit(
            "enemy",
            EntityKind::Enemy,
            enemy.id,
            self.enemies.iter().map(|e| e.id),
            self.limits.enemies,
        )?;
        enemy.location = Location::Nowhere;
        self.enemies.push(enemy);
        Ok(())
    }

    /// Add a link and wire it into its origin's direction slot.
    ///
    /// # Errors
    /// Wrong id namespace, duplicate id, a full registry or a missing origin space.
    pub fn add_link(&mut self, link: Link) -> Result<(), RegistryError> {
        admit(
            "link",
            EntityKind::Enemy,
            link.id,
            self.links.iter().map(|l| l.id),
            self.limits.links,
        )?;
        let origin = self
            .space_mut(link.origin)
            .ok_or(RegistryError::UnknownId {
                kind: "space",
                id: link.origin,
            })?;
        if let Some(previous) = origin.link_toward(link.direction) {
            warn!(
                "link {} replaces link {previous} going {} from space {}",
                link.id, link.direction, link.origin
            );
        }
        origin.set_link(link.direction, link.id);
        self.links.push(link);
        Ok(())
    }

    // ----- lookups -----

    pub fn get_space_by_id(&self, id: Id) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    pub fn get_object_by_id(&self, id: Id) -> Option<&Object> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_player_by_id(&self, id: Id) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_enemy_by_id(&self, id: Id) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_link_by_id(&self, id: Id) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn get_space_by_name(&self, name: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn get_player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn get_enemy_by_name(&self, name: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn get_link_by_name(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name.eq_ignore_ascii_case(name.trim()))
    }

    pub(crate) fn space_mut(&mut self, id: Id) -> Option<&mut Space> {
        self.spaces.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn object_mut(&mut self, id: Id) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub(crate) fn enemy_mut(&mut self, id: Id) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn link_mut(&mut self, id: Id) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == id)
    }

    // ----- the active player and enemy -----

    /// The primary (first added) player.
    pub fn player(&self) -> Option<&Player> {
        self.players.first()
    }

    pub(crate) fn player_mut(&mut self) -> Option<&mut Player> {
        self.players.first_mut()
    }

    /// The primary (first added) enemy.
    pub fn enemy(&self) -> Option<&Enemy> {
        self.enemies.first()
    }

    /// Id of the space the primary player stands in.
    pub fn player_space_id(&self) -> Option<Id> {
        self.player()?.location.space_ref().copied()
    }

    pub fn player_space(&self) -> Option<&Space> {
        self.get_space_by_id(self.player_space_id()?)
    }

    /// True if the primary player carries `object`.
    pub fn player_holds(&self, object: Id) -> bool {
        self.player().is_some_and(|p| p.inventory.contains_object(object))
    }

    /// Alive enemies sharing a space with the primary player, in registry order.
    pub fn enemies_near_player(&self) -> impl Iterator<Item = &Enemy> + '_ {
        let here = self.player_space_id();
        self.enemies
            .iter()
            .filter(move |e| e.is_alive() && here.is_some() && e.location.space_ref().copied() == here)
    }

    /// The link leaving `space` toward `dir`, if any.
    pub fn link_toward(&self, space: Id, dir: Direction) -> Option<&Link> {
        let link_id = self.get_space_by_id(space)?.link_toward(dir)?;
        self.get_link_by_id(link_id)
    }

    /// Light level of `space`: its base light, upgraded to bright while the primary player stands
    /// there holding a lit light source.
    pub fn effective_light(&self, space: Id) -> Light {
        let Some(base) = self.get_space_by_id(space).map(|s| s.light) else {
            return Light::Dark;
        };
        if base.is_bright() || self.player_space_id() != Some(space) {
            return base;
        }
        let carries_light = self.player().is_some_and(|p| {
            p.inventory
                .ids()
                .filter_map(|id| self.get_object_by_id(id))
                .any(Object::is_shining)
        });
        if carries_light { Light::Bright } else { base }
    }

    /// True once the primary player has no health left (or there is no player at all).
    pub fn is_over(&self) -> bool {
        self.player().is_none_or(|p| !p.is_alive())
    }

    // ----- moving entities -----

    /// Move an object, updating its location, the space object-sets and the inventory together.
    ///
    /// The target is validated before anything changes, so on error no state is touched.
    ///
    /// # Errors
    /// Unknown object or space, no player for an inventory target, or a full inventory.
    pub fn set_object_location(&mut self, id: Id, to: Location) -> Result<(), RegistryError> {
        let from = self
            .get_object_by_id(id)
            .map(|o| o.location)
            .ok_or(RegistryError::UnknownId { kind: "object", id })?;
        if from == to {
            return Ok(());
        }
        match to {
            Location::Space(space) => {
                if self.get_space_by_id(space).is_none() {
                    return Err(RegistryError::UnknownId { kind: "space", id: space });
                }
            },
            Location::Inventory => {
                let player = self.player().ok_or(RegistryError::NoPlayer)?;
                if player.inventory.is_full() {
                    return Err(RegistryError::InventoryFull);
                }
            },
            Location::Nowhere => {},
        }

        match from {
            Location::Space(space) => {
                if let Some(space) = self.space_mut(space) {
                    space.remove_object(id);
                }
            },
            Location::Inventory => {
                if let Some(player) = self.player_mut() {
                    player.inventory.remove_object(id);
                }
            },
            Location::Nowhere => {},
        }
        match to {
            Location::Space(space) => {
                if let Some(space) = self.space_mut(space) {
                    space.add_object(id);
                }
            },
            Location::Inventory => {
                if let Some(player) = self.player_mut() {
                    player.inventory.add_object(id);
                }
            },
            Location::Nowhere => {},
        }
        if let Some(object) = self.object_mut(id) {
            object.location = to;
        }
        Ok(())
    }

    /// Move a player to a space (or `Nowhere`).
    ///
    /// # Errors
    /// Unknown player or space, or an `Inventory` target.
    pub fn set_player_location(&mut self, id: Id, to: Location) -> Result<(), RegistryError> {
        self.check_creature_target("player", to)?;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RegistryError::UnknownId { kind: "player", id })?;
        player.location = to;
        Ok(())
    }

    /// Move an enemy to a space (or `Nowhere`).
    ///
    /// # Errors
    /// Unknown enemy or space, or an `Inventory` target.
    pub fn set_enemy_location(&mut self, id: Id, to: Location) -> Result<(), RegistryError> {
        self.check_creature_target("enemy", to)?;
        let enemy = self.enemy_mut(id).ok_or(RegistryError::UnknownId { kind: "enemy", id })?;
        enemy.location = to;
        Ok(())
    }

    /// # Errors
    /// Unknown link.
    pub fn set_link_status(&mut self, id: Id, status: LinkStatus) -> Result<(), RegistryError> {
        let link = self.link_mut(id).ok_or(RegistryError::UnknownId { kind: "link", id })?;
        link.status = status;
        Ok(())
    }

    fn check_creature_target(&self, kind: &'static str, to: Location) -> Result<(), RegistryError> {
        match to {
            Location::Space(space) if self.get_space_by_id(space).is_none() => {
                Err(RegistryError::UnknownId { kind: "space", id: space })
            },
            Location::Inventory => Err(RegistryError::InvalidLocation { kind }),
            _ => Ok(()),
        }
    }

    // ----- read-only views for rendering and saving -----

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_cmd(&self) -> Option<CommandTag> {
        self.last_cmd
    }

    pub fn last_event(&self) -> EventRecord {
        self.last_event
    }

    /// Text set by the last successful INSPECT, cleared at the start of every command.
    pub fn inspection(&self) -> Option<&str> {
        self.inspection.as_deref()
    }

    pub fn time(&self) -> DayTime {
        self.time
    }

    pub fn set_time(&mut self, time: DayTime) {
        self.time = time;
    }

    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    /// Snapshot every live entity in registry order, followed by inventory records and the clock.
    pub fn to_world_def(&self) -> WorldDef {
        let inventory = self
            .players
            .first()
            .map(|p| {
                p.inventory
                    .ids()
                    .map(|object| delve_data::InventoryDef { player: p.id, object })
                    .collect()
            })
            .unwrap_or_default();
        WorldDef {
            spaces: self.spaces.iter().map(Space::to_def).collect(),
            objects: self.objects.iter().map(Object::to_def).collect(),
            players: self.players.iter().map(Player::to_def).collect(),
            enemies: self.enemies.iter().map(Enemy::to_def).collect(),
            links: self.links.iter().map(Link::to_def).collect(),
            inventory,
            time: Some(self.time),
        }
    }
}

/// Shared admission checks for every `add_*`.
fn admit(
    kind: &'static str,
    namespace: EntityKind,
    id: Id,
    mut existing: impl Iterator<Item = Id>,
    capacity: usize,
) -> Result<(), RegistryError> {
    if classify(id) != Some(namespace) {
        return Err(RegistryError::WrongNamespace { expected: namespace, id });
    }
    let mut count = 0;
    if existing.any(|other| {
        count += 1;
        other == id
    }) {
        return Err(RegistryError::DuplicateId { kind, id });
    }
    if count >= capacity {
        return Err(RegistryError::Full { kind, capacity });
    }
    Ok(())
}
