use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier shared by every entity record.
///
/// The leading decimal digit of a positive id names the entity namespace (see [`classify`]).
pub type Id = i64;

/// Reserved "no id" value. Any non-positive id is treated the same way.
pub const NO_ID: Id = -1;

/// Number of text rows in a space's graphic tile.
pub const TILE_ROWS: usize = 5;
/// Maximum characters kept per tile row.
pub const TILE_COLS: usize = 9;

/// Entity namespaces encoded in the leading digit of an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Space,
    Player,
    Object,
    /// Enemies; link ids live in the same leading-digit band.
    Enemy,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Space => write!(f, "space"),
            EntityKind::Player => write!(f, "player"),
            EntityKind::Object => write!(f, "object"),
            EntityKind::Enemy => write!(f, "enemy"),
        }
    }
}

/// Returns true if `id` is a usable (positive) identifier.
pub fn is_valid_id(id: Id) -> bool {
    id > 0
}

/// Leading decimal digit of a positive id, or `None` for `NO_ID` and other non-positive values.
pub fn leading_digit(id: Id) -> Option<u8> {
    if !is_valid_id(id) {
        return None;
    }
    let mut n = id;
    while n >= 10 {
        n /= 10;
    }
    u8::try_from(n).ok()
}

/// Classify an id by its leading digit: 1 space, 2 player, 3 object, 4 enemy.
///
/// ```
/// use delve_data::{EntityKind, classify};
///
/// assert_eq!(classify(11), Some(EntityKind::Space));
/// assert_eq!(classify(3_105), Some(EntityKind::Object));
/// assert_eq!(classify(0), None);
/// assert_eq!(classify(-7), None);
/// ```
pub fn classify(id: Id) -> Option<EntityKind> {
    match leading_digit(id)? {
        1 => Some(EntityKind::Space),
        2 => Some(EntityKind::Player),
        3 => Some(EntityKind::Object),
        4 => Some(EntityKind::Enemy),
        _ => None,
    }
}

/// What an object does when used. Tagged explicitly on each object record and checked
/// against the id band 300-399 (sub-bands of ten) when a world is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Apple,
    Elixir,
    Armor,
    Hook,
    Bed,
    Key,
    Unknown,
}

impl ObjectKind {
    /// The kind implied by the object's id band.
    pub fn from_band(id: Id) -> ObjectKind {
        match id {
            300..=309 => ObjectKind::Apple,
            310..=319 => ObjectKind::Elixir,
            320..=329 => ObjectKind::Armor,
            330..=339 => ObjectKind::Hook,
            340..=349 => ObjectKind::Bed,
            350..=359 => ObjectKind::Key,
            _ => ObjectKind::Unknown,
        }
    }

    /// Tag written to object records.
    pub fn as_tag(self) -> &'static str {
        match self {
            ObjectKind::Apple => "apple",
            ObjectKind::Elixir => "elixir",
            ObjectKind::Armor => "armor",
            ObjectKind::Hook => "hook",
            ObjectKind::Bed => "bed",
            ObjectKind::Key => "key",
            ObjectKind::Unknown => "unknown",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ObjectKind> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "apple" => Some(ObjectKind::Apple),
            "elixir" => Some(ObjectKind::Elixir),
            "armor" => Some(ObjectKind::Armor),
            "hook" => Some(ObjectKind::Hook),
            "bed" => Some(ObjectKind::Bed),
            "key" => Some(ObjectKind::Key),
            "unknown" => Some(ObjectKind::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Compass directions a link can leave a space by. Spaces hold exactly one link slot per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Slot index inside a space's link array (N, E, S, W).
    pub fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Numeric code used in link records (0 N, 1 S, 2 E, 3 W).
    pub fn code(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        match code {
            0 => Some(Direction::North),
            1 => Some(Direction::South),
            2 => Some(Direction::East),
            3 => Some(Direction::West),
            _ => None,
        }
    }

    /// Parse a movement word. "up" and "down" travel the north and south links.
    pub fn from_word(word: &str) -> Option<Direction> {
        match word.trim().to_ascii_lowercase().as_str() {
            "n" | "north" | "u" | "up" => Some(Direction::North),
            "s" | "south" | "d" | "down" => Some(Direction::South),
            "e" | "east" => Some(Direction::East),
            "w" | "west" => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Light level of a space, and the light an object needs to be seen in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Light {
    #[default]
    Bright,
    Dark,
}

impl Light {
    pub fn from_flag(flag: bool) -> Light {
        if flag { Light::Bright } else { Light::Dark }
    }

    pub fn is_bright(self) -> bool {
        self == Light::Bright
    }
}

/// Whether a link can currently be traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStatus {
    Open,
    #[default]
    Closed,
}

impl LinkStatus {
    pub fn from_flag(flag: bool) -> LinkStatus {
        if flag { LinkStatus::Open } else { LinkStatus::Closed }
    }

    pub fn is_open(self) -> bool {
        self == LinkStatus::Open
    }
}

/// Day/night period of the game clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayTime {
    #[default]
    Day,
    Night,
}

impl DayTime {
    /// The opposite period.
    pub fn toggled(self) -> DayTime {
        match self {
            DayTime::Day => DayTime::Night,
            DayTime::Night => DayTime::Day,
        }
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayTime::Day => write!(f, "day"),
            DayTime::Night => write!(f, "night"),
        }
    }
}

/// A room record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDef {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub light: Light,
    /// Exactly [`TILE_ROWS`] rows, each at most [`TILE_COLS`] characters.
    pub tile: Vec<String>,
}

/// An object record. `location` is a space id or `NO_ID`; held objects are listed by
/// [`InventoryDef`] records instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub location: Id,
    pub movable: bool,
    pub dependency: Id,
    pub opens: Id,
    pub illuminate: bool,
    pub turned_on: bool,
    pub visible_in: Light,
    /// Explicit kind tag; `None` means "derive from the id band".
    pub kind: Option<ObjectKind>,
}

impl ObjectDef {
    /// The kind this record resolves to.
    pub fn resolved_kind(&self) -> ObjectKind {
        self.kind.unwrap_or_else(|| ObjectKind::from_band(self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDef {
    pub id: Id,
    pub name: String,
    pub location: Id,
    pub health: u32,
    pub capacity: usize,
    pub max_health: u32,
    pub damage: u32,
    pub crit: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: Id,
    pub name: String,
    pub location: Id,
    pub health: u32,
    pub damage: u32,
    pub crit: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDef {
    pub id: Id,
    pub name: String,
    pub origin: Id,
    pub destination: Id,
    pub direction: Direction,
    pub status: LinkStatus,
}

/// Marks an object as held by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDef {
    pub player: Id,
    pub object: Id,
}

/// Everything a world or save file contains, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDef {
    pub spaces: Vec<SpaceDef>,
    pub objects: Vec<ObjectDef>,
    pub players: Vec<PlayerDef>,
    pub enemies: Vec<EnemyDef>,
    pub links: Vec<LinkDef>,
    pub inventory: Vec<InventoryDef>,
    /// Day/night value; only present in save files.
    pub time: Option<DayTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_leading_digit() {
        assert_eq!(classify(1), Some(EntityKind::Space));
        assert_eq!(classify(11), Some(EntityKind::Space));
        assert_eq!(classify(21), Some(EntityKind::Player));
        assert_eq!(classify(305), Some(EntityKind::Object));
        assert_eq!(classify(41), Some(EntityKind::Enemy));
        assert_eq!(classify(9), None);
        assert_eq!(classify(57), None);
    }

    #[test]
    fn classify_rejects_non_positive_ids() {
        assert_eq!(classify(0), None);
        assert_eq!(classify(NO_ID), None);
        assert_eq!(classify(-31), None);
    }

    #[test]
    fn object_kind_bands() {
        assert_eq!(ObjectKind::from_band(300), ObjectKind::Apple);
        assert_eq!(ObjectKind::from_band(309), ObjectKind::Apple);
        assert_eq!(ObjectKind::from_band(310), ObjectKind::Elixir);
        assert_eq!(ObjectKind::from_band(325), ObjectKind::Armor);
        assert_eq!(ObjectKind::from_band(331), ObjectKind::Hook);
        assert_eq!(ObjectKind::from_band(340), ObjectKind::Bed);
        assert_eq!(ObjectKind::from_band(359), ObjectKind::Key);
        assert_eq!(ObjectKind::from_band(360), ObjectKind::Unknown);
        assert_eq!(ObjectKind::from_band(31), ObjectKind::Unknown);
    }

    #[test]
    fn object_kind_tags_round_trip() {
        for kind in [
            ObjectKind::Apple,
            ObjectKind::Elixir,
            ObjectKind::Armor,
            ObjectKind::Hook,
            ObjectKind::Bed,
            ObjectKind::Key,
            ObjectKind::Unknown,
        ] {
            assert_eq!(ObjectKind::from_tag(kind.as_tag()), Some(kind));
        }
        assert_eq!(ObjectKind::from_tag("sword"), None);
    }

    #[test]
    fn direction_words_and_aliases() {
        assert_eq!(Direction::from_word("North"), Some(Direction::North));
        assert_eq!(Direction::from_word("n"), Some(Direction::North));
        assert_eq!(Direction::from_word("up"), Some(Direction::North));
        assert_eq!(Direction::from_word("D"), Some(Direction::South));
        assert_eq!(Direction::from_word("e"), Some(Direction::East));
        assert_eq!(Direction::from_word("West"), Some(Direction::West));
        assert_eq!(Direction::from_word("sideways"), None);
    }

    #[test]
    fn direction_codes_match_record_layout() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code(1), Some(Direction::South));
        assert_eq!(Direction::from_code(9), None);
    }

    #[test]
    fn day_time_toggle_pairs() {
        assert_eq!(DayTime::Day.toggled(), DayTime::Night);
        assert_eq!(DayTime::Night.toggled().toggled(), DayTime::Night);
    }
}
