//! Line-oriented record format shared by world files and save files.
//!
//! Each record is one line: a tag (`#s:`, `#o:`, `#p:`, `#e:`, `#l:`, `#i:`, `#t:`) followed by
//! `|`-delimited fields and a trailing `|`. Lines that carry no known tag are ignored, so
//! comments and blank lines are free.

use std::str::FromStr;

use thiserror::Error;

use crate::defs::{
    DayTime, Direction, EnemyDef, Id, InventoryDef, Light, LinkDef, LinkStatus, ObjectDef, ObjectKind, PlayerDef,
    SpaceDef, TILE_COLS, TILE_ROWS, WorldDef,
};

pub const SPACE_TAG: &str = "#s:";
pub const OBJECT_TAG: &str = "#o:";
pub const PLAYER_TAG: &str = "#p:";
pub const ENEMY_TAG: &str = "#e:";
pub const LINK_TAG: &str = "#l:";
pub const INVENTORY_TAG: &str = "#i:";
pub const TIME_TAG: &str = "#t:";

const DELIMITER: char = '|';

/// Problems found while reading a record line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("line {line}: '{tag}' record is missing field '{field}'")]
    MissingField {
        line: usize,
        tag: &'static str,
        field: &'static str,
    },
    #[error("line {line}: field '{field}' has invalid value '{value}'")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: '{tag}' record is not terminated by '|'")]
    Unterminated { line: usize, tag: &'static str },
}

/// Cursor over the fields of a single record.
struct Fields<'a> {
    line: usize,
    tag: &'static str,
    parts: std::str::Split<'a, char>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, tag: &'static str, body: &'a str) -> Result<Self, RecordError> {
        let Some(body) = body.strip_suffix(DELIMITER) else {
            return Err(RecordError::Unterminated { line, tag });
        };
        Ok(Self {
            line,
            tag,
            parts: body.split(DELIMITER),
        })
    }

    fn text(&mut self, field: &'static str) -> Result<&'a str, RecordError> {
        self.parts.next().ok_or(RecordError::MissingField {
            line: self.line,
            tag: self.tag,
            field,
        })
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.parts.next()
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T, RecordError> {
        let raw = self.text(field)?;
        self.parse(field, raw)
    }

    fn optional_number<T: FromStr>(&mut self, field: &'static str) -> Result<Option<T>, RecordError> {
        match self.optional() {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => self.parse(field, raw).map(Some),
        }
    }

    fn flag(&mut self, field: &'static str) -> Result<bool, RecordError> {
        let value: u8 = self.number(field)?;
        self.to_flag(field, value)
    }

    fn optional_flag(&mut self, field: &'static str) -> Result<Option<bool>, RecordError> {
        match self.optional_number::<u8>(field)? {
            None => Ok(None),
            Some(value) => self.to_flag(field, value).map(Some),
        }
    }

    fn to_flag(&self, field: &'static str, value: u8) -> Result<bool, RecordError> {
        match value {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(self.invalid(field, &other.to_string())),
        }
    }

    fn parse<T: FromStr>(&self, field: &'static str, raw: &str) -> Result<T, RecordError> {
        raw.trim().parse::<T>().map_err(|_| self.invalid(field, raw))
    }

    fn invalid(&self, field: &'static str, value: &str) -> RecordError {
        RecordError::InvalidValue {
            line: self.line,
            field,
            value: value.to_string(),
        }
    }
}

/// Parse a complete world or save file.
///
/// # Errors
/// Returns the first malformed record encountered.
///
/// ```
/// let text = "#s:11|Cave|A cave.|Damp walls.|1|a|b|c|d|e|\n# comment\n";
/// let world = delve_data::parse_world(text).unwrap();
/// assert_eq!(world.spaces.len(), 1);
/// assert_eq!(world.spaces[0].name, "Cave");
/// ```
pub fn parse_world(text: &str) -> Result<WorldDef, RecordError> {
    let mut world = WorldDef::default();
    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_end_matches(['\r', '\n']);
        if let Some(body) = line.strip_prefix(SPACE_TAG) {
            world.spaces.push(parse_space(line_no, body)?);
        } else if let Some(body) = line.strip_prefix(OBJECT_TAG) {
            world.objects.push(parse_object(line_no, body)?);
        } else if let Some(body) = line.strip_prefix(PLAYER_TAG) {
            world.players.push(parse_player(line_no, body)?);
        } else if let Some(body) = line.strip_prefix(ENEMY_TAG) {
            world.enemies.push(parse_enemy(line_no, body)?);
        } else if let Some(body) = line.strip_prefix(LINK_TAG) {
            world.links.push(parse_link(line_no, body)?);
        } else if let Some(body) = line.strip_prefix(INVENTORY_TAG) {
            world.inventory.push(parse_inventory(line_no, body)?);
        } else if let Some(body) = line.strip_prefix(TIME_TAG) {
            world.time = Some(parse_time(line_no, body)?);
        }
    }
    Ok(world)
}

fn parse_space(line: usize, body: &str) -> Result<SpaceDef, RecordError> {
    let mut fields = Fields::new(line, SPACE_TAG, body)?;
    let id = fields.number("id")?;
    let name = fields.text("name")?.to_string();
    let description = fields.text("description")?.to_string();
    let long_description = fields.text("long description")?.to_string();
    let light = Light::from_flag(fields.flag("light")?);
    let mut tile = Vec::with_capacity(TILE_ROWS);
    for _ in 0..TILE_ROWS {
        let row = fields.text("tile row")?;
        tile.push(row.chars().take(TILE_COLS).collect());
    }
    Ok(SpaceDef {
        id,
        name,
        description,
        long_description,
        light,
        tile,
    })
}

fn parse_object(line: usize, body: &str) -> Result<ObjectDef, RecordError> {
    let mut fields = Fields::new(line, OBJECT_TAG, body)?;
    let id = fields.number("id")?;
    let name = fields.text("name")?.to_string();
    let description = fields.text("description")?.to_string();
    let location = fields.number("location")?;
    let movable = fields.flag("movable")?;
    let dependency = fields.number("dependency")?;
    let opens = fields.number("opens")?;
    let illuminate = fields.flag("illuminate")?;
    let turned_on = fields.flag("turned on")?;
    // trailing fields are optional so older nine-field records still load
    let visible_in = fields.optional_flag("visible in")?.map_or(Light::Bright, Light::from_flag);
    let kind = match fields.optional().map(str::trim) {
        None | Some("") => None,
        Some(tag) => Some(ObjectKind::from_tag(tag).ok_or_else(|| fields.invalid("kind", tag))?),
    };
    Ok(ObjectDef {
        id,
        name,
        description,
        location,
        movable,
        dependency,
        opens,
        illuminate,
        turned_on,
        visible_in,
        kind,
    })
}

fn parse_player(line: usize, body: &str) -> Result<PlayerDef, RecordError> {
    let mut fields = Fields::new(line, PLAYER_TAG, body)?;
    let id = fields.number("id")?;
    let name = fields.text("name")?.to_string();
    let location = fields.number("location")?;
    let health = fields.number("health")?;
    let capacity = fields.number("inventory capacity")?;
    let max_health = fields.optional_number("max health")?.unwrap_or(health);
    let damage = fields.optional_number("damage")?.unwrap_or(1);
    let crit = fields.optional_number("crit")?.unwrap_or(0);
    Ok(PlayerDef {
        id,
        name,
        location,
        health,
        capacity,
        max_health,
        damage,
        crit,
    })
}

fn parse_enemy(line: usize, body: &str) -> Result<EnemyDef, RecordError> {
    let mut fields = Fields::new(line, ENEMY_TAG, body)?;
    let id = fields.number("id")?;
    let name = fields.text("name")?.to_string();
    let location = fields.number("location")?;
    let health = fields.number("health")?;
    let damage = fields.optional_number("damage")?.unwrap_or(1);
    let crit = fields.optional_number("crit")?.unwrap_or(0);
    Ok(EnemyDef {
        id,
        name,
        location,
        health,
        damage,
        crit,
    })
}

fn parse_link(line: usize, body: &str) -> Result<LinkDef, RecordError> {
    let mut fields = Fields::new(line, LINK_TAG, body)?;
    let id = fields.number("id")?;
    let name = fields.text("name")?.to_string();
    let origin = fields.number("origin")?;
    let destination = fields.number("destination")?;
    let code: u8 = fields.number("direction")?;
    let direction = Direction::from_code(code).ok_or_else(|| fields.invalid("direction", &code.to_string()))?;
    let status = LinkStatus::from_flag(fields.flag("status")?);
    Ok(LinkDef {
        id,
        name,
        origin,
        destination,
        direction,
        status,
    })
}

fn parse_inventory(line: usize, body: &str) -> Result<InventoryDef, RecordError> {
    let mut fields = Fields::new(line, INVENTORY_TAG, body)?;
    Ok(InventoryDef {
        player: fields.number("player")?,
        object: fields.number("object")?,
    })
}

fn parse_time(line: usize, body: &str) -> Result<DayTime, RecordError> {
    let mut fields = Fields::new(line, TIME_TAG, body)?;
    Ok(if fields.flag("night")? { DayTime::Night } else { DayTime::Day })
}

/// Strip characters that would break the record layout out of free text.
fn clean(text: &str) -> String {
    text.chars()
        .map(|c| if c == DELIMITER || c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn bit(flag: bool) -> u8 {
    u8::from(flag)
}

pub fn format_space(space: &SpaceDef) -> String {
    let mut out = format!(
        "{SPACE_TAG}{}|{}|{}|{}|{}|",
        space.id,
        clean(&space.name),
        clean(&space.description),
        clean(&space.long_description),
        bit(space.light.is_bright())
    );
    for row in 0..TILE_ROWS {
        let text = space.tile.get(row).map_or("", String::as_str);
        out.push_str(&clean(text));
        out.push('|');
    }
    out
}

pub fn format_object(object: &ObjectDef) -> String {
    format!(
        "{OBJECT_TAG}{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|",
        object.id,
        clean(&object.name),
        clean(&object.description),
        object.location,
        bit(object.movable),
        object.dependency,
        object.opens,
        bit(object.illuminate),
        bit(object.turned_on),
        bit(object.visible_in.is_bright()),
        object.kind.map_or("", ObjectKind::as_tag)
    )
}

pub fn format_player(player: &PlayerDef) -> String {
    format!(
        "{PLAYER_TAG}{}|{}|{}|{}|{}|{}|{}|{}|",
        player.id,
        clean(&player.name),
        player.location,
        player.health,
        player.capacity,
        player.max_health,
        player.damage,
        player.crit
    )
}

pub fn format_enemy(enemy: &EnemyDef) -> String {
    format!(
        "{ENEMY_TAG}{}|{}|{}|{}|{}|{}|",
        enemy.id,
        clean(&enemy.name),
        enemy.location,
        enemy.health,
        enemy.damage,
        enemy.crit
    )
}

pub fn format_link(link: &LinkDef) -> String {
    format!(
        "{LINK_TAG}{}|{}|{}|{}|{}|{}|",
        link.id,
        clean(&link.name),
        link.origin,
        link.destination,
        link.direction.code(),
        bit(link.status.is_open())
    )
}

pub fn format_inventory(entry: &InventoryDef) -> String {
    format!("{INVENTORY_TAG}{}|{}|", entry.player, entry.object)
}

pub fn format_time(time: DayTime) -> String {
    format!("{TIME_TAG}{}|", bit(time == DayTime::Night))
}

/// Write every record of `world` in registry order: spaces, objects, players, enemies, links,
/// inventory, then the clock.
pub fn format_world(world: &WorldDef) -> String {
    let mut out = String::new();
    let lines = world
        .spaces
        .iter()
        .map(format_space)
        .chain(world.objects.iter().map(format_object))
        .chain(world.players.iter().map(format_player))
        .chain(world.enemies.iter().map(format_enemy))
        .chain(world.links.iter().map(format_link))
        .chain(world.inventory.iter().map(format_inventory))
        .chain(world.time.map(format_time));
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::NO_ID;

    const SAMPLE: &str = "\
# a tiny world
#s:11|Entrance|The way in.|A draughty hall of stone.|1|  +--+   |  |  |   |  +--+   |         |         |
#s:12|Cellar|Below.|Nothing but dust.|0|.........|.........|.........|.........|.........|
#o:301|apple|A red apple.|11|1|-1|-1|0|0|1|apple|
#o:351|key|A small key.|-1|1|-1|41|0|0|
#p:21|Ant|11|3|2|5|1|0|
#e:41|Spider|12|3|
#l:41|trapdoor|11|12|1|0|
#i:21|351|
#t:1|
";

    #[test]
    fn parses_each_record_kind() {
        let world = parse_world(SAMPLE).unwrap();
        assert_eq!(world.spaces.len(), 2);
        assert_eq!(world.objects.len(), 2);
        assert_eq!(world.players.len(), 1);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.links.len(), 1);
        assert_eq!(world.inventory, vec![InventoryDef { player: 21, object: 351 }]);
        assert_eq!(world.time, Some(DayTime::Night));

        let cellar = &world.spaces[1];
        assert_eq!(cellar.light, Light::Dark);
        assert_eq!(cellar.tile.len(), TILE_ROWS);

        let link = &world.links[0];
        assert_eq!(link.direction, Direction::South);
        assert_eq!(link.status, LinkStatus::Closed);
    }

    #[test]
    fn short_records_take_defaults() {
        let world = parse_world(SAMPLE).unwrap();
        let key = &world.objects[1];
        assert_eq!(key.location, NO_ID);
        assert_eq!(key.visible_in, Light::Bright);
        assert_eq!(key.kind, None);
        assert_eq!(key.resolved_kind(), ObjectKind::Key);

        let spider = &world.enemies[0];
        assert_eq!(spider.damage, 1);
        assert_eq!(spider.crit, 0);
    }

    #[test]
    fn tile_rows_are_truncated() {
        let world = parse_world("#s:1|a|b|c|1|0123456789abc|x|x|x|x|\n").unwrap();
        assert_eq!(world.spaces[0].tile[0], "012345678");
    }

    #[test]
    fn short_tiles_are_written_as_full_rows() {
        let space = SpaceDef {
            id: 11,
            name: "Hall".into(),
            description: "A hall.".into(),
            long_description: "A long|hall.".into(),
            light: Light::Dark,
            tile: vec!["##".into(), "a|b".into()],
        };
        assert_eq!(format_space(&space), "#s:11|Hall|A hall.|A long hall.|0|##|a b||||");
    }

    #[test]
    fn missing_field_reports_line() {
        let err = parse_world("\n#e:41|Spider|12|\n").unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                line: 2,
                tag: ENEMY_TAG,
                field: "health"
            }
        );
    }

    #[test]
    fn missing_trailing_delimiter_is_an_error() {
        let err = parse_world("#i:21|351").unwrap_err();
        assert!(matches!(err, RecordError::Unterminated { line: 1, .. }));
    }

    #[test]
    fn bad_numbers_and_codes_are_errors() {
        assert!(matches!(
            parse_world("#i:abc|351|").unwrap_err(),
            RecordError::InvalidValue { field: "player", .. }
        ));
        assert!(matches!(
            parse_world("#l:41|door|11|12|7|1|").unwrap_err(),
            RecordError::InvalidValue { field: "direction", .. }
        ));
        assert!(matches!(
            parse_world("#o:301|a|b|11|2|-1|-1|0|0|").unwrap_err(),
            RecordError::InvalidValue { field: "movable", .. }
        ));
    }

    #[test]
    fn formatting_keeps_field_order() {
        let world = parse_world(SAMPLE).unwrap();
        assert_eq!(format_object(&world.objects[0]), "#o:301|apple|A red apple.|11|1|-1|-1|0|0|1|apple|");
        assert_eq!(format_link(&world.links[0]), "#l:41|trapdoor|11|12|1|0|");
        assert_eq!(format_player(&world.players[0]), "#p:21|Ant|11|3|2|5|1|0|");
    }

    #[test]
    fn formatted_world_reads_back_identically() {
        let world = parse_world(SAMPLE).unwrap();
        let text = format_world(&world);
        assert_eq!(parse_world(&text).unwrap(), world);
    }

    #[test]
    fn delimiters_in_text_are_replaced() {
        let mut world = parse_world(SAMPLE).unwrap();
        world.objects[0].description = "red|green\napple".into();
        let line = format_object(&world.objects[0]);
        assert!(line.contains("red green apple"));
    }
}
