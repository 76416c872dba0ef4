//! `update::item` module
//!
//! Handlers for using carried objects: light sources, keys and consumables.

use delve_data::{LinkStatus, ObjectKind};
use log::{error, info};

use crate::game::{Game, Location, WorldObject};
use crate::object::Object;
use crate::update::{CommandError, player_position};

/// Find an object by name that the player is carrying.
fn held_object<'a>(game: &'a Game, name: &str) -> Result<&'a Object, CommandError> {
    let object = game
        .get_object_by_name(name)
        .ok_or_else(|| CommandError::NoSuchObject(name.to_string()))?;
    if game.player_holds(object.id()) {
        Ok(object)
    } else {
        Err(CommandError::NotHeld(object.name.clone()))
    }
}

/// Light a carried light source.
///
/// # Errors
/// Object not held, not a light source, or already on.
pub fn turn_on(game: &mut Game, name: &str) -> Result<(), CommandError> {
    switch_light(game, name, true)
}

/// Put out a carried light source.
///
/// # Errors
/// Object not held, not a light source, or already off.
pub fn turn_off(game: &mut Game, name: &str) -> Result<(), CommandError> {
    switch_light(game, name, false)
}

fn switch_light(game: &mut Game, name: &str, on: bool) -> Result<(), CommandError> {
    let object = held_object(game, name)?;
    if !object.illuminate {
        return Err(CommandError::NotLightSource(object.name.clone()));
    }
    match (object.turned_on, on) {
        (true, true) => return Err(CommandError::AlreadyOn(object.name.clone())),
        (false, false) => return Err(CommandError::AlreadyOff(object.name.clone())),
        _ => {},
    }
    let id = object.id();
    if let Some(object) = game.object_mut(id) {
        object.turned_on = on;
        info!("{} turned {}", object.name, if on { "on" } else { "off" });
    }
    Ok(())
}

/// Open a link with a carried object whose `opens` id names that link.
///
/// # Errors
/// Unknown link or object, object not held, link already open, or the wrong object.
pub fn open(game: &mut Game, link_name: &str, object_name: &str) -> Result<(), CommandError> {
    let link = game
        .get_link_by_name(link_name)
        .ok_or_else(|| CommandError::NoSuchLink(link_name.to_string()))?;
    if link.is_open() {
        return Err(CommandError::AlreadyOpen(link.name.clone()));
    }
    let object = held_object(game, object_name)?;
    if object.opens != link.id {
        return Err(CommandError::WrongKey {
            object: object.name.clone(),
            link: link.name.clone(),
        });
    }
    let link_id = link.id;
    info!("{} opened with {}", link.name, object.name);
    game.set_link_status(link_id, LinkStatus::Open)?;
    Ok(())
}

/// Use a carried object according to its kind.
///
/// - apple: +1 health, consumed
/// - elixir: +2 health, consumed
/// - armor: +1 max health, consumed
/// - hook: consumed; in the configured hook space it grants a new object
/// - bed: consumed; flips day and night
///
/// # Errors
/// Object not held, or a kind with no use.
pub fn use_object(game: &mut Game, name: &str) -> Result<(), CommandError> {
    let (_, here) = player_position(game)?;
    let object = held_object(game, name)?;
    let (id, kind) = (object.id(), object.kind);
    let object_name = object.name.clone();

    let grant = match kind {
        ObjectKind::Key | ObjectKind::Unknown => return Err(CommandError::NotUsable(object_name)),
        ObjectKind::Hook => hook_grant(game, here)?,
        _ => None,
    };

    game.set_object_location(id, Location::Nowhere)?;
    match kind {
        ObjectKind::Apple => heal_player(game, 1),
        ObjectKind::Elixir => heal_player(game, 2),
        ObjectKind::Armor => {
            if let Some(player) = game.player_mut() {
                player.health.raise_max(1);
            }
        },
        ObjectKind::Bed => game.time = game.time.toggled(),
        ObjectKind::Hook | ObjectKind::Key | ObjectKind::Unknown => {},
    }
    if let Some(granted) = grant {
        // the hook was just consumed, so there is room for the grant
        if let Err(err) = game.set_object_location(granted, Location::Inventory) {
            error!("hook grant of object {granted} failed: {err}");
        }
    }
    info!("player used {object_name} ({kind})");
    Ok(())
}

/// The object a hook grants if the player is in the hook space. Must be a key and off-map to be
/// granted.
fn hook_grant(game: &Game, here: delve_data::Id) -> Result<Option<delve_data::Id>, CommandError> {
    let Some(rule) = game.config.hook.filter(|rule| rule.space == here) else {
        return Ok(None);
    };
    let granted = game
        .get_object_by_id(rule.grants)
        .ok_or_else(|| CommandError::NoSuchObject(rule.grants.to_string()))?;
    if granted.kind != ObjectKind::Key {
        return Err(CommandError::NotAKey(granted.name.clone()));
    }
    Ok((granted.location() == Location::Nowhere).then_some(rule.grants))
}

fn heal_player(game: &mut Game, amount: u32) {
    if let Some(player) = game.player_mut() {
        player.health.heal(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, HookRule};
    use crate::event::FixedRule;
    use crate::{Link, Player, Space};
    use delve_data::{DayTime, Direction};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(config: EngineConfig) -> Game {
        let mut game = Game::with_parts(config, StdRng::seed_from_u64(1), Box::new(FixedRule::nothing()));
        game.add_space(Space::new(11, "Hall")).unwrap();
        game.add_space(Space::new(12, "Well")).unwrap();
        game.add_player(Player::new(21, "Ant", 5, 3)).unwrap();
        game.set_player_location(21, Location::Space(11)).unwrap();
        game.player_mut().unwrap().health.damage(3);
        game.add_link(Link {
            id: 41,
            name: "gate".into(),
            origin: 11,
            destination: 12,
            direction: Direction::East,
            status: LinkStatus::Closed,
        })
        .unwrap();
        game
    }

    fn give(game: &mut Game, object: Object) {
        let id = object.id;
        game.add_object(object).unwrap();
        game.set_object_location(id, Location::Inventory).unwrap();
    }

    #[test]
    fn lamp_switches_on_and_off_once() {
        let mut game = game(EngineConfig::default());
        let mut lamp = Object::new(361, "lamp");
        lamp.illuminate = true;
        give(&mut game, lamp);
        turn_on(&mut game, "lamp").unwrap();
        assert_eq!(turn_on(&mut game, "lamp"), Err(CommandError::AlreadyOn("lamp".into())));
        turn_off(&mut game, "lamp").unwrap();
        assert_eq!(turn_off(&mut game, "lamp"), Err(CommandError::AlreadyOff("lamp".into())));
    }

    #[test]
    fn only_light_sources_switch() {
        let mut game = game(EngineConfig::default());
        give(&mut game, Object::new(301, "apple"));
        assert_eq!(turn_on(&mut game, "apple"), Err(CommandError::NotLightSource("apple".into())));
    }

    #[test]
    fn open_needs_the_matching_held_key() {
        let mut game = game(EngineConfig::default());
        let mut key = Object::new(351, "key");
        key.opens = 41;
        game.add_object(key).unwrap();
        game.set_object_location(351, Location::Space(11)).unwrap();
        assert_eq!(open(&mut game, "gate", "key"), Err(CommandError::NotHeld("key".into())));

        game.set_object_location(351, Location::Inventory).unwrap();
        give(&mut game, Object::new(352, "bent key"));
        assert!(matches!(open(&mut game, "gate", "bent key"), Err(CommandError::WrongKey { .. })));

        open(&mut game, "gate", "key").unwrap();
        assert!(game.get_link_by_id(41).unwrap().is_open());
        assert_eq!(open(&mut game, "gate", "key"), Err(CommandError::AlreadyOpen("gate".into())));
    }

    #[test]
    fn food_heals_and_is_consumed() {
        let mut game = game(EngineConfig::default());
        give(&mut game, Object::new(301, "apple"));
        give(&mut game, Object::new(311, "elixir"));
        use_object(&mut game, "apple").unwrap();
        assert_eq!(game.player().unwrap().health.current_hp(), 3);
        use_object(&mut game, "elixir").unwrap();
        assert_eq!(game.player().unwrap().health.current_hp(), 5);
        assert_eq!(game.get_object_by_id(301).unwrap().location(), Location::Nowhere);
        assert!(game.player().unwrap().inventory().is_empty());
    }

    #[test]
    fn armor_raises_max_health() {
        let mut game = game(EngineConfig::default());
        give(&mut game, Object::new(321, "armor"));
        use_object(&mut game, "armor").unwrap();
        assert_eq!(game.player().unwrap().health.max_hp(), 6);
    }

    #[test]
    fn bed_flips_the_clock() {
        let mut game = game(EngineConfig::default());
        give(&mut game, Object::new(341, "bed"));
        use_object(&mut game, "bed").unwrap();
        assert_eq!(game.time(), DayTime::Night);
    }

    #[test]
    fn hook_grants_in_its_space_only() {
        let config = EngineConfig {
            hook: Some(HookRule { space: 12, grants: 355 }),
            ..EngineConfig::default()
        };
        let mut game = game(config);
        game.add_object(Object::new(355, "iron key")).unwrap();
        give(&mut game, Object::new(331, "hook"));
        give(&mut game, Object::new(332, "spare hook"));

        use_object(&mut game, "hook").unwrap();
        assert!(!game.player_holds(355));

        game.set_player_location(21, Location::Space(12)).unwrap();
        use_object(&mut game, "spare hook").unwrap();
        assert!(game.player_holds(355));
        assert!(!game.player_holds(332));
    }

    #[test]
    fn hook_refuses_to_grant_a_non_key() {
        let config = EngineConfig {
            hook: Some(HookRule { space: 11, grants: 301 }),
            ..EngineConfig::default()
        };
        let mut game = game(config);
        game.add_object(Object::new(301, "apple")).unwrap();
        give(&mut game, Object::new(331, "hook"));

        assert_eq!(use_object(&mut game, "hook"), Err(CommandError::NotAKey("apple".into())));
        assert!(game.player_holds(331));
        assert_eq!(game.get_object_by_id(301).unwrap().location(), Location::Nowhere);
    }

    #[test]
    fn keys_and_unknown_objects_have_no_use() {
        let mut game = game(EngineConfig::default());
        give(&mut game, Object::new(351, "key"));
        assert_eq!(use_object(&mut game, "key"), Err(CommandError::NotUsable("key".into())));
        assert!(game.player_holds(351));
    }
}
