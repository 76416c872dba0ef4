//! `update::inventory` module
//!
//! Handlers for commands that move objects between a space and the player's inventory.

use log::info;

use crate::game::{Game, Location, WorldObject};
use crate::object::ObjectHolder;
use crate::update::{CommandError, player_position};

/// Pick up an object from the player's space.
///
/// Succeeds only if the object is movable, visible under the space's current light, resting in
/// the player's space, and the inventory has room.
///
/// # Errors
/// The first unmet precondition, with nothing changed.
pub fn take(game: &mut Game, name: &str) -> Result<(), CommandError> {
    let (_, here) = player_position(game)?;
    let light = game.effective_light(here);
    let object = game
        .get_object_by_name(name)
        .ok_or_else(|| CommandError::NoSuchObject(name.to_string()))?;
    let id = object.id();
    if object.location() != Location::Space(here) {
        return Err(CommandError::NotHere(object.name.clone()));
    }
    if !object.is_visible_in(light) {
        return Err(CommandError::NotVisible(object.name.clone()));
    }
    if !object.movable {
        return Err(CommandError::NotMovable(object.name.clone()));
    }
    if game.player().is_some_and(|p| p.inventory().is_full()) {
        return Err(CommandError::InventoryFull);
    }

    game.set_object_location(id, Location::Inventory)?;
    info!("player took {name} ({id}) from space {here}");
    Ok(())
}

/// Put down a carried object in the player's space.
///
/// A matching pin rule makes the object immovable once it lands in its space.
///
/// # Errors
/// Unknown object or an object the player does not hold.
pub fn drop_object(game: &mut Game, name: &str) -> Result<(), CommandError> {
    let (_, here) = player_position(game)?;
    let object = game
        .get_object_by_name(name)
        .ok_or_else(|| CommandError::NoSuchObject(name.to_string()))?;
    let id = object.id();
    let held = game.player().is_some_and(|p| p.inventory().contains_object(id));
    if !held {
        return Err(CommandError::NotHeld(object.name.clone()));
    }

    game.set_object_location(id, Location::Space(here))?;
    if game.config.pin_for(id, here).is_some()
        && let Some(object) = game.object_mut(id)
    {
        object.movable = false;
        info!("{} is pinned in space {here}", object.name);
    }
    info!("player dropped {name} ({id}) in space {here}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, PinRule};
    use crate::event::FixedRule;
    use crate::{Object, Player, Space};
    use delve_data::Light;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game_with(config: EngineConfig) -> Game {
        let mut game = Game::with_parts(config, StdRng::seed_from_u64(1), Box::new(FixedRule::nothing()));
        game.add_space(Space::new(11, "Hall")).unwrap();
        game.add_space(Space::new(12, "Cellar")).unwrap();
        game.add_player(Player::new(21, "Ant", 3, 1)).unwrap();
        game.set_player_location(21, Location::Space(11)).unwrap();
        for (id, name) in [(301, "apple"), (302, "pear")] {
            game.add_object(Object::new(id, name)).unwrap();
            game.set_object_location(id, Location::Space(11)).unwrap();
        }
        game
    }

    #[test]
    fn take_moves_object_into_inventory() {
        let mut game = game_with(EngineConfig::default());
        take(&mut game, "Apple").unwrap();
        assert!(game.player_holds(301));
        assert!(!game.get_space_by_id(11).unwrap().contains_object(301));
    }

    #[test]
    fn take_respects_capacity() {
        let mut game = game_with(EngineConfig::default());
        take(&mut game, "apple").unwrap();
        assert_eq!(take(&mut game, "pear"), Err(CommandError::InventoryFull));
        assert!(game.get_space_by_id(11).unwrap().contains_object(302));
    }

    #[test]
    fn take_requires_same_space() {
        let mut game = game_with(EngineConfig::default());
        game.set_object_location(302, Location::Space(12)).unwrap();
        assert_eq!(take(&mut game, "pear"), Err(CommandError::NotHere("pear".into())));
    }

    #[test]
    fn take_requires_matching_light() {
        let mut game = game_with(EngineConfig::default());
        game.space_mut(11).unwrap().light = Light::Dark;
        assert_eq!(take(&mut game, "apple"), Err(CommandError::NotVisible("apple".into())));
        assert!(!game.player_holds(301));
    }

    #[test]
    fn take_rejects_fixed_objects() {
        let mut game = game_with(EngineConfig::default());
        game.object_mut(301).unwrap().movable = false;
        assert_eq!(take(&mut game, "apple"), Err(CommandError::NotMovable("apple".into())));
    }

    #[test]
    fn drop_requires_holding() {
        let mut game = game_with(EngineConfig::default());
        assert_eq!(drop_object(&mut game, "apple"), Err(CommandError::NotHeld("apple".into())));
        assert_eq!(drop_object(&mut game, "plum"), Err(CommandError::NoSuchObject("plum".into())));
    }

    #[test]
    fn pinned_objects_stay_put() {
        let mut config = EngineConfig::default();
        config.pins.push(PinRule { object: 301, space: 12 });
        let mut game = game_with(config);
        take(&mut game, "apple").unwrap();

        // no pin in the hall
        drop_object(&mut game, "apple").unwrap();
        take(&mut game, "apple").unwrap();

        game.set_player_location(21, Location::Space(12)).unwrap();
        drop_object(&mut game, "apple").unwrap();
        assert_eq!(take(&mut game, "apple"), Err(CommandError::NotMovable("apple".into())));
    }
}
