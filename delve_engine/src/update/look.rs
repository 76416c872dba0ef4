//! `update::look` module
//!
//! INSPECT: read the long description of the current space, or the description of an object
//! within reach.

use log::info;

use crate::dialogue::TOO_DARK;
use crate::game::{Game, Location, WorldObject};
use crate::update::{CommandError, player_position};

/// Set the inspection text.
///
/// `space` (or `s`) shows the current space's long description when it is lit, and a fixed
/// "too dark" line otherwise. Any other argument names an object, which must be carried or
/// resting in the player's space.
///
/// # Errors
/// Unknown object, or one that is neither held nor here.
pub fn inspect(game: &mut Game, arg: &str) -> Result<(), CommandError> {
    let (_, here) = player_position(game)?;
    if arg.eq_ignore_ascii_case("space") || arg.eq_ignore_ascii_case("s") {
        let text = if game.effective_light(here).is_bright() {
            game.get_space_by_id(here)
                .map(|s| s.long_description.clone())
                .unwrap_or_default()
        } else {
            TOO_DARK.to_string()
        };
        game.inspection = Some(text);
        return Ok(());
    }

    let object = game
        .get_object_by_name(arg)
        .ok_or_else(|| CommandError::NoSuchObject(arg.to_string()))?;
    let reachable = object.location() == Location::Space(here) || game.player_holds(object.id());
    if !reachable {
        return Err(CommandError::NotHere(object.name.clone()));
    }
    info!("player inspected {}", object.name);
    game.inspection = Some(object.description.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::event::FixedRule;
    use crate::{Object, Player, Space};
    use delve_data::Light;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> Game {
        let mut game = Game::with_parts(EngineConfig::default(), StdRng::seed_from_u64(1), Box::new(FixedRule::nothing()));
        let mut hall = Space::new(11, "Hall");
        hall.long_description = "Cobwebs everywhere.".into();
        game.add_space(hall).unwrap();
        game.add_space(Space::new(12, "Cellar")).unwrap();
        game.add_player(Player::new(21, "Ant", 3, 2)).unwrap();
        game.set_player_location(21, Location::Space(11)).unwrap();
        let mut apple = Object::new(301, "apple");
        apple.description = "Crisp and red.".into();
        game.add_object(apple).unwrap();
        game.set_object_location(301, Location::Space(12)).unwrap();
        game
    }

    #[test]
    fn lit_space_shows_long_description() {
        let mut game = game();
        inspect(&mut game, "space").unwrap();
        assert_eq!(game.inspection(), Some("Cobwebs everywhere."));
    }

    #[test]
    fn dark_space_is_too_dark() {
        let mut game = game();
        game.space_mut(11).unwrap().light = Light::Dark;
        inspect(&mut game, "s").unwrap();
        assert_eq!(game.inspection(), Some(TOO_DARK));
    }

    #[test]
    fn objects_elsewhere_cannot_be_inspected() {
        let mut game = game();
        assert_eq!(inspect(&mut game, "apple"), Err(CommandError::NotHere("apple".into())));
        assert_eq!(game.inspection(), None);

        game.set_object_location(301, Location::Inventory).unwrap();
        inspect(&mut game, "apple").unwrap();
        assert_eq!(game.inspection(), Some("Crisp and red."));
    }
}
