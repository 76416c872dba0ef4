//! `update::movement` module
//!
//! Walking the player along links.

use delve_data::Direction;
use log::info;

use crate::game::{Game, Location};
use crate::update::{CommandError, player_position};

/// Move the player through the link in the direction named by `word`.
///
/// Succeeds only if a link leaves the current space that way and it is open.
///
/// # Errors
/// Unknown direction word, no link that way, or a closed link.
pub fn move_player(game: &mut Game, word: &str) -> Result<(), CommandError> {
    let (player, here) = player_position(game)?;
    let dir = Direction::from_word(word).ok_or_else(|| CommandError::NoSuchDirection(word.to_string()))?;
    let link = game.link_toward(here, dir).ok_or(CommandError::NoExit(dir))?;
    if !link.is_open() {
        return Err(CommandError::LinkClosed(link.name.clone()));
    }
    let destination = link.destination;

    game.set_player_location(player, Location::Space(destination))?;
    info!("player moved {dir} from space {here} to space {destination}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::event::FixedRule;
    use crate::{Link, Player, Space};
    use delve_data::LinkStatus;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn corridor(status: LinkStatus) -> Game {
        let mut game = Game::with_parts(EngineConfig::default(), StdRng::seed_from_u64(1), Box::new(FixedRule::nothing()));
        game.add_space(Space::new(11, "Hall")).unwrap();
        game.add_space(Space::new(12, "Attic")).unwrap();
        game.add_player(Player::new(21, "Ant", 3, 1)).unwrap();
        game.set_player_location(21, Location::Space(11)).unwrap();
        game.add_link(Link {
            id: 41,
            name: "ladder".into(),
            origin: 11,
            destination: 12,
            direction: Direction::North,
            status,
        })
        .unwrap();
        game
    }

    #[test]
    fn open_link_moves_player() {
        let mut game = corridor(LinkStatus::Open);
        move_player(&mut game, "n").unwrap();
        assert_eq!(game.player_space_id(), Some(12));
    }

    #[test]
    fn up_travels_the_north_link() {
        let mut game = corridor(LinkStatus::Open);
        move_player(&mut game, "up").unwrap();
        assert_eq!(game.player_space_id(), Some(12));
    }

    #[test]
    fn closed_link_blocks() {
        let mut game = corridor(LinkStatus::Closed);
        assert_eq!(move_player(&mut game, "north"), Err(CommandError::LinkClosed("ladder".into())));
        assert_eq!(game.player_space_id(), Some(11));
    }

    #[test]
    fn missing_link_and_bad_words() {
        let mut game = corridor(LinkStatus::Open);
        assert_eq!(move_player(&mut game, "west"), Err(CommandError::NoExit(Direction::West)));
        assert_eq!(
            move_player(&mut game, "sideways"),
            Err(CommandError::NoSuchDirection("sideways".into()))
        );
        assert_eq!(game.player_space_id(), Some(11));
    }
}
