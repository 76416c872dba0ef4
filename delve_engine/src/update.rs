//! Command dispatch.
//!
//! [`game_update`] runs one full command cycle: reset the transient text, hand the command to
//! exactly one handler, record the outcome in the dialogue, then run the end-of-turn event.
//! Handlers validate every precondition before they mutate anything, so a failed command
//! leaves the registry as it found it.

pub mod combat;
pub mod inventory;
pub mod item;
pub mod look;
pub mod movement;
pub mod system;

pub use combat::*;
pub use inventory::*;
pub use item::*;
pub use look::*;
pub use movement::*;
pub use system::*;

use delve_data::Direction;
use log::{info, warn};
use thiserror::Error;

use crate::command::{Command, CommandTag};
use crate::dialogue::command_line;
use crate::event::run_events;
use crate::game::{Game, RegistryError};

/// Why a command failed. Always a normal outcome; the game carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{0} needs an argument")]
    MissingArgument(CommandTag),
    #[error("there is no player to act")]
    NoPlayer,
    #[error("the player is not in any space")]
    Lost,
    #[error("no object called '{0}'")]
    NoSuchObject(String),
    #[error("no link called '{0}'")]
    NoSuchLink(String),
    #[error("'{0}' is not a direction")]
    NoSuchDirection(String),
    #[error("the {0} cannot be moved")]
    NotMovable(String),
    #[error("the {0} cannot be seen here")]
    NotVisible(String),
    #[error("the {0} is not here")]
    NotHere(String),
    #[error("the {0} is not in the inventory")]
    NotHeld(String),
    #[error("the inventory is full")]
    InventoryFull,
    #[error("there is no enemy here to fight")]
    NoEnemy,
    #[error("the fight is already over")]
    FightOver,
    #[error("there is no way {0} from here")]
    NoExit(Direction),
    #[error("the {0} is closed")]
    LinkClosed(String),
    #[error("the {0} is already open")]
    AlreadyOpen(String),
    #[error("the {object} does not open the {link}")]
    WrongKey { object: String, link: String },
    #[error("the {0} gives no light")]
    NotLightSource(String),
    #[error("the {0} is already on")]
    AlreadyOn(String),
    #[error("the {0} is already off")]
    AlreadyOff(String),
    #[error("the {0} cannot be used")]
    NotUsable(String),
    #[error("the {0} is not a key and cannot be granted")]
    NotAKey(String),
    #[error("'{0}' is not a save that can be loaded")]
    NotWhitelisted(String),
    #[error("saving failed: {0}")]
    SaveFailed(String),
    #[error("loading failed: {0}")]
    LoadFailed(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result of one command cycle, for the host loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Ok,
    Failed(CommandError),
    /// Input the tokenizer did not recognise. Not an error, but nothing happened.
    Unknown,
    /// The player asked to leave; the host loop should stop.
    Exit,
}

impl CommandOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CommandOutcome::Ok)
    }
}

/// Run one command cycle against `game`.
///
/// The event subsystem runs after every command except `Exit`, whether or not the command
/// succeeded.
pub fn game_update(game: &mut Game, command: Command) -> CommandOutcome {
    let tag = command.tag();
    game.dialogue.reset();
    game.inspection = None;
    game.last_cmd = Some(tag);

    let result = match command {
        Command::Exit => {
            info!("player asked to exit");
            game.dialogue.set_command(command_line(tag, true));
            return CommandOutcome::Exit;
        },
        Command::Unknown => None,
        Command::Take(name) => Some(required(tag, name.as_deref()).and_then(|n| take(game, n))),
        Command::Drop(name) => Some(required(tag, name.as_deref()).and_then(|n| drop_object(game, n))),
        Command::Attack => Some(attack(game)),
        Command::Move(word) => Some(required(tag, word.as_deref()).and_then(|w| move_player(game, w))),
        Command::Inspect(arg) => Some(required(tag, arg.as_deref()).and_then(|a| inspect(game, a))),
        Command::Save(name) => Some(required(tag, name.as_deref()).and_then(|n| save(game, n))),
        Command::Load(name) => Some(required(tag, name.as_deref()).and_then(|n| load(game, n))),
        Command::TurnOn(name) => Some(required(tag, name.as_deref()).and_then(|n| turn_on(game, n))),
        Command::TurnOff(name) => Some(required(tag, name.as_deref()).and_then(|n| turn_off(game, n))),
        Command::Open { link, object } => Some(
            required(tag, link.as_deref())
                .and_then(|l| required(tag, object.as_deref()).map(|o| (l, o)))
                .and_then(|(l, o)| open(game, l, o)),
        ),
        Command::Use(name) => Some(required(tag, name.as_deref()).and_then(|n| use_object(game, n))),
    };

    let outcome = match result {
        None => CommandOutcome::Unknown,
        Some(Ok(())) => CommandOutcome::Ok,
        Some(Err(err)) => {
            warn!("{tag} failed: {err}");
            game.inspection = None;
            CommandOutcome::Failed(err)
        },
    };
    game.dialogue.set_command(command_line(tag, outcome.is_ok()));

    run_events(game);
    outcome
}

/// Treat an absent or blank argument as a failed command.
fn required(tag: CommandTag, arg: Option<&str>) -> Result<&str, CommandError> {
    match arg.map(str::trim) {
        Some(arg) if !arg.is_empty() => Ok(arg),
        _ => Err(CommandError::MissingArgument(tag)),
    }
}

/// Id of the primary player and the space they stand in.
pub(crate) fn player_position(game: &Game) -> Result<(delve_data::Id, delve_data::Id), CommandError> {
    let player = game.player().ok_or(CommandError::NoPlayer)?;
    let space = game.player_space_id().ok_or(CommandError::Lost)?;
    Ok((player.id, space))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::event::{EventKind, FixedRule};
    use crate::game::Location;
    use crate::{Object, Player, Space};
    use delve_data::DayTime;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_game() -> Game {
        let mut game = Game::with_parts(EngineConfig::default(), StdRng::seed_from_u64(5), Box::new(FixedRule::nothing()));
        game.add_space(Space::new(11, "Hall")).unwrap();
        game.add_player(Player::new(21, "Ant", 3, 2)).unwrap();
        game.set_player_location(21, Location::Space(11)).unwrap();
        game.add_object(Object::new(301, "apple")).unwrap();
        game.set_object_location(301, Location::Space(11)).unwrap();
        game
    }

    #[test]
    fn missing_arguments_fail_without_panicking() {
        let mut game = small_game();
        for command in [
            Command::Take(None),
            Command::Drop(Some("  ".into())),
            Command::Move(None),
            Command::Inspect(None),
            Command::Open {
                link: Some("door".into()),
                object: None,
            },
            Command::Use(None),
            Command::Save(None),
            Command::Load(None),
        ] {
            let tag = command.tag();
            assert_eq!(
                game_update(&mut game, command),
                CommandOutcome::Failed(CommandError::MissingArgument(tag))
            );
            assert_eq!(game.dialogue().command(), format!("{tag}: ERROR"));
        }
    }

    #[test]
    fn status_line_names_the_command() {
        let mut game = small_game();
        assert!(game_update(&mut game, Command::Take(Some("apple".into()))).is_ok());
        assert_eq!(game.dialogue().command(), "Take: OK");
        assert_eq!(game.last_cmd(), Some(CommandTag::Take));
    }

    #[test]
    fn unknown_is_distinct_from_failure() {
        let mut game = small_game();
        assert_eq!(game_update(&mut game, Command::Unknown), CommandOutcome::Unknown);
        assert_eq!(game.dialogue().command(), crate::dialogue::COMMAND_UNKNOWN);
    }

    #[test]
    fn exit_skips_the_event() {
        let mut game = small_game();
        game.set_rules(Box::new(FixedRule(EventKind::Trap)));
        game.set_time(DayTime::Night);
        assert_eq!(game_update(&mut game, Command::Exit), CommandOutcome::Exit);
        assert_eq!(game.player().unwrap().health.current_hp(), 3);
    }

    #[test]
    fn events_run_even_after_a_failed_command() {
        let mut game = small_game();
        game.set_rules(Box::new(FixedRule(EventKind::Trap)));
        game.set_time(DayTime::Night);
        let outcome = game_update(&mut game, Command::Drop(Some("apple".into())));
        assert!(matches!(outcome, CommandOutcome::Failed(CommandError::NotHeld(_))));
        assert_eq!(game.player().unwrap().health.current_hp(), 2);
        assert!(game.last_event().applied);
    }
}
