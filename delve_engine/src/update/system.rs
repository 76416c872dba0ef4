//! `update::system` module
//!
//! SAVE and LOAD. Both work on files under the configured save directory.

use log::{info, warn};

use crate::game::Game;
use crate::save_files::{is_loadable, read_save, save_path, write_save};
use crate::update::CommandError;

/// Write the current game to the save called `name`.
///
/// # Errors
/// The save directory or file could not be written.
pub fn save(game: &mut Game, name: &str) -> Result<(), CommandError> {
    let dir = game.config.saves.dir.clone();
    let path = write_save(game, &dir, name).map_err(|e| CommandError::SaveFailed(format!("{e:#}")))?;
    info!("player saved game to '{}'", path.display());
    Ok(())
}

/// Replace the current world with the save called `name`.
///
/// The file is read, validated and built into a scratch game first; the running game only
/// changes once that has fully succeeded.
///
/// # Errors
/// The name is not whitelisted, or the save is missing, malformed or does not fit the registry.
pub fn load(game: &mut Game, name: &str) -> Result<(), CommandError> {
    if !is_loadable(name, &game.config.saves.whitelist) {
        warn!("player attempted to load '{name}', which is not whitelisted");
        return Err(CommandError::NotWhitelisted(name.to_string()));
    }
    let path = save_path(&game.config.saves.dir, name);
    let fresh = read_save(&path, &game.config).map_err(|e| {
        warn!("player attempted to load '{name}': {e:#}");
        CommandError::LoadFailed(format!("{e:#}"))
    })?;
    game.replace_world(fresh);
    info!("player reloaded game from '{}'", path.display());
    Ok(())
}
