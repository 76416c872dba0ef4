//! Loader utilities for building a [`Game`] from world files.
//!
//! A world file is read into a `WorldDef`, validated as a whole, and then fed through the
//! registry's `add_*` and `set_*_location` operations in registry order: spaces, objects,
//! players, enemies, links, inventory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use delve_data::{ObjectKind, WorldDef, is_valid_id, parse_world};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::EngineConfig;
use crate::event::FixedRule;
use crate::game::{Game, Location};
use crate::{Enemy, Link, Object, Player, Space};

/// Read, parse and validate a world file.
///
/// # Errors
/// File IO, malformed records, or cross-reference problems.
pub fn load_world_def(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading world file '{}'", path.display()))?;
    let def = parse_world(&text).with_context(|| format!("parsing world file '{}'", path.display()))?;
    validate_world_def(&def)?;
    Ok(def)
}

/// Load a world file into a new game built from `config`.
///
/// # Errors
/// Anything [`load_world_def`] or [`populate`] reports.
pub fn load_world(path: &Path, config: EngineConfig) -> Result<Game> {
    let def = load_world_def(path)?;
    let mut game = Game::new(config);
    populate(&mut game, &def).context("while building game from world file")?;
    Ok(game)
}

/// Build a game from `def` with a throwaway RNG and no events, for swapping into a running game.
///
/// # Errors
/// Anything [`populate`] reports.
pub fn build_scratch_game(def: &WorldDef, config: &EngineConfig) -> Result<Game> {
    let mut game = Game::with_parts(config.clone(), StdRng::seed_from_u64(0), Box::new(FixedRule::nothing()));
    populate(&mut game, def)?;
    Ok(game)
}

/// Add every record of `def` to an empty `game` and wire up locations.
///
/// # Errors
/// A registry rejection (capacity, duplicate id, wrong namespace, unknown reference).
pub fn populate(game: &mut Game, def: &WorldDef) -> Result<()> {
    for space in &def.spaces {
        game.add_space(Space::from(space))
            .with_context(|| format!("adding space {}", space.id))?;
    }
    for object in &def.objects {
        game.add_object(Object::from(object))
            .with_context(|| format!("adding object {}", object.id))?;
        if is_valid_id(object.location) {
            game.set_object_location(object.id, Location::Space(object.location))
                .with_context(|| format!("placing object {}", object.id))?;
        }
    }
    if let Some(hook) = game.config.hook
        && let Some(granted) = game.get_object_by_id(hook.grants)
        && granted.kind != ObjectKind::Key
    {
        warn!("hook in space {} grants {} ({}), which is not a key", hook.space, granted.name, granted.id);
    }
    for player in &def.players {
        game.add_player(Player::from(player))
            .with_context(|| format!("adding player {}", player.id))?;
        if is_valid_id(player.location) {
            game.set_player_location(player.id, Location::Space(player.location))
                .with_context(|| format!("placing player {}", player.id))?;
        }
    }
    for enemy in &def.enemies {
        game.add_enemy(Enemy::from(enemy))
            .with_context(|| format!("adding enemy {}", enemy.id))?;
        if is_valid_id(enemy.location) {
            game.set_enemy_location(enemy.id, Location::Space(enemy.location))
                .with_context(|| format!("placing enemy {}", enemy.id))?;
        }
    }
    for link in &def.links {
        game.add_link(Link::from(link))
            .with_context(|| format!("adding link {}", link.id))?;
    }
    let primary = game.player().map(|p| p.id);
    for entry in &def.inventory {
        if Some(entry.player) != primary {
            bail!("inventory record for player {} but only the first player carries objects", entry.player);
        }
        game.set_object_location(entry.object, Location::Inventory)
            .with_context(|| format!("giving object {} to player {}", entry.object, entry.player))?;
    }
    if let Some(time) = def.time {
        game.set_time(time);
    }

    info!("{} spaces added to game", game.spaces().len());
    info!("{} objects added to game", game.objects().len());
    info!("{} players added to game", game.players().len());
    info!("{} enemies added to game", game.enemies().len());
    info!("{} links added to game", game.links().len());
    Ok(())
}

/// Validate a parsed world and return a single aggregated error.
fn validate_world_def(def: &WorldDef) -> Result<()> {
    let errors = delve_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("world validation failed:\n{details}");
}
