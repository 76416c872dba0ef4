//! Save-game files.
//!
//! Saves use the world-file record layout, so a save is itself a loadable world with inventory
//! and clock records. Names are slugged before they touch the filesystem; LOAD additionally only
//! accepts names on the configured whitelist.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use delve_data::format_world;
use log::info;

use crate::config::EngineConfig;
use crate::game::Game;
use crate::loader::{build_scratch_game, load_world_def};
use crate::slug::sanitize_slug;

pub const SAVE_DIR: &str = "saved_games";
pub const SAVE_EXTENSION: &str = "dat";

/// A save file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

/// Path of the save called `name` inside `dir`.
pub fn save_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{SAVE_EXTENSION}", sanitize_slug(name)))
}

/// True if `name` matches a whitelisted save name (after slugging both).
pub fn is_loadable(name: &str, whitelist: &[String]) -> bool {
    let wanted = sanitize_slug(name);
    whitelist.iter().any(|allowed| sanitize_slug(allowed) == wanted)
}

/// Write every live entity of `game` to the save called `name` in `dir`.
///
/// # Errors
/// The directory cannot be created or the file cannot be written.
pub fn write_save(game: &Game, dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating save directory {}", dir.display()))?;
    let path = save_path(dir, name);
    let text = format_world(&game.to_world_def());
    fs::write(&path, text).with_context(|| format!("writing save file {}", path.display()))?;
    info!("game saved to {}", path.display());
    Ok(path)
}

/// Read a save file into a fresh game. The caller decides whether to swap it in.
///
/// # Errors
/// The file cannot be read, is malformed, fails validation, or does not fit the registry.
pub fn read_save(path: &Path, config: &EngineConfig) -> Result<Game> {
    let def = load_world_def(path).with_context(|| format!("loading save file {}", path.display()))?;
    build_scratch_game(&def, config).with_context(|| format!("rebuilding game from {}", path.display()))
}

/// Discover save files stored in `dir`, sorted by slot name.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        if let Some(slot) = slot_from_entry(&entry) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot));
    Ok(slots)
}

fn slot_from_entry(entry: &fs::DirEntry) -> Option<SaveSlot> {
    let path = entry.path();
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some(SAVE_EXTENSION) {
        return None;
    }
    let slot = path.file_stem().and_then(|stem| stem.to_str())?.to_string();
    if slot.is_empty() {
        return None;
    }
    let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
    Some(SaveSlot { slot, path, modified })
}
