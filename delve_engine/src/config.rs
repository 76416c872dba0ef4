//! Engine configuration.
//!
//! Tunables that the world file does not carry: registry capacities, combat odds, event weights,
//! puzzle rules for pinned objects and the hook, and where save files live. Loaded from
//! `engine.toml`; any missing section takes its default, and an unreadable file falls back
//! to defaults entirely.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use delve_data::{Id, NO_ID};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed RNG seed. `None` seeds once from the OS at start.
    pub seed: Option<u64>,
    pub limits: Limits,
    pub combat: CombatConfig,
    pub events: EventConfig,
    /// Objects that become immovable once dropped in a given space.
    pub pins: Vec<PinRule>,
    pub hook: Option<HookRule>,
    pub saves: SaveConfig,
}

impl EngineConfig {
    /// Find the pin rule, if any, for dropping `object` in `space`.
    pub fn pin_for(&self, object: Id, space: Id) -> Option<&PinRule> {
        self.pins.iter().find(|pin| pin.object == object && pin.space == space)
    }
}

/// Registry capacities. Only the first player and enemy are driven by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub spaces: usize,
    pub objects: usize,
    pub players: usize,
    pub enemies: usize,
    pub links: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            spaces: 100,
            objects: 100,
            players: 4,
            enemies: 16,
            links: 400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// The player wins a round when the 0-9 outcome draw is above this value.
    pub player_win_above: u8,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self { player_win_above: 4 }
    }
}

/// Relative weights for the end-of-turn event draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventWeights {
    pub nothing: u32,
    pub move_object: u32,
    pub trap: u32,
    pub enemy_spawn: u32,
    pub day_night: u32,
    pub respawn: u32,
}

impl Default for EventWeights {
    fn default() -> Self {
        Self {
            nothing: 10,
            move_object: 2,
            trap: 2,
            enemy_spawn: 1,
            day_night: 2,
            respawn: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub weights: EventWeights,
    pub trap_damage: u32,
    /// Where the respawn event sends the player. `NO_ID` means the first space in the registry.
    pub respawn_space: Id,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            weights: EventWeights::default(),
            trap_damage: 1,
            respawn_space: NO_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRule {
    pub object: Id,
    pub space: Id,
}

/// Using a hook in `space` grants object `grants` into the player's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRule {
    pub space: Id,
    pub grants: Id,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    pub dir: PathBuf,
    /// Save names that LOAD accepts.
    pub whitelist: Vec<String>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(crate::save_files::SAVE_DIR),
            whitelist: ["save1", "save2", "save3", "quicksave"]
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

/// Loads the engine configuration from `toml_path`.
///
/// Never fails: a missing or malformed file logs a warning and yields the defaults.
pub fn load_config(toml_path: &Path) -> EngineConfig {
    match try_load_config(toml_path) {
        Ok(config) => {
            info!(
                "engine config loaded from '{}' ({} pin rules)",
                toml_path.display(),
                config.pins.len()
            );
            config
        },
        Err(e) => {
            warn!(
                "Could not load engine config from '{}': {e:#}. Using built-in defaults.",
                toml_path.display()
            );
            EngineConfig::default()
        },
    }
}

/// Attempts to load the engine configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn try_load_config(toml_path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine config from '{}'", toml_path.display()))?;
    parse_config(&text).with_context(|| format!("parsing engine config '{}'", toml_path.display()))
}

/// Parse engine configuration from TOML text.
///
/// # Errors
/// Returns an error if the TOML is malformed or a field has the wrong type.
pub fn parse_config(text: &str) -> Result<EngineConfig> {
    Ok(toml::from_str(text)?)
}
