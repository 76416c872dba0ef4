#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Delve **
//! A turn-based text dungeon crawler: entity registry, command dispatcher, night events and a
//! terminal REPL.

pub const DELVE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod data_paths;
pub mod dialogue;
pub mod enemy;
pub mod event;
pub mod game;
pub mod health;
pub mod link;
pub mod loader;
pub mod object;
pub mod player;
pub mod repl;
pub mod save_files;
pub mod slug;
pub mod space;
pub mod style;
pub mod update;
pub mod view;

// Re-exports for convenience
pub use command::{Command, CommandTag, parse_command};
pub use config::{EngineConfig, load_config};
pub use enemy::Enemy;
pub use event::{EventKind, EventRecord, EventRules, FixedRule, WeightedRules};
pub use game::{Game, Location, RegistryError, WorldObject};
pub use link::Link;
pub use loader::load_world;
pub use object::{Object, ObjectHolder};
pub use player::{Inventory, Player};
pub use repl::run_repl;
pub use space::Space;
pub use update::{CommandError, CommandOutcome, game_update};
pub use view::View;
