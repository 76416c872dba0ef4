#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Delve **
//! Terminal host for the dungeon engine.

use delve_engine::data_paths::data_path;
use delve_engine::style::GameStyle;
use delve_engine::{DELVE_VERSION, load_config, load_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;

use log::{info, warn};

use std::fs;
use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: loading delve v{DELVE_VERSION}...");
    let config = load_config(&data_path("engine.toml"));
    let world_path = data_path("world.dat");
    let mut game = load_world(&world_path, config)
        .with_context(|| format!("while loading world from '{}'", world_path.display()))?;
    info!("world loaded successfully.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("flushing stdout")?;
    info!("Starting the game!");

    println!("{:^84}", "DELVE: INTO THE UNDERCROFT".bright_yellow().underline());
    if let Some(player) = game.player() {
        println!("\nYou are {}.\n", player.name.bold().bright_blue());
    }

    match fs::read_to_string(data_path("intro.txt")) {
        Ok(introduction) => println!("{}", introduction.trim_end().description_style()),
        Err(e) => warn!("no intro text shown: {e}"),
    }

    run_repl(&mut game)
}
