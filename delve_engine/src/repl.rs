//! REPL host loop.
//!
//! Reads a line, tokenizes it, runs one command cycle and renders the frame. The loop ends on
//! EXIT, end of input, or when the player dies.

mod input;

use anyhow::Result;
use log::info;

use crate::command::parse_command;
use crate::game::Game;
use crate::style::GameStyle;
use crate::update::{CommandOutcome, game_update};
use crate::view::View;

use input::{InputEvent, InputManager};

/// Control flow signal telling the loop whether to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run one line of input through the game.
pub fn step(game: &mut Game, line: &str) -> (CommandOutcome, ReplControl) {
    let command = parse_command(line);
    let outcome = game_update(game, command);
    let control = if outcome == CommandOutcome::Exit || game.is_over() {
        ReplControl::Quit
    } else {
        ReplControl::Continue
    };
    (outcome, control)
}

/// Run the main read–eval–print loop until the player quits or dies.
///
/// # Errors
/// Reading from the terminal failed on both input backends.
pub fn run_repl(game: &mut Game) -> Result<()> {
    let mut view = View::new();
    let mut input_manager = InputManager::new(&game.config().saves.dir);
    let mut turn = 0_u32;
    view.flush(game);

    loop {
        let prompt = format!("\n[{}]>> ", game.time());
        let line = match input_manager.read_line(&prompt)? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                info!("end of input, leaving the game");
                break;
            },
            InputEvent::Interrupted => {
                println!("{}", "Command canceled.".error_style());
                continue;
            },
        };
        if line.trim().is_empty() {
            continue;
        }

        turn += 1;
        info!("================> BEGIN TURN {turn} <================");
        let (outcome, control) = step(game, &line);
        view.flush(game);
        if let CommandOutcome::Failed(err) = &outcome {
            println!("{}", err.to_string().error_style());
        }
        if control == ReplControl::Quit {
            if game.is_over() {
                println!("\n{}", "You have died. The dungeon keeps what it takes.".error_style());
                info!("game over after {turn} turns");
            }
            break;
        }
    }
    Ok(())
}
