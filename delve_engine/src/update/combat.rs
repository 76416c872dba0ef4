//! `update::combat` module
//!
//! One round of a fight between the player and the first live enemy sharing their space.

use log::info;
use rand::Rng;

use crate::game::Game;
use crate::update::{CommandError, player_position};

/// Size of every combat draw: outcome and crit rolls are uniform on `0..ROLL_SIDES`.
const ROLL_SIDES: u8 = 10;

/// Who won a round and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub player_won: bool,
    pub critical: bool,
    pub damage: u32,
}

/// Fight one round against the first live enemy in the player's space.
///
/// An outcome draw decides the winner; each side then makes its own crit draw, and a crit
/// doubles that side's damage. The loser takes the winner's damage, floored at zero health.
///
/// # Errors
/// A dead player, or no live enemy in the same space.
pub fn attack(game: &mut Game) -> Result<(), CommandError> {
    let (_, here) = player_position(game)?;
    let player = game.player().ok_or(CommandError::NoPlayer)?;
    if !player.is_alive() {
        return Err(CommandError::FightOver);
    }
    let enemy = game.enemies_near_player().next().ok_or(CommandError::NoEnemy)?;
    let enemy_id = enemy.id;
    let (player_damage, player_crit) = (player.damage, player.crit);
    let (enemy_damage, enemy_crit) = (enemy.damage, enemy.crit);

    let round = roll_round(
        game,
        (player_damage, player_crit),
        (enemy_damage, enemy_crit),
    );
    if round.player_won {
        if let Some(enemy) = game.enemy_mut(enemy_id) {
            enemy.health.damage(round.damage);
            info!(
                "player hit {} for {} in space {here} ({} hp left)",
                enemy.name,
                round.damage,
                enemy.health.current_hp()
            );
        }
    } else if let Some(player) = game.player_mut() {
        player.health.damage(round.damage);
        info!(
            "enemy {enemy_id} hit the player for {} ({} hp left)",
            round.damage,
            player.health.current_hp()
        );
    }
    Ok(())
}

/// Make the three independent draws for a round. Each side is `(damage, crit band)`.
fn roll_round(game: &mut Game, player: (u32, u8), enemy: (u32, u8)) -> RoundResult {
    let threshold = game.config.combat.player_win_above;
    let outcome: u8 = game.rng.random_range(0..ROLL_SIDES);
    let player_crit = game.rng.random_range(0..ROLL_SIDES) < player.1;
    let enemy_crit = game.rng.random_range(0..ROLL_SIDES) < enemy.1;

    let player_won = outcome > threshold;
    let (base, critical) = if player_won {
        (player.0, player_crit)
    } else {
        (enemy.0, enemy_crit)
    };
    let damage = if critical { base.saturating_mul(2) } else { base };
    RoundResult {
        player_won,
        critical,
        damage,
    }
}
