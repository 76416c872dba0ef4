//! Random world events.
//!
//! After every command the game asks its [`EventRules`] for one candidate event and applies it,
//! subject to gating:
//! - during the day only the day/night flip can happen
//! - respawn never fires right after an attack
//! - move-object needs a movable object that is currently off-map
//! - enemy-spawn needs the primary enemy to be alive

use std::fmt;

use delve_data::{DayTime, Id, is_valid_id};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::command::CommandTag;
use crate::config::EventWeights;
use crate::dialogue::event_line;
use crate::game::{Game, Location, WorldObject};

/// The fixed set of world events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventKind {
    #[default]
    Nothing,
    MoveObject,
    Trap,
    EnemySpawn,
    DayNight,
    Respawn,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            EventKind::Nothing => "nothing",
            EventKind::MoveObject => "move object",
            EventKind::Trap => "trap",
            EventKind::EnemySpawn => "enemy spawn",
            EventKind::DayNight => "day/night",
            EventKind::Respawn => "respawn",
        };
        f.write_str(word)
    }
}

/// Which event was considered last turn and whether it took effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventRecord {
    pub kind: EventKind,
    pub applied: bool,
}

impl EventRecord {
    pub fn nothing() -> EventRecord {
        EventRecord::default()
    }
}

/// Selection policy for the end-of-turn event.
pub trait EventRules: fmt::Debug {
    fn choose(&self, rng: &mut StdRng) -> EventKind;
}

/// Picks an event with probability proportional to its configured weight.
#[derive(Debug, Clone)]
pub struct WeightedRules {
    table: Vec<(EventKind, u32)>,
}

impl WeightedRules {
    pub fn new(weights: EventWeights) -> WeightedRules {
        WeightedRules {
            table: vec![
                (EventKind::Nothing, weights.nothing),
                (EventKind::MoveObject, weights.move_object),
                (EventKind::Trap, weights.trap),
                (EventKind::EnemySpawn, weights.enemy_spawn),
                (EventKind::DayNight, weights.day_night),
                (EventKind::Respawn, weights.respawn),
            ],
        }
    }
}

impl EventRules for WeightedRules {
    fn choose(&self, rng: &mut StdRng) -> EventKind {
        // all-zero weights are an error for choose_weighted; treat as "never"
        self.table
            .choose_weighted(rng, |(_, weight)| *weight)
            .map_or(EventKind::Nothing, |(kind, _)| *kind)
    }
}

/// Always picks the same event.
#[derive(Debug, Clone, Copy)]
pub struct FixedRule(pub EventKind);

impl FixedRule {
    pub fn nothing() -> FixedRule {
        FixedRule(EventKind::Nothing)
    }
}

impl EventRules for FixedRule {
    fn choose(&self, _rng: &mut StdRng) -> EventKind {
        self.0
    }
}

/// Draw and apply this turn's event, record it in `last_event` and the dialogue.
pub fn run_events(game: &mut Game) -> EventRecord {
    let chosen = game.rules.choose(&mut game.rng);
    let mut detail = String::new();
    let record = if game.time == DayTime::Day && chosen != EventKind::DayNight {
        debug!("daytime: '{chosen}' event suppressed");
        EventRecord::nothing()
    } else if chosen == EventKind::Respawn && game.last_cmd == Some(CommandTag::Attack) {
        debug!("respawn suppressed right after an attack");
        EventRecord {
            kind: chosen,
            applied: false,
        }
    } else {
        let outcome = apply_event(game, chosen);
        let applied = outcome.is_some();
        detail = outcome.unwrap_or_default();
        EventRecord { kind: chosen, applied }
    };
    game.last_event = record;
    game.dialogue.set_event(event_line(&record, &detail));
    record
}

/// Apply the effect of `kind` without time-of-day or last-command gating.
///
/// Returns the text that fills the event's dialogue template, or `None` if the event could not
/// take effect in the current state.
pub fn apply_event(game: &mut Game, kind: EventKind) -> Option<String> {
    let detail = match kind {
        EventKind::Nothing => None,
        EventKind::MoveObject => move_object(game),
        EventKind::Trap => trap(game),
        EventKind::EnemySpawn => enemy_spawn(game),
        EventKind::DayNight => {
            game.time = game.time.toggled();
            Some(game.time.to_string())
        },
        EventKind::Respawn => respawn(game),
    };
    if let Some(detail) = &detail {
        info!("event '{kind}' applied ({detail})");
    }
    detail
}

/// Bring a random off-map movable object into the player's space.
fn move_object(game: &mut Game) -> Option<String> {
    let here = game.player_space_id()?;
    let eligible: Vec<Id> = game
        .objects()
        .iter()
        .filter(|o| o.movable && o.location() == Location::Nowhere)
        .map(|o| o.id)
        .collect();
    let id = *eligible.choose(&mut game.rng)?;
    game.set_object_location(id, Location::Space(here)).ok()?;
    game.get_object_by_id(id).map(|o| o.name.clone())
}

fn trap(game: &mut Game) -> Option<String> {
    let damage = game.config.events.trap_damage;
    let player = game.player_mut().filter(|p| p.is_alive())?;
    player.health.damage(damage);
    Some(damage.to_string())
}

fn enemy_spawn(game: &mut Game) -> Option<String> {
    let here = game.player_space_id()?;
    let enemy = game.enemy().filter(|e| e.is_alive())?;
    let (id, name) = (enemy.id, enemy.name.clone());
    game.set_enemy_location(id, Location::Space(here)).ok()?;
    Some(name)
}

fn respawn(game: &mut Game) -> Option<String> {
    let configured = game.config.events.respawn_space;
    let target = if is_valid_id(configured) {
        configured
    } else {
        game.spaces().first()?.id
    };
    let player = game.player()?.id;
    game.set_player_location(player, Location::Space(target)).ok()?;
    game.get_space_by_id(target).map(|s| s.name.clone())
}
