//! View module.
//!
//! Renders the state of a [`Game`] after each command. The game itself never prints; the REPL
//! asks the view for a frame built from the registry's read-only getters and prints it.

use colored::Colorize;
use delve_data::Direction;
use textwrap::{fill, termwidth};

use crate::game::{Game, WorldObject};
use crate::style::GameStyle;

const ICON_HEALTH: &str = "\u{2665}"; // ♥
const ICON_ENEMY: &str = "\u{2620}"; // ☠
const ICON_EVENT: &str = "\u{26A1}\u{FE0E}"; // ⚡︎

/// Caller-owned renderer. Holds the terminal width so frames wrap to the current window.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        Self { width: termwidth() }
    }

    /// A view with a fixed width, for tests and non-terminal output.
    pub fn with_width(width: usize) -> Self {
        Self { width: width.max(20) }
    }

    /// Print the current frame to stdout.
    pub fn flush(&mut self, game: &Game) {
        // re-check terminal width in case it's been resized
        self.width = termwidth();
        print!("{}", self.frame(game));
    }

    /// Compose the whole frame: scene, results and status sections.
    pub fn frame(&self, game: &Game) -> String {
        let mut out = String::new();
        out.push_str(&self.section("scene"));
        out.push_str(&self.scene(game));
        out.push_str(&self.section("results"));
        out.push_str(&self.results(game));
        out.push_str(&self.section("status"));
        out.push_str(&status(game));
        out
    }

    fn section(&self, title: &str) -> String {
        format!("\n{:.>width$}\n\n", title.section_style(), width = self.width)
    }

    /// Space name, tile, description, visible objects, enemies present and exits.
    fn scene(&self, game: &Game) -> String {
        let Some(space) = game.player_space() else {
            return format!("{}\n", "You are nowhere at all.".error_style());
        };
        let light = game.effective_light(space.id);
        let mut out = format!("{}\n", space.name.space_titlebar_style());

        for row in space.tile.iter().filter(|row| !row.trim().is_empty()) {
            out.push_str(&format!("    {}\n", row.tile_style()));
        }
        if !space.description.is_empty() {
            out.push_str(&format!("{}\n", fill(&space.description, self.width).description_style()));
        }

        let visible: Vec<&str> = space
            .objects()
            .filter_map(|id| game.get_object_by_id(id))
            .filter(|object| object.is_visible_in(light))
            .map(WorldObject::name)
            .collect();
        if !visible.is_empty() {
            out.push_str(&format!("\n{}\n", "You see:".subheading_style()));
            for name in visible {
                out.push_str(&format!("  * {}\n", name.object_style()));
            }
        }

        for enemy in game.enemies_near_player() {
            out.push_str(&format!(
                "\n{ICON_ENEMY} {} is here ({} hp)\n",
                enemy.name.enemy_style(),
                enemy.health.current_hp()
            ));
        }

        let exits: Vec<String> = Direction::ALL
            .iter()
            .filter_map(|&dir| game.link_toward(space.id, dir).map(|link| (dir, link)))
            .map(|(dir, link)| {
                if link.is_open() {
                    format!("{dir}: {}", link.name).exit_open_style().to_string()
                } else {
                    format!("{dir}: {} (closed)", link.name).exit_closed_style().to_string()
                }
            })
            .collect();
        out.push_str(&format!("\n{}\n", "Exits:".subheading_style()));
        if exits.is_empty() {
            out.push_str("  none\n");
        } else {
            for exit in exits {
                out.push_str(&format!("  {exit}\n"));
            }
        }
        out
    }

    /// Command status, event line and inspection text.
    fn results(&self, game: &Game) -> String {
        let dialogue = game.dialogue();
        let mut out = String::new();
        if !dialogue.command().is_empty() {
            let line = if dialogue.command().ends_with("ERROR") {
                dialogue.command().error_style()
            } else {
                dialogue.command().ok_style()
            };
            out.push_str(&format!("{line}\n"));
        }
        out.push_str(&format!("{ICON_EVENT} {}\n", dialogue.event().event_style()));
        if let Some(text) = game.inspection() {
            out.push_str(&format!("\n{}\n", fill(text, self.width).description_style()));
        }
        out
    }
}

/// Player and enemy health, inventory, and the time of day.
fn status(game: &Game) -> String {
    let mut out = String::new();
    if let Some(player) = game.player() {
        out.push_str(&format!(
            "{ICON_HEALTH} {}: {}/{} hp",
            player.name.bold(),
            player.health.current_hp(),
            player.health.max_hp()
        ));
        let held: Vec<&str> = player
            .inventory()
            .ids()
            .filter_map(|id| game.get_object_by_id(id))
            .map(WorldObject::name)
            .collect();
        out.push_str(&format!(
            "   pack {}/{}: {}\n",
            held.len(),
            player.inventory().capacity(),
            if held.is_empty() { "empty".to_string() } else { held.join(", ") }
        ));
    }
    if let Some(enemy) = game.enemy() {
        out.push_str(&format!(
            "{ICON_ENEMY} {}: {}/{} hp\n",
            enemy.name.enemy_style(),
            enemy.health.current_hp(),
            enemy.health.max_hp()
        ));
    }
    out.push_str(&format!("It is {}.\n", game.time()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::config::EngineConfig;
    use crate::event::FixedRule;
    use crate::game::Location;
    use crate::update::game_update;
    use crate::{Enemy, Link, Object, Player, Space};
    use delve_data::{Light, LinkStatus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> Game {
        let mut game = Game::with_parts(EngineConfig::default(), StdRng::seed_from_u64(1), Box::new(FixedRule::nothing()));
        let mut hall = Space::new(11, "Great Hall");
        hall.description = "Pillars march into the gloom.".into();
        hall.tile[0] = "[ ## ]".into();
        game.add_space(hall).unwrap();
        game.add_space(Space::new(12, "Cellar")).unwrap();
        game.add_player(Player::new(21, "Ant", 3, 2)).unwrap();
        game.set_player_location(21, Location::Space(11)).unwrap();
        game.add_enemy(Enemy::new(41, "Spider", 2)).unwrap();
        game.set_enemy_location(41, Location::Space(11)).unwrap();
        game.add_object(Object::new(301, "apple")).unwrap();
        game.set_object_location(301, Location::Space(11)).unwrap();
        let mut ghost = Object::new(302, "ghostly pear");
        ghost.visible_in = Light::Dark;
        game.add_object(ghost).unwrap();
        game.set_object_location(302, Location::Space(11)).unwrap();
        game.add_link(Link {
            id: 41,
            name: "trapdoor".into(),
            origin: 11,
            destination: 12,
            direction: Direction::South,
            status: LinkStatus::Closed,
        })
        .unwrap();
        game
    }

    #[test]
    fn scene_lists_what_the_player_can_see() {
        let frame = View::with_width(60).frame(&game());
        assert!(frame.contains("Great Hall"));
        assert!(frame.contains("[ ## ]"));
        assert!(frame.contains("apple"));
        assert!(!frame.contains("ghostly pear"));
        assert!(frame.contains("Spider"));
        assert!(frame.contains("south: trapdoor (closed)"));
        assert!(frame.contains("It is day."));
    }

    #[test]
    fn results_show_command_status_and_inspection() {
        let mut game = game();
        game_update(&mut game, Command::Take(Some("apple".into())));
        game_update(&mut game, Command::Inspect(Some("s".into())));
        let frame = View::with_width(60).frame(&game);
        assert!(frame.contains("Inspect: OK"));
        assert!(frame.contains("pack 1/2: apple"));
    }
}
