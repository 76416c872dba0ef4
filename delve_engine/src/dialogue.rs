//! Feedback text for the last command and the last event.
//!
//! Templates hold at most one `{name}` placeholder, filled by literal substitution.

use crate::command::CommandTag;
use crate::event::{EventKind, EventRecord};

/// Marker replaced by [`fill`].
pub const PLACEHOLDER: &str = "{name}";

pub const COMMAND_OK: &str = "{name}: OK";
pub const COMMAND_ERROR: &str = "{name}: ERROR";
pub const COMMAND_UNKNOWN: &str = "Unknown command.";
pub const NOTHING_HAPPENED: &str = "Nothing happened.";
pub const TOO_DARK: &str = "It is too dark here to see anything.";

/// Replace the first placeholder in `template` with `value`.
///
/// ```
/// use delve_engine::dialogue::fill;
///
/// assert_eq!(fill("Take: {name}", "OK"), "Take: OK");
/// assert_eq!(fill("no marker", "x"), "no marker");
/// ```
pub fn fill(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}

/// Display line for a finished command.
pub fn command_line(tag: CommandTag, succeeded: bool) -> String {
    if tag == CommandTag::Unknown {
        return COMMAND_UNKNOWN.to_string();
    }
    let template = if succeeded { COMMAND_OK } else { COMMAND_ERROR };
    fill(template, &tag.to_string())
}

/// Template for an applied event. `{name}` is the object, creature or amount involved.
pub fn event_template(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Nothing => NOTHING_HAPPENED,
        EventKind::MoveObject => "Something clatters to the floor nearby: {name}.",
        EventKind::Trap => "A hidden trap snaps shut! You lose {name} health.",
        EventKind::EnemySpawn => "{name} crawls out of the shadows!",
        EventKind::DayNight => "The light shifts. It is now {name}.",
        EventKind::Respawn => "The world spins and you wake up in {name}.",
    }
}

/// Display line for an event outcome.
pub fn event_line(record: &EventRecord, detail: &str) -> String {
    if record.applied {
        fill(event_template(record.kind), detail)
    } else {
        NOTHING_HAPPENED.to_string()
    }
}

/// Command and event lines shown after each turn. Reset at the start of every command cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogue {
    command: String,
    event: String,
}

impl Dialogue {
    pub fn reset(&mut self) {
        self.command.clear();
        self.event = NOTHING_HAPPENED.to_string();
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub(crate) fn set_command(&mut self, line: String) {
        self.command = line;
    }

    pub(crate) fn set_event(&mut self, line: String) {
        self.event = line;
    }
}
