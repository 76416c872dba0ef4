//! Command module
//!
//! Turns a raw input line into a [`Command`]: one tag plus up to two arguments. Every verb has a
//! long and a one-letter form. Missing arguments are kept as `None` so the dispatcher can report
//! them as a failed command.
use std::fmt;

/// Command tags without their arguments, as recorded in `last_cmd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, variantly::Variantly)]
pub enum CommandTag {
    Exit,
    Take,
    Drop,
    Attack,
    Move,
    Inspect,
    Save,
    Load,
    TurnOn,
    TurnOff,
    Open,
    Use,
    Unknown,
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            CommandTag::Exit => "Exit",
            CommandTag::Take => "Take",
            CommandTag::Drop => "Drop",
            CommandTag::Attack => "Attack",
            CommandTag::Move => "Move",
            CommandTag::Inspect => "Inspect",
            CommandTag::Save => "Save",
            CommandTag::Load => "Load",
            CommandTag::TurnOn => "Turn on",
            CommandTag::TurnOff => "Turn off",
            CommandTag::Open => "Open",
            CommandTag::Use => "Use",
            CommandTag::Unknown => "Unknown",
        };
        f.write_str(word)
    }
}

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Take(Option<String>),
    Drop(Option<String>),
    Attack,
    Move(Option<String>),
    Inspect(Option<String>),
    Save(Option<String>),
    Load(Option<String>),
    TurnOn(Option<String>),
    TurnOff(Option<String>),
    Open { link: Option<String>, object: Option<String> },
    Use(Option<String>),
    Unknown,
}

impl Command {
    pub fn tag(&self) -> CommandTag {
        match self {
            Command::Exit => CommandTag::Exit,
            Command::Take(_) => CommandTag::Take,
            Command::Drop(_) => CommandTag::Drop,
            Command::Attack => CommandTag::Attack,
            Command::Move(_) => CommandTag::Move,
            Command::Inspect(_) => CommandTag::Inspect,
            Command::Save(_) => CommandTag::Save,
            Command::Load(_) => CommandTag::Load,
            Command::TurnOn(_) => CommandTag::TurnOn,
            Command::TurnOff(_) => CommandTag::TurnOff,
            Command::Open { .. } => CommandTag::Open,
            Command::Use(_) => CommandTag::Use,
            Command::Unknown => CommandTag::Unknown,
        }
    }
}

/// Parses an input line into a `Command`. Verbs and keywords (`on`, `off`, `with`, `using`) are
/// case-insensitive; arguments keep their case.
///
/// ```
/// use delve_engine::command::{Command, parse_command};
///
/// assert_eq!(parse_command("c lantern"), Command::Take(Some("lantern".into())));
/// assert_eq!(parse_command("take"), Command::Take(None));
/// assert_eq!(parse_command("dance"), Command::Unknown);
/// ```
pub fn parse_command(input: &str) -> Command {
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some((verb, rest)) = words.split_first() else {
        return Command::Unknown;
    };
    let first = rest.first().map(|w| (*w).to_string());
    let lowered: Vec<String> = rest.iter().map(|w| w.to_lowercase()).collect();
    let keys: Vec<&str> = lowered.iter().map(String::as_str).collect();
    match verb.to_lowercase().as_str() {
        "exit" | "e" | "quit" => Command::Exit,
        "take" | "c" => Command::Take(first),
        "drop" | "v" => Command::Drop(first),
        "attack" | "q" => Command::Attack,
        "move" | "m" | "go" => Command::Move(first),
        "inspect" | "i" => Command::Inspect(first),
        "save" | "g" => Command::Save(first),
        "load" | "l" => Command::Load(first),
        "turnon" | "on" => Command::TurnOn(first),
        "turnoff" | "off" => Command::TurnOff(first),
        "turn" => match (keys.as_slice(), rest) {
            (["on", ..], [_, thing, ..]) => Command::TurnOn(Some((*thing).to_string())),
            (["off", ..], [_, thing, ..]) => Command::TurnOff(Some((*thing).to_string())),
            ([_, "on"], [thing, _]) => Command::TurnOn(Some((*thing).to_string())),
            ([_, "off"], [thing, _]) => Command::TurnOff(Some((*thing).to_string())),
            _ => Command::Unknown,
        },
        "open" | "o" => {
            let object = match (keys.as_slice(), rest) {
                ([_, "with" | "using", _, ..], [_, _, object, ..]) | (_, [_, object, ..]) => {
                    Some((*object).to_string())
                },
                _ => None,
            };
            Command::Open { link: first, object }
        },
        "use" | "u" => Command::Use(first),
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn long_and_short_forms_agree() {
        let pairs = [
            ("exit", "e"),
            ("take apple", "c apple"),
            ("drop apple", "v apple"),
            ("attack", "q"),
            ("move north", "m north"),
            ("inspect s", "i s"),
            ("save slot", "g slot"),
            ("load slot", "l slot"),
            ("turnon lamp", "on lamp"),
            ("turnoff lamp", "off lamp"),
            ("open door key", "o door key"),
            ("use apple", "u apple"),
        ];
        for (long, short) in pairs {
            assert_eq!(parse_command(long), parse_command(short), "{long} vs {short}");
        }
    }

    #[test]
    fn verbs_ignore_case_but_arguments_do_not() {
        assert_eq!(parse_command("TAKE Lantern"), Command::Take(some("Lantern")));
    }

    #[test]
    fn open_accepts_with_keyword() {
        assert_eq!(
            parse_command("open gate with key"),
            Command::Open {
                link: some("gate"),
                object: some("key")
            }
        );
        assert_eq!(
            parse_command("open gate key"),
            Command::Open {
                link: some("gate"),
                object: some("key")
            }
        );
        assert_eq!(
            parse_command("open gate"),
            Command::Open {
                link: some("gate"),
                object: None
            }
        );
    }

    #[test]
    fn turn_phrases() {
        assert_eq!(parse_command("turn on lamp"), Command::TurnOn(some("lamp")));
        assert_eq!(parse_command("turn lamp off"), Command::TurnOff(some("lamp")));
        assert_eq!(parse_command("turn lamp"), Command::Unknown);
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(parse_command("Turn ON Lamp"), Command::TurnOn(some("Lamp")));
        assert_eq!(parse_command("turn lamp Off"), Command::TurnOff(some("lamp")));
        assert_eq!(
            parse_command("open gate WITH key"),
            Command::Open {
                link: some("gate"),
                object: some("key")
            }
        );
        assert_eq!(
            parse_command("open gate Using Key"),
            Command::Open {
                link: some("gate"),
                object: some("Key")
            }
        );
    }

    #[test]
    fn missing_arguments_are_none() {
        assert_eq!(parse_command("move"), Command::Move(None));
        assert_eq!(parse_command("use"), Command::Use(None));
    }

    #[test]
    fn blank_and_unknown_input() {
        assert_eq!(parse_command("   "), Command::Unknown);
        assert_eq!(parse_command("xyzzy"), Command::Unknown);
        assert_eq!(parse_command("xyzzy").tag(), CommandTag::Unknown);
    }
}
