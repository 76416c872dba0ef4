//! Terminal input handling for the delve REPL.
//!
//! Wraps rustyline configuration and completion tailored to the engine's command words and
//! save-file workflow, with a plain stdin fallback.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::save_files::collect_save_slots;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Long command words offered by tab completion.
const COMMAND_WORDS: &[&str] = &[
    "attack", "drop", "exit", "go", "inspect", "load", "move", "open", "quit", "save", "take", "turn off",
    "turn on", "turnoff", "turnon", "use",
];

type ReplEditor = rustyline::Editor<DelveHelper, DefaultHistory>;

struct DelveHelper {
    save_dir: PathBuf,
}

impl Helper for DelveHelper {}

impl Completer for DelveHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = prefix.to_lowercase();
        if let Some(rest) = load_argument(&lower) {
            let offset = pos - rest.len();
            let slots = available_save_slots(&self.save_dir);
            return Ok((offset, slot_pairs(&slots, rest)));
        }
        Ok((start, command_pairs(&lower)))
    }
}

impl Hinter for DelveHelper {
    type Hint = String;
}

impl Highlighter for DelveHelper {}

impl Validator for DelveHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

fn command_pairs(lower: &str) -> Vec<Pair> {
    COMMAND_WORDS
        .iter()
        .filter(|word| word.starts_with(lower))
        .map(|word| Pair {
            display: (*word).to_string(),
            replacement: (*word).to_string(),
        })
        .collect()
}

/// The partial slot name after a `load`/`l` verb, if the line is a load command.
fn load_argument(lower: &str) -> Option<&str> {
    let (verb, rest) = lower.split_once(char::is_whitespace)?;
    matches!(verb, "load" | "l").then(|| rest.trim_start())
}

fn slot_pairs(slots: &[String], partial: &str) -> Vec<Pair> {
    slots
        .iter()
        .filter(|slot| slot.starts_with(partial))
        .map(|slot| Pair {
            display: slot.clone(),
            replacement: slot.clone(),
        })
        .collect()
}

fn available_save_slots(dir: &Path) -> Vec<String> {
    match collect_save_slots(dir) {
        Ok(slots) => slots.into_iter().map(|slot| slot.slot).collect(),
        Err(err) => {
            warn!("failed to enumerate save slots for completion: {err}");
            Vec::new()
        },
    }
}

/// Helper responsible for managing the interactive input backend.
///
/// Prefers `rustyline` when an interactive terminal is available, falling back to
/// a basic stdin reader otherwise.
pub struct InputManager {
    backend: Backend,
}

impl InputManager {
    /// `save_dir` feeds save-slot completion for `load`.
    pub fn new(save_dir: &Path) -> Self {
        let backend = if io::stdin().is_terminal() {
            match RustylineInput::new(save_dir) {
                Ok(editor) => {
                    info!("using rustyline-backed REPL input");
                    Backend::Rustyline(Box::new(editor))
                },
                Err(err) => {
                    warn!("failed to initialize rustyline ({err}), falling back to basic stdin");
                    Backend::plain()
                },
            }
        } else {
            info!("stdin is not a TTY; using basic input mode");
            Backend::plain()
        };

        Self { backend }
    }

    /// Read a line from the current backend. If the interactive backend reports an
    /// unrecoverable error, switch to the plain stdin backend and retry once.
    ///
    /// # Errors
    /// Reading from stdin failed.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.backend.read_line(prompt) {
            Ok(event) => Ok(event),
            Err(err) => {
                if self.backend.is_rustyline() {
                    warn!("rustyline input failed: {err} -- switching to basic stdin");
                    self.backend = Backend::plain();
                    self.backend.read_line(prompt)
                } else {
                    Err(err)
                }
            },
        }
    }
}

enum Backend {
    Rustyline(Box<RustylineInput>),
    Plain(StdinInput),
}

impl Backend {
    fn plain() -> Self {
        Backend::Plain(StdinInput::default())
    }

    fn is_rustyline(&self) -> bool {
        matches!(self, Backend::Rustyline(_))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Backend::Rustyline(editor) => editor.read_line(prompt),
            Backend::Plain(stdin) => stdin.read_line(prompt),
        }
    }
}

struct RustylineInput {
    editor: ReplEditor,
    history_path: Option<PathBuf>,
}

impl RustylineInput {
    fn new(save_dir: &Path) -> io::Result<Self> {
        let mut editor = rustyline::Editor::<DelveHelper, _>::new().map_err(map_io_err)?;
        editor.set_helper(Some(DelveHelper {
            save_dir: save_dir.to_path_buf(),
        }));
        let history_path = history_file_path();

        if let Some(path) = history_path.as_ref() {
            if let Some(dir) = path.parent()
                && let Err(err) = fs::create_dir_all(dir)
            {
                warn!("failed to create history directory {}: {err}", dir.display());
            }

            if let Err(err) = editor.load_history(path) {
                match err {
                    ReadlineError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        info!("no prior history found at {}, starting fresh", path.display());
                    },
                    other => {
                        warn!("failed to load history from {}: {other}", path.display());
                    },
                }
            }
        }

        Ok(Self { editor, history_path })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to append to history: {err}");
                    }
                    if let Some(path) = self.history_path.as_ref()
                        && let Err(err) = self.editor.save_history(path)
                    {
                        warn!("failed to persist history to {}: {err}", path.display());
                    }
                }
                Ok(InputEvent::Line(line))
            },
            Err(err) => convert_readline_error(err),
        }
    }
}

#[derive(Default)]
struct StdinInput {
    buffer: String,
}

impl StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.buffer.clear();
        let bytes = io::stdin().read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(InputEvent::Eof);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        Ok(InputEvent::Line(self.buffer.clone()))
    }
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}

fn map_io_err(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(io_err) => io_err,
        other => io::Error::other(other),
    }
}

fn history_file_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| build_history_path(&base))
}

fn build_history_path(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    path.push("delve_engine");
    path.push("history.txt");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn converts_readline_ctrl_c_to_interrupt() {
        let result = convert_readline_error(ReadlineError::Interrupted).unwrap();
        assert!(matches!(result, InputEvent::Interrupted));
    }

    #[test]
    fn history_path_appends_components() {
        let base = PathBuf::from("/tmp/delve-test");
        let path = build_history_path(&base);
        assert!(path.ends_with(Path::new("delve_engine/history.txt")));
    }

    #[test]
    fn command_words_complete_by_prefix() {
        let names: Vec<String> = command_pairs("tu").into_iter().map(|p| p.replacement).collect();
        assert_eq!(names, vec!["turn off", "turn on", "turnoff", "turnon"]);
    }

    #[test]
    fn load_argument_is_only_found_after_a_load_verb() {
        assert_eq!(load_argument("load sa"), Some("sa"));
        assert_eq!(load_argument("l  q"), Some("q"));
        assert_eq!(load_argument("load"), None);
        assert_eq!(load_argument("take sa"), None);
    }

    #[test]
    fn save_slots_complete_from_the_save_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("save1.dat"), "").unwrap();
        fs::write(dir.path().join("save2.dat"), "").unwrap();
        fs::write(dir.path().join("other.dat"), "").unwrap();
        let slots = available_save_slots(dir.path());
        let names: Vec<String> = slot_pairs(&slots, "sa").into_iter().map(|p| p.replacement).collect();
        assert_eq!(names, vec!["save1", "save2"]);
    }
}
