//! Shell commands
//!
//! One command per input line.

use std::str::FromStr;

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Menu,
    /// Activate a menu item (1-based as printed)
    Go(usize),
    Key { key: String, shift: bool, control: bool },
    Set { pref: String, value: String },
    Tick(u64),
    Focus,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "menu" | "m" => Command::Menu,
            "go" => {
                let position = args
                    .first()
                    .and_then(|s| s.parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .ok_or(CommandError::Usage("go <n>"))?;
                Command::Go(position)
            }
            "key" => {
                const USAGE: &str = "key <k> [shift] [control]";
                let key = args.first().ok_or(CommandError::Usage(USAGE))?;
                let mut shift = false;
                let mut control = false;
                for modifier in &args[1..] {
                    match modifier.to_ascii_lowercase().as_str() {
                        "shift" => shift = true,
                        "control" | "ctrl" => control = true,
                        _ => return Err(CommandError::Usage(USAGE)),
                    }
                }
                Command::Key {
                    key: key.to_string(),
                    shift,
                    control,
                }
            }
            "set" => {
                let &[pref, value] = args.as_slice() else {
                    return Err(CommandError::Usage("set <pref> <value>"));
                };
                Command::Set {
                    pref: pref.to_string(),
                    value: value.to_string(),
                }
            }
            "tick" => {
                let ms = args
                    .first()
                    .and_then(|s| s.parse::<u64>().ok())
                    .ok_or(CommandError::Usage("tick <ms>"))?;
                Command::Tick(ms)
            }
            "focus" => Command::Focus,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  next | prev             move to the next / previous landmark
  menu                    list landmarks
  go <n>                  focus menu item n
  key <k> [shift] [control]
                          press a key
  set <pref> <value>      change a preference (borderMode, nextKey, previousKey,
                          shiftModifier, controlModifier)
  tick <ms>               advance the clock
  focus                   show the focused landmark
  quit";
