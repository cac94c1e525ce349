//! Keyboard input mapping.
//!
//! The terminal stays in line mode, so every key is followed by Enter. An
//! empty line toggles the timer, which makes Enter alone act as play/pause.

use crate::timer::Command;

/// What a line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward a command to the scheduler
    Command(Command),
    /// Print the key bindings
    Help,
    /// Leave the timer
    Quit,
}

/// Key bindings shown by the help output, as (keys, description).
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Enter, s, p", "start / pause"),
    ("r", "reset the current period"),
    ("n", "switch between work and break"),
    ("h, ?", "show this help"),
    ("q", "quit"),
];

/// Maps one input line to an action. Returns None for unknown keys.
pub fn parse_input(line: &str) -> Option<Input> {
    let key = line.trim().to_ascii_lowercase();
    let input = match key.as_str() {
        "" | "s" | "p" | "start" | "pause" => Input::Command(Command::ToggleRun),
        "r" | "reset" => Input::Command(Command::Reset),
        "n" | "next" | "switch" => Input::Command(Command::SwitchMode),
        "h" | "?" | "help" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}
