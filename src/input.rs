//! Keyboard mapping
//!
//! Keys arrive as DOM `KeyboardEvent.key` strings on the web and are mapped
//! once here, so the engines only ever see [`Key`] values.

use crate::sim::{Heading, RunnerCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
    /// Anything else (still starts/restarts the tunnel run)
    Other,
}

impl Key {
    pub fn from_dom(key: &str) -> Key {
        match key {
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    /// Snake heading requested by an arrow key
    pub fn heading(&self) -> Option<Heading> {
        match self {
            Key::Up => Some(Heading::UP),
            Key::Down => Some(Heading::DOWN),
            Key::Left => Some(Heading::LEFT),
            Key::Right => Some(Heading::RIGHT),
            _ => None,
        }
    }

    /// Tunnel runner command. Escape is handled by the host.
    pub fn runner_command(&self) -> Option<RunnerCommand> {
        match self {
            Key::Up => Some(RunnerCommand::Jump),
            Key::Down => Some(RunnerCommand::FastFall),
            Key::Left => Some(RunnerCommand::SteerLeft),
            Key::Right => Some(RunnerCommand::SteerRight),
            Key::Space => Some(RunnerCommand::Pause),
            Key::Other => Some(RunnerCommand::Other),
            Key::Escape => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dom() {
        assert_eq!(Key::from_dom("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("q"), Key::Other);
    }

    #[test]
    fn test_arrow_headings() {
        assert_eq!(Key::Up.heading(), Some(Heading::UP));
        assert_eq!(Key::Space.heading(), None);
    }

    #[test]
    fn test_escape_has_no_runner_command() {
        assert_eq!(Key::Escape.runner_command(), None);
        assert_eq!(Key::Up.runner_command(), Some(RunnerCommand::Jump));
    }
}
