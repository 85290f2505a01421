//! Key bindings and key sources

use crate::markers::Style;
use crate::shell::Command;
use crate::Motion;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::io;

/// What a key press asks the editor to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    Insert(String),
    DeleteBackward,
    DeleteForward,
    Move { motion: Motion, extend: bool },
    SelectAll,
}

/// Fixed key bindings
pub fn map_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let command = |c| Some(Action::Command(c));
    let moving = |motion| {
        Some(Action::Move {
            motion,
            extend: shift,
        })
    };

    match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'n' => command(Command::New),
            'o' => command(Command::Open),
            's' => command(Command::Save),
            'q' => command(Command::Exit),
            'z' => command(Command::Undo),
            'y' => command(Command::Redo),
            'x' => command(Command::Cut),
            'c' => command(Command::Copy),
            'v' => command(Command::Paste),
            'a' => Some(Action::SelectAll),
            'b' => command(Command::ToggleStyle(Style::Bold)),
            'u' => command(Command::ToggleStyle(Style::Underline)),
            _ => None,
        },
        KeyCode::Char(c) => Some(Action::Insert(c.to_string())),
        KeyCode::Enter => Some(Action::Insert("\n".to_string())),
        KeyCode::Tab => Some(Action::Insert("\t".to_string())),
        KeyCode::Backspace => Some(Action::DeleteBackward),
        KeyCode::Delete => Some(Action::DeleteForward),
        KeyCode::F(2) => command(Command::ToggleStyle(Style::Bold)),
        KeyCode::F(3) => command(Command::ToggleStyle(Style::Italic)),
        KeyCode::F(4) => command(Command::ToggleStyle(Style::Underline)),
        KeyCode::F(12) => command(Command::SaveAs),
        KeyCode::Left => moving(Motion::Left),
        KeyCode::Right => moving(Motion::Right),
        KeyCode::Up => moving(Motion::Up),
        KeyCode::Down => moving(Motion::Down),
        KeyCode::Home if ctrl => moving(Motion::DocumentStart),
        KeyCode::End if ctrl => moving(Motion::DocumentEnd),
        KeyCode::Home => moving(Motion::LineStart),
        KeyCode::End => moving(Motion::LineEnd),
        _ => None,
    }
}

/// Blocking source of key presses
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

/// Reads presses from the real terminal, skipping releases, repeats and
/// non-key events
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

/// Replays a fixed list of keys; errors once exhausted
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Plain key presses for each character of `text`
    pub fn typed(text: &str) -> impl Iterator<Item = KeyEvent> + '_ {
        text.chars().map(|c| match c {
            '\n' => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            c => KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
        })
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_menu_shortcuts() {
        assert_eq!(map_key(ctrl('s')), Some(Action::Command(Command::Save)));
        assert_eq!(map_key(ctrl('Q')), Some(Action::Command(Command::Exit)));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::F(12), KeyModifiers::NONE)),
            Some(Action::Command(Command::SaveAs))
        );
        assert_eq!(map_key(ctrl('k')), None);
    }

    #[test]
    fn test_toolbar_keys() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE)),
            Some(Action::Command(Command::ToggleStyle(Style::Italic)))
        );
        assert_eq!(
            map_key(ctrl('b')),
            Some(Action::Command(Command::ToggleStyle(Style::Bold)))
        );
    }

    #[test]
    fn test_shift_extends_motion() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT)),
            Some(Action::Move {
                motion: Motion::Right,
                extend: true
            })
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL)),
            Some(Action::Move {
                motion: Motion::DocumentEnd,
                extend: false
            })
        );
    }

    #[test]
    fn test_scripted_keys_run_out() {
        let mut keys = ScriptedKeys::new(ScriptedKeys::typed("a\n").collect::<Vec<_>>());
        assert_eq!(keys.next_key().unwrap().code, KeyCode::Char('a'));
        assert_eq!(keys.next_key().unwrap().code, KeyCode::Enter);
        assert!(keys.next_key().is_err());
    }
}
