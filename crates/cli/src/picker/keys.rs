//! Decoding terminal key events into picker keys.
//!
//! crossterm does the escape-sequence parsing of raw stdin; this module
//! narrows its events down to the handful of keys the picker reacts to, so
//! the state machine never sees terminal protocol details.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key the picker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Printable(char),
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Delete,
    Escape,
    Enter,
    CtrlC,
    CtrlD,
    Unknown,
}

/// Whether `c` may be inserted into the query.
#[must_use]
pub fn is_printable(c: char) -> bool {
    !c.is_control()
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let control = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        match event.code {
            KeyCode::Char(c) if control => match c.to_ascii_lowercase() {
                'c' => Key::CtrlC,
                'd' => Key::CtrlD,
                'h' => Key::Backspace,
                'j' | 'm' => Key::Enter,
                _ => Key::Unknown,
            },
            KeyCode::Char(_) if alt => Key::Unknown,
            KeyCode::Char(c) if is_printable(c) => Key::Printable(c),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Delete => Key::Delete,
            KeyCode::Esc => Key::Escape,
            _ => Key::Unknown,
        }
    }
}
