//! Generic key representation for cross-backend input polling.

use std::fmt;
use std::str::FromStr;

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these values.
/// Scripts name keys with case-insensitive strings (`"up"`, `"space"`, `"a"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Cursor up
    Up,
    /// Cursor down
    Down,
    /// Cursor left
    Left,
    /// Cursor right
    Right,
    /// Space bar
    Space,
    /// Return/Enter key
    Enter,
    /// Escape key
    Escape,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Letter or digit key, stored lowercase
    Char(char),
}

impl Key {
    /// Lowercase name used in polling results.
    pub fn name(self) -> String {
        match self {
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::Space => "space".to_string(),
            Key::Enter => "enter".to_string(),
            Key::Escape => "escape".to_string(),
            Key::Shift => "shift".to_string(),
            Key::Ctrl => "ctrl".to_string(),
            Key::Alt => "alt".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let key = match name.as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" => Key::Alt,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => Key::Char(c),
                    _ => return Err(s.to_string()),
                }
            }
        };
        Ok(key)
    }
}
