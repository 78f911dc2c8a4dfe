//! Host keystrokes: a key plus the modifiers held while it is tapped.
//!
//! Shortcuts are written the way editing software documents them:
//! `"ctrl+shift+f"`, `"Space"`, `"b"`.  Parsing happens once, when a
//! profile's binding table is built, so a typo is a startup error rather
//! than a silent no-op the first time the key is pressed.

pub mod host;
pub mod x11;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use host::HostKey;

/// Error returned when a shortcut string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeystrokeError {
    #[error("empty keystroke")]
    Empty,
    #[error("unknown key {name:?} in keystroke {input:?}")]
    UnknownKey { input: String, name: String },
    #[error("keystroke {0:?} has no non-modifier key")]
    MissingKey(String),
    #[error("keystroke {0:?} names more than one non-modifier key")]
    MultipleKeys(String),
}

/// Modifier keys held for the duration of a keystroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(1 << 0);
    pub const SHIFT: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    /// Win / Cmd / Super.
    pub const META: Modifiers = Modifiers(1 << 3);

    /// Returns `true` if every modifier in `other` is held.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no modifier is held.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(Self::CTRL),
            "shift" => Some(Self::SHIFT),
            "alt" | "option" => Some(Self::ALT),
            "meta" | "super" | "win" | "cmd" | "command" => Some(Self::META),
            _ => None,
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// A single host keystroke: press modifiers, tap `key`, release modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keystroke {
    modifiers: Modifiers,
    key: HostKey,
}

impl Keystroke {
    /// Creates a keystroke from parts.
    pub fn new(modifiers: Modifiers, key: HostKey) -> Self {
        Self { modifiers, key }
    }

    /// Returns the held modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns the tapped key.
    pub fn key(&self) -> HostKey {
        self.key
    }
}

impl From<HostKey> for Keystroke {
    fn from(key: HostKey) -> Self {
        Keystroke::new(Modifiers::NONE, key)
    }
}

impl FromStr for Keystroke {
    type Err = KeystrokeError;

    /// Parses `+`-separated modifier and key names.  A lone `"+"` is not a
    /// valid key; write `"shift+equal"` instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(KeystrokeError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        let mut key = None;
        for part in input.split('+').map(str::trim) {
            if let Some(m) = Modifiers::from_name(part) {
                modifiers = modifiers | m;
                continue;
            }
            let parsed = HostKey::from_name(part).ok_or_else(|| KeystrokeError::UnknownKey {
                input: input.to_string(),
                name: part.to_string(),
            })?;
            if key.replace(parsed).is_some() {
                return Err(KeystrokeError::MultipleKeys(input.to_string()));
            }
        }

        let key = key.ok_or_else(|| KeystrokeError::MissingKey(input.to_string()))?;
        Ok(Keystroke::new(modifiers, key))
    }
}

impl fmt::Display for Keystroke {
    /// Canonical form: modifiers in `ctrl+shift+alt+meta` order, then the key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "ctrl"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::ALT, "alt"),
            (Modifiers::META, "meta"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(self.key.name())
    }
}
