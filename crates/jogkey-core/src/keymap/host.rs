//! Host keyboard keys that a shortcut can press.
//!
//! Each variant's numeric value is its USB HID Usage ID (page 0x07,
//! Keyboard/Keypad), the same position-based code every OS input layer can
//! be mapped from.  Only the keys that editing shortcuts use are listed; the
//! numpad and lock keys are left out.
//!
//! # Names
//!
//! Shortcut strings refer to keys by name.  [`HostKey::from_name`] accepts a
//! single printable character (`"b"`, `"7"`, `"/"`) or a key word
//! (`"space"`, `"right"`, `"pagedown"`, `"f5"`), ignoring ASCII case.
//! Letters are layout positions, so `"I"` and `"i"` are the same key; a
//! shifted letter must be written with an explicit `shift+` modifier.

/// A host keyboard key, identified by its USB HID Usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HostKey {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control and punctuation keys (HID 0x28–0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    // Function keys (HID 0x3A–0x45)
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster (HID 0x49–0x52)
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,
}

const LETTERS: [HostKey; 26] = [
    HostKey::KeyA, HostKey::KeyB, HostKey::KeyC, HostKey::KeyD,
    HostKey::KeyE, HostKey::KeyF, HostKey::KeyG, HostKey::KeyH,
    HostKey::KeyI, HostKey::KeyJ, HostKey::KeyK, HostKey::KeyL,
    HostKey::KeyM, HostKey::KeyN, HostKey::KeyO, HostKey::KeyP,
    HostKey::KeyQ, HostKey::KeyR, HostKey::KeyS, HostKey::KeyT,
    HostKey::KeyU, HostKey::KeyV, HostKey::KeyW, HostKey::KeyX,
    HostKey::KeyY, HostKey::KeyZ,
];

const DIGITS: [HostKey; 10] = [
    HostKey::Digit0, HostKey::Digit1, HostKey::Digit2, HostKey::Digit3,
    HostKey::Digit4, HostKey::Digit5, HostKey::Digit6, HostKey::Digit7,
    HostKey::Digit8, HostKey::Digit9,
];

const FUNCTION_KEYS: [HostKey; 12] = [
    HostKey::F1, HostKey::F2, HostKey::F3, HostKey::F4,
    HostKey::F5, HostKey::F6, HostKey::F7, HostKey::F8,
    HostKey::F9, HostKey::F10, HostKey::F11, HostKey::F12,
];

impl HostKey {
    /// Every key, in HID usage order.
    pub const ALL: [HostKey; 74] = [
        HostKey::KeyA, HostKey::KeyB, HostKey::KeyC, HostKey::KeyD,
        HostKey::KeyE, HostKey::KeyF, HostKey::KeyG, HostKey::KeyH,
        HostKey::KeyI, HostKey::KeyJ, HostKey::KeyK, HostKey::KeyL,
        HostKey::KeyM, HostKey::KeyN, HostKey::KeyO, HostKey::KeyP,
        HostKey::KeyQ, HostKey::KeyR, HostKey::KeyS, HostKey::KeyT,
        HostKey::KeyU, HostKey::KeyV, HostKey::KeyW, HostKey::KeyX,
        HostKey::KeyY, HostKey::KeyZ,
        HostKey::Digit1, HostKey::Digit2, HostKey::Digit3, HostKey::Digit4,
        HostKey::Digit5, HostKey::Digit6, HostKey::Digit7, HostKey::Digit8,
        HostKey::Digit9, HostKey::Digit0,
        HostKey::Enter, HostKey::Escape, HostKey::Backspace, HostKey::Tab,
        HostKey::Space, HostKey::Minus, HostKey::Equal, HostKey::BracketLeft,
        HostKey::BracketRight, HostKey::Backslash, HostKey::Semicolon,
        HostKey::Quote, HostKey::Backquote, HostKey::Comma, HostKey::Period,
        HostKey::Slash,
        HostKey::F1, HostKey::F2, HostKey::F3, HostKey::F4,
        HostKey::F5, HostKey::F6, HostKey::F7, HostKey::F8,
        HostKey::F9, HostKey::F10, HostKey::F11, HostKey::F12,
        HostKey::Insert, HostKey::Home, HostKey::PageUp, HostKey::Delete,
        HostKey::End, HostKey::PageDown, HostKey::ArrowRight, HostKey::ArrowLeft,
        HostKey::ArrowDown, HostKey::ArrowUp,
    ];

    /// Returns the USB HID Usage ID for this key.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Looks up a key by name, ignoring ASCII case.
    ///
    /// Returns `None` if the name is not recognised.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
            return n.checked_sub(1).and_then(|i| FUNCTION_KEYS.get(i)).copied();
        }
        let key = match lower.as_str() {
            "enter" | "return" => HostKey::Enter,
            "esc" | "escape" => HostKey::Escape,
            "backspace" => HostKey::Backspace,
            "tab" => HostKey::Tab,
            "space" => HostKey::Space,
            "minus" => HostKey::Minus,
            "equal" | "plus" => HostKey::Equal,
            "bracketleft" => HostKey::BracketLeft,
            "bracketright" => HostKey::BracketRight,
            "backslash" => HostKey::Backslash,
            "semicolon" => HostKey::Semicolon,
            "quote" | "apostrophe" => HostKey::Quote,
            "backquote" | "grave" => HostKey::Backquote,
            "comma" => HostKey::Comma,
            "period" | "dot" => HostKey::Period,
            "slash" => HostKey::Slash,
            "insert" => HostKey::Insert,
            "home" => HostKey::Home,
            "pageup" | "page_up" => HostKey::PageUp,
            "delete" | "del" => HostKey::Delete,
            "end" => HostKey::End,
            "pagedown" | "page_down" => HostKey::PageDown,
            "right" => HostKey::ArrowRight,
            "left" => HostKey::ArrowLeft,
            "down" => HostKey::ArrowDown,
            "up" => HostKey::ArrowUp,
            _ => return None,
        };
        Some(key)
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='z' => LETTERS.get(c as usize - 'a' as usize).copied(),
            '0'..='9' => DIGITS.get(c as usize - '0' as usize).copied(),
            '-' => Some(HostKey::Minus),
            '=' => Some(HostKey::Equal),
            '[' => Some(HostKey::BracketLeft),
            ']' => Some(HostKey::BracketRight),
            '\\' => Some(HostKey::Backslash),
            ';' => Some(HostKey::Semicolon),
            '\'' => Some(HostKey::Quote),
            '`' => Some(HostKey::Backquote),
            ',' => Some(HostKey::Comma),
            '.' => Some(HostKey::Period),
            '/' => Some(HostKey::Slash),
            _ => None,
        }
    }

    /// Returns the canonical name, which [`HostKey::from_name`] accepts.
    pub fn name(self) -> &'static str {
        match self {
            HostKey::KeyA => "a",
            HostKey::KeyB => "b",
            HostKey::KeyC => "c",
            HostKey::KeyD => "d",
            HostKey::KeyE => "e",
            HostKey::KeyF => "f",
            HostKey::KeyG => "g",
            HostKey::KeyH => "h",
            HostKey::KeyI => "i",
            HostKey::KeyJ => "j",
            HostKey::KeyK => "k",
            HostKey::KeyL => "l",
            HostKey::KeyM => "m",
            HostKey::KeyN => "n",
            HostKey::KeyO => "o",
            HostKey::KeyP => "p",
            HostKey::KeyQ => "q",
            HostKey::KeyR => "r",
            HostKey::KeyS => "s",
            HostKey::KeyT => "t",
            HostKey::KeyU => "u",
            HostKey::KeyV => "v",
            HostKey::KeyW => "w",
            HostKey::KeyX => "x",
            HostKey::KeyY => "y",
            HostKey::KeyZ => "z",
            HostKey::Digit1 => "1",
            HostKey::Digit2 => "2",
            HostKey::Digit3 => "3",
            HostKey::Digit4 => "4",
            HostKey::Digit5 => "5",
            HostKey::Digit6 => "6",
            HostKey::Digit7 => "7",
            HostKey::Digit8 => "8",
            HostKey::Digit9 => "9",
            HostKey::Digit0 => "0",
            HostKey::Enter => "enter",
            HostKey::Escape => "esc",
            HostKey::Backspace => "backspace",
            HostKey::Tab => "tab",
            HostKey::Space => "space",
            HostKey::Minus => "minus",
            HostKey::Equal => "equal",
            HostKey::BracketLeft => "bracketleft",
            HostKey::BracketRight => "bracketright",
            HostKey::Backslash => "backslash",
            HostKey::Semicolon => "semicolon",
            HostKey::Quote => "quote",
            HostKey::Backquote => "backquote",
            HostKey::Comma => "comma",
            HostKey::Period => "period",
            HostKey::Slash => "slash",
            HostKey::F1 => "f1",
            HostKey::F2 => "f2",
            HostKey::F3 => "f3",
            HostKey::F4 => "f4",
            HostKey::F5 => "f5",
            HostKey::F6 => "f6",
            HostKey::F7 => "f7",
            HostKey::F8 => "f8",
            HostKey::F9 => "f9",
            HostKey::F10 => "f10",
            HostKey::F11 => "f11",
            HostKey::F12 => "f12",
            HostKey::Insert => "insert",
            HostKey::Home => "home",
            HostKey::PageUp => "pageup",
            HostKey::Delete => "delete",
            HostKey::End => "end",
            HostKey::PageDown => "pagedown",
            HostKey::ArrowRight => "right",
            HostKey::ArrowLeft => "left",
            HostKey::ArrowDown => "down",
            HostKey::ArrowUp => "up",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_case_insensitive_positions() {
        assert_eq!(HostKey::from_name("I"), Some(HostKey::KeyI));
        assert_eq!(HostKey::from_name("i"), Some(HostKey::KeyI));
    }

    #[test]
    fn test_all_letter_keys_have_contiguous_hid_codes() {
        for (i, &letter) in LETTERS.iter().enumerate() {
            let expected_hid = 0x04u16 + i as u16;
            assert_eq!(letter.as_u16(), expected_hid, "{letter:?}");
        }
    }

    #[test]
    fn test_digits_map_by_character() {
        assert_eq!(HostKey::from_name("0"), Some(HostKey::Digit0));
        assert_eq!(HostKey::from_name("7"), Some(HostKey::Digit7));
    }

    #[test]
    fn test_function_keys_parse_in_range_only() {
        assert_eq!(HostKey::from_name("F1"), Some(HostKey::F1));
        assert_eq!(HostKey::from_name("f12"), Some(HostKey::F12));
        assert_eq!(HostKey::from_name("f0"), None);
        assert_eq!(HostKey::from_name("f13"), None);
    }

    #[test]
    fn test_named_keys_accept_aliases() {
        assert_eq!(HostKey::from_name("Space"), Some(HostKey::Space));
        assert_eq!(HostKey::from_name("return"), Some(HostKey::Enter));
        assert_eq!(HostKey::from_name("RIGHT"), Some(HostKey::ArrowRight));
        assert_eq!(HostKey::from_name("page_down"), Some(HostKey::PageDown));
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        for name in ["", "ctrl", "numpad1", "é", "spacebar"] {
            assert_eq!(HostKey::from_name(name), None, "{name:?}");
        }
    }

    #[test]
    fn test_all_is_sorted_by_usage_without_duplicates() {
        for pair in HostKey::ALL.windows(2) {
            assert!(pair[0].as_u16() < pair[1].as_u16(), "{:?} / {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_canonical_names_parse_back() {
        let samples = [
            HostKey::KeyB,
            HostKey::Digit9,
            HostKey::Space,
            HostKey::Escape,
            HostKey::F10,
            HostKey::ArrowLeft,
            HostKey::Backquote,
            HostKey::PageUp,
        ];
        for key in samples {
            assert_eq!(HostKey::from_name(key.name()), Some(key), "{key:?}");
        }
    }
}
