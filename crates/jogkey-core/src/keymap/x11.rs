//! Host key to X11 keysym name translation.
//!
//! X11 names keys by *keysym*; the names are the `XK_` constants of
//! `X11/keysymdef.h` without the prefix.  Tools that synthesise input from
//! the command line (xdotool) take chords written as keysym names joined by
//! `+`, e.g. `ctrl+shift+f` or `Right`.
//!
//! Letters map to their *lowercase* keysym.  The X server applies Shift
//! itself, so the base form plus an explicit `shift` modifier is the correct
//! way to produce an uppercase letter.

use super::host::HostKey;
use super::{Keystroke, Modifiers};

/// Translates a [`HostKey`] to its X11 keysym name.
pub fn keysym_name(key: HostKey) -> &'static str {
    match key {
        // Letters and digits share their printable keysym name.
        HostKey::KeyA
        | HostKey::KeyB
        | HostKey::KeyC
        | HostKey::KeyD
        | HostKey::KeyE
        | HostKey::KeyF
        | HostKey::KeyG
        | HostKey::KeyH
        | HostKey::KeyI
        | HostKey::KeyJ
        | HostKey::KeyK
        | HostKey::KeyL
        | HostKey::KeyM
        | HostKey::KeyN
        | HostKey::KeyO
        | HostKey::KeyP
        | HostKey::KeyQ
        | HostKey::KeyR
        | HostKey::KeyS
        | HostKey::KeyT
        | HostKey::KeyU
        | HostKey::KeyV
        | HostKey::KeyW
        | HostKey::KeyX
        | HostKey::KeyY
        | HostKey::KeyZ
        | HostKey::Digit0
        | HostKey::Digit1
        | HostKey::Digit2
        | HostKey::Digit3
        | HostKey::Digit4
        | HostKey::Digit5
        | HostKey::Digit6
        | HostKey::Digit7
        | HostKey::Digit8
        | HostKey::Digit9 => key.name(),

        HostKey::Enter => "Return",
        HostKey::Escape => "Escape",
        HostKey::Backspace => "BackSpace",
        HostKey::Tab => "Tab",
        HostKey::Space => "space",
        HostKey::Minus => "minus",
        HostKey::Equal => "equal",
        HostKey::BracketLeft => "bracketleft",
        HostKey::BracketRight => "bracketright",
        HostKey::Backslash => "backslash",
        HostKey::Semicolon => "semicolon",
        HostKey::Quote => "apostrophe",
        HostKey::Backquote => "grave",
        HostKey::Comma => "comma",
        HostKey::Period => "period",
        HostKey::Slash => "slash",

        HostKey::F1 => "F1",
        HostKey::F2 => "F2",
        HostKey::F3 => "F3",
        HostKey::F4 => "F4",
        HostKey::F5 => "F5",
        HostKey::F6 => "F6",
        HostKey::F7 => "F7",
        HostKey::F8 => "F8",
        HostKey::F9 => "F9",
        HostKey::F10 => "F10",
        HostKey::F11 => "F11",
        HostKey::F12 => "F12",

        HostKey::Insert => "Insert",
        HostKey::Home => "Home",
        HostKey::PageUp => "Prior",
        HostKey::Delete => "Delete",
        HostKey::End => "End",
        HostKey::PageDown => "Next",
        HostKey::ArrowRight => "Right",
        HostKey::ArrowLeft => "Left",
        HostKey::ArrowDown => "Down",
        HostKey::ArrowUp => "Up",
    }
}

/// Renders a whole chord as `+`-joined keysym names, modifiers first.
pub fn chord(keystroke: &Keystroke) -> String {
    let mods = keystroke.modifiers();
    let mut parts: Vec<&str> = Vec::with_capacity(5);
    if mods.contains(Modifiers::CTRL) {
        parts.push("ctrl");
    }
    if mods.contains(Modifiers::SHIFT) {
        parts.push("shift");
    }
    if mods.contains(Modifiers::ALT) {
        parts.push("alt");
    }
    if mods.contains(Modifiers::META) {
        parts.push("super");
    }
    parts.push(keysym_name(keystroke.key()));
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_use_lowercase_keysym() {
        assert_eq!(keysym_name(HostKey::KeyB), "b");
        assert_eq!(keysym_name(HostKey::KeyZ), "z");
    }

    #[test]
    fn test_navigation_keys_use_x11_names() {
        assert_eq!(keysym_name(HostKey::ArrowRight), "Right");
        assert_eq!(keysym_name(HostKey::PageUp), "Prior");
        assert_eq!(keysym_name(HostKey::PageDown), "Next");
        assert_eq!(keysym_name(HostKey::Enter), "Return");
    }

    #[test]
    fn test_chord_orders_modifiers_before_key() {
        let ks: Keystroke = "shift+ctrl+f".parse().unwrap();
        assert_eq!(chord(&ks), "ctrl+shift+f");
    }

    #[test]
    fn test_chord_maps_meta_to_super() {
        let ks: Keystroke = "cmd+space".parse().unwrap();
        assert_eq!(chord(&ks), "super+space");
    }

    #[test]
    fn test_bare_key_chord_has_no_separator() {
        let ks: Keystroke = "Space".parse().unwrap();
        assert_eq!(chord(&ks), "space");
    }
}
