//! Kernel-level keystroke injection through a uinput virtual keyboard.
//!
//! The injector registers a virtual keyboard with the kernel (`/dev/uinput`)
//! and writes key events to it.  The events enter the input stack below the
//! display server, so this works under X11, Wayland and the console alike.
//!
//! Each keystroke is written as two batches, each closed by a `SYN_REPORT`:
//!
//! ```text
//! modifiers down, key down | SYN
//! key up, modifiers up     | SYN
//! ```
//!
//! Writes are synchronous and happen under one lock, so keystrokes reach the
//! kernel in exactly the order `send_keystroke` was called.
//!
//! # Permissions
//!
//! Opening `/dev/uinput` normally needs root or membership of the `input`
//! group (or a udev rule granting access).  Construction fails with
//! [`InjectionError::Platform`] otherwise.

use std::sync::Mutex;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};
use jogkey_core::keymap::{HostKey, Modifiers};
use jogkey_core::Keystroke;
use tracing::{debug, info};

use crate::application::inject_keystrokes::{InjectionError, KeystrokeInjector};

/// Name the virtual keyboard registers under (visible in `evtest`).
pub const DEVICE_NAME: &str = "jogkey virtual keyboard";

const PRESS: i32 = 1;
const RELEASE: i32 = 0;

/// Modifiers in press order; released in reverse.
const MODIFIER_KEYS: [(Modifiers, Key); 4] = [
    (Modifiers::CTRL, Key::KEY_LEFTCTRL),
    (Modifiers::SHIFT, Key::KEY_LEFTSHIFT),
    (Modifiers::ALT, Key::KEY_LEFTALT),
    (Modifiers::META, Key::KEY_LEFTMETA),
];

/// Injects keystrokes through a uinput virtual keyboard.
pub struct UinputInjector {
    device: Mutex<VirtualDevice>,
}

impl UinputInjector {
    /// Registers the virtual keyboard.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError::Platform`] if `/dev/uinput` cannot be opened
    /// or the device cannot be created.
    pub fn new() -> Result<Self, InjectionError> {
        let mut keys = AttributeSet::<Key>::new();
        for (_, modifier) in MODIFIER_KEYS {
            keys.insert(modifier);
        }
        for host in HostKey::ALL {
            keys.insert(linux_key(host));
        }

        let device = VirtualDeviceBuilder::new()
            .and_then(|builder| builder.name(DEVICE_NAME).with_keys(&keys))
            .and_then(|builder| builder.build())
            .map_err(|e| InjectionError::Platform(format!("cannot create uinput keyboard: {e}")))?;

        info!("uinput keyboard ready: {DEVICE_NAME}");
        Ok(Self { device: Mutex::new(device) })
    }
}

impl KeystrokeInjector for UinputInjector {
    fn send_keystroke(&self, keystroke: &Keystroke) -> Result<(), InjectionError> {
        let [down, up] = key_events(keystroke);
        let mut device = self
            .device
            .lock()
            .map_err(|_| InjectionError::Platform("uinput device lock poisoned".into()))?;
        device
            .emit(&down)
            .and_then(|()| device.emit(&up))
            .map_err(|e| InjectionError::Platform(format!("uinput write failed for {keystroke}: {e}")))?;
        debug!("uinput {keystroke}");
        Ok(())
    }

    /// Nothing is buffered; every write already reached the kernel.
    fn flush(&self) -> Result<(), InjectionError> {
        Ok(())
    }
}

/// Builds the press batch and the release batch for one keystroke.
fn key_events(keystroke: &Keystroke) -> [Vec<InputEvent>; 2] {
    let held: Vec<Key> = MODIFIER_KEYS
        .iter()
        .filter(|(flag, _)| keystroke.modifiers().contains(*flag))
        .map(|&(_, key)| key)
        .collect();
    let key = linux_key(keystroke.key());

    let event = |key: Key, value: i32| InputEvent::new(EventType::KEY, key.0, value);

    let mut down: Vec<InputEvent> = held.iter().map(|&m| event(m, PRESS)).collect();
    down.push(event(key, PRESS));

    let mut up = vec![event(key, RELEASE)];
    up.extend(held.iter().rev().map(|&m| event(m, RELEASE)));

    [down, up]
}

/// Translates a [`HostKey`] to its Linux input-event key code.
fn linux_key(key: HostKey) -> Key {
    match key {
        HostKey::KeyA => Key::KEY_A,
        HostKey::KeyB => Key::KEY_B,
        HostKey::KeyC => Key::KEY_C,
        HostKey::KeyD => Key::KEY_D,
        HostKey::KeyE => Key::KEY_E,
        HostKey::KeyF => Key::KEY_F,
        HostKey::KeyG => Key::KEY_G,
        HostKey::KeyH => Key::KEY_H,
        HostKey::KeyI => Key::KEY_I,
        HostKey::KeyJ => Key::KEY_J,
        HostKey::KeyK => Key::KEY_K,
        HostKey::KeyL => Key::KEY_L,
        HostKey::KeyM => Key::KEY_M,
        HostKey::KeyN => Key::KEY_N,
        HostKey::KeyO => Key::KEY_O,
        HostKey::KeyP => Key::KEY_P,
        HostKey::KeyQ => Key::KEY_Q,
        HostKey::KeyR => Key::KEY_R,
        HostKey::KeyS => Key::KEY_S,
        HostKey::KeyT => Key::KEY_T,
        HostKey::KeyU => Key::KEY_U,
        HostKey::KeyV => Key::KEY_V,
        HostKey::KeyW => Key::KEY_W,
        HostKey::KeyX => Key::KEY_X,
        HostKey::KeyY => Key::KEY_Y,
        HostKey::KeyZ => Key::KEY_Z,
        HostKey::Digit1 => Key::KEY_1,
        HostKey::Digit2 => Key::KEY_2,
        HostKey::Digit3 => Key::KEY_3,
        HostKey::Digit4 => Key::KEY_4,
        HostKey::Digit5 => Key::KEY_5,
        HostKey::Digit6 => Key::KEY_6,
        HostKey::Digit7 => Key::KEY_7,
        HostKey::Digit8 => Key::KEY_8,
        HostKey::Digit9 => Key::KEY_9,
        HostKey::Digit0 => Key::KEY_0,
        HostKey::Enter => Key::KEY_ENTER,
        HostKey::Escape => Key::KEY_ESC,
        HostKey::Backspace => Key::KEY_BACKSPACE,
        HostKey::Tab => Key::KEY_TAB,
        HostKey::Space => Key::KEY_SPACE,
        HostKey::Minus => Key::KEY_MINUS,
        HostKey::Equal => Key::KEY_EQUAL,
        HostKey::BracketLeft => Key::KEY_LEFTBRACE,
        HostKey::BracketRight => Key::KEY_RIGHTBRACE,
        HostKey::Backslash => Key::KEY_BACKSLASH,
        HostKey::Semicolon => Key::KEY_SEMICOLON,
        HostKey::Quote => Key::KEY_APOSTROPHE,
        HostKey::Backquote => Key::KEY_GRAVE,
        HostKey::Comma => Key::KEY_COMMA,
        HostKey::Period => Key::KEY_DOT,
        HostKey::Slash => Key::KEY_SLASH,
        HostKey::F1 => Key::KEY_F1,
        HostKey::F2 => Key::KEY_F2,
        HostKey::F3 => Key::KEY_F3,
        HostKey::F4 => Key::KEY_F4,
        HostKey::F5 => Key::KEY_F5,
        HostKey::F6 => Key::KEY_F6,
        HostKey::F7 => Key::KEY_F7,
        HostKey::F8 => Key::KEY_F8,
        HostKey::F9 => Key::KEY_F9,
        HostKey::F10 => Key::KEY_F10,
        HostKey::F11 => Key::KEY_F11,
        HostKey::F12 => Key::KEY_F12,
        HostKey::Insert => Key::KEY_INSERT,
        HostKey::Home => Key::KEY_HOME,
        HostKey::PageUp => Key::KEY_PAGEUP,
        HostKey::Delete => Key::KEY_DELETE,
        HostKey::End => Key::KEY_END,
        HostKey::PageDown => Key::KEY_PAGEDOWN,
        HostKey::ArrowRight => Key::KEY_RIGHT,
        HostKey::ArrowLeft => Key::KEY_LEFT,
        HostKey::ArrowDown => Key::KEY_DOWN,
        HostKey::ArrowUp => Key::KEY_UP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ks(s: &str) -> Keystroke {
        s.parse().unwrap()
    }

    fn codes(events: &[InputEvent]) -> Vec<(u16, i32)> {
        events.iter().map(|e| (e.code(), e.value())).collect()
    }

    #[test]
    fn test_plain_key_is_one_press_then_one_release() {
        // Arrange / Act
        let [down, up] = key_events(&ks("b"));

        // Assert
        assert_eq!(codes(&down), vec![(Key::KEY_B.0, PRESS)]);
        assert_eq!(codes(&up), vec![(Key::KEY_B.0, RELEASE)]);
    }

    #[test]
    fn test_chord_wraps_key_in_modifiers_in_order() {
        // Arrange / Act
        let [down, up] = key_events(&ks("ctrl+shift+f"));

        // Assert – modifiers pressed first, released last, in mirror order
        assert_eq!(
            codes(&down),
            vec![
                (Key::KEY_LEFTCTRL.0, PRESS),
                (Key::KEY_LEFTSHIFT.0, PRESS),
                (Key::KEY_F.0, PRESS),
            ]
        );
        assert_eq!(
            codes(&up),
            vec![
                (Key::KEY_F.0, RELEASE),
                (Key::KEY_LEFTSHIFT.0, RELEASE),
                (Key::KEY_LEFTCTRL.0, RELEASE),
            ]
        );
    }

    #[test]
    fn test_every_event_is_a_key_event() {
        let [down, up] = key_events(&ks("alt+meta+right"));
        for event in down.iter().chain(&up) {
            assert_eq!(event.event_type(), EventType::KEY);
        }
        assert_eq!(down.len(), 3);
        assert_eq!(up.len(), 3);
    }

    #[test]
    fn test_every_host_key_has_a_distinct_linux_code() {
        let mut seen = std::collections::HashSet::new();
        for host in HostKey::ALL {
            assert!(seen.insert(linux_key(host).0), "{host:?} shares a code");
        }
    }

    #[test]
    #[ignore] // Requires /dev/uinput access (run with: cargo test -- --ignored)
    fn test_create_virtual_keyboard() {
        let injector = UinputInjector::new();
        assert!(injector.is_ok());
    }
}
