//! Shortcut bindings: what each controller key does on its trigger edge.
//!
//! A [`ShortcutBinding`] has up to three parts:
//!
//! | Part        | Effect                                                     |
//! |-------------|------------------------------------------------------------|
//! | `primary`   | Keystroke sent on the trigger edge                         |
//! | `led`       | LED toggled on the trigger edge                            |
//! | `secondary` | Keystroke sent *instead of* `primary` while the LED is lit |
//!
//! A binding with a `secondary` is a *dual-action* key: the first press
//! sends `primary` and lights the LED; the next press finds the LED already
//! lit, sends `secondary`, and turns the LED off.
//!
//! [`BindingTable::new`] checks every entry against the device's own LED
//! map, so a binding can never toggle an LED that belongs to another key.

use std::collections::HashMap;

use thiserror::Error;

use crate::device::{Key, Led};
use crate::keymap::{Keystroke, KeystrokeError};

/// Error returned when a binding table is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("{key} is bound twice")]
    Duplicate { key: Key },
    #[error("{key} binding does nothing: no keystroke and no LED")]
    Empty { key: Key },
    #[error("{key} binding toggles {led:?}, but that LED is not under {key}")]
    ForeignLed { key: Key, led: Led },
    #[error("{key} has no LED to toggle")]
    NoLed { key: Key },
    #[error("{key} has a secondary keystroke but no LED to select it")]
    SecondaryWithoutLed { key: Key },
    #[error("{key} keystroke is invalid: {source}")]
    Keystroke {
        key: Key,
        #[source]
        source: KeystrokeError,
    },
}

/// The action attached to one controller key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutBinding {
    primary: Option<Keystroke>,
    led: Option<Led>,
    secondary: Option<Keystroke>,
}

impl ShortcutBinding {
    /// A plain key: sends `keystroke`, no LED.
    pub fn keystroke(keystroke: Keystroke) -> Self {
        Self { primary: Some(keystroke), led: None, secondary: None }
    }

    /// A toggle key: sends `keystroke` and flips `led` every time.
    pub fn toggle(keystroke: Keystroke, led: Led) -> Self {
        Self { primary: Some(keystroke), led: Some(led), secondary: None }
    }

    /// A dual-action key: `primary` while `led` is off, `secondary` while on.
    pub fn dual(primary: Keystroke, led: Led, secondary: Keystroke) -> Self {
        Self { primary: Some(primary), led: Some(led), secondary: Some(secondary) }
    }

    /// An LED toggle with no keystroke.
    pub fn led_only(led: Led) -> Self {
        Self { primary: None, led: Some(led), secondary: None }
    }

    /// Builds a binding from shortcut strings.
    pub fn parse(
        primary: &str,
        led: Option<Led>,
        secondary: Option<&str>,
    ) -> Result<Self, KeystrokeError> {
        Ok(Self {
            primary: Some(primary.parse()?),
            led,
            secondary: secondary.map(str::parse).transpose()?,
        })
    }

    pub fn primary(&self) -> Option<Keystroke> {
        self.primary
    }

    pub fn led(&self) -> Option<Led> {
        self.led
    }

    pub fn secondary(&self) -> Option<Keystroke> {
        self.secondary
    }

    /// Picks the keystroke to send given the LED state *before* the toggle.
    pub fn resolve(&self, led_was_on: bool) -> Option<Keystroke> {
        match self.secondary {
            Some(secondary) if led_was_on => Some(secondary),
            _ => self.primary,
        }
    }

    fn validate(&self, key: Key) -> Result<(), BindingError> {
        if self.primary.is_none() && self.led.is_none() {
            return Err(BindingError::Empty { key });
        }
        if let Some(led) = self.led {
            if key.led() != Some(led) {
                return Err(BindingError::ForeignLed { key, led });
            }
        }
        if self.secondary.is_some() && self.led.is_none() {
            return Err(BindingError::SecondaryWithoutLed { key });
        }
        Ok(())
    }
}

/// Immutable, validated map from controller key to binding.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: HashMap<Key, ShortcutBinding>,
}

impl BindingTable {
    /// Builds a table, rejecting duplicate keys and inconsistent bindings.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindingError`] found.
    pub fn new(
        entries: impl IntoIterator<Item = (Key, ShortcutBinding)>,
    ) -> Result<Self, BindingError> {
        let mut bindings = HashMap::new();
        for (key, binding) in entries {
            binding.validate(key)?;
            if bindings.insert(key, binding).is_some() {
                return Err(BindingError::Duplicate { key });
            }
        }
        Ok(Self { bindings })
    }

    /// Builds a table from shortcut strings: `(key, primary, toggles_led, secondary)`.
    ///
    /// `toggles_led` binds the LED under `key` itself.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Keystroke`] for unparsable shortcut strings,
    /// or any validation error from [`BindingTable::new`].
    pub fn parse(entries: &[(Key, &str, bool, Option<&str>)]) -> Result<Self, BindingError> {
        let mut parsed = Vec::with_capacity(entries.len());
        for &(key, primary, toggles_led, secondary) in entries {
            let led = match (toggles_led, key.led()) {
                (false, _) => None,
                (true, Some(led)) => Some(led),
                (true, None) => return Err(BindingError::NoLed { key }),
            };
            let binding = ShortcutBinding::parse(primary, led, secondary)
                .map_err(|source| BindingError::Keystroke { key, source })?;
            parsed.push((key, binding));
        }
        Self::new(parsed)
    }

    /// A table that toggles the LED of every LED-capable key and sends nothing.
    pub fn led_toggles() -> Self {
        let bindings = Key::ALL
            .iter()
            .filter_map(|&key| key.led().map(|led| (key, ShortcutBinding::led_only(led))))
            .collect();
        Self { bindings }
    }

    /// Returns the binding for `key`, if any.
    pub fn get(&self, key: Key) -> Option<&ShortcutBinding> {
        self.bindings.get(&key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::HostKey;

    fn ks(s: &str) -> Keystroke {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolve_uses_primary_while_led_off() {
        let b = ShortcutBinding::dual(ks("b"), Led::Cut, ks("a"));
        assert_eq!(b.resolve(false), Some(ks("b")));
    }

    #[test]
    fn test_resolve_uses_secondary_while_led_on() {
        let b = ShortcutBinding::dual(ks("b"), Led::Cut, ks("a"));
        assert_eq!(b.resolve(true), Some(ks("a")));
    }

    #[test]
    fn test_resolve_without_secondary_ignores_led_state() {
        let b = ShortcutBinding::toggle(ks("n"), Led::Snap);
        assert_eq!(b.resolve(true), Some(ks("n")));
        assert_eq!(b.resolve(false), Some(ks("n")));
    }

    #[test]
    fn test_led_only_resolves_to_nothing() {
        assert_eq!(ShortcutBinding::led_only(Led::Cam1).resolve(false), None);
    }

    #[test]
    fn test_table_rejects_foreign_led() {
        // Arrange – SNAP binding that claims the CUT LED
        let entry = (Key::Snap, ShortcutBinding::toggle(ks("n"), Led::Cut));

        // Act
        let result = BindingTable::new([entry]);

        // Assert
        assert_eq!(
            result.unwrap_err(),
            BindingError::ForeignLed { key: Key::Snap, led: Led::Cut }
        );
    }

    #[test]
    fn test_table_rejects_duplicates() {
        let result = BindingTable::new([
            (Key::In, ShortcutBinding::keystroke(ks("i"))),
            (Key::In, ShortcutBinding::keystroke(ks("j"))),
        ]);
        assert_eq!(result.unwrap_err(), BindingError::Duplicate { key: Key::In });
    }

    #[test]
    fn test_parse_rejects_led_toggle_on_key_without_led() {
        let result = BindingTable::parse(&[(Key::In, "i", true, None)]);
        assert!(matches!(result, Err(BindingError::NoLed { key: Key::In })));
    }

    #[test]
    fn test_parse_rejects_secondary_without_led() {
        let result = BindingTable::parse(&[(Key::In, "i", false, Some("j"))]);
        assert!(matches!(result, Err(BindingError::SecondaryWithoutLed { key: Key::In })));
    }

    #[test]
    fn test_parse_reports_bad_keystroke_with_key() {
        let result = BindingTable::parse(&[(Key::Out, "ctrl+", false, None)]);
        assert!(matches!(result, Err(BindingError::Keystroke { key: Key::Out, .. })));
    }

    #[test]
    fn test_parse_builds_dual_binding() {
        // Arrange / Act
        let table = BindingTable::parse(&[(Key::Cut, "b", true, Some("a"))]).unwrap();

        // Assert
        let b = table.get(Key::Cut).unwrap();
        assert_eq!(b.primary(), Some(Keystroke::from(HostKey::KeyB)));
        assert_eq!(b.led(), Some(Led::Cut));
        assert_eq!(b.secondary(), Some(Keystroke::from(HostKey::KeyA)));
    }

    #[test]
    fn test_led_toggles_covers_every_led_key() {
        let table = BindingTable::led_toggles();
        assert_eq!(table.len(), Led::ALL.len());
        assert_eq!(table.get(Key::Cam5), Some(&ShortcutBinding::led_only(Led::Cam5)));
        assert!(table.get(Key::In).is_none());
    }
}
