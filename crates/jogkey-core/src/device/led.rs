//! Key LEDs and the LED mask written to the device.
//!
//! The device takes all key LEDs in one 32-bit write; bit `n` lights the LED
//! listed at position `n` in [`Led::ALL`].  [`LedMask`] is the software copy
//! of that word.

use std::fmt;

/// An LED sitting under a key cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    CloseUp,
    Cut,
    Dis,
    SmthCut,
    Trans,
    Snap,
    Cam7,
    Cam8,
    Cam9,
    LiveOwr,
    Cam4,
    Cam5,
    Cam6,
    VideoOnly,
    Cam1,
    Cam2,
    Cam3,
    AudioOnly,
}

impl Led {
    /// Every LED, in bit order.
    pub const ALL: [Led; 18] = [
        Led::CloseUp,
        Led::Cut,
        Led::Dis,
        Led::SmthCut,
        Led::Trans,
        Led::Snap,
        Led::Cam7,
        Led::Cam8,
        Led::Cam9,
        Led::LiveOwr,
        Led::Cam4,
        Led::Cam5,
        Led::Cam6,
        Led::VideoOnly,
        Led::Cam1,
        Led::Cam2,
        Led::Cam3,
        Led::AudioOnly,
    ];

    /// Returns the single-bit mask for this LED.
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Bitset of lit key LEDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LedMask(u32);

impl LedMask {
    /// All LEDs off.
    pub const NONE: LedMask = LedMask(0);

    /// Builds a mask from raw bits, dropping bits with no LED behind them.
    pub fn from_bits(bits: u32) -> Self {
        let valid = Led::ALL.iter().fold(0, |acc, led| acc | led.bit());
        LedMask(bits & valid)
    }

    /// Returns the raw bits to write to the device.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if `led` is lit.
    pub fn contains(self, led: Led) -> bool {
        self.0 & led.bit() != 0
    }

    /// Flips `led` and returns whether it was lit *before* the flip.
    pub fn toggle(&mut self, led: Led) -> bool {
        let was_on = self.contains(led);
        self.0 ^= led.bit();
        was_on
    }

    /// Returns `true` when no LED is lit.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over lit LEDs in bit order.
    pub fn iter(self) -> impl Iterator<Item = Led> {
        Led::ALL.into_iter().filter(move |led| self.contains(*led))
    }
}

impl From<Led> for LedMask {
    fn from(led: Led) -> Self {
        LedMask(led.bit())
    }
}

impl fmt::Display for LedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:05X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_bits_follow_declaration_order() {
        assert_eq!(Led::CloseUp.bit(), 1 << 0);
        assert_eq!(Led::Cut.bit(), 1 << 1);
        assert_eq!(Led::Snap.bit(), 1 << 5);
        assert_eq!(Led::LiveOwr.bit(), 1 << 9);
        assert_eq!(Led::AudioOnly.bit(), 1 << 17);
    }

    #[test]
    fn test_toggle_reports_previous_state() {
        // Arrange
        let mut mask = LedMask::NONE;

        // Act / Assert
        assert!(!mask.toggle(Led::Cut), "first toggle starts from off");
        assert!(mask.contains(Led::Cut));
        assert!(mask.toggle(Led::Cut), "second toggle starts from on");
        assert!(mask.is_empty());
    }

    #[test]
    fn test_toggle_leaves_other_bits_alone() {
        let mut mask = LedMask::from(Led::Snap);
        mask.toggle(Led::Cut);
        assert_eq!(mask.bits(), Led::Snap.bit() | Led::Cut.bit());
    }

    #[test]
    fn test_from_bits_drops_unassigned_bits() {
        let mask = LedMask::from_bits(u32::MAX);
        assert_eq!(mask.bits(), (1 << 18) - 1);
    }

    #[test]
    fn test_iter_lists_lit_leds() {
        let mut mask = LedMask::NONE;
        mask.toggle(Led::Cam3);
        mask.toggle(Led::Cut);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![Led::Cut, Led::Cam3]);
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(LedMask::from(Led::Cut).to_string(), "0x00002");
    }
}
