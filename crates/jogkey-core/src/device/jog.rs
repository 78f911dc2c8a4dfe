//! Jog wheel modes and the LEDs above the wheel-select keys.

use std::fmt;
use std::str::FromStr;

use super::DeviceNameError;

/// How the device reports wheel movement.
///
/// The numeric value is the mode byte the device reports and accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum JogMode {
    /// Relative delta since the previous report.
    #[default]
    Relative0 = 0,
    /// Position relative to where the mode was set, about ±4096 per half turn.
    AbsoluteContinuous = 1,
    /// Relative delta, same reporting as `Relative0`.
    Relative2 = 2,
    /// Like `AbsoluteContinuous` with a small dead band around zero.
    AbsoluteDeadzero = 3,
}

impl JogMode {
    /// Every mode, in mode-byte order.
    pub const ALL: [JogMode; 4] = [
        JogMode::Relative0,
        JogMode::AbsoluteContinuous,
        JogMode::Relative2,
        JogMode::AbsoluteDeadzero,
    ];

    /// Returns the mode for a device mode byte.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.code() == code)
    }

    /// Returns the mode byte.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the device-style name (e.g. `"ABSOLUTE_DEADZERO"`).
    pub fn name(self) -> &'static str {
        match self {
            JogMode::Relative0 => "RELATIVE_0",
            JogMode::AbsoluteContinuous => "ABSOLUTE_CONTINUOUS",
            JogMode::Relative2 => "RELATIVE_2",
            JogMode::AbsoluteDeadzero => "ABSOLUTE_DEADZERO",
        }
    }
}

impl fmt::Display for JogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JogMode {
    type Err = DeviceNameError;

    /// Accepts a mode name (any case) or its numeric mode byte.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Ok(code) = wanted.parse::<u8>() {
            return Self::from_code(code)
                .ok_or_else(|| DeviceNameError::UnknownJogMode(wanted.to_string()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DeviceNameError::UnknownJogMode(wanted.to_string()))
    }
}

/// LED above one of the wheel-select keys.
///
/// At most one is lit; "none lit" is expressed as `Option::<JogLed>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JogLed {
    Jog,
    Shtl,
    Scrl,
}

impl JogLed {
    /// Returns the bit written to the device for this LED.
    pub fn bit(self) -> u8 {
        match self {
            JogLed::Jog => 1 << 0,
            JogLed::Shtl => 1 << 1,
            JogLed::Scrl => 1 << 2,
        }
    }
}
