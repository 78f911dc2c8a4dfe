//! Physical keys on the controller.
//!
//! # Report codes
//!
//! The device reports each held key as a 16-bit code inside its key report.
//! The numeric value of each [`Key`] variant is that code.  Codes are not
//! contiguous: gaps correspond to positions with no physical key.
//!
//! # Roles
//!
//! A key can carry two device-level roles, both answered by exhaustive
//! `match`es so adding a variant forces a decision:
//!
//! - [`Key::led`] – the LED bit sitting under the key cap, if any.
//! - [`Key::wheel_role`] – for the three wheel-select keys, which jog mode
//!   and jog LED they select.

use std::fmt;
use std::str::FromStr;

use super::jog::{JogLed, JogMode};
use super::led::Led;
use super::DeviceNameError;

/// A physical key on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum Key {
    SmartInsrt = 0x01,
    Appnd = 0x02,
    RiplOwr = 0x03,
    CloseUp = 0x04,
    PlaceOnTop = 0x05,
    SrcOwr = 0x06,
    In = 0x07,
    Out = 0x08,
    TrimIn = 0x09,
    TrimOut = 0x0A,
    Roll = 0x0B,
    SlipSrc = 0x0C,
    SlipDest = 0x0D,
    TransDur = 0x0E,
    Cut = 0x0F,
    Dis = 0x10,
    SmthCut = 0x11,
    Source = 0x1A,
    Timeline = 0x1B,
    Shtl = 0x1C,
    Jog = 0x1D,
    Scrl = 0x1E,
    SyncBin = 0x1F,
    Trans = 0x22,
    VideoOnly = 0x25,
    AudioOnly = 0x26,
    RiplDel = 0x2B,
    AudioLevel = 0x2C,
    FullView = 0x2D,
    Snap = 0x2E,
    Split = 0x2F,
    LiveOwr = 0x30,
    Esc = 0x31,
    Cam1 = 0x33,
    Cam2 = 0x34,
    Cam3 = 0x35,
    Cam4 = 0x36,
    Cam5 = 0x37,
    Cam6 = 0x38,
    Cam7 = 0x39,
    Cam8 = 0x3A,
    Cam9 = 0x3B,
    StopPlay = 0x3C,
}

impl Key {
    /// Every key, in report-code order.
    pub const ALL: [Key; 43] = [
        Key::SmartInsrt,
        Key::Appnd,
        Key::RiplOwr,
        Key::CloseUp,
        Key::PlaceOnTop,
        Key::SrcOwr,
        Key::In,
        Key::Out,
        Key::TrimIn,
        Key::TrimOut,
        Key::Roll,
        Key::SlipSrc,
        Key::SlipDest,
        Key::TransDur,
        Key::Cut,
        Key::Dis,
        Key::SmthCut,
        Key::Source,
        Key::Timeline,
        Key::Shtl,
        Key::Jog,
        Key::Scrl,
        Key::SyncBin,
        Key::Trans,
        Key::VideoOnly,
        Key::AudioOnly,
        Key::RiplDel,
        Key::AudioLevel,
        Key::FullView,
        Key::Snap,
        Key::Split,
        Key::LiveOwr,
        Key::Esc,
        Key::Cam1,
        Key::Cam2,
        Key::Cam3,
        Key::Cam4,
        Key::Cam5,
        Key::Cam6,
        Key::Cam7,
        Key::Cam8,
        Key::Cam9,
        Key::StopPlay,
    ];

    /// Looks up a key by its report code.
    ///
    /// Returns `None` for codes with no physical key (including `0`, which
    /// the device uses to pad unused report slots).
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.code() == code)
    }

    /// Returns the report code for this key.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Returns the device label for this key (e.g. `"SMTH_CUT"`).
    pub fn name(self) -> &'static str {
        match self {
            Key::SmartInsrt => "SMART_INSRT",
            Key::Appnd => "APPND",
            Key::RiplOwr => "RIPL_OWR",
            Key::CloseUp => "CLOSE_UP",
            Key::PlaceOnTop => "PLACE_ON_TOP",
            Key::SrcOwr => "SRC_OWR",
            Key::In => "IN",
            Key::Out => "OUT",
            Key::TrimIn => "TRIM_IN",
            Key::TrimOut => "TRIM_OUT",
            Key::Roll => "ROLL",
            Key::SlipSrc => "SLIP_SRC",
            Key::SlipDest => "SLIP_DEST",
            Key::TransDur => "TRANS_DUR",
            Key::Cut => "CUT",
            Key::Dis => "DIS",
            Key::SmthCut => "SMTH_CUT",
            Key::Source => "SOURCE",
            Key::Timeline => "TIMELINE",
            Key::Shtl => "SHTL",
            Key::Jog => "JOG",
            Key::Scrl => "SCRL",
            Key::SyncBin => "SYNC_BIN",
            Key::Trans => "TRANS",
            Key::VideoOnly => "VIDEO_ONLY",
            Key::AudioOnly => "AUDIO_ONLY",
            Key::RiplDel => "RIPL_DEL",
            Key::AudioLevel => "AUDIO_LEVEL",
            Key::FullView => "FULL_VIEW",
            Key::Snap => "SNAP",
            Key::Split => "SPLIT",
            Key::LiveOwr => "LIVE_OWR",
            Key::Esc => "ESC",
            Key::Cam1 => "CAM1",
            Key::Cam2 => "CAM2",
            Key::Cam3 => "CAM3",
            Key::Cam4 => "CAM4",
            Key::Cam5 => "CAM5",
            Key::Cam6 => "CAM6",
            Key::Cam7 => "CAM7",
            Key::Cam8 => "CAM8",
            Key::Cam9 => "CAM9",
            Key::StopPlay => "STOP_PLAY",
        }
    }

    /// Returns the LED under this key, if the key has one.
    pub fn led(self) -> Option<Led> {
        match self {
            Key::CloseUp => Some(Led::CloseUp),
            Key::Cut => Some(Led::Cut),
            Key::Dis => Some(Led::Dis),
            Key::SmthCut => Some(Led::SmthCut),
            Key::Trans => Some(Led::Trans),
            Key::Snap => Some(Led::Snap),
            Key::Cam7 => Some(Led::Cam7),
            Key::Cam8 => Some(Led::Cam8),
            Key::Cam9 => Some(Led::Cam9),
            Key::LiveOwr => Some(Led::LiveOwr),
            Key::Cam4 => Some(Led::Cam4),
            Key::Cam5 => Some(Led::Cam5),
            Key::Cam6 => Some(Led::Cam6),
            Key::VideoOnly => Some(Led::VideoOnly),
            Key::Cam1 => Some(Led::Cam1),
            Key::Cam2 => Some(Led::Cam2),
            Key::Cam3 => Some(Led::Cam3),
            Key::AudioOnly => Some(Led::AudioOnly),
            Key::SmartInsrt
            | Key::Appnd
            | Key::RiplOwr
            | Key::PlaceOnTop
            | Key::SrcOwr
            | Key::In
            | Key::Out
            | Key::TrimIn
            | Key::TrimOut
            | Key::Roll
            | Key::SlipSrc
            | Key::SlipDest
            | Key::TransDur
            | Key::Source
            | Key::Timeline
            | Key::Shtl
            | Key::Jog
            | Key::Scrl
            | Key::SyncBin
            | Key::RiplDel
            | Key::AudioLevel
            | Key::FullView
            | Key::Split
            | Key::Esc
            | Key::StopPlay => None,
        }
    }

    /// Returns the jog LED and jog mode selected by a wheel-select key.
    ///
    /// Only `SHTL`, `JOG` and `SCRL` have a wheel role.
    pub fn wheel_role(self) -> Option<(JogLed, JogMode)> {
        match self {
            Key::Shtl => Some((JogLed::Shtl, JogMode::Relative2)),
            Key::Jog => Some((JogLed::Jog, JogMode::AbsoluteContinuous)),
            Key::Scrl => Some((JogLed::Scrl, JogMode::AbsoluteDeadzero)),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = DeviceNameError;

    /// Parses a device label, ignoring ASCII case (`"cut"`, `"SMTH_CUT"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DeviceNameError::UnknownKey(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_finds_every_key() {
        for key in Key::ALL {
            assert_eq!(Key::from_code(key.code()), Some(key), "{key} lost its code");
        }
    }

    #[test]
    fn test_from_code_rejects_padding_and_gaps() {
        for code in [0x00, 0x12, 0x20, 0x32, 0x3D, 0xFFFF] {
            assert_eq!(Key::from_code(code), None, "0x{code:02X} should not be a key");
        }
    }

    #[test]
    fn test_all_is_sorted_by_code_without_duplicates() {
        for pair in Key::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code(), "{} / {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_name_parses_back_case_insensitively() {
        for key in Key::ALL {
            assert_eq!(key.name().parse::<Key>(), Ok(key));
            assert_eq!(key.name().to_ascii_lowercase().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(
            "JOG_UP".parse::<Key>(),
            Err(DeviceNameError::UnknownKey("JOG_UP".to_string()))
        );
    }

    #[test]
    fn test_only_wheel_select_keys_have_a_wheel_role() {
        let wheel: Vec<Key> = Key::ALL.iter().copied().filter(|k| k.wheel_role().is_some()).collect();
        assert_eq!(wheel, vec![Key::Shtl, Key::Jog, Key::Scrl]);
    }

    #[test]
    fn test_scrl_selects_deadzero_mode() {
        assert_eq!(
            Key::Scrl.wheel_role(),
            Some((JogLed::Scrl, JogMode::AbsoluteDeadzero))
        );
    }

    #[test]
    fn test_eighteen_keys_carry_an_led_and_each_led_once() {
        let leds: Vec<Led> = Key::ALL.iter().filter_map(|k| k.led()).collect();
        assert_eq!(leds.len(), 18);
        for led in Led::ALL {
            assert_eq!(leds.iter().filter(|l| **l == led).count(), 1, "{led:?}");
        }
    }

    #[test]
    fn test_esc_and_wheel_keys_have_no_led() {
        for key in [Key::Esc, Key::Shtl, Key::Jog, Key::Scrl, Key::StopPlay] {
            assert_eq!(key.led(), None, "{key} should have no LED");
        }
    }
}
