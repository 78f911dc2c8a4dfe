//! Controller vocabulary: keys, LEDs, jog LEDs and jog modes.
//!
//! Every type here mirrors something the device itself reports or accepts.
//! Names parse from and display as the labels printed on the controller
//! (`CUT`, `SMTH_CUT`, `STOP_PLAY`, ...) so logs and the console device
//! script read the same way the hardware does.

pub mod jog;
pub mod key;
pub mod led;

pub use jog::{JogLed, JogMode};
pub use key::Key;
pub use led::{Led, LedMask};

use thiserror::Error;

/// Error returned when a device name or code does not match any known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceNameError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
    #[error("unknown jog mode: {0:?}")]
    UnknownJogMode(String),
}
