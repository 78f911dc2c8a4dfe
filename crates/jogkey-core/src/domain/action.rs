//! Output actions produced by the state machines.

use crate::device::{JogLed, JogMode, LedMask};
use crate::keymap::Keystroke;

/// Something the session must do in response to device input.
///
/// Keystrokes go to the host injector; LED and jog-mode writes go back to
/// the device; `Terminate` ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Inject a keystroke into the host input stream.
    SendKeystroke(Keystroke),
    /// Write the full key-LED mask to the device.
    SetLeds(LedMask),
    /// Light one wheel-select LED, or none.
    SetJogLeds(Option<JogLed>),
    /// (Re-)assert the wheel reporting mode on the device.
    SetJogMode(JogMode),
    /// End the session normally.
    Terminate,
}
