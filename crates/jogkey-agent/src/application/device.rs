//! Device session seam.
//!
//! A [`DeviceSession`] is an open, exclusively owned connection to one
//! controller.  The session controller drives it from a single thread:
//! authenticate once, then alternate between [`DeviceSession::poll`] and
//! the LED/jog writes produced by the state machines.
//!
//! Writes are fire-and-forget.  A write error means the transport itself is
//! gone, so it is reported as a [`TransportError`] and ends the session.

use std::time::Duration;

use jogkey_core::{JogLed, JogMode, Key, LedMask};
use thiserror::Error;

/// One report from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    /// The complete set of keys held right now.
    Keys(Vec<Key>),
    /// A wheel reading in `mode`.  `input` is the raw value as reported,
    /// either an integer or `clear`.
    Jog { mode: JogMode, input: String },
    /// Battery status; informational only.
    Battery { charging: bool, level: u8 },
}

/// Error type for device transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("device disconnected")]
    Disconnected,
    #[error("device authentication failed: {0}")]
    Authentication(String),
    #[error("device session is closed")]
    Closed,
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An open controller session.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceSession: Send {
    /// Completes the device handshake.  Must succeed before any write.
    fn authenticate(&mut self) -> Result<(), TransportError>;

    /// Writes the full key-LED mask.
    fn set_leds(&mut self, leds: LedMask) -> Result<(), TransportError>;

    /// Lights one wheel-select LED, or none.
    fn set_jog_leds(&mut self, led: Option<JogLed>) -> Result<(), TransportError>;

    /// Sets how the wheel reports movement.
    fn set_jog_mode(&mut self, mode: JogMode) -> Result<(), TransportError>;

    /// Waits up to `timeout` for the next event.
    ///
    /// Returns `Ok(None)` when the timeout elapses with nothing to report.
    fn poll(&mut self, timeout: Duration) -> Result<Option<DeviceEvent>, TransportError>;

    /// Releases the device handle.  Further calls fail with
    /// [`TransportError::Closed`].
    fn close(&mut self) -> Result<(), TransportError>;
}
