//! Scripted mock device for testing.
//!
//! Plays back a fixed list of poll results and records every write, so tests
//! can drive a whole session and then inspect exactly what the device was
//! told, in order.
//!
//! `MockDevice` is cheap to clone; clones share the same script and log.
//! Hand one clone to the session controller and keep one for assertions.
//!
//! When the script runs out, `poll` reports [`TransportError::Disconnected`],
//! which ends any session that did not terminate on its own.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jogkey_core::{JogLed, JogMode, LedMask};

use crate::application::device::{DeviceEvent, DeviceSession, TransportError};

/// One scripted result of [`DeviceSession::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockPoll {
    /// Deliver this event.
    Event(DeviceEvent),
    /// Time out with nothing to report.
    Idle,
    /// Fail with an I/O error.
    Fail,
}

/// A call made on the mock, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    Authenticate,
    SetLeds(LedMask),
    SetJogLeds(Option<JogLed>),
    SetJogMode(JogMode),
    Close,
}

#[derive(Debug, Default)]
struct State {
    script: VecDeque<MockPoll>,
    calls: Vec<DeviceCall>,
    closed: bool,
    fail_authentication: bool,
}

/// A [`DeviceSession`] that replays a script and records writes.
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    state: Arc<Mutex<State>>,
}

impl MockDevice {
    /// Creates a device that will deliver `events` in order.
    pub fn with_events(events: impl IntoIterator<Item = DeviceEvent>) -> Self {
        Self::with_script(events.into_iter().map(MockPoll::Event))
    }

    /// Creates a device that will replay `script` in order.
    pub fn with_script(script: impl IntoIterator<Item = MockPoll>) -> Self {
        let state = State { script: script.into_iter().collect(), ..State::default() };
        Self { state: Arc::new(Mutex::new(state)) }
    }

    /// Makes `authenticate` fail.
    pub fn failing_authentication(self) -> Self {
        self.lock().fail_authentication = true;
        self
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.lock().calls.clone()
    }

    /// The most recent LED mask written, if any.
    pub fn last_leds(&self) -> Option<LedMask> {
        self.lock().calls.iter().rev().find_map(|c| match c {
            DeviceCall::SetLeds(mask) => Some(*mask),
            _ => None,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("lock poisoned")
    }

    fn record(&self, call: DeviceCall) -> Result<(), TransportError> {
        let mut state = self.lock();
        if state.closed {
            return Err(TransportError::Closed);
        }
        state.calls.push(call);
        Ok(())
    }
}

impl DeviceSession for MockDevice {
    fn authenticate(&mut self) -> Result<(), TransportError> {
        self.record(DeviceCall::Authenticate)?;
        if self.lock().fail_authentication {
            return Err(TransportError::Authentication("mock refused".into()));
        }
        Ok(())
    }

    fn set_leds(&mut self, leds: LedMask) -> Result<(), TransportError> {
        self.record(DeviceCall::SetLeds(leds))
    }

    fn set_jog_leds(&mut self, led: Option<JogLed>) -> Result<(), TransportError> {
        self.record(DeviceCall::SetJogLeds(led))
    }

    fn set_jog_mode(&mut self, mode: JogMode) -> Result<(), TransportError> {
        self.record(DeviceCall::SetJogMode(mode))
    }

    fn poll(&mut self, _timeout: Duration) -> Result<Option<DeviceEvent>, TransportError> {
        let mut state = self.lock();
        if state.closed {
            return Err(TransportError::Closed);
        }
        match state.script.pop_front() {
            Some(MockPoll::Event(event)) => Ok(Some(event)),
            Some(MockPoll::Idle) => Ok(None),
            Some(MockPoll::Fail) => Err(TransportError::Io(std::io::Error::other("mock failure"))),
            None => Err(TransportError::Disconnected),
        }
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.record(DeviceCall::Close)?;
        self.lock().closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jogkey_core::Key;

    #[test]
    fn test_mock_device_replays_script_then_disconnects() {
        // Arrange
        let mut dev = MockDevice::with_script([
            MockPoll::Idle,
            MockPoll::Event(DeviceEvent::Keys(vec![Key::In])),
        ]);

        // Act / Assert
        assert_eq!(dev.poll(Duration::ZERO).unwrap(), None);
        assert_eq!(dev.poll(Duration::ZERO).unwrap(), Some(DeviceEvent::Keys(vec![Key::In])));
        assert!(matches!(dev.poll(Duration::ZERO), Err(TransportError::Disconnected)));
    }

    #[test]
    fn test_clones_share_the_call_log() {
        let observer = MockDevice::default();
        let mut dev = observer.clone();

        dev.set_leds(LedMask::NONE).unwrap();
        dev.close().unwrap();

        assert_eq!(observer.calls(), vec![DeviceCall::SetLeds(LedMask::NONE), DeviceCall::Close]);
        assert!(observer.is_closed());
    }

    #[test]
    fn test_closed_mock_rejects_writes() {
        let mut dev = MockDevice::default();
        dev.close().unwrap();

        assert!(matches!(dev.set_jog_mode(JogMode::Relative0), Err(TransportError::Closed)));
    }
}
