//! SessionController: owns one device session from start to teardown.
//!
//! # Lifecycle
//!
//! ```text
//! run()
//!  ├─ start()      authenticate, LEDs off, engage default wheel key
//!  ├─ poll_loop()  poll → dispatch → apply actions, until Terminate,
//!  │               a transport error, or the shutdown flag clears
//!  └─ shutdown()   LEDs off, jog LEDs off, close, flush injector
//! ```
//!
//! `shutdown` runs whatever `start` and `poll_loop` return, so every exit
//! path leaves the device dark and closed.  It is idempotent; calling it a
//! second time is a no-op.
//!
//! # Error policy
//!
//! - Device errors (poll or write) are fatal and end the session.
//! - Injection errors are logged and the session continues.  A host that
//!   drops one keystroke should not cost the user their LED state.
//! - Unparsable jog readings are logged and skipped.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use jogkey_core::{Action, JogAccumulator, Key, KeyStateMachine, LedMask, Profile};
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::application::device::{DeviceEvent, DeviceSession, TransportError};
use crate::application::inject_keystrokes::KeystrokeInjector;

/// Default time to block in one [`DeviceSession::poll`] call.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("device transport failed: {0}")]
    Transport(#[from] TransportError),
}

/// Why a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// `ESC` was held alone.
    Terminated,
    /// The shutdown flag was cleared (Ctrl+C).
    Interrupted,
}

/// Drives one controller session.
pub struct SessionController {
    id: Uuid,
    profile_name: &'static str,
    device: Box<dyn DeviceSession>,
    injector: Arc<dyn KeystrokeInjector>,
    keys: KeyStateMachine,
    jog: JogAccumulator,
    default_wheel_key: Key,
    poll_timeout: Duration,
    running: Arc<AtomicBool>,
    closed: bool,
}

impl SessionController {
    /// Creates a controller with fresh state machines built from `profile`.
    pub fn new(
        profile: &Profile,
        device: Box<dyn DeviceSession>,
        injector: Arc<dyn KeystrokeInjector>,
    ) -> Self {
        let (keys, jog) = profile.state_machines();
        Self {
            id: Uuid::new_v4(),
            profile_name: profile.name(),
            device,
            injector,
            keys,
            jog,
            default_wheel_key: profile.default_wheel_key(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            running: Arc::new(AtomicBool::new(true)),
            closed: false,
        }
    }

    /// Sets how long each poll may block.  Also bounds how quickly a
    /// cleared shutdown flag is noticed.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Shares a flag that ends the poll loop when set to `false`.
    pub fn with_shutdown_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    /// Runs the whole session: start, poll loop, teardown.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error.  When the session itself ended
    /// cleanly but teardown failed, the teardown error is returned.
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        let span = info_span!("session", id = %self.id);
        let _enter = span.enter();

        let outcome = self.start().and_then(|()| self.poll_loop());
        let teardown = self.shutdown();

        match (outcome, teardown) {
            (Ok(end), Ok(())) => {
                info!("session ended: {end:?}");
                Ok(end)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(teardown_err)) => {
                warn!("teardown after failure also failed: {teardown_err}");
                Err(e)
            }
        }
    }

    /// Authenticates and puts the device in its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] if any device call fails.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.device.authenticate()?;
        self.keys.reset();
        self.device.set_leds(LedMask::NONE)?;

        let mut actions = Vec::new();
        self.jog.set_mode_for_key(self.default_wheel_key, &mut actions);
        self.apply(actions)?;

        info!(
            "session started: profile={}, trigger={}, wheel={}",
            self.profile_name,
            self.keys.trigger(),
            self.default_wheel_key
        );
        Ok(())
    }

    /// Polls and dispatches until the session ends.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] on the first device failure.
    pub fn poll_loop(&mut self) -> Result<SessionEnd, SessionError> {
        while self.running.load(Ordering::Relaxed) {
            let Some(event) = self.device.poll(self.poll_timeout)? else {
                continue;
            };
            if let Some(end) = self.dispatch(event)? {
                return Ok(end);
            }
        }
        info!("shutdown requested");
        Ok(SessionEnd::Interrupted)
    }

    /// Routes one event to its state machine and applies the result.
    ///
    /// Returns `Some(end)` when the event ends the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] if an LED or jog write fails.
    pub fn dispatch(&mut self, event: DeviceEvent) -> Result<Option<SessionEnd>, SessionError> {
        match event {
            DeviceEvent::Keys(held) => {
                let actions = self.keys.on_key_snapshot(held, &mut self.jog);
                self.apply(actions)
            }
            DeviceEvent::Jog { mode, input } => match self.jog.on_jog(mode, &input) {
                Ok(actions) => self.apply(actions),
                Err(e) => {
                    warn!("ignoring jog input {input:?}: {e}");
                    Ok(None)
                }
            },
            DeviceEvent::Battery { charging, level } => {
                if charging {
                    info!("Battery {level} % and charging");
                } else {
                    info!("Battery {level} %");
                }
                Ok(None)
            }
        }
    }

    fn apply(&mut self, actions: Vec<Action>) -> Result<Option<SessionEnd>, SessionError> {
        for action in actions {
            match action {
                Action::SendKeystroke(keystroke) => {
                    debug!("sending {keystroke}");
                    if let Err(e) = self.injector.send_keystroke(&keystroke) {
                        error!("failed to inject {keystroke}: {e}");
                    }
                }
                Action::SetLeds(mask) => self.device.set_leds(mask)?,
                Action::SetJogLeds(led) => self.device.set_jog_leds(led)?,
                Action::SetJogMode(mode) => self.device.set_jog_mode(mode)?,
                Action::Terminate => {
                    info!("ESC held alone, ending session");
                    return Ok(Some(SessionEnd::Terminated));
                }
            }
        }
        Ok(None)
    }

    /// Turns every LED off, closes the device and flushes the injector.
    ///
    /// Every step is attempted even if an earlier one fails.
    ///
    /// # Errors
    ///
    /// Returns the first device error encountered.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.keys.reset();
        self.jog.reset();

        let results = [
            self.device.set_leds(LedMask::NONE),
            self.device.set_jog_leds(None),
            self.device.close(),
        ];
        if let Err(e) = self.injector.flush() {
            error!("failed to flush injector: {e}");
        }

        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                warn!("teardown step failed: {e}");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => {
                info!("device closed");
                Ok(())
            }
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current key-LED mask as the session believes it.
    pub fn leds(&self) -> LedMask {
        self.keys.leds()
    }

    /// Current running sum of the jog accumulator.
    pub fn jog_summation(&self) -> i64 {
        self.jog.summation()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
