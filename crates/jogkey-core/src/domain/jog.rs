//! Jog-wheel accumulator.
//!
//! The wheel reports one reading per movement.  In the relative modes a
//! reading is a signed delta; in the absolute modes it is a position.  The
//! accumulator keeps a running sum and returns, for every reading, the
//! *instantaneous* value `sum + reading`.
//!
//! Only a large flick (`|reading| > 3500`) is folded into the running sum.
//! Small nudges show up in the returned value but are forgotten afterwards,
//! so slow scrubbing never drifts while a hard spin keeps escalating.  In
//! [`JogMode::AbsoluteDeadzero`] the reading is already a position and is
//! never folded in.
//!
//! A [`RatePolicy`] optionally turns every Nth reading into one step
//! keystroke (`next` for a positive value, `prev` otherwise), which keeps a
//! fast spin from flooding the host with keystrokes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::device::{JogLed, JogMode, Key};
use crate::domain::action::Action;
use crate::keymap::{HostKey, Keystroke};

/// Readings with a larger magnitude are folded into the running sum.
pub const ESCALATION_THRESHOLD: u64 = 3500;

/// Default number of wheel readings per step keystroke.
pub const DEFAULT_RATE: u32 = 5;

/// Error returned for jog input that is neither a number nor `clear`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JogError {
    #[error("parameter must be a number")]
    Parse { input: String },
}

/// One parsed wheel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogInput {
    /// Reset the running sum.
    Clear,
    /// A relative delta or absolute position, depending on the mode.
    Delta(i64),
}

impl FromStr for JogInput {
    type Err = JogError;

    /// `clear` must match exactly; numbers may carry surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "clear" {
            return Ok(JogInput::Clear);
        }
        s.trim()
            .parse::<i64>()
            .map(JogInput::Delta)
            .map_err(|_| JogError::Parse { input: s.to_string() })
    }
}

impl fmt::Display for JogInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JogInput::Clear => f.write_str("clear"),
            JogInput::Delta(v) => write!(f, "{v}"),
        }
    }
}

/// Converts every `every`th wheel reading into one step keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    every: u32,
    next: Keystroke,
    prev: Keystroke,
}

impl RatePolicy {
    /// Creates a policy.  `every` is clamped to at least 1.
    pub fn new(every: u32, next: Keystroke, prev: Keystroke) -> Self {
        Self { every: every.max(1), next, prev }
    }

    /// Returns a copy with a different period, or `None` when `every` is 0.
    pub fn with_every(self, every: u32) -> Option<Self> {
        (every > 0).then_some(Self { every, ..self })
    }

    pub fn every(&self) -> u32 {
        self.every
    }

    pub fn next(&self) -> Keystroke {
        self.next
    }

    pub fn prev(&self) -> Keystroke {
        self.prev
    }

    fn step_for(&self, value: i64) -> Keystroke {
        if value > 0 {
            self.next
        } else {
            self.prev
        }
    }
}

impl Default for RatePolicy {
    /// Every fifth reading steps with the arrow keys.
    fn default() -> Self {
        Self::new(
            DEFAULT_RATE,
            Keystroke::from(HostKey::ArrowRight),
            Keystroke::from(HostKey::ArrowLeft),
        )
    }
}

/// Running state of the jog wheel for one session.
#[derive(Debug, Clone, Default)]
pub struct JogAccumulator {
    summation: i64,
    mode: JogMode,
    jog_led: Option<JogLed>,
    rate: Option<RatePolicy>,
    events: u32,
}

impl JogAccumulator {
    pub fn new(rate: Option<RatePolicy>) -> Self {
        Self { rate, ..Self::default() }
    }

    /// Parses `input` and applies it; see [`JogAccumulator::apply`].
    ///
    /// # Errors
    ///
    /// Returns [`JogError::Parse`] when `input` is neither `clear` nor an
    /// integer.  The accumulator is left untouched in that case.
    pub fn accumulate(
        &mut self,
        input: &str,
        mode: JogMode,
        actions: &mut Vec<Action>,
    ) -> Result<Option<i64>, JogError> {
        let input: JogInput = input.parse()?;
        Ok(self.apply(input, mode, actions))
    }

    /// Applies one reading taken in `mode`.
    ///
    /// `Clear` zeroes the running sum and returns `None`.  A delta returns
    /// `Some(sum + delta)`; a large delta outside dead-zero mode is first
    /// added to the sum and pushes a [`Action::SetJogMode`] re-assert.
    pub fn apply(&mut self, input: JogInput, mode: JogMode, actions: &mut Vec<Action>) -> Option<i64> {
        match input {
            JogInput::Clear => {
                self.summation = 0;
                None
            }
            JogInput::Delta(delta) => {
                if delta.unsigned_abs() > ESCALATION_THRESHOLD && mode != JogMode::AbsoluteDeadzero {
                    self.summation = self.summation.saturating_add(delta);
                    self.mode = mode;
                    actions.push(Action::SetJogMode(mode));
                }
                Some(self.summation.saturating_add(delta))
            }
        }
    }

    /// Handles one wheel event end to end: accumulate, trace, and apply the
    /// rate policy.
    ///
    /// Only readings that produce a value count towards the rate period;
    /// `clear` does not.
    ///
    /// # Errors
    ///
    /// Propagates [`JogError::Parse`]; nothing is counted in that case.
    pub fn on_jog(&mut self, mode: JogMode, input: &str) -> Result<Vec<Action>, JogError> {
        let mut actions = Vec::new();
        let Some(value) = self.accumulate(input, mode, &mut actions)? else {
            debug!("jog mode {}: cleared", mode.code());
            return Ok(actions);
        };
        debug!("jog mode {}: value {}", mode.code(), value);

        if let Some(rate) = self.rate {
            self.events += 1;
            if self.events >= rate.every {
                self.events = 0;
                actions.push(Action::SendKeystroke(rate.step_for(value)));
            }
        }
        Ok(actions)
    }

    /// Selects the wheel role of `key`, if it has one.
    ///
    /// Pushes the jog LED and jog mode writes, zeroes the running sum and
    /// returns `true`.  Keys without a wheel role return `false` and change
    /// nothing.
    pub fn set_mode_for_key(&mut self, key: Key, actions: &mut Vec<Action>) -> bool {
        let Some((led, mode)) = key.wheel_role() else {
            return false;
        };
        self.mode = mode;
        self.jog_led = Some(led);
        self.summation = 0;
        actions.push(Action::SetJogLeds(Some(led)));
        actions.push(Action::SetJogMode(mode));
        true
    }

    /// Forgets the wheel selection and running sum.
    pub fn reset(&mut self) {
        self.summation = 0;
        self.jog_led = None;
        self.events = 0;
    }

    pub fn summation(&self) -> i64 {
        self.summation
    }

    pub fn mode(&self) -> JogMode {
        self.mode
    }

    pub fn jog_led(&self) -> Option<JogLed> {
        self.jog_led
    }

    pub fn rate(&self) -> Option<RatePolicy> {
        self.rate
    }
}
